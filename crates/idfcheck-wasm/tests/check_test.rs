//! Integration tests for the validation engine over whole files.

use idfcheck_wasm::check_idf_internal;
use idfcheck_wasm::checks::PartsLibrary;
use idfcheck_wasm::options::{CheckOptions, CutoutScope};

/// Clean fixture → no diagnostics.
#[test]
#[allow(clippy::expect_used)]
fn clean_board_has_no_diagnostics() {
    let data = include_bytes!("fixtures/clean_board.emn");
    let report = check_idf_internal(data, "clean_board.emn", None, &CheckOptions::default())
        .expect("clean fixture should check");
    assert!(report.diagnostics.is_empty(), "got {:?}", report.diagnostics);
    assert_eq!(report.shape_count, 3);
    assert_eq!(report.part_count, 2);
    assert_eq!(report.drill_count, 2);
}

/// Missing units, a negative part and an open outline come out in rule order.
#[test]
#[allow(clippy::expect_used)]
fn no_units_board_reports_in_fixed_order() {
    let data = include_bytes!("fixtures/no_units.emn");
    let report = check_idf_internal(data, "no_units.emn", None, &CheckOptions::default())
        .expect("fixture should check");
    assert_eq!(
        report.diagnostics,
        vec![
            "Could not find units in file",
            "Part CAP-0402 (C1) at [-5.00,10.00] is in negative X,Y space.",
            ".BOARD_OUTLINE starting at [0.00,0.00] is not a closed shape.",
        ]
    );
}

/// Every rule fires once on the defects fixture, in rule order.
#[test]
#[allow(clippy::expect_used)]
fn defects_board_golden_output() {
    let data = include_bytes!("fixtures/defects_board.emn");
    let library: PartsLibrary = ["CONN-2X5"].into_iter().collect();
    let report = check_idf_internal(
        data,
        "defects_board.emn",
        Some(&library),
        &CheckOptions::default(),
    )
    .expect("fixture should check");

    assert_eq!(
        report.diagnostics,
        vec![
            ".PLACE_OUTLINE starting at [20.00,20.00] is too short to be checked in Board Modeler Lite.",
            "Recommend using .PLACE_KEEPOUT instead of zero-height placement areas.",
            "Part RES_0603 (R5) at [40.00,-3.00] is in negative X,Y space.",
            "Drill with diameter 1.00 at [-2.00,5.00] is in negative X,Y space.",
            ".BOARD_OUTLINE starting at [0.00,0.00] is not a closed shape.",
            "RES_0603 (R5) at [40.00,-3.00] has an 'R' reference designator.",
            ".BOARD_OUTLINE starting at [0.00,0.00] has a cutout at [50.00,40.00] that is circular.",
            "Infinitesimal arc intersection found at [12.00,10.00]",
            "RES_0603 (R5) has invalid characters in its part name.",
            "CAP-0402 not found in parts library",
            "Part names with invalid characters were detected. Please check CircuitWorks settings.",
        ]
    );
    assert_eq!(report.diagnostic_count, 11);
}

/// Last-shape cutout scope skips the board outline's round cutout.
#[test]
#[allow(clippy::expect_used)]
fn last_shape_cutout_scope_matches_legacy_output() {
    let data = include_bytes!("fixtures/defects_board.emn");
    let options = CheckOptions {
        cutout_scope: CutoutScope::LastShape,
        ..CheckOptions::default()
    };
    let report = check_idf_internal(data, "defects_board.emn", None, &options)
        .expect("fixture should check");
    assert!(
        !report.diagnostics.iter().any(|d| d.ends_with("that is circular.")),
        "got {:?}",
        report.diagnostics
    );
    assert_eq!(report.diagnostic_count, 7);
}

/// Boards checked independently do not share diagnostics.
#[test]
#[allow(clippy::expect_used)]
fn boards_are_independent_across_threads() {
    let handles: Vec<_> = [
        include_bytes!("fixtures/clean_board.emn").as_slice(),
        include_bytes!("fixtures/no_units.emn").as_slice(),
    ]
    .into_iter()
    .map(|data| {
        std::thread::spawn(move || {
            check_idf_internal(data, "batch.emn", None, &CheckOptions::default())
                .map(|r| r.diagnostic_count)
        })
    })
    .collect();

    let counts: Vec<u32> = handles
        .into_iter()
        .map(|h| h.join().expect("thread should finish").expect("check should pass"))
        .collect();
    assert_eq!(counts, vec![0, 3]);
}
