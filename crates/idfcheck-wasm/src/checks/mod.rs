//! Validation engine.
//!
//! Every rule is a pure function of the [`Board`] that returns its
//! diagnostics; [`run_all`] applies them in a fixed order and appends the
//! results to the board.

pub mod arc;
pub mod library;
pub mod rules;

pub use arc::*;
pub use library::*;
pub use rules::*;

use log::debug;

use crate::idf::Board;
use crate::options::CheckOptions;

/// Run the full rule battery against `board`.
///
/// The library rule runs only when `library` is supplied and
/// `options.library_check` is set.
pub fn run_all(board: &mut Board, library: Option<&dyn PartLibrary>, options: &CheckOptions) {
    let before = board.diagnostics().len();

    let mut found = Vec::new();
    found.extend(check_heights(board));
    found.extend(check_negative_coordinates(board));
    found.extend(check_closure(board));
    found.extend(check_ref_des(board));
    found.extend(check_round_cutouts(board, options.cutout_scope));
    found.extend(check_empty(board));
    found.extend(check_arc_tangents(board));
    if let Some(library) = library.filter(|_| options.library_check) {
        found.extend(check_library(board, library));
    }

    for message in found {
        board.push_diagnostic(message);
    }

    debug!(
        "{}: {} new diagnostic(s)",
        board.file_name,
        board.diagnostics().len() - before
    );
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::idf::MISSING_UNITS;

    fn board(text: &str) -> Board {
        match Board::from_text(text, "engine.emn") {
            Ok(board) => board,
            Err(err) => panic!("fixture should parse: {err}"),
        }
    }

    #[test]
    fn diagnostics_follow_fixed_rule_order() {
        let text = ".HEADER\nBOARD_FILE 3.0\nno_units\n.END_HEADER\n\
                    .BOARD_OUTLINE ECAD\n1.6\n0 0 0 0\n0 10 0 0\n0 10 10 0\n.END_BOARD_OUTLINE\n\
                    .PLACEMENT\nPKG PN U1\n-1 5 0 0 TOP PLACED\n.END_PLACEMENT\n";
        let mut b = board(text);
        run_all(&mut b, None, &CheckOptions::default());
        assert_eq!(
            b.diagnostics(),
            [
                MISSING_UNITS.to_string(),
                "Part PKG (U1) at [-1.00,5.00] is in negative X,Y space.".to_string(),
                ".BOARD_OUTLINE starting at [0.00,0.00] is not a closed shape.".to_string(),
            ]
        );
    }

    #[test]
    fn library_rule_is_optional() {
        let text = ".HEADER\nBOARD_FILE 3.0\nb MM\n.END_HEADER\n\
                    .BOARD_OUTLINE ECAD\n1.6\n0 0 0 0\n0 10 0 0\n0 10 10 0\n0 0 0 0\n.END_BOARD_OUTLINE\n\
                    .PLACEMENT\nPKG PN U1\n1 5 0 0 TOP PLACED\n.END_PLACEMENT\n";
        let library = PartsLibrary::new();

        let mut without = board(text);
        run_all(&mut without, None, &CheckOptions::default());
        assert!(without.diagnostics().is_empty());

        let mut with = board(text);
        run_all(&mut with, Some(&library), &CheckOptions::default());
        assert_eq!(with.diagnostics(), ["PKG not found in parts library".to_string()]);

        let mut disabled = board(text);
        let options = CheckOptions {
            library_check: false,
            ..CheckOptions::default()
        };
        run_all(&mut disabled, Some(&library), &options);
        assert!(disabled.diagnostics().is_empty());
    }

    #[test]
    fn empty_input_reports_units_and_missing_shapes() {
        let mut b = board("");
        run_all(&mut b, None, &CheckOptions::default());
        assert_eq!(b.diagnostics().len(), 2);
        assert_eq!(b.diagnostics()[1], "No shapes found. Is this IDF 3.0 data?");
    }

    #[test]
    fn unterminated_header_keeps_shapes_and_parts() {
        let text = ".HEADER\nBOARD_FILE 3.0\nb MM\n\
                    .BOARD_OUTLINE ECAD\n1.6\n0 0 0 0\n0 10 0 0\n0 10 10 0\n0 0 0 0\n.END_BOARD_OUTLINE\n\
                    .PLACEMENT\nPKG PN U1\n-1 5 0 0 TOP PLACED\n.END_PLACEMENT\n";
        let mut b = board(text);
        run_all(&mut b, None, &CheckOptions::default());
        assert_eq!(b.shapes.len(), 1);
        assert_eq!(b.parts.len(), 1);
        assert_eq!(
            b.diagnostics(),
            ["Part PKG (U1) at [-1.00,5.00] is in negative X,Y space.".to_string()]
        );
    }

    #[test]
    fn unterminated_outline_keeps_parts_and_drills() {
        let text = ".HEADER\nBOARD_FILE 3.0\nb MM\n.END_HEADER\n\
                    .BOARD_OUTLINE ECAD\n1.6\n0 0 0 0\n0 10 0 0\n0 10 10 0\n0 0 0 0\n\
                    .DRILLED_HOLES\n0.8 -1 1 PTH J1 PIN ECAD\n.END_DRILLED_HOLES\n\
                    .PLACEMENT\nRES PN R1\n2 -3 0 0 TOP PLACED\n.END_PLACEMENT\n";
        let mut b = board(text);
        run_all(&mut b, None, &CheckOptions::default());
        assert_eq!(b.shapes.len(), 1);
        assert_eq!(b.shapes[0].outline.len(), 4);
        assert_eq!(b.parts.len(), 1);
        assert_eq!(b.drills.len(), 1);
        assert_eq!(
            b.diagnostics(),
            [
                "Part RES (R1) at [2.00,-3.00] is in negative X,Y space.".to_string(),
                "Drill with diameter 0.80 at [-1.00,1.00] is in negative X,Y space.".to_string(),
                "RES (R1) at [2.00,-3.00] has an 'R' reference designator.".to_string(),
            ]
        );
    }
}
