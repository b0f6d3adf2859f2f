//! Structural rules: heights, coordinate signs, closure, reference
//! designators, round cutouts, and empty files.

use crate::idf::{Board, ShapeKind, SubShape, Units};
use crate::options::CutoutScope;

/// Placement outlines at or below this height (MM) are flagged.
pub const MIN_PLACE_HEIGHT_MM: f64 = 0.026;
/// Placement outlines at or below this height (THOU) are flagged.
pub const MIN_PLACE_HEIGHT_THOU: f64 = 1.0;

const KEEPOUT_HINT: &str =
    "Recommend using .PLACE_KEEPOUT instead of zero-height placement areas.";
const NO_SHAPES: &str = "No shapes found. Is this IDF 3.0 data?";

/// Flag placement outlines too short to be checked downstream, plus one
/// keepout recommendation if any were found.
pub fn check_heights(board: &Board) -> Vec<String> {
    let limit = match board.units {
        Units::Mm => MIN_PLACE_HEIGHT_MM,
        Units::Thou => MIN_PLACE_HEIGHT_THOU,
        Units::Unknown => return Vec::new(),
    };

    let mut out: Vec<String> = board
        .shapes
        .iter()
        .filter(|shape| shape.kind == ShapeKind::PlaceOutline && shape.height <= limit)
        .map(|shape| format!("{shape} is too short to be checked in Board Modeler Lite."))
        .collect();

    if !out.is_empty() {
        out.push(KEEPOUT_HINT.to_string());
    }
    out
}

/// Flag every shape, part, and drill with a coordinate below zero. A shape
/// is reported once no matter how many of its vertices are negative.
pub fn check_negative_coordinates(board: &Board) -> Vec<String> {
    let shapes = board
        .shapes
        .iter()
        .filter(|shape| shape.vertices().any(|v| v.is_negative()))
        .map(|shape| format!("{shape} has coordinates in negative X,Y space."));

    let parts = board
        .parts
        .iter()
        .filter(|part| part.x < 0.0 || part.y < 0.0)
        .map(|part| format!("Part {part} is in negative X,Y space."));

    let drills = board
        .drills
        .iter()
        .filter(|drill| drill.x < 0.0 || drill.y < 0.0)
        .map(|drill| format!("{drill} is in negative X,Y space."));

    shapes.chain(parts).chain(drills).collect()
}

/// Flag outlines and cutouts that do not close.
///
/// A loop of three or more points must end where it starts. A two-point
/// loop must be a 360° arc.
#[allow(clippy::float_cmp)]
pub fn check_closure(board: &Board) -> Vec<String> {
    let mut out = Vec::new();

    for shape in &board.shapes {
        for sub in shape.sub_shapes() {
            match sub.vertices.as_slice() {
                [first, _, .., last] if !first.same_position(last) => {
                    if sub.loop_index() == 0.0 {
                        out.push(format!("{shape} is not a closed shape."));
                    } else {
                        out.push(format!(
                            "{shape} has a cutout at [{:.2},{:.2}] that is not a closed shape.",
                            first.x, first.y
                        ));
                    }
                }
                [_, second] if second.sweep_angle != 360.0 => {
                    out.push(format!("{shape} is not a closed shape."));
                }
                _ => {}
            }
        }
    }

    out
}

/// Flag parts whose reference designator starts with `R`.
pub fn check_ref_des(board: &Board) -> Vec<String> {
    board
        .parts
        .iter()
        .filter(|part| part.ref_des.starts_with('R'))
        .map(|part| format!("{part} has an 'R' reference designator."))
        .collect()
}

/// Flag cutouts that are a single full circle.
pub fn check_round_cutouts(board: &Board, scope: CutoutScope) -> Vec<String> {
    let shapes = match scope {
        CutoutScope::AllShapes => board.shapes.as_slice(),
        CutoutScope::LastShape => board
            .shapes
            .len()
            .checked_sub(1)
            .and_then(|last| board.shapes.get(last..))
            .unwrap_or_default(),
    };

    shapes
        .iter()
        .flat_map(|shape| {
            shape
                .cutouts
                .iter()
                .filter(|cutout| cutout.is_full_circle())
                .filter_map(SubShape::first)
                .map(move |start| {
                    format!(
                        "{shape} has a cutout at [{:.2},{:.2}] that is circular.",
                        start.x, start.y
                    )
                })
        })
        .collect()
}

/// Flag a board with no shapes at all.
pub fn check_empty(board: &Board) -> Vec<String> {
    if board.shapes.is_empty() {
        vec![NO_SHAPES.to_string()]
    } else {
        Vec::new()
    }
}
