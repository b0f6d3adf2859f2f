//! Serialisable check results and plain-text renderings.

use serde::Serialize;

use crate::idf::{Board, HeaderInfo, Units};

const NO_ERRORS: &str = "No errors detected!";

/// Converts a collection length to `u32`, clamping at `u32::MAX`.
pub fn saturate_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Summary of one checked board, returned to JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardReport {
    /// Display identity of the checked file.
    pub file_name: String,
    /// Declared board units.
    pub units: Units,
    /// Header identification fields.
    pub header: HeaderInfo,
    /// Number of shapes parsed.
    pub shape_count: u32,
    /// Number of parts parsed.
    pub part_count: u32,
    /// Number of drilled holes parsed.
    pub drill_count: u32,
    /// Number of diagnostics.
    pub diagnostic_count: u32,
    /// Diagnostics in rule order.
    pub diagnostics: Vec<String>,
}

impl From<&Board> for BoardReport {
    fn from(board: &Board) -> Self {
        Self {
            file_name: board.file_name.clone(),
            units: board.units,
            header: board.header.clone(),
            shape_count: saturate_u32(board.shapes.len()),
            part_count: saturate_u32(board.parts.len()),
            drill_count: saturate_u32(board.drills.len()),
            diagnostic_count: saturate_u32(board.diagnostics().len()),
            diagnostics: board.diagnostics().to_vec(),
        }
    }
}

/// Console form: one diagnostic per line and a trailing blank line, or the
/// all-clear message when there is nothing to report.
pub fn render_console(board: &Board) -> String {
    let mut out = String::new();
    if board.diagnostics().is_empty() {
        out.push_str(NO_ERRORS);
        out.push('\n');
    }
    for message in board.diagnostics() {
        out.push_str(message);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Log form for a batch: each file name, its diagnostics, then a blank line.
pub fn render_log(boards: &[Board]) -> String {
    let mut out = String::new();
    for board in boards {
        out.push_str(&board.file_name);
        out.push_str(":\n");
        for message in board.diagnostics() {
            out.push_str(message);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
