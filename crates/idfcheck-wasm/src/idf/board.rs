//! Geometry model builder.
//!
//! Assembles scanned and decoded records into a [`Board`]: shapes grouped
//! into outline and cutout loops, parts, drilled holes, and units.

use log::debug;

use crate::error::IdfError;

use super::records::{decode_drills, decode_header, decode_height, decode_parts, decode_vertices};
use super::scanner::{scan, Section, SectionKind};
use super::types::{Drill, HeaderInfo, Part, Shape, ShapeKind, SubShape, Units, Vertex};

const HEADER_END: &str = ".END_HEADER";

/// Diagnostic recorded when no unit token precedes the end of the header.
pub const MISSING_UNITS: &str = "Could not find units in file";

/// Everything parsed from one IDF file, plus the diagnostics found so far.
///
/// Geometry is fixed once built. Only the validation engine appends to the
/// diagnostic list.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Display identity of the source file.
    pub file_name: String,
    /// Declared board units.
    pub units: Units,
    /// Identification fields from the header section.
    pub header: HeaderInfo,
    /// Shapes in file order.
    pub shapes: Vec<Shape>,
    /// Placed parts in file order.
    pub parts: Vec<Part>,
    /// Drilled holes in file order.
    pub drills: Vec<Drill>,
    diagnostics: Vec<String>,
}

impl Board {
    /// Parse raw file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::InvalidUtf8`] for non-UTF-8 input, or
    /// [`IdfError::ParseError`] if any record fails to decode.
    pub fn parse(data: &[u8], file_name: &str) -> Result<Self, IdfError> {
        let text =
            std::str::from_utf8(data).map_err(|err| IdfError::InvalidUtf8(err.to_string()))?;
        Self::from_text(text, file_name)
    }

    /// Parse an ordered sequence of lines.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::ParseError`] if any record fails to decode.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], file_name: &str) -> Result<Self, IdfError> {
        let text = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<&str>>()
            .join("\n");
        Self::from_text(&text, file_name)
    }

    /// Parse the full text of one file.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::ParseError`] if any record fails to decode.
    pub fn from_text(text: &str, file_name: &str) -> Result<Self, IdfError> {
        let mut diagnostics = Vec::new();

        let units = scan_units(text);
        if units == Units::Unknown {
            diagnostics.push(MISSING_UNITS.to_string());
        }

        let mut header = HeaderInfo::default();
        let mut shapes = Vec::new();
        let mut parts = Vec::new();
        let mut drills = Vec::new();

        for section in scan(text) {
            match section.kind {
                SectionKind::Header => header = decode_header(&section),
                SectionKind::Shape(kind) => shapes.push(build_shape(kind, &section)?),
                SectionKind::Placement => parts.extend(decode_parts(&section)?),
                SectionKind::DrilledHoles => drills.extend(decode_drills(&section)?),
            }
        }

        debug!(
            "{file_name}: {} shape(s), {} part(s), {} drill(s), units {units:?}",
            shapes.len(),
            parts.len(),
            drills.len()
        );

        Ok(Self {
            file_name: file_name.to_string(),
            units,
            header,
            shapes,
            parts,
            drills,
            diagnostics,
        })
    }

    /// Diagnostics recorded so far, in order.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub(crate) fn push_diagnostic(&mut self, message: String) {
        self.diagnostics.push(message);
    }
}

/// Build one shape from a shape section.
///
/// # Errors
///
/// Returns [`IdfError::ParseError`] if a vertex or the height line fails to
/// decode.
pub fn build_shape(kind: ShapeKind, section: &Section<'_>) -> Result<Shape, IdfError> {
    let mut loops = group_loops(decode_vertices(section)?).into_iter();
    let outline = loops.next().unwrap_or_default();
    let cutouts = loops.collect();
    let height = decode_height(kind, section)?;

    Ok(Shape {
        kind,
        outline,
        cutouts,
        height,
    })
}

/// Partition vertices into contiguous runs of equal loop index.
///
/// The first run is expected to be loop 0; if the first vertex belongs to
/// another loop, the outline run comes back empty. The result always holds
/// at least one (possibly empty) run.
#[allow(clippy::float_cmp)]
pub fn group_loops(vertices: Vec<Vertex>) -> Vec<SubShape> {
    let mut loops = Vec::new();
    let mut current = SubShape::default();
    let mut loop_index = 0.0;

    for vertex in vertices {
        if vertex.loop_index != loop_index {
            loops.push(std::mem::take(&mut current));
            loop_index = vertex.loop_index;
        }
        current.vertices.push(vertex);
    }
    loops.push(current);

    loops
}

/// Find the board units by scanning from the top of the file.
///
/// The first line containing `THOU` or `MM` decides. Reaching the end of the
/// header, or of the input, first yields [`Units::Unknown`].
pub fn scan_units(text: &str) -> Units {
    for line in text.lines() {
        if line.contains("THOU") {
            return Units::Thou;
        }
        if line.contains("MM") {
            return Units::Mm;
        }
        if line.contains(HEADER_END) {
            break;
        }
    }
    Units::Unknown
}
