//! Record decoder.
//!
//! Turns the raw body lines of a section into typed records. A malformed
//! numeric field is fatal for the file and is returned as
//! [`IdfError::ParseError`]; nothing is coerced to zero.

use log::warn;

use crate::error::IdfError;

use super::scanner::{Section, SourceLine};
use super::types::{Drill, HeaderInfo, Part, ShapeKind, Vertex};

/// Decode a vertex record, or `None` if the line is not one.
///
/// Any line with exactly four whitespace-separated fields is a vertex. The
/// format has no other marker for outline records, so header lines that
/// happen to have four fields are decoded too.
///
/// # Errors
///
/// Returns [`IdfError::ParseError`] if any of the four fields is not a number.
pub fn decode_vertex(line: SourceLine<'_>) -> Result<Option<Vertex>, IdfError> {
    let fields: Vec<&str> = line.text.split_whitespace().collect();
    let [loop_raw, x_raw, y_raw, sweep_raw] = fields.as_slice() else {
        return Ok(None);
    };

    Ok(Some(Vertex {
        loop_index: parse_f64(loop_raw, "loop index", line.number)?,
        x: parse_f64(x_raw, "x coordinate", line.number)?,
        y: parse_f64(y_raw, "y coordinate", line.number)?,
        sweep_angle: parse_f64(sweep_raw, "sweep angle", line.number)?,
    }))
}

/// Decode every vertex record in a shape section, in file order.
///
/// # Errors
///
/// Propagates the first vertex decoding failure.
pub fn decode_vertices(section: &Section<'_>) -> Result<Vec<Vertex>, IdfError> {
    let mut vertices = Vec::new();
    for line in &section.body {
        if let Some(vertex) = decode_vertex(*line)? {
            vertices.push(vertex);
        }
    }
    Ok(vertices)
}

/// Read the thickness/height value carried by the first body line.
///
/// Board outlines hold a bare number; other outlines and placement outlines
/// hold it in the second field. Every other kind reports 0.
///
/// # Errors
///
/// Returns [`IdfError::ParseError`] if the line is missing or the value is
/// not a number.
pub fn decode_height(kind: ShapeKind, section: &Section<'_>) -> Result<f64, IdfError> {
    let raw = match kind {
        ShapeKind::BoardOutline => first_body_line(section)?.text.trim(),
        ShapeKind::OtherOutline | ShapeKind::PlaceOutline => {
            let line = first_body_line(section)?;
            line.text
                .split_whitespace()
                .nth(1)
                .ok_or_else(|| IdfError::parse(line.number, "missing height field"))?
        }
        _ => return Ok(0.0),
    };

    let line_number = section
        .body
        .first()
        .map_or(section.marker.number, |line| line.number);
    parse_f64(raw, "height", line_number)
}

fn first_body_line<'a>(section: &Section<'a>) -> Result<SourceLine<'a>, IdfError> {
    section.body.first().copied().ok_or_else(|| {
        IdfError::parse(
            section.marker.number,
            format!("{:?} section has no height line", section.kind),
        )
    })
}

/// Decode the two-line part records of a placement section.
///
/// Blank lines are skipped. A trailing first line without its partner is
/// dropped.
///
/// # Errors
///
/// Returns [`IdfError::ParseError`] for a missing or non-numeric position,
/// rotation, or side field.
pub fn decode_parts(section: &Section<'_>) -> Result<Vec<Part>, IdfError> {
    let lines: Vec<SourceLine<'_>> = section
        .body
        .iter()
        .copied()
        .filter(|line| !line.text.trim().is_empty())
        .collect();

    let mut pairs = lines.chunks_exact(2);
    let mut parts = Vec::with_capacity(lines.len() / 2);
    for pair in pairs.by_ref() {
        if let [names, placement] = *pair {
            parts.push(decode_part(names, placement)?);
        }
    }

    if let [dangling] = pairs.remainder() {
        warn!(
            "placement record on line {} has no position line; dropped",
            dangling.number
        );
    }

    Ok(parts)
}

/// Decode one part from its name line and its placement line.
///
/// # Errors
///
/// Returns [`IdfError::ParseError`] for an empty name line or a missing or
/// non-numeric placement field.
pub fn decode_part(names: SourceLine<'_>, placement: SourceLine<'_>) -> Result<Part, IdfError> {
    let (name, ref_des) = split_names(names)?;

    let fields: Vec<&str> = placement.text.split_whitespace().collect();
    let field = |index: usize, label: &str| {
        fields
            .get(index)
            .copied()
            .ok_or_else(|| IdfError::parse(placement.number, format!("missing {label} field")))
    };

    Ok(Part {
        name,
        ref_des,
        x: parse_f64(field(0, "x coordinate")?, "x coordinate", placement.number)?,
        y: parse_f64(field(1, "y coordinate")?, "y coordinate", placement.number)?,
        rotation: parse_f64(field(3, "rotation")?, "rotation", placement.number)?,
        side: field(4, "board side")?.to_string(),
    })
}

/// Extract the part name and reference designator from a name line.
///
/// A quoted name is the text inside the first pair of quotes and the
/// designator is whatever follows the last quote. Unquoted lines use the
/// first and last whitespace tokens.
fn split_names(line: SourceLine<'_>) -> Result<(String, String), IdfError> {
    if line.text.contains('"') {
        let name = line.text.split('"').nth(1).unwrap_or_default();
        let ref_des = line.text.rsplit('"').next().unwrap_or_default().trim();
        return Ok((name.to_string(), ref_des.to_string()));
    }

    let mut tokens = line.text.split_whitespace();
    let first = tokens
        .next()
        .ok_or_else(|| IdfError::parse(line.number, "empty part name line"))?;
    let last = tokens.last().unwrap_or(first);
    Ok((first.to_string(), last.to_string()))
}

/// Decode every drilled hole in a drill section, one per body line.
///
/// # Errors
///
/// Returns [`IdfError::ParseError`] for a missing or non-numeric field. A
/// blank line has no diameter and fails like any other short line.
pub fn decode_drills(section: &Section<'_>) -> Result<Vec<Drill>, IdfError> {
    section
        .body
        .iter()
        .map(|line| decode_drill(*line))
        .collect()
}

/// Decode a single drilled-hole line: diameter, x, y.
///
/// # Errors
///
/// Returns [`IdfError::ParseError`] for a missing or non-numeric field.
pub fn decode_drill(line: SourceLine<'_>) -> Result<Drill, IdfError> {
    let mut fields = line.text.split_whitespace();
    let mut next = |label: &str| -> Result<f64, IdfError> {
        let raw = fields
            .next()
            .ok_or_else(|| IdfError::parse(line.number, format!("missing {label} field")))?;
        parse_f64(raw, label, line.number)
    };

    Ok(Drill {
        diameter: next("diameter")?,
        x: next("x coordinate")?,
        y: next("y coordinate")?,
    })
}

/// Best-effort extraction of the identification fields of a header section.
pub fn decode_header(section: &Section<'_>) -> HeaderInfo {
    let mut info = HeaderInfo::default();

    if let Some(line) = section.body.first() {
        let mut fields = quoted_fields(line.text).into_iter();
        info.file_type = fields.next();
        info.idf_version = fields.next();
        info.source_system = fields.next();
        info.date = fields.next();
    }

    if let Some(line) = section.body.get(1) {
        info.board_name = quoted_fields(line.text).into_iter().next();
    }

    info
}

/// Whitespace split that keeps double-quoted runs together, quotes removed.
fn quoted_fields(text: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in text.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    fields.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        fields.push(current);
    }

    fields
}

fn parse_f64(raw: &str, label: &str, line: usize) -> Result<f64, IdfError> {
    raw.parse::<f64>()
        .map_err(|err| IdfError::parse(line, format!("invalid {label} `{raw}`: {err}")))
}
