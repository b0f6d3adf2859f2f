//! Section scanner.
//!
//! Splits the raw line stream into marker-delimited sections. Recognition is
//! purely textual: a line containing a start marker opens a section, a line
//! containing the matching end marker closes it.
//!
//! Each family (header, shapes, placement, drilled holes) is scanned on its
//! own, so an unterminated section only swallows later sections of its own
//! family. Within a family sections do not nest; a second start marker
//! inside an open section is treated as body text.

use log::{debug, warn};

use super::types::ShapeKind;

const HEADER_START: &str = ".HEADER";
const HEADER_END: &str = ".END_HEADER";
const PLACEMENT_START: &str = ".PLACEMENT";
const PLACEMENT_END: &str = ".END_PLACEMENT";
const DRILL_START: &str = ".DRILLED_HOLES";
const DRILL_END: &str = ".END_DRILLED_HOLES";

/// The kind of content a section holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// `.HEADER` block.
    Header,
    /// One of the outline-bearing sections.
    Shape(ShapeKind),
    /// `.PLACEMENT` block.
    Placement,
    /// `.DRILLED_HOLES` block.
    DrilledHoles,
}

impl SectionKind {
    /// The section kind whose start marker appears in `line`, if any.
    pub fn opened_by(line: &str) -> Option<Self> {
        Family::ALL
            .into_iter()
            .find_map(|family| family.opened_by(line))
    }

    /// Whether `line` ends an open section of this kind.
    ///
    /// Any shape end marker closes any open shape section.
    pub fn closed_by(self, line: &str) -> bool {
        match self {
            Self::Header => line.contains(HEADER_END),
            Self::Shape(_) => ShapeKind::ALL
                .into_iter()
                .any(|kind| line.contains(kind.end_marker())),
            Self::Placement => line.contains(PLACEMENT_END),
            Self::DrilledHoles => line.contains(DRILL_END),
        }
    }
}

/// Groups of section kinds that share one open/close state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Header,
    Shape,
    Placement,
    DrilledHoles,
}

impl Family {
    const ALL: [Self; 4] = [Self::Header, Self::Shape, Self::Placement, Self::DrilledHoles];

    fn opened_by(self, line: &str) -> Option<SectionKind> {
        match self {
            Self::Header => line.contains(HEADER_START).then_some(SectionKind::Header),
            Self::Shape => ShapeKind::ALL
                .into_iter()
                .find(|kind| line.contains(kind.start_marker()))
                .map(SectionKind::Shape),
            Self::Placement => line
                .contains(PLACEMENT_START)
                .then_some(SectionKind::Placement),
            Self::DrilledHoles => line
                .contains(DRILL_START)
                .then_some(SectionKind::DrilledHoles),
        }
    }
}

/// A line of input with its 1-based position in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Line text without the trailing newline.
    pub text: &'a str,
}

/// A contiguous span of lines between a start marker and its end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// What the section contains.
    pub kind: SectionKind,
    /// The line holding the start marker.
    pub marker: SourceLine<'a>,
    /// Lines strictly between the start and end markers.
    pub body: Vec<SourceLine<'a>>,
    /// `false` when the input ended before the end marker.
    pub terminated: bool,
}

#[derive(Debug)]
enum ScanState<'a> {
    Outside,
    InSection(Section<'a>),
}

/// Split `text` into sections in file order.
///
/// Lines outside any section are dropped. A section still open at end of
/// input is returned with `terminated == false`.
pub fn scan(text: &str) -> Vec<Section<'_>> {
    let lines: Vec<SourceLine<'_>> = text
        .lines()
        .enumerate()
        .map(|(idx, text)| SourceLine {
            number: idx + 1,
            text,
        })
        .collect();

    let mut sections: Vec<Section<'_>> = Family::ALL
        .into_iter()
        .flat_map(|family| scan_family(family, &lines))
        .collect();
    sections.sort_by_key(|section| section.marker.number);

    debug!("scanned {} section(s)", sections.len());
    sections
}

fn scan_family<'a>(family: Family, lines: &[SourceLine<'a>]) -> Vec<Section<'a>> {
    let mut sections = Vec::new();
    let mut state = ScanState::Outside;

    for line in lines {
        state = step(family, state, *line, &mut sections);
    }

    if let ScanState::InSection(section) = state {
        warn!(
            "section {:?} opened on line {} was never closed",
            section.kind, section.marker.number
        );
        sections.push(section);
    }

    sections
}

fn step<'a>(
    family: Family,
    state: ScanState<'a>,
    line: SourceLine<'a>,
    sections: &mut Vec<Section<'a>>,
) -> ScanState<'a> {
    match state {
        ScanState::Outside => family.opened_by(line.text).map_or(ScanState::Outside, |kind| {
            ScanState::InSection(Section {
                kind,
                marker: line,
                body: Vec::new(),
                terminated: false,
            })
        }),
        ScanState::InSection(mut section) => {
            if section.kind.closed_by(line.text) {
                section.terminated = true;
                sections.push(section);
                ScanState::Outside
            } else {
                section.body.push(line);
                ScanState::InSection(section)
            }
        }
    }
}
