//! Core IDF data model: vertices, shapes, parts, and drilled holes.

use std::fmt;

use serde::Serialize;

/// Board units declared in the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Units {
    /// Millimeters.
    #[serde(rename = "MM")]
    Mm,
    /// Thousandths of an inch.
    #[serde(rename = "THOU")]
    Thou,
    /// Neither unit token was found before the header ended.
    Unknown,
}

/// The seven IDF 3.0 sections that carry outline geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeKind {
    /// `.BOARD_OUTLINE`
    BoardOutline,
    /// `.OTHER_OUTLINE`
    OtherOutline,
    /// `.PLACE_KEEPOUT`
    PlaceKeepout,
    /// `.PLACE_OUTLINE`
    PlaceOutline,
    /// `.ROUTE_OUTLINE`
    RouteOutline,
    /// `.ROUTE_KEEPOUT`
    RouteKeepout,
    /// `.VIA_KEEPOUT`
    ViaKeepout,
}

impl ShapeKind {
    /// All shape kinds, in marker-matching order.
    pub const ALL: [Self; 7] = [
        Self::BoardOutline,
        Self::OtherOutline,
        Self::PlaceKeepout,
        Self::PlaceOutline,
        Self::RouteOutline,
        Self::RouteKeepout,
        Self::ViaKeepout,
    ];

    /// Marker line token that opens a section of this kind.
    pub const fn start_marker(self) -> &'static str {
        match self {
            Self::BoardOutline => ".BOARD_OUTLINE",
            Self::OtherOutline => ".OTHER_OUTLINE",
            Self::PlaceKeepout => ".PLACE_KEEPOUT",
            Self::PlaceOutline => ".PLACE_OUTLINE",
            Self::RouteOutline => ".ROUTE_OUTLINE",
            Self::RouteKeepout => ".ROUTE_KEEPOUT",
            Self::ViaKeepout => ".VIA_KEEPOUT",
        }
    }

    /// Marker line token that closes a section of this kind.
    pub const fn end_marker(self) -> &'static str {
        match self {
            Self::BoardOutline => ".END_BOARD_OUTLINE",
            Self::OtherOutline => ".END_OTHER_OUTLINE",
            Self::PlaceKeepout => ".END_PLACE_KEEPOUT",
            Self::PlaceOutline => ".END_PLACE_OUTLINE",
            Self::RouteOutline => ".END_ROUTE_OUTLINE",
            Self::RouteKeepout => ".END_ROUTE_KEEPOUT",
            Self::ViaKeepout => ".END_VIA_KEEPOUT",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.start_marker())
    }
}

/// One outline record: loop index, position, and the sweep of the segment
/// arriving at this point from the previous vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// 0 for the outline, 1 and up for cutouts. Kept as written in the file.
    pub loop_index: f64,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Signed arc sweep in degrees (positive is counter-clockwise); 0 is a line.
    pub sweep_angle: f64,
}

impl Vertex {
    /// Returns `true` when both coordinates match `other` exactly.
    pub fn same_position(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Returns `true` when either coordinate is below zero.
    pub fn is_negative(&self) -> bool {
        self.x < 0.0 || self.y < 0.0
    }
}

/// An ordered run of vertices sharing one loop index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubShape {
    /// Vertices in file order.
    pub vertices: Vec<Vertex>,
}

impl SubShape {
    /// Number of vertices in the loop.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the loop has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// First vertex, if any.
    pub fn first(&self) -> Option<&Vertex> {
        self.vertices.first()
    }

    /// Last vertex, if any.
    pub fn last(&self) -> Option<&Vertex> {
        self.vertices.last()
    }

    /// Loop index of the first vertex; an empty run counts as the outline.
    pub fn loop_index(&self) -> f64 {
        self.first().map_or(0.0, |v| v.loop_index)
    }

    /// A two-point loop whose second point sweeps a full 360° circle.
    #[allow(clippy::float_cmp)]
    pub fn is_full_circle(&self) -> bool {
        match self.vertices.as_slice() {
            [_, second] => second.sweep_angle == 360.0,
            _ => false,
        }
    }
}

/// A closed region from one shape section: an outline plus optional cutouts.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Section the shape was read from.
    pub kind: ShapeKind,
    /// Loop-0 boundary.
    pub outline: SubShape,
    /// Remaining loops in file order.
    pub cutouts: Vec<SubShape>,
    /// Thickness or height; 0 for kinds that do not carry one.
    pub height: f64,
}

impl Shape {
    /// The outline followed by every cutout.
    pub fn sub_shapes(&self) -> impl Iterator<Item = &SubShape> {
        std::iter::once(&self.outline).chain(self.cutouts.iter())
    }

    /// Every vertex in the shape, outline first.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.sub_shapes().flat_map(|s| s.vertices.iter())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outline.first() {
            Some(start) => write!(f, "{} starting at [{:.2},{:.2}]", self.kind, start.x, start.y),
            None => write!(f, "{} with no outline", self.kind),
        }
    }
}

/// A component placement from the `.PLACEMENT` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Package or part name.
    pub name: String,
    /// Reference designator, e.g. `C14`.
    pub ref_des: String,
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Board side token (`TOP` / `BOTTOM`).
    pub side: String,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) at [{:.2},{:.2}]",
            self.name, self.ref_des, self.x, self.y
        )
    }
}

/// A drilled hole from the `.DRILLED_HOLES` section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drill {
    /// Hole diameter.
    pub diameter: f64,
    /// X coordinate of the hole center.
    pub x: f64,
    /// Y coordinate of the hole center.
    pub y: f64,
}

impl fmt::Display for Drill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Drill with diameter {:.2} at [{:.2},{:.2}]",
            self.diameter, self.x, self.y
        )
    }
}

/// Identification fields from the `.HEADER` section, when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderInfo {
    /// `BOARD_FILE` or `PANEL_FILE`.
    pub file_type: Option<String>,
    /// Declared IDF version, e.g. `3.0`.
    pub idf_version: Option<String>,
    /// Generating system identification.
    pub source_system: Option<String>,
    /// Creation date as written.
    pub date: Option<String>,
    /// Board or panel name.
    pub board_name: Option<String>,
}
