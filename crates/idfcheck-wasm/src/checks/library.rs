//! Parts-library rule and the library membership abstraction.

use std::collections::{BTreeSet, HashSet};

use crate::idf::Board;

const INVALID_NAME_HINT: &str =
    "Part names with invalid characters were detected. Please check CircuitWorks settings.";

/// Read-only set of known part names, queried case-insensitively.
pub trait PartLibrary {
    /// Whether `name` (in any case) is a known part.
    fn contains_part(&self, name: &str) -> bool;
}

impl PartLibrary for HashSet<String> {
    fn contains_part(&self, name: &str) -> bool {
        self.contains(&name.to_uppercase())
    }
}

impl PartLibrary for BTreeSet<String> {
    fn contains_part(&self, name: &str) -> bool {
        self.contains(&name.to_uppercase())
    }
}

/// A [`PartLibrary`] that upper-cases names as they are added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartsLibrary {
    names: HashSet<String>,
}

impl PartsLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a part name.
    pub fn insert(&mut self, name: &str) {
        self.names.insert(name.to_uppercase());
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the library holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PartsLibrary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut library = Self::new();
        for name in iter {
            library.insert(name.as_ref());
        }
        library
    }
}

impl PartLibrary for PartsLibrary {
    fn contains_part(&self, name: &str) -> bool {
        self.names.contains(&name.to_uppercase())
    }
}

/// Characters the generating tool substitutes into names it cannot export.
fn has_invalid_chars(name: &str) -> bool {
    name.contains(['_', '^'])
}

/// Flag parts with invalid name characters or missing from `library`.
///
/// A name with invalid characters is not looked up. One settings hint is
/// appended after all parts if any invalid name was seen.
pub fn check_library(board: &Board, library: &dyn PartLibrary) -> Vec<String> {
    let mut out = Vec::new();
    let mut invalid_seen = false;

    for part in &board.parts {
        if has_invalid_chars(&part.name) {
            out.push(format!(
                "{} ({}) has invalid characters in its part name.",
                part.name, part.ref_des
            ));
            invalid_seen = true;
        } else if !library.contains_part(&part.name) {
            out.push(format!("{} not found in parts library", part.name));
        }
    }

    if invalid_seen {
        out.push(INVALID_NAME_HINT.to_string());
    }
    out
}
