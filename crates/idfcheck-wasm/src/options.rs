//! Host-supplied options for the validation engine.

use serde::Deserialize;

/// Which shapes the round-cutout rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CutoutScope {
    /// Check the cutouts of every shape.
    #[default]
    AllShapes,
    /// Check only the last shape in the file, matching the diagnostics of the
    /// legacy checking tool.
    LastShape,
}

/// Validation options, deserialised from a JS object with camelCase keys.
/// Missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckOptions {
    /// Scope of the round-cutout rule.
    pub cutout_scope: CutoutScope,
    /// Run the parts-library rule when a library is supplied.
    pub library_check: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            cutout_scope: CutoutScope::AllShapes,
            library_check: true,
        }
    }
}
