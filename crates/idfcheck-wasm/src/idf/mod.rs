//! IDF 3.0 parsing: section scanning, record decoding, and model building.

pub mod board;
pub mod records;
pub mod scanner;
pub mod types;

pub use board::*;
pub use scanner::{Section, SectionKind, SourceLine};
pub use types::*;
