//! Error types for the IDF parsing pipeline.

use thiserror::Error;

/// Errors that abort processing of a single IDF file.
///
/// Everything recoverable (missing units, empty boards, unterminated
/// sections) is reported as a board diagnostic instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdfError {
    /// The input bytes are not valid UTF-8 text.
    #[error("invalid UTF-8 input: {0}")]
    InvalidUtf8(String),

    /// A record line could not be decoded.
    #[error("parse error on line {line}: {message}")]
    ParseError {
        /// 1-based line number in the source file.
        line: usize,
        /// Description of the offending field.
        message: String,
    },
}

impl IdfError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }
}
