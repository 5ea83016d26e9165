//! Error types for container operations.

use std::io;
use thiserror::Error;

/// Errors from reading or writing a trace container.
#[derive(Error, Debug)]
pub enum TrcioError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The preamble never declared a data start offset, or its framing is
    /// inconsistent with the declared offset.
    #[error("malformed preamble: {0}")]
    MalformedPreamble(String),

    /// A required count directive was never set before scanning stopped.
    #[error("missing preamble directive: {0}")]
    MissingDirective(&'static str),
}

/// Result type for container operations.
pub type Result<T> = std::result::Result<T, TrcioError>;
