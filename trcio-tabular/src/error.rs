//! Error types for geometry table operations.

use std::io;
use thiserror::Error;

/// Errors from loading or querying the geometry table.
#[derive(Error, Debug)]
pub enum TabularError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Row-level parse error from the underlying reader.
    #[error("table parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The table does not satisfy the column schema.
    #[error("malformed table: {0}")]
    MalformedTable(String),

    /// No row matches the queried key. Fatal: a silently-missed join would
    /// feed defaulted coordinates into the spatial index.
    #[error("no {table} row matches {key}")]
    LookupMiss {
        table: &'static str,
        key: String,
    },
}

/// Result type for geometry table operations.
pub type Result<T> = std::result::Result<T, TabularError>;
