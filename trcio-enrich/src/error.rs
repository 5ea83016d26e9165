//! Error types for the enrichment pipeline.

use thiserror::Error;

/// Errors from an enrichment run.
#[derive(Error, Debug)]
pub enum EnrichError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container read/write error.
    #[error(transparent)]
    Container(#[from] trcio_core::TrcioError),

    /// Geometry table load error.
    #[error(transparent)]
    Table(#[from] trcio_tabular::TabularError),

    /// A join failed while enriching one record.
    #[error("record {index}: {source}")]
    Record {
        index: usize,
        source: trcio_tabular::TabularError,
    },
}

/// Result type for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichError>;
