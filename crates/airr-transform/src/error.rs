//! Error types for batch transformations.

use thiserror::Error;

/// Errors that can occur while transforming a batch.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// Designated column not present in the batch.
    #[error("column '{0}' not found in batch")]
    ColumnNotFound(String),

    /// No metadata entry exists for the input file.
    #[error("no metadata entry for '{file_name}'")]
    MissingMetadata { file_name: String },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
