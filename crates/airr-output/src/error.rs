//! Error types for Parquet output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading Parquet files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open a Parquet file.
    #[error("failed to open {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars rejected the frame or the file contents.
    #[error("parquet error for {path}: {message}")]
    Parquet { path: PathBuf, message: String },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
