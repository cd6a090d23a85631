//! Error types for input discovery, recovery and parsing.

use std::path::PathBuf;
use thiserror::Error;

use airr_model::ModelError;

/// Errors that can occur while reading inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Recovery Errors ===
    /// Gzip stream is corrupt or cut short.
    #[error("failed to decompress {path}: {source}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The canary row does not have the expected number of fields.
    #[error("truncated input: expected {expected} fields on line 2, found {found}")]
    TruncatedInput { expected: usize, found: usize },

    // === Parsing Errors ===
    /// Polars rejected the recovered CSV stream.
    #[error("failed to parse CSV: {message}")]
    CsvParse { message: String },

    /// Schema column absent from the parsed table.
    #[error("column '{column}' not found in input")]
    MissingColumn { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    // === Document Errors ===
    /// Column list, catalog or metadata document could not be interpreted.
    #[error("invalid document {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl IngestError {
    pub(crate) fn file_read(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
