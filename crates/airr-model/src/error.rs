//! Error types for catalog, schema and metadata model construction.

use thiserror::Error;

/// Errors raised while building model values from external descriptions.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Value-kind descriptor outside the supported vocabulary.
    #[error("unknown value kind '{descriptor}'")]
    UnknownValueKind { descriptor: String },

    /// `enum [...]` descriptor with an unusable member list.
    #[error("invalid enum descriptor '{descriptor}': {reason}")]
    InvalidEnum { descriptor: String, reason: String },

    /// Same field name defined twice in one catalog.
    #[error("duplicate field '{name}' in type catalog")]
    DuplicateField { name: String },

    /// Catalog document is not a name-to-descriptor object.
    #[error("unexpected type catalog format: {reason}")]
    CatalogFormat { reason: String },

    /// Metadata document is not a file-name-to-object mapping.
    #[error("unexpected metadata format: {reason}")]
    MetadataFormat { reason: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
