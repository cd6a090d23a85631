//! Data model for airr-convert.
//!
//! This crate holds the pieces every pipeline stage shares:
//!
//! - **Value kinds**: abstract scalar types and their Polars storage dtypes
//! - **Type catalog**: field name to value kind, built-in or loaded from JSON
//! - **Schema**: the ordered output columns resolved from a column list
//! - **Metadata**: per-file constant fields stamped onto every row
//! - **Outcomes**: per-file success/failure and the run report

mod catalog;
mod error;
mod kind;
mod metadata;
mod outcome;
mod schema;

// === Error Types ===
pub use error::{ModelError, Result};

// === Catalog & Schema ===
pub use catalog::{CHAIN_SUFFIXES, FieldSpec, NUMBERING_FIELDS, TypeCatalog};
pub use kind::ValueKind;
pub use schema::Schema;

// === Metadata ===
pub use metadata::{MetadataEntry, MetadataTable, MetadataValue};

// === Outcomes ===
pub use outcome::{FAILED_FILES_LOG, ProcessingOutcome, RunReport};
