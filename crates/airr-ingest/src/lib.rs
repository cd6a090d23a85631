//! Input handling for airr-convert.
//!
//! This crate turns compressed, header-corrupted annotation exports into typed
//! Polars DataFrames.
//!
//! # Features
//!
//! - **Discovery**: Find `*.csv.gz` inputs and derive output paths
//! - **Recovery**: Decompress, decode lossily, drop the bad header line and
//!   check the canary row
//! - **Parsing**: Read with catalog dtype hints, coerce bad cells to null and
//!   project onto the output schema
//! - **Documents**: Load the column list, type catalog and metadata table
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use airr_ingest::{RecoveringReader, parse_batch, read_column_names};
//! use airr_model::{Schema, TypeCatalog};
//!
//! let columns = read_column_names(Path::new("columns.txt"))?;
//! let schema = Schema::resolve(&columns, &TypeCatalog::builtin());
//! let recovered = RecoveringReader::new().read(Path::new("input/S1.csv.gz"))?;
//! let df = parse_batch(recovered, &schema)?;
//! ```

mod discovery;
mod documents;
mod error;
mod parse;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{INPUT_SUFFIX, OUTPUT_EXTENSION, list_input_files, output_path_for};

// === Documents ===
pub use documents::{load_metadata_table, load_type_catalog, read_column_names};

// === Recovery & Parsing ===
pub use parse::{parse_batch, project};
pub use reader::{EXPECTED_FIELD_COUNT, FIELD_DELIMITER, RecoveredText, RecoveringReader};
