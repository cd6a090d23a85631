//! Parquet output for converted batches.

mod error;
mod parquet;

pub use error::{OutputError, Result};
pub use parquet::{ParquetBatchWriter, ParquetCodec, WriteSummary, read_parquet};
