//! Parquet serialization of converted batches.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{DataFrame, ParquetCompression, ParquetReader, ParquetWriter, SerReader};

use crate::error::{OutputError, Result};

/// Page compression codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParquetCodec {
    Uncompressed,
    Snappy,
    #[default]
    Zstd,
    Lz4,
}

impl ParquetCodec {
    fn compression(self) -> ParquetCompression {
        match self {
            Self::Uncompressed => ParquetCompression::Uncompressed,
            Self::Snappy => ParquetCompression::Snappy,
            Self::Zstd => ParquetCompression::Zstd(None),
            Self::Lz4 => ParquetCompression::Lz4Raw,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uncompressed => "uncompressed",
            Self::Snappy => "snappy",
            Self::Zstd => "zstd",
            Self::Lz4 => "lz4",
        }
    }
}

impl fmt::Display for ParquetCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was written for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub bytes: u64,
}

/// Writes one DataFrame per Parquet file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParquetBatchWriter {
    codec: ParquetCodec,
}

impl ParquetBatchWriter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_codec(mut self, codec: ParquetCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn codec(&self) -> ParquetCodec {
        self.codec
    }

    /// Writes `df` to `path`, replacing any existing file.
    ///
    /// Missing parent directories are created.
    pub fn write(&self, df: &mut DataFrame, path: &Path) -> Result<WriteSummary> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| OutputError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = File::create(path).map_err(|e| OutputError::File {
            path: path.to_path_buf(),
            source: e,
        })?;
        let bytes = ParquetWriter::new(&mut file)
            .with_compression(self.codec.compression())
            .finish(df)
            .map_err(|e| OutputError::Parquet {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            path = %path.display(),
            rows = df.height(),
            codec = %self.codec,
            bytes,
            "wrote parquet file"
        );
        Ok(WriteSummary {
            path: path.to_path_buf(),
            rows: df.height(),
            columns: df.width(),
            bytes,
        })
    }
}

/// Reads a Parquet file back into a DataFrame.
pub fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| OutputError::File {
        path: path.to_path_buf(),
        source: e,
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| OutputError::Parquet {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
