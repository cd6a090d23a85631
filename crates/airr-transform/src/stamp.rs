//! Broadcasting of per-file metadata onto batches.

use polars::prelude::*;

use airr_model::{MetadataEntry, MetadataTable, MetadataValue};

use crate::error::{Result, TransformError};

/// Adds per-file constant columns to a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataStamper;

impl MetadataStamper {
    pub fn new() -> Self {
        Self
    }

    /// Looks up `file_name` in `table` and stamps its entry onto `df`.
    ///
    /// # Errors
    ///
    /// [`TransformError::MissingMetadata`] if the table has no entry for the file.
    pub fn stamp(
        &self,
        df: DataFrame,
        file_name: &str,
        table: &MetadataTable,
    ) -> Result<DataFrame> {
        let entry = table
            .get(file_name)
            .ok_or_else(|| TransformError::MissingMetadata {
                file_name: file_name.to_string(),
            })?;
        self.stamp_entry(df, entry)
    }

    /// Adds (or replaces) one constant column per entry field, in entry order.
    pub fn stamp_entry(&self, mut df: DataFrame, entry: &MetadataEntry) -> Result<DataFrame> {
        let height = df.height();
        for (name, value) in entry.fields() {
            df.with_column(constant_column(name, value, height))?;
        }
        tracing::debug!(fields = entry.len(), rows = height, "stamped metadata");
        Ok(df)
    }
}

fn constant_column(name: &str, value: &MetadataValue, height: usize) -> Column {
    match value {
        MetadataValue::String(s) => Column::new(name.into(), vec![s.as_str(); height]),
        MetadataValue::Integer(i) => Column::new(name.into(), vec![*i; height]),
        MetadataValue::Float(f) => Column::new(name.into(), vec![*f; height]),
        MetadataValue::Boolean(b) => Column::new(name.into(), vec![*b; height]),
        MetadataValue::Null => Column::full_null(name.into(), height, &DataType::String),
    }
}
