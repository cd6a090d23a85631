//! Normalization of embedded numbering maps.
//!
//! Numbering columns hold Python-style dict literals (`{'1': 'Q', ...}`).
//! They are rewritten to JSON-style quoting with all spaces removed. No JSON
//! validation is performed.

use polars::prelude::*;

use airr_model::NUMBERING_FIELDS;

use crate::error::{Result, TransformError};

/// Rewrites one value: every `'` becomes `"`, every space is removed.
///
/// ```
/// use airr_transform::normalize_json_text;
///
/// assert_eq!(normalize_json_text("{'a': 1, 'b': 2}"), r#"{"a":1,"b":2}"#);
/// ```
pub fn normalize_json_text(value: &str) -> String {
    value
        .chars()
        .filter(|&c| c != ' ')
        .map(|c| if c == '\'' { '"' } else { c })
        .collect()
}

/// Applies [`normalize_json_text`] to a fixed set of string columns.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    columns: Vec<String>,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::with_columns(NUMBERING_FIELDS)
    }
}

impl RecordNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizer over a custom set of designated columns.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Normalizes every designated column of `df`. Nulls stay null.
    ///
    /// # Errors
    ///
    /// - [`TransformError::ColumnNotFound`] if a designated column is absent
    /// - [`TransformError::Polars`] if a designated column is not string-typed
    pub fn normalize(&self, mut df: DataFrame) -> Result<DataFrame> {
        for name in &self.columns {
            let column = df
                .column(name)
                .map_err(|_| TransformError::ColumnNotFound(name.clone()))?;
            let str_ca = column.str()?;

            let mut builder = StringChunkedBuilder::new(name.as_str().into(), str_ca.len());
            for opt_val in str_ca.into_iter() {
                match opt_val {
                    Some(value) => builder.append_value(normalize_json_text(value)),
                    None => builder.append_null(),
                }
            }

            df.with_column(builder.finish().into_series())?;
        }
        tracing::debug!(columns = self.columns.len(), "normalized numbering columns");
        Ok(df)
    }
}
