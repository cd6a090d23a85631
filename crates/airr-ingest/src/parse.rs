//! Typed parsing of recovered text and projection onto the output schema.

use std::io::Cursor;
use std::sync::Arc;

use polars::prelude::*;

use airr_model::Schema as OutputSchema;

use crate::error::{IngestError, Result};
use crate::reader::RecoveredText;

/// Parses recovered text into a DataFrame holding exactly the schema columns.
///
/// The first line of the text is the header. Schema columns are read with
/// their catalog dtype; a cell that does not parse as that dtype becomes null
/// instead of failing the file. Columns outside the schema are discarded.
///
/// # Errors
///
/// - [`IngestError::MissingColumn`] if a schema column is not in the header
/// - [`IngestError::CsvParse`] if Polars cannot read the stream at all
pub fn parse_batch(recovered: RecoveredText, schema: &OutputSchema) -> Result<DataFrame> {
    let header = recovered
        .as_str()
        .lines()
        .next()
        .map(parse_csv_line)
        .unwrap_or_default();
    if let Some(missing) = schema.names().find(|name| !header.iter().any(|h| h == name)) {
        return Err(IngestError::MissingColumn {
            column: missing.to_string(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(Arc::new(schema.polars_schema())))
        .with_ignore_errors(true)
        .into_reader_with_file_handle(Cursor::new(recovered.into_bytes()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            message: e.to_string(),
        })?;
    tracing::debug!(
        rows = df.height(),
        parsed_columns = df.width(),
        "parsed recovered input"
    );

    project(&df, schema)
}

/// Selects the schema columns from `df`, in schema order.
pub fn project(df: &DataFrame, schema: &OutputSchema) -> Result<DataFrame> {
    let present = df.get_column_names();
    if let Some(missing) = schema
        .names()
        .find(|name| !present.iter().any(|p| p.as_str() == *name))
    {
        return Err(IngestError::MissingColumn {
            column: missing.to_string(),
        });
    }
    Ok(df.select(schema.names())?)
}

/// Splits a CSV header line into trimmed names, honouring double quotes.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(current.trim().to_string());
    fields
}
