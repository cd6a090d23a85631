//! Per-file sample metadata.
//!
//! The metadata table maps an input file name (with extension) to the
//! constant fields stamped onto every row of that file's batch.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// A scalar literal broadcast across a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl MetadataValue {
    /// Converts a JSON value. Arrays and objects are kept as compact JSON text.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            nested @ (Value::Array(_) | Value::Object(_)) => Self::String(nested.to_string()),
        }
    }
}

/// Ordered constant fields for one input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataEntry {
    fields: Vec<(String, MetadataValue)>,
}

impl MetadataEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing an earlier value with the same name in place.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: MetadataValue) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    fn from_json_object(object: Map<String, Value>) -> Self {
        object
            .into_iter()
            .fold(Self::new(), |entry, (name, value)| {
                entry.with_field(name, MetadataValue::from_json(value))
            })
    }

    pub fn fields(&self) -> &[(String, MetadataValue)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&MetadataValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Metadata entries keyed by exact input file name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTable {
    entries: BTreeMap<String, MetadataEntry>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `{"<file name>": {"<field>": <literal>, ...}, ...}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_json_value(document)
    }

    pub fn from_json_value(document: Value) -> Result<Self> {
        let Value::Object(files) = document else {
            return Err(ModelError::MetadataFormat {
                reason: "top level must be an object keyed by file name".to_string(),
            });
        };
        let mut table = Self::new();
        for (file_name, entry) in files {
            let Value::Object(object) = entry else {
                return Err(ModelError::MetadataFormat {
                    reason: format!("entry for '{file_name}' must be an object"),
                });
            };
            table.insert(file_name, MetadataEntry::from_json_object(object));
        }
        Ok(table)
    }

    pub fn insert(&mut self, file_name: impl Into<String>, entry: MetadataEntry) {
        self.entries.insert(file_name.into(), entry);
    }

    pub fn get(&self, file_name: &str) -> Option<&MetadataEntry> {
        self.entries.get(file_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
