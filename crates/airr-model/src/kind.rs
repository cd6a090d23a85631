//! Abstract value kinds for catalog fields.
//!
//! A [`ValueKind`] is independent of any storage engine. Each kind has a
//! textual descriptor taken from the upstream type dictionary (`string`,
//! `integer`, `enum [0, 1, 2]`, ...) and a fixed Polars storage dtype.

use std::fmt;
use std::str::FromStr;

use polars::prelude::DataType;
use serde_json::Value;

use crate::error::{ModelError, Result};

/// Scalar kind of a catalog field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Boolean,
    Int64,
    Float64,
    /// Small integer restricted to `min..=max`, stored as `Int8`.
    SmallIntEnum { min: i8, max: i8 },
    /// String restricted to a fixed set of values, stored as `String`.
    StringEnum(Vec<String>),
    /// JSON document carried as text; stored as `String`.
    JsonString,
}

impl ValueKind {
    /// Polars dtype used both as the CSV type hint and the Parquet column type.
    pub fn dtype(&self) -> DataType {
        match self {
            Self::String | Self::StringEnum(_) | Self::JsonString => DataType::String,
            Self::Boolean => DataType::Boolean,
            Self::Int64 => DataType::Int64,
            Self::Float64 => DataType::Float64,
            Self::SmallIntEnum { .. } => DataType::Int8,
        }
    }

    /// Returns true if values of this kind are expected to need JSON clean-up.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::JsonString)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Boolean => f.write_str("boolean"),
            Self::Int64 => f.write_str("integer"),
            Self::Float64 => f.write_str("number"),
            Self::JsonString => f.write_str("json string"),
            Self::SmallIntEnum { min, max } => {
                let members: Vec<String> = (*min..=*max).map(|v| v.to_string()).collect();
                write!(f, "enum [{}]", members.join(", "))
            }
            Self::StringEnum(values) => {
                let members: Vec<String> = values
                    .iter()
                    .map(|v| Value::String(v.clone()).to_string())
                    .collect();
                write!(f, "enum [{}]", members.join(", "))
            }
        }
    }
}

impl FromStr for ValueKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "string" => return Ok(Self::String),
            "boolean" => return Ok(Self::Boolean),
            "integer" => return Ok(Self::Int64),
            "number" => return Ok(Self::Float64),
            "json string" => return Ok(Self::JsonString),
            _ => {}
        }
        let Some(members) = trimmed.strip_prefix("enum") else {
            return Err(ModelError::UnknownValueKind {
                descriptor: trimmed.to_string(),
            });
        };
        parse_enum_members(trimmed, members.trim())
    }
}

fn parse_enum_members(descriptor: &str, members: &str) -> Result<ValueKind> {
    let invalid = |reason: &str| ModelError::InvalidEnum {
        descriptor: descriptor.to_string(),
        reason: reason.to_string(),
    };
    let values: Vec<Value> =
        serde_json::from_str(members).map_err(|e| invalid(&format!("members: {e}")))?;
    if values.is_empty() {
        return Err(invalid("no members"));
    }

    if values.iter().all(Value::is_i64) {
        let mut ints = Vec::with_capacity(values.len());
        for value in &values {
            let raw = value.as_i64().unwrap_or_default();
            let small = i8::try_from(raw).map_err(|_| invalid("member out of i8 range"))?;
            ints.push(small);
        }
        let min = ints.iter().copied().min().unwrap_or_default();
        let max = ints.iter().copied().max().unwrap_or_default();
        return Ok(ValueKind::SmallIntEnum { min, max });
    }

    let mut strings = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::String(s) => strings.push(s),
            _ => return Err(invalid("members must be all integers or all strings")),
        }
    }
    Ok(ValueKind::StringEnum(strings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_descriptors() {
        assert_eq!("string".parse::<ValueKind>().unwrap(), ValueKind::String);
        assert_eq!("boolean".parse::<ValueKind>().unwrap(), ValueKind::Boolean);
        assert_eq!("integer".parse::<ValueKind>().unwrap(), ValueKind::Int64);
        assert_eq!("number".parse::<ValueKind>().unwrap(), ValueKind::Float64);
        assert_eq!(
            " JSON string ".parse::<ValueKind>().unwrap(),
            ValueKind::JsonString
        );
    }

    #[test]
    fn parses_integer_enum_as_bounded_range() {
        let kind: ValueKind = "enum [0, 1, 2]".parse().unwrap();
        assert_eq!(kind, ValueKind::SmallIntEnum { min: 0, max: 2 });
        assert_eq!(kind.dtype(), DataType::Int8);
        assert_eq!(kind.to_string(), "enum [0, 1, 2]");
    }

    #[test]
    fn parses_string_enum_members() {
        let kind: ValueKind = r#"enum ["imgt", "kabat", "chothia", "martin"]"#.parse().unwrap();
        assert_eq!(
            kind,
            ValueKind::StringEnum(vec![
                "imgt".to_string(),
                "kabat".to_string(),
                "chothia".to_string(),
                "martin".to_string()
            ])
        );
        assert_eq!(kind.dtype(), DataType::String);
        assert_eq!(kind.to_string(), r#"enum ["imgt", "kabat", "chothia", "martin"]"#);
    }

    #[test]
    fn rejects_bad_descriptors() {
        assert!(matches!(
            "decimal".parse::<ValueKind>(),
            Err(ModelError::UnknownValueKind { .. })
        ));
        assert!(matches!(
            "enum []".parse::<ValueKind>(),
            Err(ModelError::InvalidEnum { .. })
        ));
        assert!(matches!(
            "enum [1, 500]".parse::<ValueKind>(),
            Err(ModelError::InvalidEnum { .. })
        ));
        assert!(matches!(
            r#"enum [1, "a"]"#.parse::<ValueKind>(),
            Err(ModelError::InvalidEnum { .. })
        ));
    }

    #[test]
    fn json_kind_is_stored_as_string() {
        assert!(ValueKind::JsonString.is_json());
        assert_eq!(ValueKind::JsonString.dtype(), DataType::String);
        assert!(!ValueKind::String.is_json());
    }
}
