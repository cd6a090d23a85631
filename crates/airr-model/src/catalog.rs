//! Field type catalog.
//!
//! The catalog maps every known field name to its [`ValueKind`]. It is built
//! once at startup (either the built-in paired-chain catalog or a JSON file)
//! and handed to schema resolution explicitly.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::kind::ValueKind;

/// Chain suffixes of the built-in catalog, in output order.
pub const CHAIN_SUFFIXES: [&str; 2] = ["heavy", "light"];

/// Numbering-map fields appended after the per-chain fields.
pub const NUMBERING_FIELDS: [&str; 2] = ["ANARCI_numbering_heavy", "ANARCI_numbering_light"];

/// A named field and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: ValueKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered, name-unique collection of [`FieldSpec`]s.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
}

impl TypeCatalog {
    /// Builds a catalog, rejecting duplicate names.
    pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> Result<Self> {
        let mut catalog = Self::default();
        for field in fields {
            if catalog.index.contains_key(&field.name) {
                return Err(ModelError::DuplicateField { name: field.name });
            }
            catalog.index.insert(field.name.clone(), catalog.fields.len());
            catalog.fields.push(field);
        }
        Ok(catalog)
    }

    /// The built-in catalog for paired heavy/light chain annotation exports.
    ///
    /// Every base field is emitted once per chain (`<field>_heavy` for all
    /// fields first, then `<field>_light`), followed by [`NUMBERING_FIELDS`].
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        let per_chain = CHAIN_SUFFIXES.iter().flat_map(|suffix| {
            CHAIN_FIELDS
                .iter()
                .map(move |(base, kind)| FieldSpec::new(format!("{base}_{suffix}"), kind.kind()))
        });
        let numbering = NUMBERING_FIELDS
            .iter()
            .map(|name| FieldSpec::new(*name, ValueKind::JsonString));
        for field in per_chain.chain(numbering) {
            catalog.index.insert(field.name.clone(), catalog.fields.len());
            catalog.fields.push(field);
        }
        catalog
    }

    /// Parses a JSON object of `field name -> descriptor`, keeping document order.
    ///
    /// ```
    /// use airr_model::{TypeCatalog, ValueKind};
    ///
    /// let json = r#"{"a": "integer", "b": "enum [0, 1]"}"#;
    /// let catalog = TypeCatalog::from_json_str(json).unwrap();
    /// assert_eq!(catalog.kind_of("a"), Some(&ValueKind::Int64));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Object(entries) = document else {
            return Err(ModelError::CatalogFormat {
                reason: "top level must be an object".to_string(),
            });
        };
        let mut fields = Vec::with_capacity(entries.len());
        for (name, descriptor) in entries {
            let Value::String(descriptor) = descriptor else {
                return Err(ModelError::CatalogFormat {
                    reason: format!("descriptor for '{name}' must be a string"),
                });
            };
            fields.push(FieldSpec::new(name, descriptor.parse()?));
        }
        Self::new(fields)
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.index.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn kind_of(&self, name: &str) -> Option<&ValueKind> {
        self.get(name).map(|field| &field.kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    /// Names from `column_names` that the catalog does not define, in input order.
    pub fn unknown_names<'a, S: AsRef<str>>(&self, column_names: &'a [S]) -> Vec<&'a str> {
        column_names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.contains(name))
            .collect()
    }
}

#[derive(Clone, Copy)]
enum Builtin {
    Str,
    Bool,
    Int,
    Num,
    Json,
    /// Reading frame, 0..=2.
    Frame,
    /// Numbering scheme name.
    Scheme,
}

impl Builtin {
    fn kind(self) -> ValueKind {
        match self {
            Self::Str => ValueKind::String,
            Self::Bool => ValueKind::Boolean,
            Self::Int => ValueKind::Int64,
            Self::Num => ValueKind::Float64,
            Self::Json => ValueKind::JsonString,
            Self::Frame => ValueKind::SmallIntEnum { min: 0, max: 2 },
            Self::Scheme => ValueKind::StringEnum(
                ["imgt", "kabat", "chothia", "martin"]
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect(),
            ),
        }
    }
}

const CHAIN_FIELDS: &[(&str, Builtin)] = &[
    ("sequence_header", Builtin::Str),
    ("sequence", Builtin::Str),
    ("sequence_aa", Builtin::Str),
    ("numbering_scheme", Builtin::Scheme),
    ("locus", Builtin::Str),
    ("stop_codon", Builtin::Bool),
    ("vj_in_frame", Builtin::Bool),
    ("v_frameshift", Builtin::Bool),
    ("j_frameshift", Builtin::Bool),
    ("productive", Builtin::Bool),
    ("rev_comp", Builtin::Bool),
    ("complete_vdj", Builtin::Bool),
    ("v_call", Builtin::Str),
    ("d_call", Builtin::Str),
    ("j_call", Builtin::Str),
    ("c_call", Builtin::Str),
    ("v_frame", Builtin::Frame),
    ("j_frame", Builtin::Frame),
    ("sequence_alignment", Builtin::Str),
    ("germline_alignment", Builtin::Str),
    ("sequence_alignment_aa", Builtin::Str),
    ("germline_alignment_aa", Builtin::Str),
    ("v_alignment_start", Builtin::Int),
    ("v_alignment_end", Builtin::Int),
    ("d_alignment_start", Builtin::Int),
    ("d_alignment_end", Builtin::Int),
    ("j_alignment_start", Builtin::Int),
    ("j_alignment_end", Builtin::Int),
    ("c_alignment_start", Builtin::Int),
    ("c_alignment_end", Builtin::Int),
    ("v_sequence_alignment", Builtin::Str),
    ("v_sequence_alignment_aa", Builtin::Str),
    ("v_germline_alignment", Builtin::Str),
    ("v_germline_alignment_aa", Builtin::Str),
    ("d_sequence_alignment", Builtin::Str),
    ("d_germline_alignment", Builtin::Str),
    ("j_sequence_alignment", Builtin::Str),
    ("j_sequence_alignment_aa", Builtin::Str),
    ("j_germline_alignment", Builtin::Str),
    ("j_germline_alignment_aa", Builtin::Str),
    ("c_sequence_alignment", Builtin::Str),
    ("c_germline_alignment", Builtin::Str),
    ("fwr1", Builtin::Str),
    ("fwr1_aa", Builtin::Str),
    ("cdr1", Builtin::Str),
    ("cdr1_aa", Builtin::Str),
    ("fwr2", Builtin::Str),
    ("fwr2_aa", Builtin::Str),
    ("cdr2", Builtin::Str),
    ("cdr2_aa", Builtin::Str),
    ("fwr3", Builtin::Str),
    ("fwr3_aa", Builtin::Str),
    ("cdr3", Builtin::Str),
    ("cdr3_aa", Builtin::Str),
    ("fwr4", Builtin::Str),
    ("fwr4_aa", Builtin::Str),
    ("junction", Builtin::Str),
    ("junction_aa", Builtin::Str),
    ("junction_length", Builtin::Int),
    ("junction_aa_length", Builtin::Int),
    ("v_score", Builtin::Num),
    ("d_score", Builtin::Num),
    ("j_score", Builtin::Num),
    ("c_score", Builtin::Num),
    ("v_cigar", Builtin::Str),
    ("d_cigar", Builtin::Str),
    ("j_cigar", Builtin::Str),
    ("c_cigar", Builtin::Str),
    ("v_support", Builtin::Num),
    ("d_support", Builtin::Num),
    ("j_support", Builtin::Num),
    ("c_support", Builtin::Num),
    ("v_identity", Builtin::Num),
    ("d_identity", Builtin::Num),
    ("j_identity", Builtin::Num),
    ("c_identity", Builtin::Num),
    ("v_sequence_start", Builtin::Int),
    ("v_sequence_end", Builtin::Int),
    ("d_sequence_start", Builtin::Int),
    ("d_sequence_end", Builtin::Int),
    ("j_sequence_start", Builtin::Int),
    ("j_sequence_end", Builtin::Int),
    ("c_sequence_start", Builtin::Int),
    ("c_sequence_end", Builtin::Int),
    ("v_germline_start", Builtin::Int),
    ("v_germline_end", Builtin::Int),
    ("d_germline_start", Builtin::Int),
    ("d_germline_end", Builtin::Int),
    ("j_germline_start", Builtin::Int),
    ("j_germline_end", Builtin::Int),
    ("c_germline_start", Builtin::Int),
    ("c_germline_end", Builtin::Int),
    ("fwr1_start", Builtin::Int),
    ("fwr1_end", Builtin::Int),
    ("cdr1_start", Builtin::Int),
    ("cdr1_end", Builtin::Int),
    ("fwr2_start", Builtin::Int),
    ("fwr2_end", Builtin::Int),
    ("cdr2_start", Builtin::Int),
    ("cdr2_end", Builtin::Int),
    ("fwr3_start", Builtin::Int),
    ("fwr3_end", Builtin::Int),
    ("cdr3_start", Builtin::Int),
    ("cdr3_end", Builtin::Int),
    ("fwr4_start", Builtin::Int),
    ("fwr4_end", Builtin::Int),
    ("sequence_aa_scheme_cigar", Builtin::Str),
    ("scheme_residue_mapping", Builtin::Json),
    ("positional_scheme_mapping", Builtin::Json),
    ("exc", Builtin::Str),
    ("additional_validation_flags", Builtin::Json),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_covers_both_chains() {
        let catalog = TypeCatalog::builtin();
        assert_eq!(catalog.len(), CHAIN_FIELDS.len() * 2 + NUMBERING_FIELDS.len());
        assert_eq!(catalog.index.len(), catalog.len());
        assert_eq!(catalog.kind_of("locus_heavy"), Some(&ValueKind::String));
        assert_eq!(catalog.kind_of("productive_light"), Some(&ValueKind::Boolean));
        assert_eq!(
            catalog.kind_of("v_frame_heavy"),
            Some(&ValueKind::SmallIntEnum { min: 0, max: 2 })
        );
        assert_eq!(catalog.kind_of("junction_length_light"), Some(&ValueKind::Int64));
        assert_eq!(catalog.kind_of("v_score_heavy"), Some(&ValueKind::Float64));
        assert!(matches!(
            catalog.kind_of("numbering_scheme_light"),
            Some(ValueKind::StringEnum(values)) if values.len() == 4
        ));
    }

    #[test]
    fn builtin_catalog_order_is_heavy_then_light_then_numbering() {
        let catalog = TypeCatalog::builtin();
        let names: Vec<&str> = catalog.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names[0], "sequence_header_heavy");
        assert_eq!(names[CHAIN_FIELDS.len()], "sequence_header_light");
        assert_eq!(&names[names.len() - 2..], &NUMBERING_FIELDS);
        assert!(catalog.kind_of("ANARCI_numbering_heavy").unwrap().is_json());
    }

    #[test]
    fn rejects_duplicate_fields() {
        let result = TypeCatalog::new([
            FieldSpec::new("a", ValueKind::String),
            FieldSpec::new("a", ValueKind::Int64),
        ]);
        assert!(matches!(result, Err(ModelError::DuplicateField { name }) if name == "a"));
    }

    #[test]
    fn json_catalog_keeps_document_order() {
        let catalog =
            TypeCatalog::from_json_str(r#"{"z": "string", "a": "boolean", "m": "json string"}"#)
                .unwrap();
        let names: Vec<&str> = catalog.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn json_catalog_rejects_non_string_descriptor() {
        let result = TypeCatalog::from_json_str(r#"{"a": 1}"#);
        assert!(matches!(result, Err(ModelError::CatalogFormat { .. })));
        let result = TypeCatalog::from_json_str(r#"["a"]"#);
        assert!(matches!(result, Err(ModelError::CatalogFormat { .. })));
    }

    #[test]
    fn unknown_names_preserve_input_order() {
        let catalog = TypeCatalog::builtin();
        let columns = vec!["zzz", "locus_heavy", "aaa"];
        assert_eq!(catalog.unknown_names(&columns), vec!["zzz", "aaa"]);
    }
}
