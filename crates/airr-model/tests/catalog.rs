//! Integration tests for catalogs and schema resolution.

use std::collections::HashSet;

use polars::prelude::DataType;

use airr_model::{CHAIN_SUFFIXES, NUMBERING_FIELDS, Schema, TypeCatalog, ValueKind};

#[test]
fn test_builtin_catalog_names_are_unique_and_chained() {
    let catalog = TypeCatalog::builtin();
    let names: HashSet<&str> = catalog.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names.len(), catalog.len());

    for field in catalog.iter() {
        let chained = CHAIN_SUFFIXES
            .iter()
            .any(|suffix| field.name.ends_with(&format!("_{suffix}")));
        assert!(chained, "{} has no chain suffix", field.name);
    }

    let per_chain = catalog.len() - NUMBERING_FIELDS.len();
    assert_eq!(per_chain % CHAIN_SUFFIXES.len(), 0);
}

#[test]
fn test_builtin_numbering_fields_are_json_strings_at_the_end() {
    let catalog = TypeCatalog::builtin();
    let tail: Vec<&str> = catalog
        .iter()
        .skip(catalog.len() - 2)
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(tail, NUMBERING_FIELDS);
    for name in NUMBERING_FIELDS {
        assert_eq!(catalog.kind_of(name), Some(&ValueKind::JsonString));
    }
}

#[test]
fn test_descriptors_round_trip_through_json_catalog() {
    let builtin = TypeCatalog::builtin();
    let document: serde_json::Map<String, serde_json::Value> = builtin
        .iter()
        .map(|f| (f.name.clone(), serde_json::Value::String(f.kind.to_string())))
        .collect();
    let json = serde_json::Value::Object(document).to_string();

    let loaded = TypeCatalog::from_json_str(&json).unwrap();
    assert_eq!(loaded.len(), builtin.len());
    for (a, b) in builtin.iter().zip(loaded.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn test_schema_from_builtin_catalog() {
    let catalog = TypeCatalog::builtin();
    let columns = [
        "ANARCI_numbering_light",
        "v_frame_heavy",
        "made_up",
        "productive_light",
        "v_score_heavy",
    ];
    let schema = Schema::resolve(&columns, &catalog);

    assert_eq!(
        schema.dtypes(),
        vec![
            ("ANARCI_numbering_light".to_string(), DataType::String),
            ("v_frame_heavy".to_string(), DataType::Int8),
            ("productive_light".to_string(), DataType::Boolean),
            ("v_score_heavy".to_string(), DataType::Float64),
        ]
    );
    assert_eq!(catalog.unknown_names(&columns), vec!["made_up"]);
}
