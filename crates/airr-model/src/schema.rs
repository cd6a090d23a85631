//! Output schema resolution.

use std::collections::HashSet;

use polars::prelude::{DataType, Schema as PolarsSchema};

use crate::catalog::{FieldSpec, TypeCatalog};

/// Ordered output columns for a run.
///
/// Derived once from the column list and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Keeps the names the catalog knows, in column-list order.
    ///
    /// Names missing from the catalog are dropped without error; use
    /// [`TypeCatalog::unknown_names`] to find out which ones. A repeated name
    /// keeps only its first position.
    ///
    /// ```
    /// use airr_model::{FieldSpec, Schema, TypeCatalog, ValueKind};
    ///
    /// let catalog = TypeCatalog::new([
    ///     FieldSpec::new("a", ValueKind::String),
    ///     FieldSpec::new("b", ValueKind::Int64),
    /// ])
    /// .unwrap();
    /// let schema = Schema::resolve(&["b", "a", "zzz"], &catalog);
    /// assert_eq!(schema.names().collect::<Vec<_>>(), vec!["b", "a"]);
    /// ```
    pub fn resolve<S: AsRef<str>>(column_names: &[S], catalog: &TypeCatalog) -> Self {
        let mut seen = HashSet::new();
        let fields = column_names
            .iter()
            .map(AsRef::as_ref)
            .filter_map(|name| catalog.get(name))
            .filter(|field| seen.insert(field.name.clone()))
            .cloned()
            .collect();
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Storage dtypes per column, in schema order.
    pub fn dtypes(&self) -> Vec<(String, DataType)> {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.kind.dtype()))
            .collect()
    }

    /// Type hints for the CSV reader.
    pub fn polars_schema(&self) -> PolarsSchema {
        let mut schema = PolarsSchema::with_capacity(self.fields.len());
        for field in &self.fields {
            schema.with_column(field.name.as_str().into(), field.kind.dtype());
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ValueKind;

    fn catalog() -> TypeCatalog {
        TypeCatalog::new([
            FieldSpec::new("a", ValueKind::String),
            FieldSpec::new("b", ValueKind::Boolean),
            FieldSpec::new("c", ValueKind::SmallIntEnum { min: 0, max: 2 }),
        ])
        .unwrap()
    }

    #[test]
    fn resolve_keeps_column_list_order() {
        let schema = Schema::resolve(&["b", "a", "zzz"], &catalog());
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn resolve_drops_unknown_and_repeated_names() {
        let columns = vec!["c".to_string(), "x".to_string(), "c".to_string()];
        let schema = Schema::resolve(&columns, &catalog());
        assert_eq!(schema.len(), 1);
        assert!(schema.contains("c"));
        assert!(!schema.contains("x"));
    }

    #[test]
    fn resolve_empty_list_gives_empty_schema() {
        let columns: Vec<String> = Vec::new();
        assert!(Schema::resolve(&columns, &catalog()).is_empty());
    }

    #[test]
    fn polars_schema_maps_kinds_to_dtypes() {
        let schema = Schema::resolve(&["c", "b", "a"], &catalog());
        let hints = schema.polars_schema();
        assert_eq!(hints.len(), 3);
        assert_eq!(hints.get("c"), Some(&DataType::Int8));
        assert_eq!(hints.get("b"), Some(&DataType::Boolean));
        assert_eq!(hints.get("a"), Some(&DataType::String));
        assert_eq!(
            schema.dtypes(),
            vec![
                ("c".to_string(), DataType::Int8),
                ("b".to_string(), DataType::Boolean),
                ("a".to_string(), DataType::String),
            ]
        );
    }
}
