//! Loading of the run-level input documents: column list, type catalog and
//! metadata table.

use std::path::Path;

use airr_model::{MetadataTable, TypeCatalog};

use crate::error::{IngestError, Result};

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| IngestError::file_read(path, e))
}

/// Reads the column list: one name per line, trimmed, blank lines ignored.
pub fn read_column_names(path: &Path) -> Result<Vec<String>> {
    let contents = read_to_string(path)?;
    Ok(parse_column_names(&contents))
}

fn parse_column_names(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads a JSON type catalog (`{"field": "descriptor", ...}`).
pub fn load_type_catalog(path: &Path) -> Result<TypeCatalog> {
    let contents = read_to_string(path)?;
    TypeCatalog::from_json_str(&contents).map_err(|source| IngestError::Document {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the metadata table (`{"<file name>": {"field": literal, ...}, ...}`).
pub fn load_metadata_table(path: &Path) -> Result<MetadataTable> {
    let contents = read_to_string(path)?;
    let table = MetadataTable::from_json_str(&contents).map_err(|source| {
        IngestError::Document {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(path = %path.display(), entries = table.len(), "loaded metadata table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn column_names_skip_blank_lines_and_trim() {
        let file =
            create_temp_file("locus_heavy\n\n  v_call_heavy  \r\n\t\nANARCI_numbering_heavy");
        let names = read_column_names(file.path()).unwrap();
        assert_eq!(
            names,
            vec!["locus_heavy", "v_call_heavy", "ANARCI_numbering_heavy"]
        );
    }

    #[test]
    fn missing_column_file_is_not_found() {
        let result = read_column_names(Path::new("/definitely/not/here.txt"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn loads_metadata_table() {
        let file = create_temp_file(r#"{"S1.csv.gz": {"sample_id": "S1"}}"#);
        let table = load_metadata_table(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("S1.csv.gz").is_some());
    }

    #[test]
    fn invalid_metadata_is_a_document_error() {
        let file = create_temp_file(r#"{"S1.csv.gz": 3}"#);
        let result = load_metadata_table(file.path());
        assert!(matches!(result, Err(IngestError::Document { .. })));
    }

    #[test]
    fn loads_type_catalog() {
        let file = create_temp_file(r#"{"b": "boolean", "a": "enum [0, 1, 2]"}"#);
        let catalog = load_type_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("a"));
    }
}
