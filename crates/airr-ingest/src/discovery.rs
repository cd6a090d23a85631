//! Input file discovery and output naming.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Suffix of convertible input files.
pub const INPUT_SUFFIX: &str = ".csv.gz";

/// Extension of converted output files.
pub const OUTPUT_EXTENSION: &str = "parquet";

/// Lists all `*.csv.gz` files directly inside `dir`.
///
/// Returns files sorted by filename.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        let is_input = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(INPUT_SUFFIX));

        if is_input {
            files.push(path);
        }
    }

    // Sort by filename
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Output path for `input` under `output_dir`: `<stem>.parquet`, where the
/// stem is the file name without its `.csv.gz` suffix.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(INPUT_SUFFIX).unwrap_or(&name);
    output_dir.join(format!("{stem}.{OUTPUT_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        for name in &["S2.csv.gz", "S1.csv.gz", "notes.csv", "S3.csv.gz.bak", "metadata.json"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "data").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv.gz")).unwrap();

        dir
    }

    #[test]
    fn test_list_input_files() {
        let dir = create_test_dir();
        let files = list_input_files(dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["S1.csv.gz", "S2.csv.gz"]);
    }

    #[test]
    fn test_list_input_files_empty_dir() {
        let dir = TempDir::new().unwrap();
        let files = list_input_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_list_input_files_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("S1.csv.gz");
        std::fs::write(&file_path, "data").unwrap();

        let result = list_input_files(&file_path);
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_output_path_strips_full_suffix() {
        let out = output_path_for(Path::new("/in/sample_7.csv.gz"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/sample_7.parquet"));
    }
}
