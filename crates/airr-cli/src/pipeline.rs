//! Conversion pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Resources**: Load the column list, type catalog and metadata table,
//!    and resolve the output schema (once per run)
//! 2. **Read**: Decompress, decode and recover one input file
//! 3. **Parse**: Typed read and projection onto the schema
//! 4. **Transform**: Normalize numbering maps, stamp per-file metadata
//! 5. **Write**: Serialize the batch to Parquet
//!
//! Stages 2-5 run per file; any error there becomes a
//! [`ProcessingOutcome::Failure`] for that file only.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, error, info, info_span};

use airr_ingest::{
    RecoveringReader, load_metadata_table, load_type_catalog, output_path_for, parse_batch,
    read_column_names,
};
use airr_model::{
    FAILED_FILES_LOG, MetadataTable, ProcessingOutcome, RunReport, Schema, TypeCatalog,
};
use airr_output::ParquetBatchWriter;
use airr_transform::{MetadataStamper, RecordNormalizer};

use crate::cli::ConvertArgs;

// ============================================================================
// Stage 1: Resources
// ============================================================================

/// Run-wide inputs shared read-only by every file.
#[derive(Debug)]
pub struct RunResources {
    pub schema: Schema,
    pub metadata: MetadataTable,
}

/// Load the column list, catalog and metadata table and resolve the schema.
///
/// Any failure here aborts the run.
pub fn load_resources(args: &ConvertArgs) -> Result<RunResources> {
    let columns = read_column_names(&args.column_file).context("load column list")?;

    let catalog = match &args.type_catalog {
        Some(path) => load_type_catalog(path).context("load type catalog")?,
        None => TypeCatalog::builtin(),
    };

    let unknown = catalog.unknown_names(&columns);
    if !unknown.is_empty() {
        debug!(
            dropped = unknown.len(),
            columns = ?unknown,
            "column list names not in type catalog"
        );
    }
    let schema = Schema::resolve(&columns, &catalog);

    let metadata = load_metadata_table(&args.metadata).context("load metadata table")?;

    debug!(
        requested_columns = columns.len(),
        schema_columns = schema.len(),
        metadata_entries = metadata.len(),
        "resources loaded"
    );
    Ok(RunResources { schema, metadata })
}

/// Per-stage components configured from the CLI.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub reader: RecoveringReader,
    pub normalizer: RecordNormalizer,
    pub stamper: MetadataStamper,
    pub writer: ParquetBatchWriter,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            reader: RecoveringReader::new(),
            normalizer: RecordNormalizer::new(),
            stamper: MetadataStamper::new(),
            writer: ParquetBatchWriter::new(),
        }
    }
}

impl ConvertOptions {
    pub fn from_args(args: &ConvertArgs) -> Self {
        Self {
            reader: RecoveringReader::new().with_expected_fields(args.expected_fields),
            normalizer: RecordNormalizer::with_columns(args.normalize_columns.iter().cloned()),
            stamper: MetadataStamper::new(),
            writer: ParquetBatchWriter::new().with_codec(args.compression.into()),
        }
    }
}

// ============================================================================
// Stages 2-5: Per-file conversion
// ============================================================================

/// Convert one input file, isolating any failure to its outcome.
pub fn process_file(
    path: &Path,
    output_dir: &Path,
    resources: &RunResources,
    options: &ConvertOptions,
) -> ProcessingOutcome {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let span = info_span!("file", file_name = %file_name);
    let _guard = span.enter();
    let start = Instant::now();

    match convert_file(path, &file_name, output_dir, resources, options) {
        Ok((output_path, rows)) => {
            info!(
                rows,
                output = %output_path.display(),
                duration_ms = start.elapsed().as_millis(),
                "converted"
            );
            ProcessingOutcome::success(file_name, output_path, rows)
        }
        Err(err) => {
            let message = err.to_string();
            error!(error = %message, "conversion failed");
            ProcessingOutcome::failure(file_name, message)
        }
    }
}

fn convert_file(
    path: &Path,
    file_name: &str,
    output_dir: &Path,
    resources: &RunResources,
    options: &ConvertOptions,
) -> Result<(PathBuf, usize)> {
    let recovered = options.reader.read(path)?;
    let batch = parse_batch(recovered, &resources.schema)?;
    let batch = options.normalizer.normalize(batch)?;
    let mut batch = options
        .stamper
        .stamp(batch, file_name, &resources.metadata)?;

    let output_path = output_path_for(path, output_dir);
    let summary = options.writer.write(&mut batch, &output_path)?;
    Ok((summary.path, summary.rows))
}

// ============================================================================
// Run report
// ============================================================================

/// Write `failed_files.log` when the run had failures.
///
/// Returns the log path if one was written. A log left over from an earlier
/// run is removed when this run had no failures.
pub fn write_failure_log(output_dir: &Path, report: &RunReport) -> Result<Option<PathBuf>> {
    let path = output_dir.join(FAILED_FILES_LOG);
    if report.has_failures() {
        std::fs::write(&path, report.failure_log())
            .with_context(|| format!("write {}", path.display()))?;
        return Ok(Some(path));
    }
    match std::fs::remove_file(&path) {
        Ok(()) => debug!(path = %path.display(), "removed stale failure log"),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("remove {}", path.display()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use airr_model::{FieldSpec, MetadataEntry, MetadataValue, ValueKind};
    use tempfile::TempDir;

    fn resources() -> RunResources {
        let catalog = TypeCatalog::new([FieldSpec::new("map", ValueKind::JsonString)]).unwrap();
        let mut metadata = MetadataTable::new();
        metadata.insert(
            "ok.csv.gz",
            MetadataEntry::new().with_field("sample_id", MetadataValue::String("S1".into())),
        );
        RunResources {
            schema: Schema::resolve(&["map"], &catalog),
            metadata,
        }
    }

    #[test]
    fn unreadable_file_becomes_failure() {
        let dir = TempDir::new().unwrap();
        let outcome = process_file(
            &dir.path().join("missing.csv.gz"),
            dir.path(),
            &resources(),
            &ConvertOptions::default(),
        );
        assert!(outcome.is_failure());
        assert_eq!(outcome.file_name(), "missing.csv.gz");
    }

    #[test]
    fn failure_log_written_and_stale_log_removed() {
        let dir = TempDir::new().unwrap();
        let mut report = RunReport::new();
        report.push(ProcessingOutcome::failure("bad.csv.gz", "truncated input"));

        let written = write_failure_log(dir.path(), &report).unwrap();
        let log_path = dir.path().join(FAILED_FILES_LOG);
        assert_eq!(written, Some(log_path.clone()));
        assert_eq!(
            std::fs::read_to_string(&log_path).unwrap(),
            "bad.csv.gz: truncated input\n"
        );

        let clean = RunReport::new();
        assert_eq!(write_failure_log(dir.path(), &clean).unwrap(), None);
        assert!(!log_path.exists());
    }

    #[test]
    fn options_default_to_builtin_components() {
        let options = ConvertOptions::default();
        assert_eq!(options.reader.expected_fields(), 198);
        assert_eq!(
            options.normalizer.columns(),
            ["ANARCI_numbering_heavy", "ANARCI_numbering_light"]
        );
    }
}
