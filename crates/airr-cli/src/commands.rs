use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use airr_ingest::list_input_files;
use airr_model::RunReport;

use crate::cli::ConvertArgs;
use crate::pipeline::{ConvertOptions, load_resources, process_file, write_failure_log};

/// Convert every `*.csv.gz` file in the input directory.
///
/// Returns `Err` only for run-level problems (unwritable output directory,
/// unreadable column list, catalog or metadata table, unlistable input
/// directory). Per-file problems are recorded in the returned report.
pub fn run_convert(args: &ConvertArgs) -> Result<RunReport> {
    let run_span = info_span!(
        "convert",
        input_dir = %args.input_dir.display(),
        output_dir = %args.output_dir.display()
    );
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    // =========================================================================
    // Stage 0: Prepare output directory
    // =========================================================================
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create output directory {}", args.output_dir.display()))?;

    // =========================================================================
    // Stage 1: Resources and discovery
    // =========================================================================
    let resources = load_resources(args)?;
    let options = ConvertOptions::from_args(args);
    let files = list_input_files(&args.input_dir).context("list input files")?;
    info!(
        file_count = files.len(),
        schema_columns = resources.schema.len(),
        "starting conversion"
    );

    // =========================================================================
    // Stage 2-5: Per-file pipeline
    // =========================================================================
    let mut report = RunReport::new();
    for path in &files {
        report.push(process_file(path, &args.output_dir, &resources, &options));
    }

    // =========================================================================
    // Stage 6: Failure log
    // =========================================================================
    match write_failure_log(&args.output_dir, &report)? {
        Some(log_path) => warn!(
            failed = report.failure_count(),
            converted = report.success_count(),
            log = %log_path.display(),
            "some files failed to convert"
        ),
        None => info!(
            converted = report.success_count(),
            rows = report.total_rows(),
            duration_ms = run_start.elapsed().as_millis(),
            "all files converted"
        ),
    }

    Ok(report)
}
