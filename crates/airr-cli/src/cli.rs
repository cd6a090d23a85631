//! CLI argument definitions for airr-convert.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use airr_ingest::EXPECTED_FIELD_COUNT;
use airr_model::NUMBERING_FIELDS;
use airr_output::ParquetCodec;

#[derive(Parser)]
#[command(
    name = "airr-convert",
    version,
    about = "Convert header-corrupted csv.gz annotation exports to Parquet",
    long_about = "Convert a directory of gzip-compressed paired-chain annotation exports \
                  to Parquet.\n\n\
                  Each file has its bad first line dropped, is parsed with the catalog's \
                  column types, gets its numbering maps normalized and its per-file \
                  metadata stamped on. Files that fail are listed in failed_files.log in \
                  the output directory; the rest of the batch still converts."
)]
pub struct Cli {
    #[command(flatten)]
    pub convert: ConvertArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Directory containing the *.csv.gz inputs.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory receiving the .parquet outputs (created if missing).
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Column list: one output column name per line.
    #[arg(value_name = "COLUMN_FILE")]
    pub column_file: PathBuf,

    /// Per-file metadata table (JSON object keyed by input file name).
    #[arg(long = "metadata", value_name = "PATH", default_value = "metadata.json")]
    pub metadata: PathBuf,

    /// JSON type catalog replacing the built-in one.
    #[arg(long = "type-catalog", value_name = "PATH")]
    pub type_catalog: Option<PathBuf>,

    /// Field count required on the first data-bearing line.
    #[arg(long = "expected-fields", value_name = "N", default_value_t = EXPECTED_FIELD_COUNT)]
    pub expected_fields: usize,

    /// Columns whose dict-literal text is rewritten to JSON-style quoting.
    #[arg(
        long = "normalize-column",
        value_name = "NAME",
        default_values_t = NUMBERING_FIELDS.map(String::from)
    )]
    pub normalize_columns: Vec<String>,

    /// Parquet compression codec.
    #[arg(long = "compression", value_enum, default_value = "zstd")]
    pub compression: CompressionArg,

    /// Exit with status 1 when any file failed to convert.
    #[arg(long = "fail-on-error")]
    pub fail_on_error: bool,
}

/// CLI compression choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompressionArg {
    Uncompressed,
    Snappy,
    Zstd,
    Lz4,
}

impl From<CompressionArg> for ParquetCodec {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Uncompressed => ParquetCodec::Uncompressed,
            CompressionArg::Snappy => ParquetCodec::Snappy,
            CompressionArg::Zstd => ParquetCodec::Zstd,
            CompressionArg::Lz4 => ParquetCodec::Lz4,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["airr-convert", "in", "out", "columns.txt"]).unwrap();
        let args = cli.convert;
        assert_eq!(args.input_dir, PathBuf::from("in"));
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert_eq!(args.column_file, PathBuf::from("columns.txt"));
        assert_eq!(args.metadata, PathBuf::from("metadata.json"));
        assert_eq!(args.expected_fields, 198);
        assert_eq!(
            args.normalize_columns,
            vec!["ANARCI_numbering_heavy", "ANARCI_numbering_light"]
        );
        assert_eq!(ParquetCodec::from(args.compression), ParquetCodec::Zstd);
        assert!(args.type_catalog.is_none());
        assert!(!args.fail_on_error);
    }

    #[test]
    fn options() {
        let cli = Cli::try_parse_from([
            "airr-convert",
            "in",
            "out",
            "columns.txt",
            "--metadata",
            "meta/batch.json",
            "--expected-fields",
            "12",
            "--normalize-column",
            "map_a",
            "--normalize-column",
            "map_b",
            "--compression",
            "lz4",
            "--fail-on-error",
            "--log-format",
            "json",
        ])
        .unwrap();
        let args = cli.convert;
        assert_eq!(args.metadata, PathBuf::from("meta/batch.json"));
        assert_eq!(args.expected_fields, 12);
        assert_eq!(args.normalize_columns, vec!["map_a", "map_b"]);
        assert_eq!(ParquetCodec::from(args.compression), ParquetCodec::Lz4);
        assert!(args.fail_on_error);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }

    #[test]
    fn missing_positional_is_rejected() {
        assert!(Cli::try_parse_from(["airr-convert", "in", "out"]).is_err());
    }
}
