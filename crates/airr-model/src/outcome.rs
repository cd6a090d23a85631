//! Per-file processing outcomes and the run report.

use std::fmt::Write as _;
use std::path::PathBuf;

/// Name of the failure log written to the output directory.
pub const FAILED_FILES_LOG: &str = "failed_files.log";

/// Result of converting one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Success {
        file_name: String,
        output_path: PathBuf,
        rows: usize,
    },
    Failure {
        file_name: String,
        message: String,
    },
}

impl ProcessingOutcome {
    pub fn success(file_name: impl Into<String>, output_path: PathBuf, rows: usize) -> Self {
        Self::Success {
            file_name: file_name.into(),
            output_path,
            rows,
        }
    }

    pub fn failure(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failure {
            file_name: file_name.into(),
            message: message.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Self::Success { file_name, .. } | Self::Failure { file_name, .. } => file_name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

/// All outcomes of one run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    outcomes: Vec<ProcessingOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: ProcessingOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[ProcessingOutcome] {
        &self.outcomes
    }

    /// `(file name, message)` for every failed file.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            ProcessingOutcome::Failure { file_name, message } => {
                Some((file_name.as_str(), message.as_str()))
            }
            ProcessingOutcome::Success { .. } => None,
        })
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn total_rows(&self) -> usize {
        self.outcomes
            .iter()
            .map(|outcome| match outcome {
                ProcessingOutcome::Success { rows, .. } => *rows,
                ProcessingOutcome::Failure { .. } => 0,
            })
            .sum()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(ProcessingOutcome::is_failure)
    }

    /// Failure log text: one `<file name>: <message>` line per failure.
    ///
    /// Line breaks inside a message are flattened so that each failure stays
    /// on one line.
    pub fn failure_log(&self) -> String {
        let mut log = String::new();
        for (file_name, message) in self.failures() {
            let flat = message.replace(['\r', '\n'], " ");
            let _ = writeln!(log, "{file_name}: {flat}");
        }
        log
    }
}
