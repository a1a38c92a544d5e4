//! Core domain types shared by scanning, merging and the CLI.

use serde::Deserialize;
use std::path::PathBuf;

/// File name of the merged output written into the target directory.
pub const DEFAULT_OUTPUT_FILE: &str = "MERGED.csv";

/// Column whose first-row value decides report recency.
pub const DEFAULT_RECENCY_COLUMN: &str = "Check-In Date";

/// Substring a file name must contain to be considered a report.
pub const DEFAULT_INPUT_MARKER: &str = ".csv";

/// One input CSV file: where it came from and its full decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub source: PathBuf,
    pub text: String,
}

impl Report {
    pub fn new(source: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self { source: source.into(), text: text.into() }
    }

    /// Display name used in logs and summaries (the file name when there is one).
    pub fn name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }

    /// Lines of the report with one trailing `\r` removed from each.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
    }

    /// The raw header line, without its line terminator.
    pub fn header_line(&self) -> &str {
        self.lines().next().unwrap_or("")
    }

    /// Header tokens split on plain commas (no quote handling).
    pub fn header_fields(&self) -> Vec<&str> {
        self.header_line().split(',').collect()
    }

    /// The line right after the header, if the report has one.
    pub fn first_data_line(&self) -> Option<&str> {
        self.lines().nth(1)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.header_fields().iter().any(|field| *field == column)
    }
}

/// Merge settings, loaded from an optional `reptool.toml` / `reptool.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output_file: String,
    pub recency_column: String,
    pub input_marker: String,
    pub date_formats: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            recency_column: DEFAULT_RECENCY_COLUMN.to_string(),
            input_marker: DEFAULT_INPUT_MARKER.to_string(),
            date_formats: Vec::new(),
        }
    }
}

/// Why a discovered file was left out of the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingRecencyColumn(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedReport {
    pub source: PathBuf,
    pub reason: SkipReason,
}

/// Counters collected while discovering and loading reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_seen: usize,
    pub files_skipped_name: usize,
    pub files_skipped_column: usize,
    pub reports_loaded: usize,
    pub bytes_read: u64,
}
