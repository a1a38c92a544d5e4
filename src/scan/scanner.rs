//! Report discovery and loading

use crate::domain::{
    Report, ScanStats, SkipReason, SkippedReport, DEFAULT_INPUT_MARKER, DEFAULT_OUTPUT_FILE,
    DEFAULT_RECENCY_COLUMN,
};
use crate::error::{MergeError, MergeResult};
use crate::utils::{read_text, DecodedText};
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reads one report file to text.
pub type ReadFn = fn(&Path) -> io::Result<DecodedText>;

/// Scanner that finds report files directly inside a directory, reads them
/// in parallel and keeps the ones carrying the recency column.
pub struct ReportScanner {
    root_path: PathBuf,
    input_marker: String,
    excluded_name: String,
    recency_column: String,
    reader: ReadFn,
    skipped: Vec<SkippedReport>,
    stats: ScanStats,
}

impl ReportScanner {
    /// Create a new ReportScanner with default settings.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            input_marker: DEFAULT_INPUT_MARKER.to_string(),
            excluded_name: DEFAULT_OUTPUT_FILE.to_string(),
            recency_column: DEFAULT_RECENCY_COLUMN.to_string(),
            reader: read_text,
            skipped: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Substring a file name must contain (case-sensitive)
    pub fn input_marker(mut self, marker: impl Into<String>) -> Self {
        self.input_marker = marker.into();
        self
    }

    /// File name never treated as input (the merge output)
    pub fn exclude_name(mut self, name: impl Into<String>) -> Self {
        self.excluded_name = name.into();
        self
    }

    /// Header column every report must have
    pub fn recency_column(mut self, column: impl Into<String>) -> Self {
        self.recency_column = column.into();
        self
    }

    /// Replace the file reader (defaults to [`read_text`])
    pub fn reader(mut self, reader: ReadFn) -> Self {
        self.reader = reader;
        self
    }

    fn is_candidate(&self, name: &str) -> bool {
        name.contains(&self.input_marker) && name != self.excluded_name
    }

    /// List candidate files in file-name order.
    pub fn discover(&mut self) -> MergeResult<Vec<PathBuf>> {
        if !self.root_path.is_dir() {
            return Err(MergeError::NotADirectory(self.root_path.clone()));
        }

        let walker = WalkDir::new(&self.root_path).min_depth(1).max_depth(1).sort_by_file_name();

        let mut candidates = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| MergeError::ListDirectory {
                path: self.root_path.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            self.stats.files_seen += 1;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.is_candidate(&name) {
                tracing::debug!("Ignoring {}", entry.path().display());
                self.stats.files_skipped_name += 1;
                continue;
            }
            candidates.push(entry.into_path());
        }

        Ok(candidates)
    }

    /// Discover, read and filter reports.
    ///
    /// Any read failure aborts the scan. Reports without the recency column
    /// are recorded in [`ReportScanner::skipped`] and logged.
    pub fn scan(&mut self) -> MergeResult<Vec<Report>> {
        self.stats = ScanStats::default();
        self.skipped.clear();

        let candidates = self.discover()?;
        let loaded = read_reports(&candidates, self.reader)?;

        let mut reports = Vec::with_capacity(loaded.len());
        for report in loaded {
            self.stats.bytes_read += report.text.len() as u64;
            if report.has_column(&self.recency_column) {
                self.stats.reports_loaded += 1;
                reports.push(report);
            } else {
                tracing::warn!(
                    "Skipping {}: no '{}' column in header",
                    report.source.display(),
                    self.recency_column
                );
                self.stats.files_skipped_column += 1;
                self.skipped.push(SkippedReport {
                    source: report.source,
                    reason: SkipReason::MissingRecencyColumn(self.recency_column.clone()),
                });
            }
        }

        Ok(reports)
    }

    /// Files left out of the last scan because they lacked the recency column
    pub fn skipped(&self) -> &[SkippedReport] {
        &self.skipped
    }

    /// Get scanning statistics
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }
}

/// Read all files in parallel, preserving input order.
fn read_reports(paths: &[PathBuf], reader: ReadFn) -> MergeResult<Vec<Report>> {
    paths.par_iter().map(|path| read_report(path, reader)).collect()
}

fn read_report(path: &Path, reader: ReadFn) -> MergeResult<Report> {
    let decoded = reader(path)
        .map_err(|source| MergeError::ReadReport { path: path.to_path_buf(), source })?;
    tracing::debug!("Read {} ({})", path.display(), decoded.encoding);
    Ok(Report::new(path, decoded.content))
}
