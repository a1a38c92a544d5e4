//! The merge pipeline: load, order by recency, reconcile columns, write.
//!
//! The submodules are pure transforms over in-memory reports. Everything
//! that logs or touches the filesystem lives in [`merge_directory`] and the
//! scanner.

use crate::domain::{Config, ScanStats, SkippedReport};
use crate::error::{MergeError, MergeResult};
use crate::scan::{load_reports, scanner_for, ReportScanner};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

pub mod recency;
pub mod schema;
pub mod split;
pub mod writer;

pub use recency::{compare_recency, sort_by_recency, DateParser, DatedReport, RecencyIssue};
pub use schema::{reference_schema, translate, RowIssue, TranslatedReport, TranslationMap};
pub use split::{parse_record, split_record, ParsedRecord};
pub use writer::{build_output, write_output};

/// Per-report line of the merge summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedReport {
    pub source: PathBuf,
    pub recency: Option<NaiveDateTime>,
    pub rows: usize,
    pub mapped_columns: usize,
}

/// Result of a completed merge.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub output_path: PathBuf,
    pub contents: String,
    pub schema: Vec<String>,
    pub reports: Vec<MergedReport>,
    pub skipped: Vec<SkippedReport>,
    pub stats: ScanStats,
    pub written: bool,
}

impl MergeOutcome {
    /// The report whose header became the output header.
    pub fn reference(&self) -> Option<&MergedReport> {
        self.reports.first()
    }

    pub fn total_rows(&self) -> usize {
        self.reports.iter().map(|r| r.rows).sum()
    }
}

/// Merge every qualifying report in `dir` into `config.output_file`.
///
/// The output is only written when `write` is set and the whole merge has
/// succeeded in memory.
pub fn merge_directory(dir: &Path, config: &Config, write: bool) -> MergeResult<MergeOutcome> {
    merge_with_scanner(scanner_for(dir, config), dir, config, write)
}

/// [`merge_directory`] with a caller-built scanner for `dir`.
pub fn merge_with_scanner(
    scanner: ReportScanner,
    dir: &Path,
    config: &Config,
    write: bool,
) -> MergeResult<MergeOutcome> {
    let (reports, skipped, stats) = load_reports(scanner)?;
    tracing::debug!(
        "Scanned {} file(s): {} ignored by name, {} without '{}', {} loaded, {} bytes",
        stats.files_seen,
        stats.files_skipped_name,
        stats.files_skipped_column,
        config.recency_column,
        stats.reports_loaded,
        stats.bytes_read
    );
    if reports.is_empty() {
        return Err(MergeError::NoReports {
            dir: dir.to_path_buf(),
            column: config.recency_column.clone(),
        });
    }
    tracing::info!("Loaded {} report(s) from {}", reports.len(), dir.display());

    let parser = DateParser::new(&config.date_formats);
    let mut dated = recency::date_reports(reports, &config.recency_column, &parser);
    for report in &dated {
        if let Err(issue) = &report.recency {
            tracing::warn!("{} is undated ({}); ordering it last", report.report.name(), issue);
        }
    }
    sort_by_recency(&mut dated);

    let reference = &dated[0].report;
    let schema = reference_schema(reference)?;
    tracing::info!("Reference schema from {}: {} column(s)", reference.name(), schema.len());

    let translated = translate(dated.iter().map(|d| &d.report), &schema);
    for (report, out) in dated.iter().zip(&translated) {
        for issue in &out.issues {
            match issue {
                RowIssue::UnterminatedQuote { line } => tracing::warn!(
                    "{} line {}: unterminated quote, field runs to end of line",
                    report.report.name(),
                    line
                ),
            }
        }
        tracing::debug!(
            "{}: {} row(s), {}/{} column(s) mapped",
            report.report.name(),
            out.lines.len(),
            out.mapped_columns,
            schema.len()
        );
    }

    let lines: Vec<&str> =
        translated.iter().flat_map(|t| t.lines.iter().map(String::as_str)).collect();
    let contents = build_output(reference.header_line(), &lines);

    let output_path = dir.join(&config.output_file);
    if write {
        write_output(&output_path, &contents)?;
        tracing::info!("Wrote {}", output_path.display());
    }

    let merged = dated
        .iter()
        .zip(&translated)
        .map(|(d, t)| MergedReport {
            source: d.report.source.clone(),
            recency: d.timestamp().copied(),
            rows: t.lines.len(),
            mapped_columns: t.mapped_columns,
        })
        .collect();

    Ok(MergeOutcome {
        output_path,
        contents,
        schema,
        reports: merged,
        skipped,
        stats,
        written: write,
    })
}
