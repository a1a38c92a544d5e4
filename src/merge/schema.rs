//! Reference schema selection and row translation onto it.

use crate::domain::Report;
use crate::error::{MergeError, MergeResult};
use crate::merge::split::parse_record;
use std::path::PathBuf;

/// Column names of the reference report, in output order.
///
/// Fails when the header line is empty.
pub fn reference_schema(report: &Report) -> MergeResult<Vec<String>> {
    let header = report.header_line();
    if header.trim().is_empty() {
        return Err(MergeError::EmptySchema(report.source.clone()));
    }
    Ok(header.split(',').map(str::to_string).collect())
}

/// For each reference column, the index of the same-named column in one
/// report's header (first occurrence), or `None` when the report lacks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationMap {
    indices: Vec<Option<usize>>,
}

impl TranslationMap {
    pub fn build(schema: &[String], header: &[&str]) -> Self {
        let indices = schema
            .iter()
            .map(|name| header.iter().position(|field| *field == name.as_str()))
            .collect();
        Self { indices }
    }

    pub fn source_index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied().flatten()
    }

    /// Number of reference columns this report can fill.
    pub fn mapped_columns(&self) -> usize {
        self.indices.iter().filter(|index| index.is_some()).count()
    }

    /// Rewrite one parsed record in reference column order.
    ///
    /// Every field is followed by a comma, including the last one. Fields
    /// containing a comma are wrapped in quotes; embedded quotes are written
    /// as-is. Missing columns and short rows produce empty fields.
    pub fn translate_fields(&self, fields: &[String]) -> String {
        let mut line = String::new();
        for index in self.indices.iter().copied() {
            if let Some(value) = index.and_then(|i| fields.get(i)) {
                if value.contains(',') {
                    line.push('"');
                    line.push_str(value);
                    line.push('"');
                } else {
                    line.push_str(value);
                }
            }
            line.push(',');
        }
        line
    }
}

/// A non-fatal problem found in one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    /// 1-based line number within the report.
    UnterminatedQuote { line: usize },
}

/// One report's rows rewritten onto the reference schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedReport {
    pub source: PathBuf,
    pub mapped_columns: usize,
    pub lines: Vec<String>,
    pub issues: Vec<RowIssue>,
}

/// Translate every non-empty data line of `report`, keeping row order.
pub fn translate_report(report: &Report, schema: &[String]) -> TranslatedReport {
    let map = TranslationMap::build(schema, &report.header_fields());
    let mut lines = Vec::new();
    let mut issues = Vec::new();

    for (offset, raw) in report.lines().enumerate().skip(1) {
        if raw.is_empty() {
            continue;
        }
        let record = parse_record(raw);
        if record.unterminated {
            issues.push(RowIssue::UnterminatedQuote { line: offset + 1 });
        }
        lines.push(map.translate_fields(&record.fields));
    }

    TranslatedReport {
        source: report.source.clone(),
        mapped_columns: map.mapped_columns(),
        lines,
        issues,
    }
}

/// Translate reports in the order given.
pub fn translate<'a, I>(reports: I, schema: &[String]) -> Vec<TranslatedReport>
where
    I: IntoIterator<Item = &'a Report>,
{
    reports.into_iter().map(|report| translate_report(report, schema)).collect()
}
