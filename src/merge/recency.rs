//! Ordering reports by the date in their first data row.

use crate::domain::Report;
use crate::merge::split::split_record;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%b %d, %Y %I:%M:%S %p",
    "%b %d, %Y %I:%M %p",
    "%b %d, %Y %H:%M",
];

// Two-digit years go first: `%Y` would also accept "24" as year 24.
const DATE_FORMATS: &[&str] =
    &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%y", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Why a report could not be given a recency timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecencyIssue {
    MissingColumn(String),
    NoDataRow,
    MissingField { column: String, index: usize },
    Unparseable(String),
}

impl fmt::Display for RecencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn(column) => write!(f, "header has no '{column}' column"),
            Self::NoDataRow => write!(f, "no data row after the header"),
            Self::MissingField { column, index } => {
                write!(f, "first data row has no field {index} for '{column}'")
            }
            Self::Unparseable(raw) => write!(f, "cannot parse '{raw}' as a date"),
        }
    }
}

/// Lenient date/time parser for recency values.
#[derive(Debug, Clone, Default)]
pub struct DateParser {
    extra_formats: Vec<String>,
}

impl DateParser {
    pub fn new(extra_formats: &[String]) -> Self {
        Self { extra_formats: extra_formats.to_vec() }
    }

    /// Parse a recency value. All `"` characters and surrounding whitespace
    /// are removed first; date-only values resolve to midnight.
    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        let cleaned: String = raw.chars().filter(|c| *c != '"').collect();
        let value = cleaned.trim();
        if value.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.naive_utc());
        }

        let extra = &self.extra_formats;
        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .or_else(|| DATE_FORMATS.iter().find_map(|fmt| parse_date(value, fmt)))
            .or_else(|| extra.iter().find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok()))
            .or_else(|| extra.iter().find_map(|fmt| parse_date(value, fmt)))
    }
}

fn parse_date(value: &str, fmt: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(value, fmt).ok().and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Timestamp of a report: the recency column's value in its first data row,
/// located through the report's own header.
pub fn recency_of(
    report: &Report,
    column: &str,
    parser: &DateParser,
) -> Result<NaiveDateTime, RecencyIssue> {
    let index = report
        .header_fields()
        .iter()
        .position(|field| *field == column)
        .ok_or_else(|| RecencyIssue::MissingColumn(column.to_string()))?;
    let row = report.first_data_line().ok_or(RecencyIssue::NoDataRow)?;
    let fields = split_record(row);
    let raw = fields
        .get(index)
        .ok_or_else(|| RecencyIssue::MissingField { column: column.to_string(), index })?;
    parser.parse(raw).ok_or_else(|| RecencyIssue::Unparseable(raw.clone()))
}

/// A loaded report together with its recency timestamp, if it has one.
#[derive(Debug, Clone)]
pub struct DatedReport {
    pub report: Report,
    pub recency: Result<NaiveDateTime, RecencyIssue>,
}

impl DatedReport {
    pub fn timestamp(&self) -> Option<&NaiveDateTime> {
        self.recency.as_ref().ok()
    }
}

pub fn date_reports(reports: Vec<Report>, column: &str, parser: &DateParser) -> Vec<DatedReport> {
    reports
        .into_iter()
        .map(|report| {
            let recency = recency_of(&report, column, parser);
            DatedReport { report, recency }
        })
        .collect()
}

/// Most recent first; undated reports after every dated one.
///
/// Undated reports compare equal to each other, which keeps the ordering
/// total so a stable sort leaves them in their original relative order.
pub fn compare_recency(a: Option<&NaiveDateTime>, b: Option<&NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable in-place sort, most recent report first.
pub fn sort_by_recency(reports: &mut [DatedReport]) {
    reports.sort_by(|a, b| compare_recency(a.timestamp(), b.timestamp()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn at_hms(y: i32, m: u32, d: u32, h: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, sec).unwrap()
    }

    fn dated(name: &str, text: &str) -> DatedReport {
        let report = Report::new(name, text);
        let recency = recency_of(&report, "Check-In Date", &DateParser::default());
        DatedReport { report, recency }
    }

    fn names(reports: &[DatedReport]) -> Vec<String> {
        reports.iter().map(|r| r.report.name()).collect()
    }

    #[test]
    fn parses_common_layouts() {
        let parser = DateParser::default();
        assert_eq!(parser.parse("2024-06-01"), Some(at(2024, 6, 1)));
        assert_eq!(parser.parse("\"06/01/2024\""), Some(at(2024, 6, 1)));
        assert_eq!(parser.parse(" June 01, 2024 "), Some(at(2024, 6, 1)));
        assert_eq!(parser.parse("06/01/24"), Some(at(2024, 6, 1)));
        assert_eq!(parser.parse("2024-06-01 13:45:10"), Some(at_hms(2024, 6, 1, 13, 45, 10)));
        assert_eq!(parser.parse("6/1/2024 1:45:10 PM"), Some(at_hms(2024, 6, 1, 13, 45, 10)));
        assert_eq!(parser.parse("2024-06-01T12:00:00+02:00"), Some(at_hms(2024, 6, 1, 10, 0, 0)));
    }

    #[test]
    fn parses_twelve_hour_times_without_seconds() {
        let parser = DateParser::default();
        assert_eq!(parser.parse("6/1/2024 1:45 PM"), Some(at_hms(2024, 6, 1, 13, 45, 0)));
        assert_eq!(parser.parse("1/1/2024 9:00 AM"), Some(at_hms(2024, 1, 1, 9, 0, 0)));
        assert_eq!(parser.parse("12/31/2023 12:05 AM"), Some(at_hms(2023, 12, 31, 0, 5, 0)));
    }

    #[test]
    fn parses_slash_iso_dates() {
        let parser = DateParser::default();
        assert_eq!(parser.parse("2024/06/01"), Some(at(2024, 6, 1)));
        assert_eq!(parser.parse("2024/06/01 13:45"), Some(at_hms(2024, 6, 1, 13, 45, 0)));
        assert_eq!(parser.parse("2024/06/01 13:45:10"), Some(at_hms(2024, 6, 1, 13, 45, 10)));
    }

    #[test]
    fn parses_fractional_seconds() {
        let parser = DateParser::default();
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_milli_opt(13, 45, 10, 123);
        assert_eq!(parser.parse("2024-06-01 13:45:10.123"), expected);
        assert_eq!(parser.parse("2024-06-01T13:45:10.123"), expected);
    }

    #[test]
    fn parses_month_names_with_times() {
        let parser = DateParser::default();
        assert_eq!(parser.parse("Jun 1, 2024 1:45 PM"), Some(at_hms(2024, 6, 1, 13, 45, 0)));
        assert_eq!(parser.parse("June 1, 2024 1:45:30 PM"), Some(at_hms(2024, 6, 1, 13, 45, 30)));
        assert_eq!(parser.parse("Jun 01, 2024 13:45"), Some(at_hms(2024, 6, 1, 13, 45, 0)));
    }

    #[test]
    fn rejects_garbage_and_empty() {
        let parser = DateParser::default();
        assert_eq!(parser.parse("not a date"), None);
        assert_eq!(parser.parse(""), None);
        assert_eq!(parser.parse("2024-13-40"), None);
    }

    #[test]
    fn extra_formats_are_tried_last() {
        let parser = DateParser::new(&["%d.%m.%Y".to_string()]);
        assert_eq!(parser.parse("01.06.2024"), Some(at(2024, 6, 1)));
        assert_eq!(DateParser::default().parse("01.06.2024"), None);
    }

    #[test]
    fn recency_uses_the_reports_own_header() {
        let report = Report::new("b.csv", "Check-In Date,Net ID\n2024-06-01,2");
        assert_eq!(recency_of(&report, "Check-In Date", &DateParser::default()), Ok(at(2024, 6, 1)));
    }

    #[test]
    fn recency_reads_only_the_first_data_row() {
        let report = Report::new("a.csv", "Net ID,Check-In Date\n1,2024-01-01\n2,2025-01-01");
        assert_eq!(recency_of(&report, "Check-In Date", &DateParser::default()), Ok(at(2024, 1, 1)));
    }

    #[test]
    fn recency_issues_are_reported() {
        let parser = DateParser::default();
        let missing = Report::new("x.csv", "Net ID\n1");
        assert_eq!(
            recency_of(&missing, "Check-In Date", &parser),
            Err(RecencyIssue::MissingColumn("Check-In Date".to_string()))
        );

        let header_only = Report::new("x.csv", "Net ID,Check-In Date");
        assert_eq!(recency_of(&header_only, "Check-In Date", &parser), Err(RecencyIssue::NoDataRow));

        let short = Report::new("x.csv", "Net ID,Check-In Date\n1");
        assert_eq!(
            recency_of(&short, "Check-In Date", &parser),
            Err(RecencyIssue::MissingField { column: "Check-In Date".to_string(), index: 1 })
        );

        let bad = Report::new("x.csv", "Net ID,Check-In Date\n1,soon");
        assert_eq!(
            recency_of(&bad, "Check-In Date", &parser),
            Err(RecencyIssue::Unparseable("soon".to_string()))
        );
    }

    #[test]
    fn sorts_most_recent_first() {
        let mut reports = vec![
            dated("a.csv", "Net ID,Check-In Date\n1,2024-01-01"),
            dated("b.csv", "Net ID,Check-In Date,Name\n2,2024-06-01,x"),
            dated("c.csv", "Check-In Date\n2024-03-01"),
        ];
        sort_by_recency(&mut reports);
        assert_eq!(names(&reports), vec!["b.csv", "c.csv", "a.csv"]);
    }

    #[test]
    fn undated_reports_keep_their_relative_order() {
        let mut reports = vec![
            dated("u1.csv", "Net ID,Check-In Date\n1,whenever"),
            dated("d1.csv", "Net ID,Check-In Date\n1,2024-01-01"),
            dated("u2.csv", "Net ID,Check-In Date\n1,"),
            dated("d2.csv", "Net ID,Check-In Date\n1,2024-02-01"),
        ];
        sort_by_recency(&mut reports);
        assert_eq!(names(&reports), vec!["d2.csv", "d1.csv", "u1.csv", "u2.csv"]);
    }

    #[test]
    fn equal_dates_keep_their_relative_order() {
        let mut reports = vec![
            dated("first.csv", "Net ID,Check-In Date\n1,2024-01-01"),
            dated("second.csv", "Check-In Date,Net ID\n2024-01-01,2"),
        ];
        sort_by_recency(&mut reports);
        assert_eq!(names(&reports), vec!["first.csv", "second.csv"]);
    }

    #[test]
    fn comparator_is_total() {
        let early = at(2024, 1, 1);
        let late = at(2024, 2, 1);
        assert_eq!(compare_recency(Some(&late), Some(&early)), Ordering::Less);
        assert_eq!(compare_recency(Some(&early), None), Ordering::Less);
        assert_eq!(compare_recency(None, Some(&early)), Ordering::Greater);
        assert_eq!(compare_recency(None, None), Ordering::Equal);
    }
}
