//! Report discovery in the target directory

use crate::domain::{Config, Report, ScanStats, SkippedReport};
use crate::error::MergeResult;
use std::path::Path;

pub mod scanner;

pub use scanner::{ReadFn, ReportScanner};

/// Scanner configured from merge settings.
pub fn scanner_for(root: &Path, config: &Config) -> ReportScanner {
    ReportScanner::new(root.to_path_buf())
        .input_marker(config.input_marker.clone())
        .exclude_name(config.output_file.clone())
        .recency_column(config.recency_column.clone())
}

/// Run `scanner`, returning the qualifying reports, the skipped files and stats.
pub fn load_reports(
    mut scanner: ReportScanner,
) -> MergeResult<(Vec<Report>, Vec<SkippedReport>, ScanStats)> {
    let reports = scanner.scan()?;
    Ok((reports, scanner.skipped().to_vec(), scanner.stats().clone()))
}
