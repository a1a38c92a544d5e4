//! Merge command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::load_config;
use crate::domain::SkipReason;
use crate::error::MergeError;
use crate::merge::{merge_directory, MergeOutcome};

#[derive(Args)]
pub struct MergeArgs {
    /// Directory containing the report CSV files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Config file (TOML or YAML); defaults to reptool.toml in TARGET
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Merge in memory and print the summary without writing the output file
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: MergeArgs) -> Result<()> {
    if !args.target.is_dir() {
        return Err(MergeError::NotADirectory(args.target).into());
    }

    let config = load_config(&args.target, args.config.as_deref())?;
    let outcome = merge_directory(&args.target, &config, !args.dry_run)?;
    print_summary(&outcome);

    Ok(())
}

fn print_summary(outcome: &MergeOutcome) {
    if let Some(reference) = outcome.reference() {
        println!("Reference: {} ({} columns)", display_name(&reference.source), outcome.schema.len());
    }

    println!("Reports:");
    for report in &outcome.reports {
        let date = report
            .recency
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "undated".to_string());
        println!(
            "  {}: {}, {} rows, {}/{} columns",
            display_name(&report.source),
            date,
            report.rows,
            report.mapped_columns,
            outcome.schema.len()
        );
    }

    if !outcome.skipped.is_empty() {
        println!("Skipped:");
        for skipped in &outcome.skipped {
            match &skipped.reason {
                SkipReason::MissingRecencyColumn(column) => {
                    println!("  {}: no '{}' column", display_name(&skipped.source), column)
                }
            }
        }
    }

    let stats = &outcome.stats;
    println!(
        "Files: {} seen, {} ignored by name, {} without recency column, {} loaded ({} bytes)",
        stats.files_seen,
        stats.files_skipped_name,
        stats.files_skipped_column,
        stats.reports_loaded,
        stats.bytes_read
    );

    let verb = if outcome.written { "Merged" } else { "Dry run: would merge" };
    println!(
        "{} {} rows from {} reports into {}",
        verb,
        outcome.total_rows(),
        outcome.reports.len(),
        outcome.output_path.display()
    );
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
