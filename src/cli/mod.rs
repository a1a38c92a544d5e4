//! Command-line interface for reptool
//!
//! Provides the `merge` subcommand.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod merge;

pub use merge::MergeArgs;

/// Merge check-in report CSV exports into one recency-ordered CSV
#[derive(Parser)]
#[command(name = "reptool")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge every report CSV in a directory into MERGED.csv
    Merge(merge::MergeArgs),
}

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures; usage errors exit 1, not clap's 2.
            let usage_error = err.use_stderr();
            err.print()?;
            if usage_error {
                anyhow::bail!("invalid arguments");
            }
            return Ok(());
        }
    };

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Merge(args) => merge::run(args),
    }
}
