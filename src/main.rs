//! reptool: merge check-in report CSV exports into one recency-ordered CSV

use std::process::ExitCode;

fn main() -> ExitCode {
    match reptool::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
