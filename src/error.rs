//! Fatal merge errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Target is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to list directory {}", .path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read report {}", .path.display())]
    ReadReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write merged output {}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No reports with a '{column}' column found in {}", .dir.display())]
    NoReports { dir: PathBuf, column: String },

    #[error("Reference header of {} is empty", .0.display())]
    EmptySchema(PathBuf),
}

pub type MergeResult<T> = std::result::Result<T, MergeError>;
