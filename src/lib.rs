//! reptool: merge check-in report CSV exports
//!
//! Reads every `.csv` report in a directory, picks the report with the most
//! recent `Check-In Date` as the reference schema, remaps the other reports'
//! columns onto it and writes one consolidated `MERGED.csv`.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod merge;
pub mod scan;
pub mod utils;

pub use error::MergeError;
