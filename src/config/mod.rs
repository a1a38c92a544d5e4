//! Configuration loading
//!
//! Merge settings come from an explicit `--config` file, else a
//! `reptool.toml` / `reptool.yaml` in the target directory, else defaults.

pub mod loader;

pub use loader::load_config;
