//! photosort - a CLI tool for organizing photo dumps
//!
//! This library sorts files from a flat source directory into a
//! `YYYY/MM/` hierarchy based on their capture date, with support for:
//! - EXIF metadata extraction for images
//! - Filename timestamp parsing as a fallback
//! - Parallel move/copy processing with Rayon
//! - An append-only run log with one line per file

pub mod cli;
pub mod config;
pub mod error;
pub mod logsink;
pub mod process;
pub mod time;

pub use cli::Cli;
pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use logsink::LogSink;
pub use process::{BatchStats, Outcome, list_source_files, process_file, run_batch};
pub use time::{DateSource, ResolvedDate, resolve_date};
