//! CLI argument parsing with clap

use crate::config::{Config, MAX_WORKERS};
use clap::Parser;
use std::path::PathBuf;

/// photosort - organize photo dumps into year/month folders
///
/// Sorts files from a flat source directory into
/// `DESTINATION/YYYY/MM/` based on their capture date, taken from EXIF
/// metadata when available and from the filename otherwise.
#[derive(Parser, Debug)]
#[command(name = "photosort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source directory holding the unsorted files
    pub source: Option<PathBuf>,

    /// Destination directory (created if missing)
    pub destination: Option<PathBuf>,

    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as
    /// defaults. CLI arguments override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(
        short,
        long,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_WORKERS as u64)
    )]
    pub workers: Option<usize>,

    /// Log file path, resolved relative to the destination
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Copy files instead of moving them
    #[arg(long)]
    pub copy: bool,

    /// Dry run mode - log intended actions without touching files
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output diagnostic log as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref source) = self.source {
            config.source_dir = source.clone();
        }
        if let Some(ref destination) = self.destination {
            config.dest_dir = destination.clone();
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(ref log) = self.log {
            config.log_file = log.clone();
        }
        if self.copy {
            config.copy = true;
        }
        if self.dry_run {
            config.dry_run = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}
