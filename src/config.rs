//! Configuration types for photosort

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of parallel workers
pub const DEFAULT_WORKERS: usize = 8;

/// Upper bound on the worker count
pub const MAX_WORKERS: usize = 32;

/// Default log file name, resolved relative to the destination
pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// Configuration for a sorting run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source directory holding the unsorted files
    pub source_dir: PathBuf,

    /// Destination directory for the year/month hierarchy
    pub dest_dir: PathBuf,

    /// Number of parallel workers (1..=32)
    pub workers: usize,

    /// Copy files instead of moving them
    pub copy: bool,

    /// Dry run mode - log intended actions without touching files
    pub dry_run: bool,

    /// Log file path; a relative path resolves against the destination
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::new(),
            dest_dir: PathBuf::new(),
            workers: DEFAULT_WORKERS,
            copy: false,
            dry_run: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Full path of the run log. Relative log files live inside the
    /// destination directory; absolute paths are taken as-is.
    pub fn log_path(&self) -> PathBuf {
        self.dest_dir.join(&self.log_file)
    }

    /// Validate the configuration before a batch starts
    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(Error::Config("No source directory specified".to_string()));
        }
        if self.dest_dir.as_os_str().is_empty() {
            return Err(Error::Config(
                "No destination directory specified".to_string(),
            ));
        }
        if !self.source_dir.is_dir() {
            return Err(Error::Config(format!(
                "Source directory does not exist: {}",
                self.source_dir.display()
            )));
        }
        if self.workers < 1 || self.workers > MAX_WORKERS {
            return Err(Error::Config(format!(
                "Worker count must be between 1 and {MAX_WORKERS}, got {}",
                self.workers
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}
