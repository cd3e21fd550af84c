//! Error types for photosort

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for photosort operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for photosort
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory listing error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
