//! File dispositioning pipeline with Rayon parallel processing
//!
//! Handles the core logic of:
//! - Enumerating the source directory (single level)
//! - Resolving capture dates per file
//! - Moving or copying files into the `YYYY/MM/` hierarchy
//! - Recording one run-log line per file and aggregating outcomes

use crate::config::Config;
use crate::error::Result;
use crate::logsink::LogSink;
use crate::time::{DateSource, resolve_date};
use chrono::Datelike;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Outcome of dispositioning a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// File landed (or, on a dry run, would land) in the destination
    Success {
        /// Strategy that supplied the capture date
        provenance: DateSource,
        /// Destination-relative `YYYY/MM/<filename>` path
        subpath: PathBuf,
    },
    /// No capture date could be resolved; the file was left in place
    Skipped { reason: String },
    /// The filesystem operation failed; sibling files are unaffected
    Failed { error: String },
}

/// Aggregate statistics for one batch
#[derive(Debug, Default)]
pub struct BatchStats {
    pub total: AtomicUsize,
    pub succeeded: AtomicUsize,
    pub skipped: AtomicUsize,
    pub failed: AtomicUsize,
    /// Files finished so far, whatever the outcome
    pub completed: AtomicUsize,
}

impl BatchStats {
    pub fn new(total: usize) -> Self {
        let stats = Self::default();
        stats.total.store(total, Ordering::Relaxed);
        stats
    }

    /// Record one outcome
    fn record(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Success { .. } => self.succeeded.fetch_add(1, Ordering::Relaxed),
            Outcome::Skipped { .. } => self.skipped.fetch_add(1, Ordering::Relaxed),
            Outcome::Failed { .. } => self.failed.fetch_add(1, Ordering::Relaxed),
        };
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {}, Sorted: {}, Skipped: {}, Failed: {}",
            self.total.load(Ordering::Relaxed),
            self.succeeded.load(Ordering::Relaxed),
            self.skipped.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed)
        )
    }
}

/// Enumerate files directly inside the source directory.
///
/// Single level only. Directories and symlinks to directories are
/// excluded; a symlink to a regular file counts as that file. Names are
/// sorted so dispatch order is deterministic.
pub fn list_source_files(source_dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let file_type = entry.file_type();
        let eligible = if file_type.is_symlink() {
            // A symlink counts as its target; dangling links are skipped
            fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false)
        } else {
            file_type.is_file()
        };
        if !eligible {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => files.push(name.to_string()),
            None => warn!(path = ?entry.path(), "Skipping file with non-UTF-8 name"),
        }
    }
    files.sort();
    Ok(files)
}

/// Disposition a single file: resolve its capture date, compute the
/// destination, perform the move or copy, and log the outcome.
///
/// Failures are contained here; exactly one log line is written no
/// matter what happens.
pub fn process_file(filename: &str, config: &Config, sink: &LogSink) -> Outcome {
    let source_path = config.source_dir.join(filename);

    let Some(resolved) = resolve_date(&source_path) else {
        sink.log(&format!("SKIPPED: No date found in {filename}"));
        return Outcome::Skipped {
            reason: "no date found".to_string(),
        };
    };

    let year = resolved.timestamp.year();
    let month = resolved.timestamp.month();
    let subpath = PathBuf::from(year.to_string())
        .join(format!("{month:02}"))
        .join(filename);
    let dest_path = config.dest_dir.join(&subpath);

    if !config.dry_run {
        if let Err(e) = place_file(&source_path, &dest_path, config.copy) {
            error!(filename, error = %e, "Failed to place file");
            sink.log(&format!("ERROR processing {filename}: {e}"));
            return Outcome::Failed {
                error: e.to_string(),
            };
        }
    }

    let status = if config.dry_run {
        "DRY RUN"
    } else if config.copy {
        "COPIED"
    } else {
        "MOVED"
    };
    let provenance = resolved.source.label();
    sink.log(&format!(
        "{status:<10} ({provenance:^10}): {filename:<30} -> {year}/{month:02}"
    ));
    debug!(filename, status, provenance, "Dispositioned file");

    Outcome::Success {
        provenance: resolved.source,
        subpath,
    }
}

/// Run a batch over a bounded worker pool.
///
/// Each filename is an independent unit of work; a failing file never
/// affects its siblings. `on_progress` fires once per completed file,
/// with that file's name. Returns the aggregate statistics once every
/// task has finished.
pub fn run_batch<F>(
    files: &[String],
    config: &Config,
    sink: &LogSink,
    on_progress: F,
) -> Result<BatchStats>
where
    F: Fn(&str) + Sync,
{
    info!(
        count = files.len(),
        workers = config.workers,
        dry_run = config.dry_run,
        "Starting batch"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()?;

    let stats = BatchStats::new(files.len());
    pool.install(|| {
        files.par_iter().for_each(|filename| {
            let outcome = process_file(filename, config, sink);
            stats.record(&outcome);
            on_progress(filename.as_str());
        });
    });

    info!("{}", stats.summary());
    Ok(stats)
}

/// Move or copy `source` to `dest`, creating parent directories.
///
/// A move tries a rename first and falls back to copy + delete for
/// cross-filesystem destinations. The source modification time is
/// carried over best-effort.
fn place_file(source: &Path, dest: &Path, copy: bool) -> Result<()> {
    if let Some(parent) = dest.parent() {
        // Workers race to create the same year/month directory;
        // create_dir_all treats an existing directory as success
        fs::create_dir_all(parent)?;
    }

    let mtime = fs::metadata(source)
        .and_then(|m| m.modified())
        .map(filetime::FileTime::from_system_time);

    if copy {
        copy_file(source, dest)?;
    } else if fs::rename(source, dest).is_err() {
        // Fall back to copy + delete for cross-filesystem moves
        copy_file(source, dest)?;
        fs::remove_file(source)?;
    }

    // Preserve modification time
    if let Ok(mtime) = mtime {
        let _ = filetime::set_file_mtime(dest, mtime);
    }

    Ok(())
}

/// Copy file with buffered I/O for efficiency
fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    let src_file = File::open(source)?;
    let dest_file = File::create(dest)?;

    let mut reader = BufReader::with_capacity(256 * 1024, src_file);
    let mut writer = BufWriter::with_capacity(256 * 1024, dest_file);

    let mut buffer = vec![0u8; 256 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        writer.write_all(&buffer[..bytes_read])?;
    }

    writer.flush()?;
    Ok(())
}
