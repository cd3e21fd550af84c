//! Append-only run log
//!
//! Every processed file produces exactly one line in a plain-text log,
//! recreated fresh at the start of each run. Workers hand complete
//! lines to a single writer thread, so concurrent appends never
//! interleave mid-line.

use crate::error::Result;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};

/// Timestamp prefix format for log lines
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shared handle to the run log.
///
/// Cloning is cheap; all clones feed the same writer thread. The
/// [`WorkerGuard`] returned by [`LogSink::init`] must outlive the run,
/// since dropping it flushes and closes the log.
#[derive(Clone)]
pub struct LogSink {
    writer: NonBlocking,
}

impl LogSink {
    /// Create or truncate the log file and write the opening line.
    ///
    /// Missing parent directories are created.
    pub fn init(path: &Path) -> Result<(Self, WorkerGuard)> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        // Non-lossy: a full queue blocks the caller instead of dropping
        // outcome lines
        let (writer, guard) = NonBlockingBuilder::default().lossy(false).finish(file);

        let sink = Self { writer };
        sink.log("LOG INITIALIZED");
        Ok((sink, guard))
    }

    /// Append one timestamped line to the log.
    ///
    /// The line is handed to the writer thread as a single unit. Write
    /// errors are swallowed; the log must never take down a run.
    pub fn log(&self, message: &str) {
        let line = format!("[{}] {}\n", Local::now().format(TIMESTAMP_FORMAT), message);
        let mut writer = self.writer.clone();
        let _ = writer.write_all(line.as_bytes());
    }
}
