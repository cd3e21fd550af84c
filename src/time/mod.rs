//! Capture date resolution
//!
//! This module resolves a capture date for a file using an ordered list
//! of strategies:
//! - EXIF metadata (DateTimeOriginal tag)
//! - Filename patterns
//!
//! The first strategy to produce a date wins. A file no strategy can
//! date has no resolvable capture date, which is a normal outcome, not
//! an error.

pub mod exif;
pub mod filename;

use chrono::NaiveDateTime;
use std::path::Path;
use tracing::debug;

/// Source of the resolved capture date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// Extracted from EXIF metadata
    Exif,
    /// Parsed from the filename
    Filename,
}

impl DateSource {
    /// Provenance tag recorded in the run log
    pub fn label(&self) -> &'static str {
        match self {
            DateSource::Exif => "EXIF",
            DateSource::Filename => "filename",
        }
    }
}

/// Result of capture date resolution
#[derive(Debug, Clone)]
pub struct ResolvedDate {
    /// The resolved capture timestamp
    pub timestamp: NaiveDateTime,
    /// Strategy that produced it
    pub source: DateSource,
}

/// A single date-resolution strategy.
///
/// Strategies are consulted in the order they appear in `STRATEGIES`.
/// A strategy that does not apply to a file returns `None`; it must
/// never abort the resolution chain.
trait DateStrategy: Sync {
    /// Provenance recorded when this strategy succeeds
    fn source(&self) -> DateSource;

    /// Attempt to resolve a capture date for the file
    fn try_resolve(&self, path: &Path) -> Option<NaiveDateTime>;
}

/// EXIF metadata strategy
struct ExifStrategy;

impl DateStrategy for ExifStrategy {
    fn source(&self) -> DateSource {
        DateSource::Exif
    }

    fn try_resolve(&self, path: &Path) -> Option<NaiveDateTime> {
        // Unreadable files and missing tags fall through to the next
        // strategy
        exif::extract_exif_date(path).ok()
    }
}

/// Filename pattern strategy
struct FilenameStrategy;

impl DateStrategy for FilenameStrategy {
    fn source(&self) -> DateSource {
        DateSource::Filename
    }

    fn try_resolve(&self, path: &Path) -> Option<NaiveDateTime> {
        let filename = path.file_name().and_then(|f| f.to_str())?;
        filename::parse_filename_date(filename)
    }
}

/// Strategies in priority order; the first hit short-circuits.
static STRATEGIES: &[&dyn DateStrategy] = &[&ExifStrategy, &FilenameStrategy];

/// Resolve a capture date for a file, trying each strategy in order.
///
/// Returns `None` when no strategy produces a date.
pub fn resolve_date(path: &Path) -> Option<ResolvedDate> {
    for strategy in STRATEGIES {
        if let Some(timestamp) = strategy.try_resolve(path) {
            debug!(?path, source = strategy.source().label(), "Resolved capture date");
            return Some(ResolvedDate {
                timestamp,
                source: strategy.source(),
            });
        }
    }
    debug!(?path, "No capture date found");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_date_source_labels() {
        assert_eq!(DateSource::Exif.label(), "EXIF");
        assert_eq!(DateSource::Filename.label(), "filename");
    }

    #[test]
    fn test_resolve_date_from_filename() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("20230115_123045.jpg");
        fs::write(&path, b"not really an image").unwrap();

        let resolved = resolve_date(&path).unwrap();
        assert_eq!(resolved.source, DateSource::Filename);
        assert_eq!(
            resolved.timestamp,
            NaiveDateTime::parse_from_str("2023-01-15 12:30:45", "%Y-%m-%d %H:%M:%S").unwrap()
        );
    }

    #[test]
    fn test_resolve_date_none_for_undated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("holiday_snapshot.jpg");
        fs::write(&path, b"no dates anywhere").unwrap();

        assert!(resolve_date(&path).is_none());
    }

    #[test]
    fn test_resolve_date_missing_file_with_dated_name() {
        // The file does not exist, so EXIF cannot apply; the filename
        // still resolves.
        let resolved = resolve_date(Path::new("/nonexistent/20230115_123045.jpg")).unwrap();
        assert_eq!(resolved.source, DateSource::Filename);
    }
}
