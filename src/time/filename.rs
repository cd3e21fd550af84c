//! Filename date parsing
//!
//! Camera and messenger exports encode the capture date in the file
//! name far more often than not. This parser tries two passes over the
//! file stem:
//! 1. a compact candidate built by stripping separator characters and
//!    zero-padding to a full timestamp, and
//! 2. a fixed list of known formats matched against the raw stem.

use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::trace;

/// Compact pass: the separator-stripped stem is truncated and
/// right-padded with zeros to the width, then parsed.
const COMPACT_FORMATS: &[(&str, usize)] = &[("%Y%m%d%H%M%S", 14), ("%Y%m%d", 8)];

/// Known stem formats with their rendered widths, tried in order.
/// The order is a fixed policy: an ambiguous stem resolves to the
/// first format that parses.
const STEM_FORMATS: &[(&str, usize)] = &[
    ("%Y-%m-%d %H.%M.%S", 19),
    ("%Y%m%d_%H%M%S", 15),
    ("%Y%m%d", 8),
    ("%Y-%m-%d", 10),
    ("%d.%m.%Y", 10),
    ("%m%d%Y", 8),
    ("%Y_%m_%d", 10),
    ("%Y%m%d%H%M%S", 14),
];

/// Separator characters removed when building the compact candidate
const SEPARATORS: &[char] = &[' ', '-', '_', '.'];

/// Parse a capture date from a filename.
///
/// Returns `None` when no known pattern matches, which is the normal
/// outcome for names without a leading date.
pub fn parse_filename_date(filename: &str) -> Option<NaiveDateTime> {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let compact: String = stem.chars().filter(|c| !SEPARATORS.contains(c)).collect();
    for &(format, width) in COMPACT_FORMATS {
        let candidate = format!("{:0<width$}", clip(&compact, width));
        if let Some(dt) = parse_with_format(&candidate, format) {
            trace!(filename, format, "Matched compact candidate");
            return Some(dt);
        }
    }

    for &(format, width) in STEM_FORMATS {
        if let Some(dt) = parse_with_format(clip(stem, width), format) {
            trace!(filename, format, "Matched stem format");
            return Some(dt);
        }
    }

    None
}

/// Truncate to at most `width` characters (not bytes)
fn clip(s: &str, width: usize) -> &str {
    match s.char_indices().nth(width) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Parse against one format; formats without a time of day resolve to
/// midnight.
fn parse_with_format(s: &str, format: &str) -> Option<NaiveDateTime> {
    if format.contains("%H") {
        NaiveDateTime::parse_from_str(s, format).ok()
    } else {
        NaiveDate::parse_from_str(s, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_compact_timestamp() {
        assert_eq!(
            parse_filename_date("20230115_123045.jpg").unwrap(),
            date(2023, 1, 15, 12, 30, 45)
        );
        assert_eq!(
            parse_filename_date("20230115-123045.jpg").unwrap(),
            date(2023, 1, 15, 12, 30, 45)
        );
    }

    #[test]
    fn test_compact_date_pads_to_midnight() {
        assert_eq!(
            parse_filename_date("20230115.jpg").unwrap(),
            date(2023, 1, 15, 0, 0, 0)
        );
        // Partial time components pad with zeros
        assert_eq!(
            parse_filename_date("2023011512.jpg").unwrap(),
            date(2023, 1, 15, 12, 0, 0)
        );
    }

    #[test]
    fn test_compact_ignores_trailing_text() {
        assert_eq!(
            parse_filename_date("20230115_123045_holiday.jpg").unwrap(),
            date(2023, 1, 15, 12, 30, 45)
        );
    }

    #[test]
    fn test_dotted_separators() {
        assert_eq!(
            parse_filename_date("2023-01-15 12.30.45.jpg").unwrap(),
            date(2023, 1, 15, 12, 30, 45)
        );
        assert_eq!(
            parse_filename_date("2023.01.15 12.30.45.jpg").unwrap(),
            date(2023, 1, 15, 12, 30, 45)
        );
    }

    #[test]
    fn test_day_first_format() {
        // The compact pass cannot read 15012023, the stem pass can
        assert_eq!(
            parse_filename_date("15.01.2023.jpg").unwrap(),
            date(2023, 1, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_month_first_format() {
        assert_eq!(
            parse_filename_date("01152023_party.jpg").unwrap(),
            date(2023, 1, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_dashed_and_underscored_dates() {
        assert_eq!(
            parse_filename_date("2023-01-15.png").unwrap(),
            date(2023, 1, 15, 0, 0, 0)
        );
        assert_eq!(
            parse_filename_date("2023_01_15.png").unwrap(),
            date(2023, 1, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_single_digit_fields() {
        // chrono accepts one-digit month and day for separated formats
        assert_eq!(
            parse_filename_date("2023-1-5.jpg").unwrap(),
            date(2023, 1, 5, 0, 0, 0)
        );
    }

    #[test]
    fn test_alpha_prefix_defeats_parsing() {
        assert!(parse_filename_date("IMG_20230115_123045.jpg").is_none());
    }

    #[test]
    fn test_no_date() {
        assert!(parse_filename_date("photo.jpg").is_none());
        assert!(parse_filename_date("random.txt").is_none());
        assert!(parse_filename_date("holiday snapshot.jpg").is_none());
        assert!(parse_filename_date("").is_none());
    }

    #[test]
    fn test_invalid_calendar_dates() {
        assert!(parse_filename_date("20231315_123045.jpg").is_none());
        assert!(parse_filename_date("20230230.jpg").is_none());
    }

    #[test]
    fn test_invalid_time_falls_back_to_date() {
        // Hour 25 defeats the 14-digit pass; the 8-digit pass still
        // reads the date portion
        assert_eq!(
            parse_filename_date("20230115_256045.jpg").unwrap(),
            date(2023, 1, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_clip_is_char_safe() {
        assert_eq!(clip("ünïcödé", 3), "ünï");
        assert_eq!(clip("short", 10), "short");
        assert!(parse_filename_date("fötö20230115.jpg").is_none());
    }
}
