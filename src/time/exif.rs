//! EXIF capture date extraction for images

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// Datetime format mandated by the EXIF standard
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Extract the capture date from the DateTimeOriginal EXIF tag.
///
/// Fails for files that are not recognizable images, images without
/// the tag, and tag values that do not match the EXIF datetime format.
/// The resolver treats any failure here as a fall-through to the next
/// strategy.
pub fn extract_exif_date(path: &Path) -> Result<NaiveDateTime> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| Error::ExifRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or_else(|| Error::ExifRead {
            path: path.to_path_buf(),
            message: "No DateTimeOriginal tag in EXIF data".to_string(),
        })?;

    // Read the raw ASCII value; display_value() would wrap it in quotes
    let raw = match field.value {
        Value::Ascii(ref values) if !values.is_empty() => std::str::from_utf8(&values[0]).ok(),
        _ => None,
    }
    .ok_or_else(|| Error::ExifRead {
        path: path.to_path_buf(),
        message: "DateTimeOriginal value is not an ASCII string".to_string(),
    })?;

    parse_exif_datetime(raw).ok_or_else(|| Error::ExifRead {
        path: path.to_path_buf(),
        message: format!("Unparseable DateTimeOriginal value: {raw}"),
    })
}

/// Parse an EXIF datetime string: "YYYY:MM:DD HH:MM:SS"
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    // Some cameras pad the value with NULs or spaces
    let s = s.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    let dt = NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FORMAT).ok()?;
    trace!(%dt, "Parsed EXIF datetime");
    Some(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use exif::Field;
    use exif::experimental::Writer;
    use std::fs;
    use tempfile::tempdir;

    fn write_image_with_datetime(path: &Path, datetime: &str) {
        let field = Field {
            tag: Tag::DateTimeOriginal,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![datetime.as_bytes().to_vec()]),
        };
        let mut writer = Writer::new();
        writer.push_field(&field);
        let mut buf = std::io::Cursor::new(Vec::new());
        writer.write(&mut buf, false).unwrap();
        fs::write(path, buf.into_inner()).unwrap();
    }

    #[test]
    fn test_parse_exif_datetime() {
        let dt = parse_exif_datetime("2024:01:15 14:30:00").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 0);

        // NUL-padded value
        let dt = parse_exif_datetime("2024:01:15 14:30:00\0").unwrap();
        assert_eq!(dt.year(), 2024);

        // Only the EXIF colon format is accepted
        assert!(parse_exif_datetime("2024-01-15 14:30:00").is_none());
        assert!(parse_exif_datetime("invalid").is_none());
        assert!(parse_exif_datetime("2024:13:15 14:30:00").is_none());
    }

    #[test]
    fn test_extract_from_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        write_image_with_datetime(&path, "2022:06_broken");

        assert!(extract_exif_date(&path).is_err());

        write_image_with_datetime(&path, "2022:06:30 08:15:59");
        let dt = extract_exif_date(&path).unwrap();
        assert_eq!(dt.year(), 2022);
        assert_eq!(dt.month(), 6);
        assert_eq!(dt.day(), 30);
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_extract_without_datetime_tag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("described.jpg");

        let field = Field {
            tag: Tag::ImageDescription,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"no date here".to_vec()]),
        };
        let mut writer = Writer::new();
        writer.push_field(&field);
        let mut buf = std::io::Cursor::new(Vec::new());
        writer.write(&mut buf, false).unwrap();
        fs::write(&path, buf.into_inner()).unwrap();

        let err = extract_exif_date(&path).unwrap_err();
        assert!(err.to_string().contains("No DateTimeOriginal tag"));
    }

    #[test]
    fn test_extract_from_non_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"plain text, no EXIF container").unwrap();

        assert!(extract_exif_date(&path).is_err());
    }

    #[test]
    fn test_extract_from_missing_file() {
        assert!(extract_exif_date(Path::new("/nonexistent/photo.jpg")).is_err());
    }
}
