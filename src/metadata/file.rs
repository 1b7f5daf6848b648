use std::fs;
use std::path::Path;
use std::time::SystemTime;

use byte_unit::{Byte, UnitType};
use chrono::{DateTime, Local};

use super::MetadataLookup;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// File-level metadata read from the filesystem
///
/// Creation time falls back to modification time on platforms that do not
/// record a birth time. All timestamps are rendered in local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMetadata;

impl FsMetadata {
    fn created(path: &Path) -> Option<DateTime<Local>> {
        let meta = fs::metadata(path).ok()?;
        let time = meta.created().or_else(|_| meta.modified()).ok()?;
        Some(local(time))
    }

    fn modified(path: &Path) -> Option<DateTime<Local>> {
        let time = fs::metadata(path).ok()?.modified().ok()?;
        Some(local(time))
    }

    fn file_size(path: &Path) -> Option<String> {
        let size = fs::metadata(path).ok()?.len();
        if size < 1024 {
            return Some(format!("{size}B"));
        }
        let adjusted = Byte::from_u64(size).get_appropriate_unit(UnitType::Binary);
        Some(format!("{adjusted:.1}").replace(' ', ""))
    }
}

fn local(time: SystemTime) -> DateTime<Local> {
    DateTime::<Local>::from(time)
}

impl MetadataLookup for FsMetadata {
    fn lookup(&self, tag: &str, path: &Path) -> Option<String> {
        if !path.exists() {
            log::debug!("metadata lookup for missing path {}", path.display());
            return None;
        }

        let value = match tag {
            "date" | "date_created" => Self::created(path).map(|d| d.format(DATE_FORMAT).to_string()),
            "date_modified" => Self::modified(path).map(|d| d.format(DATE_FORMAT).to_string()),
            "date_created_time" => {
                Self::created(path).map(|d| d.format(DATE_TIME_FORMAT).to_string())
            }
            "date_modified_time" => {
                Self::modified(path).map(|d| d.format(DATE_TIME_FORMAT).to_string())
            }
            "year" => Self::created(path).map(|d| d.format("%Y").to_string()),
            "month" => Self::created(path).map(|d| d.format("%m").to_string()),
            "day" => Self::created(path).map(|d| d.format("%d").to_string()),
            "hour" => Self::created(path).map(|d| d.format("%H").to_string()),
            "minute" => Self::created(path).map(|d| d.format("%M").to_string()),
            "second" => Self::created(path).map(|d| d.format("%S").to_string()),
            "file_size" => Self::file_size(path),
            "filename" => path.file_name().map(|n| n.to_string_lossy().into_owned()),
            "dirname" => path
                .parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned()),
            "parent_dir" => path.parent().map(|p| p.to_string_lossy().into_owned()),
            "format" => path
                .extension()
                .map(|e| e.to_string_lossy().to_uppercase())
                .filter(|e| !e.is_empty()),
            _ => None,
        };

        if value.is_none() {
            log::debug!("no value for tag '{tag}' on {}", path.display());
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_derived_tags() {
        let dir = TempDir::new().unwrap();
        let album = dir.path().join("album");
        fs::create_dir(&album).unwrap();
        let file = album.join("track.mp3");
        fs::write(&file, b"abc").unwrap();

        assert_eq!(FsMetadata.lookup("filename", &file), Some("track.mp3".into()));
        assert_eq!(FsMetadata.lookup("dirname", &file), Some("album".into()));
        assert_eq!(FsMetadata.lookup("format", &file), Some("MP3".into()));
        assert_eq!(FsMetadata.lookup("file_size", &file), Some("3B".into()));
        assert_eq!(
            FsMetadata.lookup("parent_dir", &file),
            Some(album.to_string_lossy().into_owned())
        );
    }

    #[test]
    fn test_date_tags_have_expected_shape() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"x").unwrap();

        let date = FsMetadata.lookup("date_modified", &file).unwrap();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");

        let stamp = FsMetadata.lookup("date_created_time", &file).unwrap();
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[10..11], "_");

        assert_eq!(FsMetadata.lookup("year", &file).unwrap().len(), 4);
    }

    #[test]
    fn test_unanswered_tags_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.png");
        fs::write(&file, b"x").unwrap();

        assert_eq!(FsMetadata.lookup("width", &file), None);
        assert_eq!(FsMetadata.lookup("filename", &dir.path().join("gone.png")), None);
    }
}
