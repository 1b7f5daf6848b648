//! File entries tracked by the rename engine
//!
//! A [`FileEntry`] is one file or folder in the working set. It carries the
//! decomposed on-disk name, the candidate name produced by the method pipeline,
//! and the status that decides whether the executor will touch it.
//!
//! # Invariants
//!
//! - `new_path() == path.parent() / (new_name + extension)`
//! - `is_renamed() <=> new_name != old_name`; an extension-only change is not a
//!   rename trigger.
//! - `error` is set exactly when the status is [`FileStatus::Error`] or
//!   [`FileStatus::Conflict`].

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata key marking an entry as a directory
pub const IS_FOLDER_KEY: &str = "is_folder";

/// Classification of everything that can go wrong with a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyName,
    IllegalCharacter,
    ReservedDeviceName,
    PathTooLong,
    /// Collision detected before execution
    Conflict,
    /// Source vanished between scan and execute
    FileNotFound,
    /// Target was created after the conflict pass
    RaceCondition,
    PermissionDenied,
    Io,
    Cancelled,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyName => "empty name",
            Self::IllegalCharacter => "illegal character",
            Self::ReservedDeviceName => "reserved device name",
            Self::PathTooLong => "path too long",
            Self::Conflict => "conflict",
            Self::FileNotFound => "file not found",
            Self::RaceCondition => "race condition",
            Self::PermissionDenied => "permission denied",
            Self::Io => "i/o error",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the error was raised before any filesystem mutation was attempted
    #[must_use]
    pub const fn is_preflight(self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::IllegalCharacter
                | Self::ReservedDeviceName
                | Self::PathTooLong
                | Self::Conflict
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error attached to an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Processing status of an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    #[default]
    Ready,
    Conflict,
    Error,
    Processing,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ready => "ready",
            Self::Conflict => "conflict",
            Self::Error => "error",
            Self::Processing => "processing",
        };
        f.write_str(label)
    }
}

/// One file or folder under consideration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Current location on disk
    pub path: PathBuf,
    /// On-disk name without extension
    pub old_name: String,
    /// On-disk extension, including the leading dot
    pub old_extension: String,
    /// Candidate name produced by the last pipeline run
    pub new_name: String,
    /// Candidate extension, including the leading dot (empty for folders)
    pub extension: String,
    #[serde(default)]
    pub status: FileStatus,
    #[serde(default)]
    pub error: Option<EntryError>,
    /// Collaborator-provided values; only `is_folder` is interpreted
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl FileEntry {
    /// Create an entry from a path, splitting the file name at its last dot
    ///
    /// A name that only starts with a dot (`.bashrc`) has no extension.
    ///
    /// # Examples
    /// ```
    /// use refile::FileEntry;
    ///
    /// let entry = FileEntry::from_path("/photos/IMG_0001.JPG");
    /// assert_eq!(entry.old_name, "IMG_0001");
    /// assert_eq!(entry.extension, ".JPG");
    /// assert!(!entry.is_renamed());
    /// ```
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (name, extension) = split_file_name(&path);
        Self {
            path,
            old_name: name.clone(),
            old_extension: extension.clone(),
            new_name: name,
            extension,
            status: FileStatus::Ready,
            error: None,
            metadata: HashMap::new(),
        }
    }

    /// Create an entry for a directory; folders never carry an extension
    pub fn folder(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut metadata = HashMap::new();
        metadata.insert(IS_FOLDER_KEY.to_string(), Value::Bool(true));
        Self {
            path,
            old_name: name.clone(),
            old_extension: String::new(),
            new_name: name,
            extension: String::new(),
            status: FileStatus::Ready,
            error: None,
            metadata,
        }
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.metadata
            .get(IS_FOLDER_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Original file name with extension
    #[must_use]
    pub fn old_full_name(&self) -> String {
        format!("{}{}", self.old_name, self.old_extension)
    }

    /// Candidate file name with extension
    #[must_use]
    pub fn new_full_name(&self) -> String {
        format!("{}{}", self.new_name, self.extension)
    }

    /// Where the entry ends up if it is renamed
    #[must_use]
    pub fn new_path(&self) -> PathBuf {
        let name = self.new_full_name();
        match self.path.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }

    #[must_use]
    pub fn is_renamed(&self) -> bool {
        self.new_name != self.old_name
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == FileStatus::Ready
    }

    /// Ready and actually changing name: the executor will act on it
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.is_ready() && self.is_renamed()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn set_error(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.status = FileStatus::Error;
        self.error = Some(EntryError {
            kind,
            message: message.into(),
        });
    }

    pub fn set_conflict(&mut self, message: impl Into<String>) {
        self.status = FileStatus::Conflict;
        self.error = Some(EntryError {
            kind: ErrorKind::Conflict,
            message: message.into(),
        });
    }

    pub fn set_ready(&mut self) {
        self.status = FileStatus::Ready;
        self.error = None;
    }

    pub fn set_processing(&mut self) {
        self.status = FileStatus::Processing;
        self.error = None;
    }

    /// Record a completed rename: the new name becomes the baseline
    pub fn commit_rename(&mut self, new_path: PathBuf) {
        self.path = new_path;
        self.old_name = self.new_name.clone();
        self.old_extension = self.extension.clone();
        self.set_ready();
    }
}

/// Split a path's file name into `(stem, extension)` with the dot kept on the extension
fn split_file_name(path: &Path) -> (String, String) {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.rfind('.') {
        Some(0) | None => (file_name, String::new()),
        Some(idx) => {
            let (stem, ext) = file_name.split_at(idx);
            (stem.to_string(), ext.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_splits_last_dot() {
        let entry = FileEntry::from_path("/tmp/archive.tar.gz");
        assert_eq!(entry.old_name, "archive.tar");
        assert_eq!(entry.extension, ".gz");
        assert_eq!(entry.new_name, "archive.tar");
    }

    #[test]
    fn test_from_path_dotfile_has_no_extension() {
        let entry = FileEntry::from_path("/home/user/.bashrc");
        assert_eq!(entry.old_name, ".bashrc");
        assert_eq!(entry.extension, "");
    }

    #[test]
    fn test_from_path_without_extension() {
        let entry = FileEntry::from_path("/tmp/Makefile");
        assert_eq!(entry.old_name, "Makefile");
        assert_eq!(entry.extension, "");
    }

    #[test]
    fn test_new_path_uses_parent() {
        let mut entry = FileEntry::from_path("/data/a.txt");
        entry.new_name = "x".into();
        assert_eq!(entry.new_path(), PathBuf::from("/data/x.txt"));
        assert!(entry.is_renamed());
    }

    #[test]
    fn test_extension_change_alone_is_not_a_rename() {
        let mut entry = FileEntry::from_path("/data/a.txt");
        entry.extension = ".TXT".into();
        assert!(!entry.is_renamed());
    }

    #[test]
    fn test_folder_entry() {
        let entry = FileEntry::folder("/data/my.folder");
        assert!(entry.is_folder());
        assert_eq!(entry.old_name, "my.folder");
        assert_eq!(entry.extension, "");
        assert!(!FileEntry::from_path("/data/a.txt").is_folder());
    }

    #[test]
    fn test_status_transitions() {
        let mut entry = FileEntry::from_path("/data/a.txt");
        entry.set_error(ErrorKind::EmptyName, "empty");
        assert_eq!(entry.status, FileStatus::Error);
        assert_eq!(entry.error_message(), Some("empty"));

        entry.set_conflict("clash");
        assert_eq!(entry.status, FileStatus::Conflict);
        assert_eq!(entry.error.as_ref().map(|e| e.kind), Some(ErrorKind::Conflict));

        entry.set_ready();
        assert!(entry.is_ready());
        assert!(entry.error.is_none());
    }

    #[test]
    fn test_commit_rename_moves_baseline() {
        let mut entry = FileEntry::from_path("/data/a.txt");
        entry.new_name = "b".into();
        let target = entry.new_path();
        entry.commit_rename(target.clone());
        assert_eq!(entry.path, target);
        assert_eq!(entry.old_name, "b");
        assert!(!entry.is_renamed());
    }

    #[test]
    fn test_error_kind_preflight() {
        assert!(ErrorKind::Conflict.is_preflight());
        assert!(ErrorKind::PathTooLong.is_preflight());
        assert!(!ErrorKind::RaceCondition.is_preflight());
        assert_eq!(ErrorKind::RaceCondition.to_string(), "race condition");
    }
}
