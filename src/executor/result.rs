use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::entry::{ErrorKind, FileEntry};

/// A rename that happened, or would happen in a dry run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedFile {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    pub is_preview: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub message: String,
}

/// Outcome of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub success_count: usize,
    pub error_count: usize,
    pub renamed: Vec<RenamedFile>,
    pub failures: Vec<FailedFile>,
    /// Eligible entries that were attempted (or previewed)
    pub processed: usize,
    /// Whether the batch stopped early on request
    pub cancelled: bool,
}

impl BatchResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, old_path: PathBuf, new_path: PathBuf, is_preview: bool) {
        self.success_count += 1;
        self.renamed.push(RenamedFile {
            old_path,
            new_path,
            is_preview,
        });
    }

    pub fn record_failure(&mut self, path: &Path, kind: ErrorKind, message: impl Into<String>) {
        self.error_count += 1;
        self.failures.push(FailedFile {
            path: path.to_path_buf(),
            kind,
            message: message.into(),
        });
    }

    /// Record the error already attached to `entry`
    pub fn record_entry_failure(&mut self, entry: &FileEntry) {
        let (kind, message) = entry
            .error
            .as_ref()
            .map_or((ErrorKind::Io, String::from("Unknown error")), |e| {
                (e.kind, e.message.clone())
            });
        self.record_failure(&entry.path, kind, message);
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.success_count == 0 && self.error_count == 0
    }
}

/// Progress notification sent after every processed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    /// Name of the entry just processed
    pub label: String,
}
