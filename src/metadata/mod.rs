//! Metadata lookup collaborators
//!
//! The rename engine never decodes file contents itself. Methods that insert
//! metadata (`Metadata`, `NewName` templates) ask a [`MetadataLookup`] for the
//! value of a tag such as `date_created` or `width`, keyed by the entry's
//! original path. A miss is not an error: callers decide what an absent value
//! means.
//!
//! - [`FsMetadata`]: file-level tags answered from `std::fs::metadata`
//! - [`NoMetadata`]: answers nothing
//!
//! Image and audio tags (`width`, `camera`, `duration`, ...) are recognized so
//! templates can reference them, but answering them is left to richer
//! providers supplied by the host.

mod file;

pub use file::FsMetadata;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Tags recognized inside templates and `Metadata` methods
pub const METADATA_TAGS: &[&str] = &[
    "width",
    "height",
    "date",
    "date_created",
    "date_modified",
    "date_created_time",
    "date_modified_time",
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "file_size",
    "filename",
    "dirname",
    "parent_dir",
    "format",
    "duration",
    "bitrate",
    "camera",
    "iso",
    "focal_length",
    "aperture",
    "exposure_time",
];

/// Source of metadata values for a file
pub trait MetadataLookup: Send + Sync {
    /// Value of `tag` (bare name, no braces) for the file at `path`
    fn lookup(&self, tag: &str, path: &Path) -> Option<String>;

    /// Whether `{tag}` in a template should be treated as a metadata placeholder
    fn recognizes(&self, tag: &str) -> bool {
        METADATA_TAGS.contains(&tag)
    }
}

/// Lookup that never finds anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMetadata;

impl MetadataLookup for NoMetadata {
    fn lookup(&self, _tag: &str, _path: &Path) -> Option<String> {
        None
    }
}

/// Lookup backed by a fixed table, keyed by path then tag
///
/// Useful for hosts that extract metadata up front, and for tests.
#[derive(Debug, Default, Clone)]
pub struct StaticMetadata {
    values: HashMap<PathBuf, HashMap<String, String>>,
}

impl StaticMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value, returning `self` for chaining
    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>, tag: &str, value: &str) -> Self {
        self.insert(path, tag, value);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, tag: &str, value: &str) {
        self.values
            .entry(path.into())
            .or_default()
            .insert(tag.to_string(), value.to_string());
    }
}

impl MetadataLookup for StaticMetadata {
    fn lookup(&self, tag: &str, path: &Path) -> Option<String> {
        self.values.get(path).and_then(|tags| tags.get(tag)).cloned()
    }
}
