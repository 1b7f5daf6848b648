//! Filesystem collaborator
//!
//! The executor and the undo stack only reach the disk through
//! [`FileSystem`], so tests can substitute a recording fake and hosts can
//! route renames through their own layer.

use std::fs;
use std::io;
use std::path::Path;

/// Probes and the rename primitive used by the engine
pub trait FileSystem: Send + Sync {
    /// Whether anything (file, folder or dangling link) exists at `path`
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `a` and `b` name the same filesystem object
    ///
    /// Hard links to one inode also count; see [`target_is_occupied`].
    fn same_file(&self, _a: &Path, _b: &Path) -> bool {
        false
    }

    /// Rename `from` to `to` in a single OS call
    ///
    /// # Errors
    /// Returns the underlying I/O error unchanged.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Whether `a` and `b` sit in the same folder and differ only in letter case
#[must_use]
pub fn is_case_only_change(a: &Path, b: &Path) -> bool {
    if a.parent() != b.parent() {
        return false;
    }
    match (a.file_name(), b.file_name()) {
        (Some(a), Some(b)) => {
            let (a, b) = (a.to_string_lossy(), b.to_string_lossy());
            a != b && a.to_lowercase() == b.to_lowercase()
        }
        _ => false,
    }
}

/// Whether renaming `source` to `target` would land on another existing entry
///
/// The only target allowed to exist is the source itself reached through a
/// case-only spelling (case-insensitive filesystems). A hard link to the
/// source is occupied: `rename(2)` between two links of one inode succeeds
/// without doing anything.
pub fn target_is_occupied(fs: &dyn FileSystem, source: &Path, target: &Path) -> bool {
    fs.exists(target) && !(is_case_only_change(source, target) && fs.same_file(source, target))
}

/// The real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[cfg(unix)]
    fn same_file(&self, a: &Path, b: &Path) -> bool {
        use std::os::unix::fs::MetadataExt;

        match (fs::metadata(a), fs::metadata(b)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    fn same_file(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}
