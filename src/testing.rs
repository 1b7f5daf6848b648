//! Testing utilities for refile
//!
//! This module provides an in-memory [`FileSystem`] that records every
//! rename, and a `TestDir` wrapper around a temporary directory for tests
//! that touch the real disk.
//!
//! Only available when compiled with `cfg(test)`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;

use crate::entry::FileEntry;
use crate::fs::FileSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    File,
    Dir,
}

/// Filesystem fake backed by a map of paths
///
/// Renames are recorded in call order. Individual sources can be set up to
/// fail with a chosen `io::ErrorKind`.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
    renames: Mutex<Vec<(PathBuf, PathBuf)>>,
    failures: Mutex<HashMap<PathBuf, io::ErrorKind>>,
}

impl MemoryFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake containing the given files
    #[must_use]
    pub fn with_files(paths: &[&str]) -> Self {
        let fs = Self::new();
        for path in paths {
            fs.add_file(path);
        }
        fs
    }

    pub fn add_file(&self, path: impl Into<PathBuf>) {
        self.nodes.lock().unwrap().insert(path.into(), Node::File);
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.nodes.lock().unwrap().insert(path.into(), Node::Dir);
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        self.nodes.lock().unwrap().remove(path.as_ref());
    }

    /// Make every rename of `from` fail with `kind`
    pub fn fail_rename(&self, from: impl Into<PathBuf>, kind: io::ErrorKind) {
        self.failures.lock().unwrap().insert(from.into(), kind);
    }

    /// Successful renames, in call order
    #[must_use]
    pub fn renames(&self) -> Vec<(PathBuf, PathBuf)> {
        self.renames.lock().unwrap().clone()
    }

    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.nodes.lock().unwrap().keys().cloned().collect()
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.nodes.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.nodes.lock().unwrap().get(path) == Some(&Node::Dir)
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        a == b
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if let Some(kind) = self.failures.lock().unwrap().get(from) {
            return Err(io::Error::new(*kind, "injected failure"));
        }
        let mut nodes = self.nodes.lock().unwrap();
        let node = nodes
            .remove(from)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
        nodes.insert(to.to_path_buf(), node);
        self.renames
            .lock()
            .unwrap()
            .push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }
}

/// Temporary directory that is removed on drop
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file with default content and return its path
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn file(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, b"test content").expect("Failed to create test file");
        path
    }

    /// Create a sub-directory and return its path
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn dir(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::create_dir_all(&path).expect("Failed to create test dir");
        path
    }

    /// Entries for freshly created files, in the given order
    pub fn entries(&self, names: &[&str]) -> Vec<FileEntry> {
        names
            .iter()
            .map(|name| FileEntry::from_path(self.file(name)))
            .collect()
    }

    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// File names in the directory, sorted
    ///
    /// # Panics
    /// Panics if the directory cannot be read.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.dir.path())
            .expect("Failed to read test dir")
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_fs_records_renames() {
        let fs = MemoryFileSystem::with_files(&["/d/a.txt"]);
        fs.rename(Path::new("/d/a.txt"), Path::new("/d/b.txt")).unwrap();
        assert!(!fs.exists(Path::new("/d/a.txt")));
        assert!(fs.exists(Path::new("/d/b.txt")));
        assert_eq!(
            fs.renames(),
            vec![(PathBuf::from("/d/a.txt"), PathBuf::from("/d/b.txt"))]
        );
    }

    #[test]
    fn test_memory_fs_injected_failure() {
        let fs = MemoryFileSystem::with_files(&["/d/a.txt"]);
        fs.fail_rename("/d/a.txt", io::ErrorKind::PermissionDenied);
        let err = fs
            .rename(Path::new("/d/a.txt"), Path::new("/d/b.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(fs.renames().is_empty());
    }

    #[test]
    fn test_dir_helpers() {
        let dir = TestDir::new();
        dir.file("b.txt");
        dir.file("a.txt");
        dir.dir("sub");
        assert!(dir.exists("a.txt"));
        assert_eq!(dir.names(), vec!["a.txt", "b.txt", "sub"]);
    }
}
