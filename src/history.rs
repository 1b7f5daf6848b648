//! Undo/redo history of batches
//!
//! Each applied batch pushes a deep copy of the entry list as it was before
//! the batch. Undoing renames every entry back to its snapshot path and
//! restores the snapshot state; the state being left is pushed onto the redo
//! stack so the batch can be reapplied. Both stacks are bounded and evict
//! their oldest snapshot when full.
//!
//! Entries are matched by position: the host must not reorder the list
//! between a batch and its undo.

use std::collections::VecDeque;

use crate::entry::FileEntry;
use crate::executor::{BatchResult, move_file};
use crate::fs::FileSystem;

/// Default number of snapshots kept on each stack
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded undo and redo stacks of entry-list snapshots
#[derive(Debug, Clone)]
pub struct UndoRedoStack {
    undo: VecDeque<Vec<FileEntry>>,
    redo: VecDeque<Vec<FileEntry>>,
    limit: usize,
}

impl Default for UndoRedoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoRedoStack {
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// A limit of 0 is raised to 1
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Record the state before a new batch; clears the redo stack
    pub fn push_undo(&mut self, snapshot: &[FileEntry]) {
        Self::push_bounded(&mut self.undo, snapshot.to_vec(), self.limit);
        self.redo.clear();
    }

    pub fn push_redo(&mut self, snapshot: &[FileEntry]) {
        Self::push_bounded(&mut self.redo, snapshot.to_vec(), self.limit);
    }

    pub fn pop_undo(&mut self) -> Option<Vec<FileEntry>> {
        self.undo.pop_back()
    }

    pub fn pop_redo(&mut self) -> Option<Vec<FileEntry>> {
        self.redo.pop_back()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Revert `entries` to the most recent undo snapshot
    ///
    /// Returns `None` when there is nothing to undo. Entries are restored in
    /// reverse order so chained renames (`b -> c` then `a -> b`) unwind cleanly.
    pub fn undo(&mut self, entries: &mut Vec<FileEntry>, fs: &dyn FileSystem) -> Option<BatchResult> {
        let snapshot = self.pop_undo()?;
        self.push_redo(entries);
        log::info!("undoing batch of {} entr(y/ies)", snapshot.len());
        Some(restore(entries, snapshot, fs, true))
    }

    /// Reapply the most recently undone batch
    ///
    /// Returns `None` when there is nothing to redo. The redo stack is kept,
    /// so several undone batches can be redone in turn.
    pub fn redo(&mut self, entries: &mut Vec<FileEntry>, fs: &dyn FileSystem) -> Option<BatchResult> {
        let snapshot = self.pop_redo()?;
        Self::push_bounded(&mut self.undo, entries.clone(), self.limit);
        log::info!("redoing batch of {} entr(y/ies)", snapshot.len());
        Some(restore(entries, snapshot, fs, false))
    }

    fn push_bounded(stack: &mut VecDeque<Vec<FileEntry>>, snapshot: Vec<FileEntry>, limit: usize) {
        stack.push_back(snapshot);
        while stack.len() > limit {
            stack.pop_front();
        }
    }
}

/// Move every entry back to its snapshot path and adopt the snapshot state
///
/// Entries whose move fails keep their current state, marked with the error.
fn restore(
    entries: &mut Vec<FileEntry>,
    snapshot: Vec<FileEntry>,
    fs: &dyn FileSystem,
    reverse: bool,
) -> BatchResult {
    let mut result = BatchResult::new();
    if entries.len() != snapshot.len() {
        log::warn!(
            "entry list changed since snapshot ({} now, {} then)",
            entries.len(),
            snapshot.len()
        );
    }

    let common = entries.len().min(snapshot.len());
    let mut order: Vec<usize> = (0..common).collect();
    if reverse {
        order.reverse();
    }

    let mut snapshot: Vec<Option<FileEntry>> = snapshot.into_iter().map(Some).collect();
    for idx in order {
        let Some(target) = snapshot[idx].take() else {
            continue;
        };
        let current = &mut entries[idx];
        if current.path == target.path {
            *current = target;
            continue;
        }

        match move_file(fs, &current.path, &target.path) {
            Ok(()) => {
                log::info!(
                    "restored {} -> {}",
                    current.path.display(),
                    target.path.display()
                );
                result.record_success(current.path.clone(), target.path.clone(), false);
                *current = target;
            }
            Err(err) => {
                log::warn!("{err}");
                current.set_error(err.kind(), err.to_string());
                result.record_entry_failure(current);
            }
        }
        result.processed += 1;
    }

    // Snapshot entries the host has since dropped come back unchanged
    entries.extend(snapshot.into_iter().skip(common).flatten());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ErrorKind;
    use crate::executor::BatchRenameExecutor;
    use crate::testing::MemoryFileSystem;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn entry(path: &str) -> FileEntry {
        FileEntry::from_path(path)
    }

    #[test]
    fn test_push_undo_clears_redo_and_is_bounded() {
        let mut stack = UndoRedoStack::with_limit(2);
        stack.push_redo(&[entry("/d/r.txt")]);
        stack.push_undo(&[entry("/d/1.txt")]);
        assert!(!stack.can_redo());

        stack.push_undo(&[entry("/d/2.txt")]);
        stack.push_undo(&[entry("/d/3.txt")]);
        assert_eq!(stack.undo_len(), 2);
        assert_eq!(stack.pop_undo().unwrap()[0].old_name, "3");
        assert_eq!(stack.pop_undo().unwrap()[0].old_name, "2");
        assert!(stack.pop_undo().is_none());
    }

    #[test]
    fn test_default_limit() {
        let mut stack = UndoRedoStack::new();
        for i in 0..60 {
            stack.push_undo(&[entry(&format!("/d/{i}.txt"))]);
        }
        assert_eq!(stack.undo_len(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_snapshot_is_deep_copy() {
        let mut stack = UndoRedoStack::new();
        let mut entries = vec![entry("/d/a.txt")];
        stack.push_undo(&entries);
        entries[0].new_name = "changed".into();
        assert_eq!(stack.pop_undo().unwrap()[0].new_name, "a");
    }

    #[test]
    fn test_undo_then_redo_round_trip() {
        let fs = Arc::new(MemoryFileSystem::with_files(&["/d/a.txt", "/d/b.txt"]));
        let executor = BatchRenameExecutor::new(fs.clone());
        let mut stack = UndoRedoStack::new();
        let mut entries = vec![entry("/d/a.txt"), entry("/d/b.txt")];
        entries[0].new_name = "x".into();
        entries[1].new_name = "y".into();

        stack.push_undo(&entries);
        let before = entries.clone();
        executor.execute(&mut entries, false);
        let after = entries.clone();

        let undone = stack.undo(&mut entries, fs.as_ref()).unwrap();
        assert_eq!(undone.success_count, 2);
        assert_eq!(entries, before);
        assert!(fs.exists(&PathBuf::from("/d/a.txt")));

        let redone = stack.redo(&mut entries, fs.as_ref()).unwrap();
        assert_eq!(redone.success_count, 2);
        assert_eq!(entries, after);
        assert!(fs.exists(&PathBuf::from("/d/y.txt")));
        assert!(stack.can_undo());
    }

    #[test]
    fn test_undo_unwinds_chained_renames() {
        // Batch renamed b -> c, then a -> b
        let fs = MemoryFileSystem::with_files(&["/d/b.txt", "/d/c.txt"]);
        let mut stack = UndoRedoStack::new();
        stack.push_undo(&[entry("/d/b.txt"), entry("/d/a.txt")]);
        let mut entries = vec![entry("/d/c.txt"), entry("/d/b.txt")];

        let result = stack.undo(&mut entries, &fs).unwrap();

        assert_eq!(result.error_count, 0);
        assert_eq!(
            fs.renames(),
            vec![
                (PathBuf::from("/d/b.txt"), PathBuf::from("/d/a.txt")),
                (PathBuf::from("/d/c.txt"), PathBuf::from("/d/b.txt")),
            ]
        );
    }

    #[test]
    fn test_undo_with_nothing_to_undo() {
        let fs = MemoryFileSystem::new();
        let mut stack = UndoRedoStack::new();
        let mut entries = Vec::new();
        assert!(stack.undo(&mut entries, &fs).is_none());
        assert!(stack.redo(&mut entries, &fs).is_none());
    }

    #[test]
    fn test_failed_restore_marks_entry_and_continues() {
        let fs = MemoryFileSystem::with_files(&["/d/y.txt"]);
        let mut stack = UndoRedoStack::new();
        stack.push_undo(&[entry("/d/a.txt"), entry("/d/b.txt")]);
        let mut entries = vec![entry("/d/x.txt"), entry("/d/y.txt")];

        let result = stack.undo(&mut entries, &fs).unwrap();

        assert_eq!(result.success_count, 1);
        assert_eq!(result.error_count, 1);
        assert_eq!(
            entries[0].error.as_ref().map(|e| e.kind),
            Some(ErrorKind::FileNotFound)
        );
        assert_eq!(entries[1].path, PathBuf::from("/d/b.txt"));
    }
}
