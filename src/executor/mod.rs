//! Batch rename execution
//!
//! The executor walks the batch in insertion order and renames every ready
//! entry whose name changed. It never stops on a per-entry failure: each
//! outcome is written onto the entry and into the [`BatchResult`], and the
//! batch moves on. Already-committed renames are never rolled back here;
//! that is the undo stack's job.
//!
//! Entries that failed validation or conflict detection are reported as
//! failures without being touched.

mod cancel;
mod error;
mod result;

pub use cancel::CancellationToken;
pub use error::RenameError;
pub use result::{BatchResult, FailedFile, Progress, RenamedFile};

use std::path::Path;
use std::sync::Arc;

use crate::entry::{FileEntry, FileStatus};
use crate::fs::{FileSystem, target_is_occupied};

/// Performs (or simulates) the renames of a prepared batch
#[derive(Clone)]
pub struct BatchRenameExecutor {
    fs: Arc<dyn FileSystem>,
}

impl BatchRenameExecutor {
    #[must_use]
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Execute without cancellation or progress reporting
    pub fn execute(&self, entries: &mut [FileEntry], dry_run: bool) -> BatchResult {
        self.execute_with(entries, dry_run, &CancellationToken::new(), &mut |_: &Progress| {})
    }

    /// Execute the batch
    ///
    /// A dry run records every eligible entry as a preview success and does
    /// not touch the filesystem. `cancel` is polled before each eligible
    /// entry; once set, the remaining eligible entries are marked with
    /// [`ErrorKind::Cancelled`](crate::entry::ErrorKind::Cancelled).
    /// `progress` is called after each processed entry and must return quickly.
    pub fn execute_with(
        &self,
        entries: &mut [FileEntry],
        dry_run: bool,
        cancel: &CancellationToken,
        progress: &mut dyn FnMut(&Progress),
    ) -> BatchResult {
        let total = entries.iter().filter(|e| e.is_eligible()).count();
        let mut result = BatchResult::new();

        for entry in entries.iter_mut() {
            match entry.status {
                FileStatus::Error | FileStatus::Conflict => {
                    result.record_entry_failure(entry);
                    continue;
                }
                FileStatus::Ready | FileStatus::Processing => {}
            }
            if !entry.is_renamed() {
                continue;
            }

            if cancel.is_cancelled() {
                result.cancelled = true;
                let err = RenameError::Cancelled;
                entry.set_error(err.kind(), err.to_string());
                result.record_entry_failure(entry);
                continue;
            }

            let target = entry.new_path();
            if dry_run {
                result.record_success(entry.path.clone(), target, true);
            } else {
                entry.set_processing();
                match self.rename_entry(entry, &target) {
                    Ok(()) => {
                        log::info!("renamed {} -> {}", entry.path.display(), target.display());
                        result.record_success(entry.path.clone(), target.clone(), false);
                        entry.commit_rename(target);
                    }
                    Err(err) => {
                        log::warn!("{err}");
                        entry.set_error(err.kind(), err.to_string());
                        result.record_entry_failure(entry);
                    }
                }
            }

            result.processed += 1;
            progress(&Progress {
                processed: result.processed,
                total,
                label: entry.new_full_name(),
            });
        }

        if result.cancelled {
            log::info!(
                "batch cancelled after {} of {total} entr(y/ies)",
                result.processed
            );
        }
        result
    }

    fn rename_entry(&self, entry: &FileEntry, target: &Path) -> Result<(), RenameError> {
        let source = &entry.path;
        if !self.fs.exists(source) {
            return Err(RenameError::FileNotFound(source.clone()));
        }

        let is_dir = self.fs.is_dir(source);
        if entry.is_folder() != is_dir {
            return Err(RenameError::KindMismatch {
                path: source.clone(),
                expected: if entry.is_folder() { "folder" } else { "file" },
            });
        }

        move_file(self.fs.as_ref(), source, target)
    }
}

/// Rename `source` to `target`, refusing to replace a different existing file
///
/// `std::fs::rename` silently replaces an existing target on Unix, so the
/// target is probed first with [`target_is_occupied`].
pub(crate) fn move_file(fs: &dyn FileSystem, source: &Path, target: &Path) -> Result<(), RenameError> {
    if !fs.exists(source) {
        return Err(RenameError::FileNotFound(source.to_path_buf()));
    }
    if target_is_occupied(fs, source, target) {
        return Err(RenameError::RaceCondition(target.to_path_buf()));
    }
    fs.rename(source, target)
        .map_err(|e| RenameError::from_io(source.to_path_buf(), target.to_path_buf(), e))
}

impl std::fmt::Debug for BatchRenameExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRenameExecutor").finish_non_exhaustive()
    }
}
