//! Rename session
//!
//! A [`Session`] owns the collaborators (filesystem and metadata lookup), the
//! validator options, and the undo/redo history. It is the single entry
//! point hosts drive:
//!
//! - [`Session::run_batch`] prepares and executes a batch on the calling thread
//! - [`Session::spawn_batch`] prepares on the calling thread and executes on a
//!   dedicated worker, reporting progress over a channel
//! - [`Session::undo`] / [`Session::redo`] walk the history
//!
//! A batch is prepared in four passes: the method pipeline computes candidate
//! names, the validator marks illegal names, colliding names are marked as
//! conflicts, and (optionally) targets that already exist on disk are marked.
//! Only then does the executor run.

use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::conflict;
use crate::entry::FileEntry;
use crate::executor::{BatchRenameExecutor, BatchResult, CancellationToken, Progress};
use crate::fs::{FileSystem, OsFileSystem};
use crate::history::{DEFAULT_HISTORY_LIMIT, UndoRedoStack};
use crate::metadata::{FsMetadata, MetadataLookup};
use crate::methods::NameTransform;
use crate::pipeline::MethodPipeline;
use crate::validate::{self, ValidatorOptions};
use crate::{RefileError, config::RefileConfig};

type Result<T> = std::result::Result<T, RefileError>;

/// Behaviour switches for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub validator: ValidatorOptions,
    /// Mark entries whose target already exists on disk before executing
    pub check_existing_targets: bool,
    pub history_limit: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            validator: ValidatorOptions::default(),
            check_existing_targets: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl From<&RefileConfig> for SessionOptions {
    fn from(config: &RefileConfig) -> Self {
        Self {
            validator: ValidatorOptions {
                long_paths: config.long_paths,
            },
            check_existing_targets: config.check_existing_targets,
            history_limit: config.history_limit,
        }
    }
}

/// Owner of collaborators and undo history
pub struct Session {
    fs: Arc<dyn FileSystem>,
    metadata: Arc<dyn MetadataLookup>,
    options: SessionOptions,
    history: UndoRedoStack,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session on the real filesystem with file-level metadata
    #[must_use]
    pub fn new() -> Self {
        Self::with_collaborators(Arc::new(OsFileSystem), Arc::new(FsMetadata))
    }

    #[must_use]
    pub fn with_collaborators(fs: Arc<dyn FileSystem>, metadata: Arc<dyn MetadataLookup>) -> Self {
        Self {
            fs,
            metadata,
            options: SessionOptions::default(),
            history: UndoRedoStack::new(),
        }
    }

    /// Replace the options; resizes (and clears) the history when the limit changes
    #[must_use]
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        if options.history_limit != self.options.history_limit {
            self.history = UndoRedoStack::with_limit(options.history_limit);
        }
        self.options = options;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &SessionOptions {
        &self.options
    }

    #[must_use]
    pub const fn history(&self) -> &UndoRedoStack {
        &self.history
    }

    /// Entry for `path`, detecting folders through the filesystem collaborator
    #[must_use]
    pub fn entry_for(&self, path: &Path) -> FileEntry {
        if self.fs.is_dir(path) {
            FileEntry::folder(path)
        } else {
            FileEntry::from_path(path)
        }
    }

    /// Compute candidate names and run every pre-flight check
    ///
    /// Statuses from a previous run are cleared first, so preparing the same
    /// entries twice gives the same result.
    pub fn prepare(&self, entries: &mut [FileEntry], pipeline: &mut MethodPipeline) {
        pipeline.apply(entries, self.metadata.as_ref());
        for entry in entries.iter_mut() {
            entry.set_ready();
        }

        let invalid = validate::validate_entries(entries, &self.options.validator);
        let conflicts = conflict::mark_conflicts(entries);
        let existing = if self.options.check_existing_targets {
            conflict::mark_existing_targets(entries, self.fs.as_ref())
        } else {
            0
        };

        if invalid + conflicts + existing > 0 {
            log::warn!(
                "{invalid} invalid name(s), {conflicts} conflict(s), {existing} existing target(s)"
            );
        }
    }

    /// Prepare and execute a batch on the calling thread
    ///
    /// # Errors
    ///
    /// Returns `RefileError::Method` if a method cannot be compiled. Per-entry
    /// failures are reported in the `BatchResult`, never as an `Err`.
    pub fn run_batch(
        &mut self,
        entries: &mut Vec<FileEntry>,
        methods: &[NameTransform],
        dry_run: bool,
    ) -> Result<BatchResult> {
        self.run_batch_with(entries, methods, dry_run, &CancellationToken::new(), &mut |_: &Progress| {})
    }

    /// [`Session::run_batch`] with cancellation and progress reporting
    ///
    /// # Errors
    ///
    /// Returns `RefileError::Method` if a method cannot be compiled.
    pub fn run_batch_with(
        &mut self,
        entries: &mut Vec<FileEntry>,
        methods: &[NameTransform],
        dry_run: bool,
        cancel: &CancellationToken,
        progress: &mut dyn FnMut(&Progress),
    ) -> Result<BatchResult> {
        let mut pipeline = MethodPipeline::new(methods.to_vec())?;
        self.prepare(entries, &mut pipeline);

        if !dry_run {
            self.history.push_undo(entries);
        }

        let executor = BatchRenameExecutor::new(Arc::clone(&self.fs));
        Ok(executor.execute_with(entries, dry_run, cancel, progress))
    }

    /// Prepare a batch here and execute it on a worker thread
    ///
    /// The worker owns `entries` until it finishes and hands them back in
    /// [`BatchOutcome`].
    ///
    /// # Errors
    ///
    /// Returns `RefileError::Method` if a method cannot be compiled, or
    /// `RefileError::ThreadSpawn` if the worker thread cannot be started.
    pub fn spawn_batch(
        &mut self,
        mut entries: Vec<FileEntry>,
        methods: &[NameTransform],
        dry_run: bool,
    ) -> Result<BatchHandle> {
        let mut pipeline = MethodPipeline::new(methods.to_vec())?;
        self.prepare(&mut entries, &mut pipeline);
        let snapshot = (!dry_run).then(|| entries.clone());

        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel();
        let executor = BatchRenameExecutor::new(Arc::clone(&self.fs));
        let worker_cancel = cancel.clone();

        let thread = thread::Builder::new()
            .name("refile-batch".to_string())
            .spawn(move || run_worker(&executor, entries, dry_run, &worker_cancel, &tx))
            .map_err(RefileError::ThreadSpawn)?;

        if let Some(snapshot) = snapshot {
            self.history.push_undo(&snapshot);
        }

        Ok(BatchHandle {
            cancel,
            events: rx,
            thread: Some(thread),
        })
    }

    /// Revert the last applied batch
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, entries: &mut Vec<FileEntry>) -> Option<BatchResult> {
        self.history.undo(entries, self.fs.as_ref())
    }

    /// Reapply the last undone batch
    ///
    /// Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, entries: &mut Vec<FileEntry>) -> Option<BatchResult> {
        self.history.redo(entries, self.fs.as_ref())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("options", &self.options)
            .field("undo", &self.history.undo_len())
            .field("redo", &self.history.redo_len())
            .finish_non_exhaustive()
    }
}

fn run_worker(
    executor: &BatchRenameExecutor,
    mut entries: Vec<FileEntry>,
    dry_run: bool,
    cancel: &CancellationToken,
    tx: &Sender<BatchEvent>,
) {
    let result = executor.execute_with(&mut entries, dry_run, cancel, &mut |progress: &Progress| {
        let _ = tx.send(BatchEvent::Progress(progress.clone()));
    });
    let _ = tx.send(BatchEvent::Finished(BatchOutcome { entries, result }));
}

/// Entries and result handed back by a finished worker
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub entries: Vec<FileEntry>,
    pub result: BatchResult,
}

/// Messages from a running batch
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Progress(Progress),
    Finished(BatchOutcome),
}

/// Handle to a batch running on a worker thread
#[derive(Debug)]
pub struct BatchHandle {
    cancel: CancellationToken,
    events: Receiver<BatchEvent>,
    thread: Option<JoinHandle<()>>,
}

impl BatchHandle {
    /// Ask the worker to stop before its next entry
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Next event if one is already queued
    #[must_use]
    pub fn try_next_event(&self) -> Option<BatchEvent> {
        self.events.try_recv().ok()
    }

    /// Next event, waiting at most `timeout`
    ///
    /// `None` means nothing arrived in time or the worker is gone.
    #[must_use]
    pub fn next_event_timeout(&self, timeout: Duration) -> Option<BatchEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Block until the worker finishes, discarding progress events
    ///
    /// # Errors
    ///
    /// Returns `RefileError::WorkerPanicked` if the worker exits without a
    /// result.
    pub fn wait(self) -> Result<BatchOutcome> {
        self.wait_with(|_| {})
    }

    /// Block until the worker finishes, handing every progress event to `on_progress`
    ///
    /// # Errors
    ///
    /// Returns `RefileError::WorkerPanicked` if the worker exits without a
    /// result.
    pub fn wait_with(mut self, mut on_progress: impl FnMut(&Progress)) -> Result<BatchOutcome> {
        let outcome = loop {
            match self.events.recv() {
                Ok(BatchEvent::Finished(outcome)) => break Some(outcome),
                Ok(BatchEvent::Progress(progress)) => on_progress(&progress),
                Err(_) => break None,
            }
        };

        let joined = self.thread.take().map_or(Ok(()), JoinHandle::join);
        match (outcome, joined) {
            (Some(outcome), Ok(())) => Ok(outcome),
            _ => Err(RefileError::WorkerPanicked),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
