//! Refile - a batch file-renaming engine
//!
//! This library computes new names for a batch of files through an ordered
//! pipeline of rename methods, checks every candidate against filesystem
//! legality rules and against the rest of the batch, renames what is left
//! one file at a time, and keeps an undo/redo history of applied batches.
//!
//! ```no_run
//! use refile::{FileEntry, NameTransform, Session};
//!
//! let mut session = Session::new();
//! let mut entries = vec![FileEntry::from_path("/photos/a.txt")];
//! let result = session
//!     .run_batch(&mut entries, &[NameTransform::replace("a", "x")], true)
//!     .unwrap();
//! assert_eq!(result.success_count, 1);
//! ```

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod conflict;
pub mod entry;
pub mod executor;
pub mod fs;
pub mod history;
pub mod metadata;
pub mod methods;
pub mod pipeline;
pub mod presets;
pub mod session;
pub mod validate;

#[cfg(test)]
pub mod testing;

pub use entry::{EntryError, ErrorKind, FileEntry, FileStatus};
pub use executor::{BatchResult, CancellationToken, Progress};
pub use methods::NameTransform;
pub use session::{BatchEvent, BatchHandle, BatchOutcome, Session, SessionOptions};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum RefileError {
    /// A rename method could not be built or parsed
    #[error("Method error: {0}")]
    Method(#[from] methods::MethodError),
    /// Preset storage error
    #[error("Preset error: {0}")]
    Preset(#[from] presets::PresetError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Report serialization failed
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// The batch worker thread could not be started
    #[error("Failed to spawn batch worker: {0}")]
    ThreadSpawn(#[source] std::io::Error),
    /// The batch worker exited without reporting a result
    #[error("Batch worker terminated unexpectedly")]
    WorkerPanicked,
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
