use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::entry::ErrorKind;

/// Why a single rename did not happen
#[derive(Debug, Error)]
pub enum RenameError {
    /// Source vanished between scan and execute
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Target appeared after the conflict pass
    #[error("Target already exists: {}", .0.display())]
    RaceCondition(PathBuf),

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Entry says folder but disk says file, or the other way round
    #[error("Expected a {expected} at {}", .path.display())]
    KindMismatch { path: PathBuf, expected: &'static str },

    #[error("Error while renaming {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Batch cancelled")]
    Cancelled,
}

impl RenameError {
    /// Classify an error from the rename primitive
    #[must_use]
    pub fn from_io(path: PathBuf, target: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::AlreadyExists => Self::RaceCondition(target),
            io::ErrorKind::NotFound => Self::FileNotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound(_) => ErrorKind::FileNotFound,
            Self::RaceCondition(_) => ErrorKind::RaceCondition,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::KindMismatch { .. } | Self::Io { .. } => ErrorKind::Io,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}
