use thiserror::Error;

use crate::entry::ErrorKind;

/// Why a candidate file name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is empty")]
    EmptyName,

    #[error("Name contains illegal character {0:?}")]
    IllegalCharacter(char),

    #[error("'{0}' is a reserved device name")]
    ReservedDeviceName(String),

    /// Final path component exceeds the per-name limit
    #[error("Name is too long ({len} > {max} characters)")]
    NameTooLong { len: usize, max: usize },

    #[error("Path is too long ({len} > {max} characters)")]
    PathTooLong { len: usize, max: usize },
}

impl ValidationError {
    /// Entry-level error kind; both length rules report `PathTooLong`
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyName => ErrorKind::EmptyName,
            Self::IllegalCharacter(_) => ErrorKind::IllegalCharacter,
            Self::ReservedDeviceName(_) => ErrorKind::ReservedDeviceName,
            Self::NameTooLong { .. } | Self::PathTooLong { .. } => ErrorKind::PathTooLong,
        }
    }
}
