//! Filename legality checks
//!
//! [`validate`] applies the portable rule set to a candidate name: the
//! strictest of the common desktop filesystems, enforced on every host so a
//! batch that passes here can be copied anywhere. Rules run in a fixed order
//! and the first violation wins:
//!
//! 1. empty name and extension (whitespace-only counts as empty)
//! 2. illegal characters `< > : " / \ | ? *` and control characters
//! 3. reserved device names (`CON`, `PRN`, `AUX`, `NUL`, `COM1`-`COM9`,
//!    `LPT1`-`LPT9`), case-insensitively, after trimming trailing dots and spaces
//! 4. final component over 255 characters, or full path over 260 characters
//!    unless long paths are enabled or the path carries the `\\?\` prefix
//!
//! [`sanitize_filename`] repairs a name instead of rejecting it.

mod error;

pub use error::ValidationError;

use std::path::Path;

use crate::entry::{FileEntry, FileStatus};

/// Longest file name component, in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Longest full path without long-path support, in characters
pub const MAX_PATH_LENGTH: usize = 260;

pub const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

pub const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

const LONG_PATH_PREFIX: &str = r"\\?\";

/// Knobs for the path-length rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Skip the 260-character full-path limit
    pub long_paths: bool,
}

fn is_illegal(c: char) -> bool {
    ILLEGAL_CHARS.contains(&c) || (c as u32) < 0x20
}

/// Whether `name` is a reserved device name once trailing dots and spaces are gone
#[must_use]
pub fn is_reserved_name(name: &str) -> bool {
    let trimmed = name.trim_end_matches(['.', ' ']);
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(trimmed))
}

/// Check a candidate `(name, extension)` for the entry at `path`
///
/// `path` is the entry's current location; the candidate is checked as a
/// sibling of it. `ordinal` is the entry's position in the batch and does
/// not affect the outcome.
///
/// # Errors
///
/// Returns the first rule the candidate violates.
pub fn validate(
    name: &str,
    extension: &str,
    path: &Path,
    ordinal: usize,
    options: &ValidatorOptions,
) -> Result<(), ValidationError> {
    let _ = ordinal;

    if name.trim().is_empty() && extension.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if let Some(c) = name.chars().chain(extension.chars()).find(|&c| is_illegal(c)) {
        return Err(ValidationError::IllegalCharacter(c));
    }

    if is_reserved_name(name) {
        return Err(ValidationError::ReservedDeviceName(name.to_string()));
    }

    let full_name = format!("{name}{extension}");
    let name_len = full_name.chars().count();
    if name_len > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            len: name_len,
            max: MAX_NAME_LENGTH,
        });
    }

    let target = match path.parent() {
        Some(parent) => parent.join(&full_name),
        None => Path::new(&full_name).to_path_buf(),
    };
    let target = target.to_string_lossy();
    if !options.long_paths && !target.starts_with(LONG_PATH_PREFIX) {
        let path_len = target.chars().count();
        if path_len > MAX_PATH_LENGTH {
            return Err(ValidationError::PathTooLong {
                len: path_len,
                max: MAX_PATH_LENGTH,
            });
        }
    }

    Ok(())
}

/// Validate every renamed, ready entry and mark failures on the entry
///
/// Returns the number of entries marked invalid.
pub fn validate_entries(entries: &mut [FileEntry], options: &ValidatorOptions) -> usize {
    let mut invalid = 0;
    for (ordinal, entry) in entries.iter_mut().enumerate() {
        if entry.status != FileStatus::Ready || !entry.is_renamed() {
            continue;
        }
        if let Err(err) = validate(&entry.new_name, &entry.extension, &entry.path, ordinal, options)
        {
            log::debug!("{}: {err}", entry.path.display());
            entry.set_error(err.kind(), err.to_string());
            invalid += 1;
        }
    }
    invalid
}

/// Replace illegal characters with `replacement` and strip trailing dots and spaces
///
/// Illegal characters inside `replacement` itself are dropped.
///
/// # Examples
/// ```
/// use refile::validate::sanitize_filename;
///
/// assert_eq!(sanitize_filename("what? a:b. ", "_"), "what_ a_b");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str, replacement: &str) -> String {
    let replacement: String = replacement.chars().filter(|&c| !is_illegal(c)).collect();
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if is_illegal(c) {
            out.push_str(&replacement);
        } else {
            out.push(c);
        }
    }
    out.trim_end_matches(['.', ' ']).to_string()
}
