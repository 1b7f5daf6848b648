//! Pre-flight collision detection
//!
//! Two passes, both run over the whole batch before any rename happens:
//!
//! - [`detect`] / [`mark_conflicts`]: entries that would end up with the same
//!   target name. Every member of a colliding group is demoted, not just the
//!   later ones.
//! - [`mark_existing_targets`]: entries whose target already exists on disk
//!   as a different object.
//!
//! Only ready entries that actually change name take part; an unchanged
//! entry never collides.

use std::collections::BTreeMap;

use crate::entry::{ErrorKind, FileEntry};
use crate::fs::{FileSystem, target_is_occupied};

/// Group eligible entries by target name; only groups of two or more are returned
///
/// Keys are the candidate full names (name plus extension) compared exactly.
/// Values are entry indices in batch order.
#[must_use]
pub fn detect(entries: &[FileEntry]) -> BTreeMap<String, Vec<usize>> {
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        if entry.is_eligible() {
            groups.entry(entry.new_full_name()).or_default().push(idx);
        }
    }
    groups.retain(|_, members| members.len() > 1);
    groups
}

/// Demote every member of every colliding group to `Conflict`
///
/// Returns the number of entries marked.
pub fn mark_conflicts(entries: &mut [FileEntry]) -> usize {
    let groups = detect(entries);
    let mut marked = 0;
    for (target, members) in &groups {
        let message = format!(
            "Conflict: {} files would be renamed to '{target}'",
            members.len()
        );
        log::warn!("{message}");
        for &idx in members {
            entries[idx].set_conflict(message.clone());
            marked += 1;
        }
    }
    marked
}

/// Mark renamed entries whose target already exists as another file
///
/// A case-only respelling of the entry's own file (case-insensitive
/// filesystems) is allowed; any other existing target, a hard link to the
/// source included, is a conflict. Returns the number of entries
/// marked.
pub fn mark_existing_targets(entries: &mut [FileEntry], fs: &dyn FileSystem) -> usize {
    let mut marked = 0;
    for entry in entries.iter_mut().filter(|e| e.is_eligible()) {
        let target = entry.new_path();
        if target_is_occupied(fs, &entry.path, &target) {
            let message = format!("Target '{}' already exists", entry.new_full_name());
            log::warn!("{}: {message}", entry.path.display());
            entry.set_error(ErrorKind::Conflict, message);
            marked += 1;
        }
    }
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FileStatus;
    use crate::testing::MemoryFileSystem;

    fn renamed(path: &str, new_name: &str) -> FileEntry {
        let mut entry = FileEntry::from_path(path);
        entry.new_name = new_name.to_string();
        entry
    }

    #[test]
    fn test_detect_groups_collisions_only() {
        let entries = vec![
            renamed("/d/img1.png", "photo"),
            renamed("/d/img2.png", "photo"),
            renamed("/d/img3.png", "other"),
        ];
        let groups = detect(&entries);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["photo.png"], vec![0, 1]);
    }

    #[test]
    fn test_unchanged_and_failed_entries_are_excluded() {
        let mut entries = vec![
            renamed("/d/photo.png", "photo"),
            renamed("/d/img2.png", "photo"),
            renamed("/d/img3.png", "photo"),
        ];
        entries[2].set_error(ErrorKind::IllegalCharacter, "bad");
        assert!(detect(&entries).is_empty());
    }

    #[test]
    fn test_mark_conflicts_demotes_every_member() {
        let mut entries = vec![
            renamed("/d/img1.png", "photo"),
            renamed("/d/img2.png", "photo"),
            renamed("/d/img3.png", "solo"),
        ];
        assert_eq!(mark_conflicts(&mut entries), 2);
        for entry in &entries[..2] {
            assert_eq!(entry.status, FileStatus::Conflict);
            assert_eq!(
                entry.error_message(),
                Some("Conflict: 2 files would be renamed to 'photo.png'")
            );
        }
        assert!(entries[2].is_ready());
    }

    #[test]
    fn test_different_extensions_do_not_collide() {
        let entries = vec![
            renamed("/d/a.txt", "file1"),
            renamed("/d/b.pdf", "file1"),
        ];
        assert!(detect(&entries).is_empty());
    }

    #[test]
    fn test_existing_target_on_disk() {
        let fs = MemoryFileSystem::with_files(&["/d/a.txt", "/d/b.txt", "/d/c.txt"]);
        let mut entries = vec![renamed("/d/a.txt", "b"), renamed("/d/c.txt", "z")];
        assert_eq!(mark_existing_targets(&mut entries, &fs), 1);
        assert_eq!(entries[0].error.as_ref().map(|e| e.kind), Some(ErrorKind::Conflict));
        assert!(entries[1].is_ready());
    }
}
