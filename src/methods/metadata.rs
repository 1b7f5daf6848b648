use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Position;
use super::template::placeholders;
use crate::metadata::MetadataLookup;

/// Metadata value inserted at the start or end of the name
///
/// `tag` is either a bare tag (`date_created`) or a pattern of placeholders
/// such as `{width}x{height}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataInsert {
    pub tag: String,
    #[serde(default)]
    pub position: Position,
}

impl MetadataInsert {
    pub fn new(tag: impl Into<String>, position: Position) -> Self {
        Self {
            tag: tag.into(),
            position,
        }
    }

    /// Resolve the tag for `path`; `None` when any referenced tag is missing
    pub fn resolve(&self, path: &Path, lookup: &dyn MetadataLookup) -> Option<String> {
        if !self.tag.contains('{') {
            return lookup.lookup(&self.tag, path).filter(|v| !v.is_empty());
        }

        let mut value = self.tag.clone();
        for tag in placeholders(&self.tag) {
            let found = lookup.lookup(tag, path).filter(|v| !v.is_empty())?;
            value = value.replace(&format!("{{{tag}}}"), &found);
        }
        Some(value)
    }

    /// Apply to `name`; a miss leaves the name unchanged
    pub fn apply(&self, name: &str, path: &Path, lookup: &dyn MetadataLookup) -> String {
        match self.resolve(path, lookup) {
            Some(value) => self.position.join(name, &value),
            None => {
                log::debug!("metadata '{}' unavailable for {}", self.tag, path.display());
                name.to_string()
            }
        }
    }
}

impl fmt::Display for MetadataInsert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Insert metadata '{}' at {}", self.tag, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::StaticMetadata;

    #[test]
    fn test_bare_tag() {
        let lookup = StaticMetadata::new().with("/p/a.jpg", "date_created", "2024-01-02");
        let method = MetadataInsert::new("date_created", Position::Start);
        assert_eq!(
            method.apply("a", Path::new("/p/a.jpg"), &lookup),
            "2024-01-02a"
        );
    }

    #[test]
    fn test_pattern_of_tags() {
        let lookup = StaticMetadata::new()
            .with("/p/a.jpg", "width", "640")
            .with("/p/a.jpg", "height", "480");
        let method = MetadataInsert::new("_{width}x{height}", Position::End);
        assert_eq!(method.apply("a", Path::new("/p/a.jpg"), &lookup), "a_640x480");
    }

    #[test]
    fn test_partial_miss_leaves_name() {
        let lookup = StaticMetadata::new().with("/p/a.jpg", "width", "640");
        let method = MetadataInsert::new("{width}x{height}", Position::End);
        assert_eq!(method.apply("a", Path::new("/p/a.jpg"), &lookup), "a");
    }
}
