//! Ordered method pipeline
//!
//! A [`MethodPipeline`] is built once from a list of [`NameTransform`]s. Building
//! compiles every regular expression, so an invalid pattern is reported up
//! front instead of silently leaving names untouched. Counters for
//! `Numbering` and `NewName` live in the pipeline and are reset at the start
//! of every [`MethodPipeline::apply`], which makes repeated dry runs over the
//! same entries produce identical names.

use std::path::Path;

use regex::Regex;

use crate::entry::FileEntry;
use crate::metadata::MetadataLookup;
use crate::methods::{
    AddRemove, Case, MetadataInsert, MethodError, NameTransform, NewName, Numbering, RegexReplace,
    Replace,
};

/// A method plus whatever it needs at apply time
#[derive(Debug)]
enum Step {
    AddRemove(AddRemove),
    Replace(Replace, Option<Regex>),
    Case(Case),
    Metadata(MetadataInsert),
    Regex(RegexReplace, Regex),
    Numbering { method: Numbering, current: i64 },
    NewName { method: NewName, current: i64 },
}

impl Step {
    fn compile(method: &NameTransform) -> Result<Self, MethodError> {
        Ok(match method {
            NameTransform::AddRemove(m) => Self::AddRemove(m.clone()),
            NameTransform::Replace(m) => Self::Replace(m.clone(), m.compile()?),
            NameTransform::Case(m) => Self::Case(*m),
            NameTransform::Metadata(m) => Self::Metadata(m.clone()),
            NameTransform::Regex(m) => Self::Regex(m.clone(), m.compile()?),
            NameTransform::Numbering(m) => Self::Numbering {
                current: m.start,
                method: m.clone(),
            },
            NameTransform::NewName(m) => Self::NewName {
                current: m.start_number,
                method: m.clone(),
            },
        })
    }

    fn reset(&mut self) {
        match self {
            Self::Numbering { method, current } => *current = method.start,
            Self::NewName { method, current } => *current = method.start_number,
            _ => {}
        }
    }

    /// Map `(name, extension)` for the entry at `path`
    fn apply(
        &mut self,
        name: String,
        extension: String,
        path: &Path,
        lookup: &dyn MetadataLookup,
    ) -> (String, String) {
        match self {
            Self::AddRemove(m) => (m.apply(&name), extension),
            Self::Replace(m, matcher) => (m.apply(&name, matcher.as_ref()), extension),
            Self::Case(m) => m.apply(&name, &extension),
            Self::Metadata(m) => (m.apply(&name, path, lookup), extension),
            Self::Regex(m, re) => (m.apply(&name, re), extension),
            Self::Numbering { method, current } => {
                let value = *current;
                *current = current.saturating_add(method.step);
                (method.apply(&name, value), extension)
            }
            Self::NewName { method, current } => {
                let value = *current;
                *current = current.saturating_add(1);
                let name = method.render(&name, &extension, path, lookup, value);
                (name, extension)
            }
        }
    }
}

/// Ordered list of transforms applied to every entry
#[derive(Debug)]
pub struct MethodPipeline {
    methods: Vec<NameTransform>,
    steps: Vec<Step>,
}

impl MethodPipeline {
    /// Build a pipeline, compiling every regular expression
    ///
    /// # Errors
    ///
    /// Returns `MethodError::InvalidPattern` for the first pattern that does
    /// not compile.
    pub fn new(methods: Vec<NameTransform>) -> Result<Self, MethodError> {
        let steps = methods.iter().map(Step::compile).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { methods, steps })
    }

    #[must_use]
    pub fn methods(&self) -> &[NameTransform] {
        &self.methods
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Put every counter back to its configured start
    pub fn reset(&mut self) {
        for step in &mut self.steps {
            step.reset();
        }
    }

    /// Compute candidate names for every entry, in order
    ///
    /// Each entry starts from its on-disk `(old_name, old_extension)`.
    /// Folders keep an empty extension whatever the methods produce.
    pub fn apply(&mut self, entries: &mut [FileEntry], lookup: &dyn MetadataLookup) {
        self.reset();
        for entry in entries.iter_mut() {
            let (name, extension) =
                self.fold(entry.old_name.clone(), entry.old_extension.clone(), &entry.path, lookup);
            entry.new_name = name;
            entry.extension = if entry.is_folder() { String::new() } else { extension };
        }
        log::debug!(
            "applied {} method(s) to {} entr(y/ies)",
            self.steps.len(),
            entries.len()
        );
    }

    /// Run the pipeline over a single name without touching any entry
    ///
    /// Counters continue from their current values; call
    /// [`MethodPipeline::reset`] first for a fresh sequence.
    pub fn preview(
        &mut self,
        name: &str,
        extension: &str,
        path: &Path,
        lookup: &dyn MetadataLookup,
    ) -> (String, String) {
        self.fold(name.to_string(), extension.to_string(), path, lookup)
    }

    fn fold(
        &mut self,
        name: String,
        extension: String,
        path: &Path,
        lookup: &dyn MetadataLookup,
    ) -> (String, String) {
        self.steps
            .iter_mut()
            .fold((name, extension), |(name, extension), step| {
                step.apply(name, extension, path, lookup)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{NoMetadata, StaticMetadata};
    use crate::methods::{CaseScope, CaseType, Position, zero_pad};

    fn entries(names: &[&str]) -> Vec<FileEntry> {
        names
            .iter()
            .map(|n| FileEntry::from_path(format!("/data/{n}")))
            .collect()
    }

    #[test]
    fn test_methods_apply_in_order() {
        let mut pipeline = MethodPipeline::new(vec![
            NameTransform::replace("a", "x"),
            NameTransform::case(CaseType::Upper, CaseScope::All),
            NameTransform::AddRemove(AddRemove::add("_v2", Position::End)),
        ])
        .unwrap();
        let mut files = entries(&["a.txt", "b.txt"]);
        pipeline.apply(&mut files, &NoMetadata);

        assert_eq!(files[0].new_full_name(), "X_v2.TXT");
        assert_eq!(files[1].new_full_name(), "B_v2.TXT");
    }

    #[test]
    fn test_numbering_sequence() {
        let mut pipeline = MethodPipeline::new(vec![NameTransform::Numbering(Numbering {
            start: 1,
            step: 1,
            digits: 3,
            format_template: "_{n}".into(),
            position: Position::End,
        })])
        .unwrap();
        let mut files = entries(&["a.jpg", "b.jpg", "c.jpg"]);
        pipeline.apply(&mut files, &NoMetadata);

        for (i, file) in files.iter().enumerate() {
            let n = 1 + i64::try_from(i).unwrap();
            assert_eq!(file.new_name, format!("{}_{}", &file.old_name, zero_pad(n, 3)));
        }
    }

    #[test]
    fn test_new_name_counter_with_step() {
        let mut pipeline =
            MethodPipeline::new(vec![NameTransform::NewName(NewName::new("photo_{n:1:3}"))])
                .unwrap();
        let mut files = entries(&["x.jpg", "y.jpg"]);
        pipeline.apply(&mut files, &NoMetadata);
        assert_eq!(files[0].new_name, "photo_001");
        assert_eq!(files[1].new_name, "photo_002");
    }

    #[test]
    fn test_repeated_apply_is_idempotent() {
        let mut pipeline = MethodPipeline::new(vec![
            NameTransform::new_name("{name}_{n}"),
            NameTransform::AddRemove(AddRemove::add("p_", Position::Start)),
        ])
        .unwrap();
        let mut files = entries(&["a.txt", "b.txt"]);
        pipeline.apply(&mut files, &NoMetadata);
        let first = files.clone();
        pipeline.apply(&mut files, &NoMetadata);
        assert_eq!(files, first);
        assert_eq!(files[1].new_name, "p_b_2");
    }

    #[test]
    fn test_metadata_uses_original_path() {
        let lookup = StaticMetadata::new().with("/data/a.jpg", "date", "2024-05-01");
        let mut pipeline = MethodPipeline::new(vec![
            NameTransform::replace("a", "renamed"),
            NameTransform::Metadata(MetadataInsert::new("date", Position::Start)),
        ])
        .unwrap();
        let mut files = entries(&["a.jpg"]);
        pipeline.apply(&mut files, &lookup);
        assert_eq!(files[0].new_name, "2024-05-01renamed");
    }

    #[test]
    fn test_folder_extension_stays_empty() {
        let mut pipeline = MethodPipeline::new(vec![NameTransform::case(
            CaseType::Upper,
            CaseScope::All,
        )])
        .unwrap();
        let mut files = vec![FileEntry::folder("/data/album.2024")];
        pipeline.apply(&mut files, &NoMetadata);
        assert_eq!(files[0].new_name, "ALBUM.2024");
        assert_eq!(files[0].extension, "");
    }

    #[test]
    fn test_invalid_regex_rejected_at_build() {
        let err = MethodPipeline::new(vec![NameTransform::regex("[", "")]).unwrap_err();
        assert!(matches!(err, MethodError::InvalidPattern { .. }));
    }

    #[test]
    fn test_preview_continues_counter_until_reset() {
        let mut pipeline = MethodPipeline::new(vec![NameTransform::new_name("f{n}")]).unwrap();
        let path = Path::new("/data/a.txt");
        assert_eq!(pipeline.preview("a", ".txt", path, &NoMetadata).0, "f1");
        assert_eq!(pipeline.preview("a", ".txt", path, &NoMetadata).0, "f2");
        pipeline.reset();
        assert_eq!(pipeline.preview("a", ".txt", path, &NoMetadata).0, "f1");
    }
}
