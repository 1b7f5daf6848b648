//! Name transforms applied by the method pipeline
//!
//! Every rename method is a variant of [`NameTransform`]. A transform maps
//! `(name, extension, source path)` to a new `(name, extension)`; none of them
//! touch the filesystem except through the metadata lookup.
//!
//! - `add_remove`: insert or strip literal text or character ranges
//! - `replace`: literal find/replace and regular-expression substitution
//! - `case`: upper/lower/capitalize/title plus the `heck` conversions
//! - `numbering`: counter-based suffixes and prefixes
//! - `metadata`: metadata values inserted at the start or end
//! - `template`: the `NewName` template engine
//! - `parse`: the compact `kind:arg:...` syntax used on the command line
//!
//! Stateful transforms (`Numbering`, `NewName`) keep no counter themselves;
//! the pipeline owns the counters and resets them before every run.

mod add_remove;
mod case;
mod error;
mod metadata;
mod numbering;
mod parse;
mod replace;
pub mod template;

pub use add_remove::{AddRemove, Operation, RemoveType};
pub use case::{Case, CaseScope, CaseType};
pub use error::MethodError;
pub use metadata::MetadataInsert;
pub use numbering::{Numbering, zero_pad};
pub use replace::{RegexReplace, Replace};
pub use template::NewName;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where inserted text goes relative to the current name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[serde(alias = "before")]
    Start,
    #[default]
    #[serde(alias = "after")]
    End,
}

impl Position {
    /// Join `insert` onto `name` at this position
    #[must_use]
    pub fn join(self, name: &str, insert: &str) -> String {
        match self {
            Self::Start => format!("{insert}{name}"),
            Self::End => format!("{name}{insert}"),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// One step of a rename pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NameTransform {
    AddRemove(AddRemove),
    Replace(Replace),
    Case(Case),
    Numbering(Numbering),
    Metadata(MetadataInsert),
    Regex(RegexReplace),
    NewName(NewName),
}

impl NameTransform {
    /// Case-sensitive substring replacement
    pub fn replace(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self::Replace(Replace::new(find, replace))
    }

    pub fn regex(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::Regex(RegexReplace::new(pattern, replacement))
    }

    /// Template with the default counter (start 1, no padding)
    pub fn new_name(template: impl Into<String>) -> Self {
        Self::NewName(NewName::new(template))
    }

    #[must_use]
    pub const fn case(case_type: CaseType, apply_to: CaseScope) -> Self {
        Self::Case(Case { case_type, apply_to })
    }

    /// Whether the transform carries a counter that must be reset between batches
    #[must_use]
    pub const fn is_stateful(&self) -> bool {
        matches!(self, Self::Numbering(_) | Self::NewName(_))
    }
}

impl fmt::Display for NameTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddRemove(m) => write!(f, "{m}"),
            Self::Replace(m) => write!(f, "{m}"),
            Self::Case(m) => write!(f, "{m}"),
            Self::Numbering(m) => write!(f, "{m}"),
            Self::Metadata(m) => write!(f, "{m}"),
            Self::Regex(m) => write!(f, "{m}"),
            Self::NewName(m) => write!(f, "{m}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_join() {
        assert_eq!(Position::Start.join("name", "x_"), "x_name");
        assert_eq!(Position::End.join("name", "_x"), "name_x");
    }

    #[test]
    fn test_stateful_variants() {
        assert!(NameTransform::new_name("{n}").is_stateful());
        assert!(NameTransform::Numbering(Numbering::default()).is_stateful());
        assert!(!NameTransform::replace("a", "b").is_stateful());
    }

    #[test]
    fn test_json_uses_kind_tag() {
        let method = NameTransform::replace("a", "x");
        let json = serde_json::to_string(&method).unwrap();
        assert!(json.contains(r#""kind":"replace""#));
        let back: NameTransform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, method);
    }

    #[test]
    fn test_position_accepts_before_after_aliases() {
        let json = r#"{"kind":"metadata","tag":"date","position":"before"}"#;
        let method: NameTransform = serde_json::from_str(json).unwrap();
        match method {
            NameTransform::Metadata(m) => assert_eq!(m.position, Position::Start),
            other => panic!("unexpected method {other:?}"),
        }
    }

    #[test]
    fn test_display_describes_method() {
        assert_eq!(NameTransform::replace("a", "x").to_string(), "Replace 'a' with 'x'");
        assert_eq!(
            NameTransform::new_name("photo_{n}").to_string(),
            "New name: photo_{n}"
        );
    }
}
