use std::fmt;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use super::MethodError;

const fn default_true() -> bool {
    true
}

/// Literal find/replace over the name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replace {
    pub find: String,
    #[serde(default)]
    pub replace: String,
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
    /// Replace only when the whole name matches `find`
    #[serde(default)]
    pub full_match: bool,
}

impl Replace {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
            case_sensitive: true,
            full_match: false,
        }
    }

    #[must_use]
    pub const fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    #[must_use]
    pub const fn full_match(mut self) -> Self {
        self.full_match = true;
        self
    }

    /// Matcher for case-insensitive partial replacement, if this method needs one
    ///
    /// # Errors
    ///
    /// Returns `MethodError::InvalidPattern` if the escaped pattern cannot be
    /// compiled (for example when it exceeds the regex size limit).
    pub fn compile(&self) -> Result<Option<Regex>, MethodError> {
        if self.find.is_empty() || self.case_sensitive || self.full_match {
            return Ok(None);
        }
        let pattern = format!("(?i){}", regex::escape(&self.find));
        Regex::new(&pattern)
            .map(Some)
            .map_err(|source| MethodError::InvalidPattern { pattern, source })
    }

    /// Apply using the matcher returned by [`Replace::compile`]
    #[must_use]
    pub fn apply(&self, name: &str, matcher: Option<&Regex>) -> String {
        if self.find.is_empty() {
            return name.to_string();
        }

        if self.full_match {
            let matches = if self.case_sensitive {
                name == self.find
            } else {
                name.to_lowercase() == self.find.to_lowercase()
            };
            return if matches { self.replace.clone() } else { name.to_string() };
        }

        match matcher {
            Some(re) if !self.case_sensitive => {
                re.replace_all(name, NoExpand(&self.replace)).into_owned()
            }
            _ => name.replace(&self.find, &self.replace),
        }
    }
}

impl fmt::Display for Replace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Replace '{}' with '{}'", self.find, self.replace)?;
        if !self.case_sensitive {
            f.write_str(" (ignore case)")?;
        }
        if self.full_match {
            f.write_str(" (whole name)")?;
        }
        Ok(())
    }
}

/// Regular-expression substitution over the name
///
/// The replacement may reference capture groups as `$1` or `${name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexReplace {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
}

impl RegexReplace {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `MethodError::InvalidPattern` if the pattern does not compile.
    pub fn compile(&self) -> Result<Regex, MethodError> {
        Regex::new(&self.pattern).map_err(|source| MethodError::InvalidPattern {
            pattern: self.pattern.clone(),
            source,
        })
    }

    #[must_use]
    pub fn apply(&self, name: &str, re: &Regex) -> String {
        re.replace_all(name, self.replacement.as_str()).into_owned()
    }
}

impl fmt::Display for RegexReplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Regex '{}' -> '{}'", self.pattern, self.replacement)
    }
}
