use std::fmt;

use serde::{Deserialize, Serialize};

use super::Position;

/// Left-pad `value` with zeros to `width` digits
///
/// A negative value keeps its sign in front of the padding.
#[must_use]
pub fn zero_pad(value: i64, width: usize) -> String {
    format!("{value:0width$}")
}

/// Counter inserted at the start or end of the name
///
/// The counter value for the k-th processed entry (k from 0) is
/// `start + k * step`; the pipeline owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Numbering {
    pub start: i64,
    pub step: i64,
    pub digits: usize,
    /// Text around the number; `{n}` marks where it goes
    pub format_template: String,
    pub position: Position,
}

impl Default for Numbering {
    fn default() -> Self {
        Self {
            start: 1,
            step: 1,
            digits: 3,
            format_template: "({n})".to_string(),
            position: Position::End,
        }
    }
}

impl Numbering {
    /// Insert the formatted `current` counter into `name`
    #[must_use]
    pub fn apply(&self, name: &str, current: i64) -> String {
        let number = zero_pad(current, self.digits);
        let formatted = self.format_template.replace("{n}", &number);
        self.position.join(name, &formatted)
    }
}

impl fmt::Display for Numbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number '{}' from {} step {} at {}",
            self.format_template, self.start, self.step, self.position
        )
    }
}
