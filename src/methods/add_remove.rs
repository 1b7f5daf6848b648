use std::fmt;

use serde::{Deserialize, Serialize};

use super::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Remove,
}

/// How `remove` picks what to strip when no literal text is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoveType {
    /// Drop `remove_start` characters from the start or end
    Chars,
    /// Drop characters in `[remove_start, remove_end)`
    Range,
}

/// Insert or strip text
///
/// Character counts and offsets are in Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddRemove {
    pub operation: Operation,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_type: Option<RemoveType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_end: Option<usize>,
}

impl AddRemove {
    pub fn add(text: impl Into<String>, position: Position) -> Self {
        Self {
            operation: Operation::Add,
            text: text.into(),
            position,
            remove_type: None,
            remove_start: None,
            remove_end: None,
        }
    }

    /// Remove every occurrence of `text`
    pub fn remove_text(text: impl Into<String>) -> Self {
        Self {
            operation: Operation::Remove,
            text: text.into(),
            position: Position::default(),
            remove_type: None,
            remove_start: None,
            remove_end: None,
        }
    }

    #[must_use]
    pub fn remove_chars(count: usize, position: Position) -> Self {
        Self {
            operation: Operation::Remove,
            text: String::new(),
            position,
            remove_type: Some(RemoveType::Chars),
            remove_start: Some(count),
            remove_end: None,
        }
    }

    /// Remove `[start, end)`; `None` for `end` means to the end of the name
    #[must_use]
    pub fn remove_range(start: usize, end: Option<usize>) -> Self {
        Self {
            operation: Operation::Remove,
            text: String::new(),
            position: Position::default(),
            remove_type: Some(RemoveType::Range),
            remove_start: Some(start),
            remove_end: end,
        }
    }

    #[must_use]
    pub fn apply(&self, name: &str) -> String {
        match self.operation {
            Operation::Add => {
                if self.text.is_empty() {
                    name.to_string()
                } else {
                    self.position.join(name, &self.text)
                }
            }
            Operation::Remove => self.remove(name),
        }
    }

    fn remove(&self, name: &str) -> String {
        let chars: Vec<char> = name.chars().collect();
        let len = chars.len();

        match self.remove_type {
            Some(RemoveType::Chars) => {
                let count = self.remove_start.unwrap_or(0);
                if count == 0 {
                    return name.to_string();
                }
                if count >= len {
                    return String::new();
                }
                match self.position {
                    Position::Start => chars[count..].iter().collect(),
                    Position::End => chars[..len - count].iter().collect(),
                }
            }
            Some(RemoveType::Range) => {
                let start = self.remove_start.unwrap_or(0);
                let end = self.remove_end.unwrap_or(len).min(len);
                if start < len && start < end {
                    chars[..start].iter().chain(&chars[end..]).collect()
                } else {
                    name.to_string()
                }
            }
            None if !self.text.is_empty() => name.replace(&self.text, ""),
            None => name.to_string(),
        }
    }
}

impl fmt::Display for AddRemove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.operation, self.remove_type) {
            (Operation::Add, _) => write!(f, "Add '{}' at {}", self.text, self.position),
            (Operation::Remove, Some(RemoveType::Chars)) => write!(
                f,
                "Remove {} chars from {}",
                self.remove_start.unwrap_or(0),
                self.position
            ),
            (Operation::Remove, Some(RemoveType::Range)) => match self.remove_end {
                Some(end) => write!(f, "Remove chars {}..{end}", self.remove_start.unwrap_or(0)),
                None => write!(f, "Remove chars {}..", self.remove_start.unwrap_or(0)),
            },
            (Operation::Remove, None) => write!(f, "Remove '{}'", self.text),
        }
    }
}
