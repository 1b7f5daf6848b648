use std::fmt;

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    Upper,
    Lower,
    /// First character upper, the rest lower
    Capitalize,
    /// Every word starts upper, the rest lower
    Title,
    Snake,
    Kebab,
    Camel,
    Pascal,
}

impl CaseType {
    /// Convert `text`
    #[must_use]
    pub fn convert(self, text: &str) -> String {
        match self {
            Self::Upper => text.to_uppercase(),
            Self::Lower => text.to_lowercase(),
            Self::Capitalize => capitalize(text),
            Self::Title => title(text),
            Self::Snake => text.to_snake_case(),
            Self::Kebab => text.to_kebab_case(),
            Self::Camel => text.to_lower_camel_case(),
            Self::Pascal => text.to_pascal_case(),
        }
    }

    /// Convert an extension, keeping its leading dot
    fn convert_extension(self, extension: &str) -> String {
        match self {
            Self::Snake | Self::Kebab | Self::Camel | Self::Pascal => {
                match extension.strip_prefix('.') {
                    Some(bare) => format!(".{}", self.convert(bare)),
                    None => self.convert(extension),
                }
            }
            // The dot counts as the first character, as in the name rules
            _ => self.convert(extension),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Capitalize => "capitalize",
            Self::Title => "title",
            Self::Snake => "snake",
            Self::Kebab => "kebab",
            Self::Camel => "camel",
            Self::Pascal => "pascal",
        }
    }
}

impl TryFrom<&str> for CaseType {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "upper" | "uppercase" => Ok(Self::Upper),
            "lower" | "lowercase" => Ok(Self::Lower),
            "capitalize" => Ok(Self::Capitalize),
            "title" => Ok(Self::Title),
            "snake" => Ok(Self::Snake),
            "kebab" => Ok(Self::Kebab),
            "camel" => Ok(Self::Camel),
            "pascal" => Ok(Self::Pascal),
            other => Err(other.to_string()),
        }
    }
}

/// Which part of the file name a case change applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseScope {
    #[default]
    Name,
    Ext,
    All,
}

impl TryFrom<&str> for CaseScope {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "ext" | "extension" => Ok(Self::Ext),
            "all" | "both" => Ok(Self::All),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub case_type: CaseType,
    #[serde(default)]
    pub apply_to: CaseScope,
}

impl Case {
    #[must_use]
    pub fn apply(&self, name: &str, extension: &str) -> (String, String) {
        let new_name = match self.apply_to {
            CaseScope::Name | CaseScope::All => self.case_type.convert(name),
            CaseScope::Ext => name.to_string(),
        };
        let new_ext = match self.apply_to {
            CaseScope::Ext | CaseScope::All if !extension.is_empty() => {
                self.case_type.convert_extension(extension)
            }
            _ => extension.to_string(),
        };
        (new_name, new_ext)
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = match self.apply_to {
            CaseScope::Name => "name",
            CaseScope::Ext => "extension",
            CaseScope::All => "name and extension",
        };
        write!(f, "Case {} ({scope})", self.case_type.as_str())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(case_type: CaseType, apply_to: CaseScope, name: &str, ext: &str) -> (String, String) {
        Case { case_type, apply_to }.apply(name, ext)
    }

    #[test]
    fn test_upper_lower_scopes() {
        assert_eq!(
            apply(CaseType::Upper, CaseScope::Name, "photo", ".jpg"),
            ("PHOTO".into(), ".jpg".into())
        );
        assert_eq!(
            apply(CaseType::Upper, CaseScope::Ext, "photo", ".jpg"),
            ("photo".into(), ".JPG".into())
        );
        assert_eq!(
            apply(CaseType::Lower, CaseScope::All, "PHOTO", ".JPG"),
            ("photo".into(), ".jpg".into())
        );
    }

    #[test]
    fn test_capitalize_and_title() {
        assert_eq!(capitalize("hELLO wORLD"), "Hello world");
        assert_eq!(title("hELLO wORLD-abc 2nd"), "Hello World-Abc 2Nd");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_extension_keeps_dot_rules() {
        assert_eq!(
            apply(CaseType::Title, CaseScope::Ext, "a", ".jpg").1,
            ".Jpg"
        );
        assert_eq!(
            apply(CaseType::Capitalize, CaseScope::Ext, "a", ".JPG").1,
            ".jpg"
        );
        assert_eq!(
            apply(CaseType::Pascal, CaseScope::Ext, "a", ".tar_gz").1,
            ".TarGz"
        );
    }

    #[test]
    fn test_heck_conversions() {
        assert_eq!(CaseType::Snake.convert("My Holiday Photo"), "my_holiday_photo");
        assert_eq!(CaseType::Kebab.convert("MyHolidayPhoto"), "my-holiday-photo");
        assert_eq!(CaseType::Camel.convert("my holiday photo"), "myHolidayPhoto");
        assert_eq!(CaseType::Pascal.convert("my_holiday_photo"), "MyHolidayPhoto");
    }

    #[test]
    fn test_empty_extension_untouched() {
        assert_eq!(
            apply(CaseType::Upper, CaseScope::All, "readme", ""),
            ("README".into(), String::new())
        );
    }

    #[test]
    fn test_parse_case_type() {
        assert_eq!(CaseType::try_from("UPPER"), Ok(CaseType::Upper));
        assert_eq!(CaseScope::try_from("both"), Ok(CaseScope::All));
        assert!(CaseType::try_from("sponge").is_err());
    }
}
