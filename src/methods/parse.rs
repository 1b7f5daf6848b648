//! Compact textual method syntax
//!
//! Methods are written as `kind:arg:arg...`:
//!
//! ```text
//! replace:FIND:REPLACEMENT       replace-i:FIND:REPLACEMENT
//! regex:PATTERN:REPLACEMENT      case:TYPE[:name|ext|all]
//! number[:START[:STEP[:DIGITS[:FORMAT[:start|end]]]]]
//! add:TEXT[:start|end]           remove:TEXT
//! remove-chars:COUNT[:start|end] remove-range:START[:END]
//! meta:TAG[:start|end]           template:TEMPLATE
//! ```
//!
//! `template:` takes the rest of the string verbatim, so templates may contain
//! colons. `regex:` splits at the last colon.

use std::str::FromStr;

use super::{
    AddRemove, Case, CaseScope, CaseType, MetadataInsert, MethodError, NameTransform, NewName,
    Numbering, Position, Replace,
};

type Result<T> = std::result::Result<T, MethodError>;

impl TryFrom<&str> for Position {
    type Error = MethodError;

    fn try_from(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "start" | "before" => Ok(Self::Start),
            "end" | "after" => Ok(Self::End),
            _ => Err(MethodError::InvalidValue {
                field: "position",
                value: s.to_string(),
            }),
        }
    }
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| MethodError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn required<'a>(kind: &str, value: Option<&'a str>) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MethodError::InvalidFormat(format!("'{kind}' needs an argument")))
}

/// Split `TEXT[:POSITION]`, treating the last segment as a position only if it parses as one
fn text_and_position(args: &str, default: Position) -> (&str, Position) {
    match args.rsplit_once(':') {
        Some((text, pos)) => match Position::try_from(pos) {
            Ok(position) => (text, position),
            Err(_) => (args, default),
        },
        None => (args, default),
    }
}

impl TryFrom<&str> for NameTransform {
    type Error = MethodError;

    fn try_from(s: &str) -> Result<Self> {
        let (kind, args) = match s.split_once(':') {
            Some((kind, args)) => (kind, Some(args)),
            None => (s, None),
        };

        let normalized = kind.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "replace" | "replace-i" => {
                let args = required(kind, args)?;
                let (find, replace) = args.split_once(':').unwrap_or((args, ""));
                let method = Replace::new(find, replace);
                Ok(Self::Replace(if normalized == "replace-i" {
                    method.case_insensitive()
                } else {
                    method
                }))
            }
            "regex" => {
                let args = required(kind, args)?;
                let (pattern, replacement) = args.rsplit_once(':').unwrap_or((args, ""));
                Ok(Self::regex(pattern, replacement))
            }
            "case" => {
                let args = required(kind, args)?;
                let (case_type, scope) = args.split_once(':').unwrap_or((args, "name"));
                let case_type = CaseType::try_from(case_type).map_err(|value| {
                    MethodError::InvalidValue {
                        field: "case type",
                        value,
                    }
                })?;
                let apply_to = CaseScope::try_from(scope).map_err(|value| {
                    MethodError::InvalidValue {
                        field: "case scope",
                        value,
                    }
                })?;
                Ok(Self::Case(Case { case_type, apply_to }))
            }
            "number" | "numbering" => {
                let mut method = Numbering::default();
                let parts: Vec<&str> = args.map(|a| a.split(':').collect()).unwrap_or_default();
                if let Some(start) = parts.first().filter(|p| !p.is_empty()) {
                    method.start = number("start", start)?;
                }
                if let Some(step) = parts.get(1).filter(|p| !p.is_empty()) {
                    method.step = number("step", step)?;
                }
                if let Some(digits) = parts.get(2).filter(|p| !p.is_empty()) {
                    method.digits = number("digits", digits)?;
                }
                if let Some(format) = parts.get(3).filter(|p| !p.is_empty()) {
                    method.format_template = (*format).to_string();
                }
                if let Some(position) = parts.get(4) {
                    method.position = Position::try_from(*position)?;
                }
                if parts.len() > 5 {
                    return Err(MethodError::InvalidFormat(s.to_string()));
                }
                Ok(Self::Numbering(method))
            }
            "add" => {
                let args = required(kind, args)?;
                let (text, position) = text_and_position(args, Position::Start);
                Ok(Self::AddRemove(AddRemove::add(text, position)))
            }
            "remove" => Ok(Self::AddRemove(AddRemove::remove_text(required(kind, args)?))),
            "remove-chars" => {
                let args = required(kind, args)?;
                let (count, position) = args.split_once(':').unwrap_or((args, "end"));
                Ok(Self::AddRemove(AddRemove::remove_chars(
                    number("count", count)?,
                    Position::try_from(position)?,
                )))
            }
            "remove-range" => {
                let args = required(kind, args)?;
                let (start, end) = match args.split_once(':') {
                    Some((start, end)) => (start, Some(end).filter(|e| !e.is_empty())),
                    None => (args, None),
                };
                let end = end.map(|e| number("end", e)).transpose()?;
                Ok(Self::AddRemove(AddRemove::remove_range(number("start", start)?, end)))
            }
            "meta" | "metadata" => {
                let args = required(kind, args)?;
                let (tag, position) = text_and_position(args, Position::End);
                Ok(Self::Metadata(MetadataInsert::new(tag, position)))
            }
            "template" | "new-name" => Ok(Self::NewName(NewName::new(args.unwrap_or_default()))),
            other => Err(MethodError::UnknownMethod(other.to_string())),
        }
    }
}

impl FromStr for NameTransform {
    type Err = MethodError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s)
    }
}
