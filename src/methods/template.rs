//! `NewName` template engine
//!
//! A template replaces the whole name. Supported placeholders:
//!
//! - `{name}`: the name before this method ran
//! - `{ext}`: the extension without its leading dot
//! - `{n}`, `{n:start}`, `{n:start:zeros}`: the counter, optionally rebased
//!   and zero-padded
//! - any recognized metadata tag, e.g. `{date_created}` or `{width}`
//! - `{if:COND:THEN:ELSE}` where `COND` is `a==b`, `a!=b`, `a in b`, or a
//!   single operand that is true when it is not blank
//!
//! Substitution runs in a fixed order: `{ext}`, counters, metadata,
//! conditionals (right to left), `{name}` last. Conditional blocks may nest;
//! only colons outside inner braces separate the three parts.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::zero_pad;
use crate::metadata::MetadataLookup;

const fn default_start() -> i64 {
    1
}

/// Full-name template with its own counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewName {
    pub template: String,
    /// Counter value for the first entry
    #[serde(default = "default_start")]
    pub start_number: i64,
    /// Padding width for `{n}` without an inline width; 0 disables padding
    #[serde(default)]
    pub zero_pad: usize,
}

impl NewName {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            start_number: 1,
            zero_pad: 0,
        }
    }

    #[must_use]
    pub const fn with_counter(mut self, start_number: i64, zero_pad: usize) -> Self {
        self.start_number = start_number;
        self.zero_pad = zero_pad;
        self
    }

    /// Render the template for one entry
    ///
    /// `file_number` is the current counter value; the caller advances it
    /// after every entry, including when the template is empty.
    pub fn render(
        &self,
        name: &str,
        extension: &str,
        path: &Path,
        lookup: &dyn MetadataLookup,
        file_number: i64,
    ) -> String {
        if self.template.is_empty() {
            return name.to_string();
        }

        let render = Render {
            method: self,
            name,
            ext: extension.trim_start_matches('.'),
            values: lookup_tags(&self.template, path, lookup),
            file_number,
        };

        let text = self.template.replace("{ext}", render.ext);
        let text = render.expand_counters(&text);
        let text = render.substitute_metadata(&text);
        let text = render.evaluate_conditionals(&text);
        text.replace("{name}", name)
    }
}

impl fmt::Display for NewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "New name: {}", self.template)
    }
}

/// Bare names of every `{identifier}` placeholder in `text`, first occurrence order
pub(crate) fn placeholders(text: &str) -> Vec<&str> {
    let mut found: Vec<&str> = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        if len > 0 && after[len..].starts_with('}') {
            let tag = &after[..len];
            if !found.contains(&tag) {
                found.push(tag);
            }
        }
        rest = after;
    }
    found
}

/// Look up every recognized metadata tag the template references, once each
///
/// Values keep the order of first appearance in the template.
fn lookup_tags(template: &str, path: &Path, lookup: &dyn MetadataLookup) -> Vec<(String, String)> {
    placeholders(template)
        .into_iter()
        .filter(|tag| lookup.recognizes(tag))
        .map(|tag| {
            let value = lookup.lookup(tag, path).unwrap_or_default();
            (tag.to_string(), value)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CounterSpec {
    start: Option<i64>,
    zeros: Option<usize>,
}

/// Parse a counter placeholder at the start of `s` (which begins with `{n`)
///
/// Returns the spec and the byte length of the placeholder.
fn parse_counter(s: &str) -> Option<(CounterSpec, usize)> {
    let close = s.find('}')?;
    let body = s.get(2..close)?;
    let mut spec = CounterSpec {
        start: None,
        zeros: None,
    };

    if !body.is_empty() {
        let mut args = body.strip_prefix(':')?.split(':');
        spec.start = Some(parse_digits(args.next()?)?);
        if let Some(zeros) = args.next() {
            spec.zeros = Some(usize::try_from(parse_digits(zeros)?).ok()?);
        }
        if args.next().is_some() {
            return None;
        }
    }

    Some((spec, close + 1))
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Top-level `{if:...}` blocks in `text` as `(start, end)` byte ranges
fn find_conditionals(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut blocks = Vec::new();
    let mut i = 0;

    while let Some(offset) = text[i..].find("{if:") {
        let start = i + offset;
        let mut depth = 0usize;
        let mut end = None;
        for (j, &b) in bytes.iter().enumerate().skip(start) {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(j + 1);
                        break;
                    }
                }
                _ => {}
            }
        }
        match end {
            Some(end) => {
                blocks.push((start, end));
                i = end;
            }
            // Unbalanced: leave the rest as literal text
            None => break,
        }
    }

    blocks
}

/// Split a conditional body into condition, then-branch and else-branch
fn split_branches(body: &str) -> Option<(&str, &str, &str)> {
    let mut depth = 0usize;
    let mut colons = Vec::with_capacity(2);
    for (i, b) in body.bytes().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => {
                colons.push(i);
                if colons.len() == 2 {
                    break;
                }
            }
            _ => {}
        }
    }
    match colons[..] {
        [first, second] => Some((&body[..first], &body[first + 1..second], &body[second + 1..])),
        _ => None,
    }
}

struct Render<'a> {
    method: &'a NewName,
    name: &'a str,
    ext: &'a str,
    values: Vec<(String, String)>,
    file_number: i64,
}

impl Render<'_> {
    fn counter_value(&self, spec: CounterSpec) -> String {
        let current = match spec.start {
            Some(start) => start.saturating_add(self.file_number.saturating_sub(self.method.start_number)),
            None => self.file_number,
        };
        zero_pad(current, spec.zeros.unwrap_or(self.method.zero_pad))
    }

    fn expand_counters(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find("{n") {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            match parse_counter(tail) {
                Some((spec, len)) => {
                    out.push_str(&self.counter_value(spec));
                    rest = &tail[len..];
                }
                None => {
                    out.push_str("{n");
                    rest = &tail[2..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Replace metadata placeholders in one left-to-right pass
    ///
    /// Inserted values are not scanned again, so a value that looks like a
    /// placeholder stays literal.
    fn substitute_metadata(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let hit = after.find('}').and_then(|close| {
                let tag = &after[..close];
                self.values
                    .iter()
                    .find(|(known, _)| known == tag)
                    .map(|(_, value)| (value, close))
            });
            match hit {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Variable substitution used for operands and branches
    fn substitute(&self, text: &str) -> String {
        let text = text.replace("{ext}", self.ext).replace("{name}", self.name);
        let text = self.substitute_metadata(&text);
        self.expand_counters(&text)
    }

    fn operand(&self, raw: &str) -> String {
        let stripped = raw.trim().trim_matches(|c: char| c == '"' || c == '\'');
        self.substitute(stripped)
    }

    fn condition_holds(&self, condition: &str) -> bool {
        if let Some((left, right)) = condition.split_once("==") {
            return self.operand(left) == self.operand(right);
        }
        if let Some((left, right)) = condition.split_once("!=") {
            return self.operand(left) != self.operand(right);
        }
        if let Some((left, right)) = condition.split_once(" in ") {
            return self.operand(right).contains(&self.operand(left));
        }
        !self.substitute(condition).trim().is_empty()
    }

    fn evaluate_conditionals(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (start, end) in find_conditionals(text).into_iter().rev() {
            let body = &text[start + "{if:".len()..end - 1];
            let Some((condition, then_part, else_part)) = split_branches(body) else {
                continue;
            };
            let branch = if self.condition_holds(condition) {
                then_part
            } else {
                else_part
            };
            let replacement = self.evaluate_conditionals(&self.substitute(branch));
            out.replace_range(start..end, &replacement);
        }
        out
    }
}
