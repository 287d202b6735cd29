//! Just enough YAML to write TAP diagnostic blocks.

use std::{borrow::Cow, fmt::Write};

/// A block-style YAML mapping, written with two spaces per nesting level.
#[derive(Debug, Default)]
pub(crate) struct Mapping<'a> {
    entries: Vec<(&'a str, Value<'a>)>,
}

#[derive(Debug)]
pub(crate) enum Value<'a> {
    Scalar(&'a str),
    Mapping(Mapping<'a>),
}

impl<'a> Mapping<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn scalar(mut self, key: &'a str, value: &'a str) -> Self {
        self.entries.push((key, Value::Scalar(value)));
        self
    }

    pub(crate) fn mapping(mut self, key: &'a str, value: Mapping<'a>) -> Self {
        self.entries.push((key, Value::Mapping(value)));
        self
    }

    pub(crate) fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        for (key, value) in &self.entries {
            let indent = "  ".repeat(depth);
            match value {
                Value::Scalar(scalar) => {
                    let _ = writeln!(out, "{indent}{}: {}", quote(key), quote(scalar));
                }
                Value::Mapping(mapping) if mapping.entries.is_empty() => {
                    let _ = writeln!(out, "{indent}{}: {{  }}", quote(key));
                }
                Value::Mapping(mapping) => {
                    let _ = writeln!(out, "{indent}{}:", quote(key));
                    mapping.dump_into(out, depth + 1);
                }
            }
        }
    }
}

/// Quote a scalar the way common YAML dumpers do.
///
/// Plain if nothing in it could be misread, single-quoted if it has whitespace, indicators or
/// would read as another type, double-quoted with escapes if it has control characters.
pub(crate) fn quote(scalar: &str) -> Cow<'_, str> {
    if scalar.chars().any(needs_escape) {
        return Cow::Owned(double_quoted(scalar));
    }

    if needs_single_quotes(scalar) {
        return Cow::Owned(format!("'{}'", scalar.replace('\'', "''")));
    }

    Cow::Borrowed(scalar)
}

fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{a0}' | '\u{2028}' | '\u{2029}')
}

fn needs_single_quotes(scalar: &str) -> bool {
    const INDICATORS: &[char] = &['\'', '"', ':', '{', '}', '[', ']', ',', '&', '*', '#', '?'];
    const LEADING: &[char] = &['-', '?', '|', '<', '>', '=', '!', '%', '@', '`'];

    if scalar.is_empty() {
        return true;
    }
    if scalar.contains(|c: char| c.is_whitespace() || INDICATORS.contains(&c)) {
        return true;
    }
    if scalar.starts_with(LEADING) {
        return true;
    }

    matches!(
        scalar.to_ascii_lowercase().as_str(),
        "~" | "null" | "true" | "false" | "yes" | "no" | "on" | "off" | ".inf" | ".nan"
    ) || scalar.parse::<f64>().is_ok()
}

fn double_quoted(scalar: &str) -> String {
    let mut out = String::with_capacity(scalar.len() + 2);
    out.push('"');
    for c in scalar.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\u{1b}' => out.push_str("\\e"),
            '\u{85}' => out.push_str("\\N"),
            '\u{a0}' => out.push_str("\\_"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
