//! Parser for Java-style `.properties` files
//!
//! Follows the `java.util.Properties` line format: `#`/`!` comments, keys
//! ending at the first unescaped `=`, `:` or whitespace, bare keys with an
//! empty value, backslash line continuations and the usual escapes. The only
//! rejected input is an invalid `\uXXXX` escape.

use std::collections::HashMap;

use thiserror::Error;

/// A parse failure on a specific line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    /// 1-based line number where the offending logical line starts
    pub line: usize,
    pub message: String,
}

impl PropertiesError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Parsed key/value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Parse properties text
    ///
    /// Later duplicates override earlier ones.
    pub fn parse(content: &str) -> Result<Self, PropertiesError> {
        let mut entries = HashMap::new();

        for (line_no, logical) in logical_lines(content) {
            let (raw_key, raw_value) = split_entry(&logical);
            let key = unescape(raw_key, line_no)?;
            let value = unescape(raw_value.trim_start_matches(is_blank), line_no)?;

            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Non-empty value for a key
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Join continuation lines and drop blanks and comments.
///
/// Yields each logical line with the 1-based number of its first physical line.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut result = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (idx, physical) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = physical.trim_start();

        let (start, mut text) = match current.take() {
            Some((start, acc)) => (start, acc),
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (line_no, String::new())
            }
        };

        if ends_with_continuation(trimmed) {
            text.push_str(&trimmed[..trimmed.len() - 1]);
            current = Some((start, text));
        } else {
            text.push_str(trimmed);
            result.push((start, text));
        }
    }

    // A dangling continuation at end of input still counts as a line
    if let Some((start, text)) = current {
        if !text.trim().is_empty() {
            result.push((start, text));
        }
    }

    result
}

/// Odd number of trailing backslashes means the last one escapes the newline
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// Split a logical line into raw key and raw value
///
/// The key ends at the first unescaped `=`, `:` or whitespace. After
/// whitespace, one optional `=` or `:` is skipped. A bare key gets an empty value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], &line[i + 1..]),
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(is_blank);
    let rest = rest.strip_prefix(|c| c == '=' || c == ':').unwrap_or(rest);
    (&line[..key_end], rest)
}

fn unescape(raw: &str, line_no: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        PropertiesError::new(line_no, format!("invalid unicode escape '\\u{}'", hex))
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            // Trailing lone backslash is dropped
            None => {}
        }
    }

    Ok(out)
}
