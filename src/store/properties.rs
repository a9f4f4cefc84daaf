//! Parser for `.properties` bundles.
//!
//! Supports `#` and `!` comment lines, `key = value`, `key: value` and
//! `key value` entries, trailing-backslash continuations, and the escapes
//! `\t`, `\n`, `\r`, `\f` and `\uXXXX` (surrogate pairs are written as two
//! consecutive escapes). Any other escaped character stands
//! for itself, which is how separators are embedded in keys (`a\=b`).
//! Trailing whitespace in values is kept.

use indexmap::IndexMap;
use std::ops::Range;
use std::str::Chars;
use thiserror::Error;

const HIGH_SURROGATES: Range<u32> = 0xD800..0xDC00;
const LOW_SURROGATES: Range<u32> = 0xDC00..0xE000;

/// A malformed escape sequence in a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid escape sequence on line {line}")]
pub struct PropertiesError {
    /// 1-based line where the logical entry starts.
    pub line: usize,
}

/// Parse bundle text into ordered key/value pairs.
///
/// Later definitions of a key replace earlier ones but keep the original
/// position.
///
/// # Errors
///
/// Returns [`PropertiesError`] for a truncated or non-hexadecimal `\u`
/// escape, or for a surrogate that is not part of a well-formed pair.
///
/// # Examples
///
/// ```rust
/// use causeway::store::parse_properties;
///
/// let entries = parse_properties("greeting = Hello, \\\n    world\n# note\n").unwrap();
/// assert_eq!(entries.get("greeting").map(String::as_str), Some("Hello, world"));
/// ```
pub fn parse_properties(source: &str) -> Result<IndexMap<String, String>, PropertiesError> {
    let mut entries = IndexMap::new();
    for (line, logical) in logical_lines(source) {
        let (raw_key, raw_value) = split_entry(&logical);
        let key = unescape(raw_key, line)?;
        let value = unescape(raw_value, line)?;
        entries.insert(key, value);
    }
    Ok(entries)
}

fn logical_lines(source: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;
    for (index, raw) in source.lines().enumerate() {
        let (start, mut text) = match pending.take() {
            Some((start, mut text)) => {
                text.push_str(raw.trim_start());
                (start, text)
            }
            None => {
                let trimmed = raw.trim_start();
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                (index + 1, trimmed.to_owned())
            }
        };
        if continues(&text) {
            text.pop();
            pending = Some((start, text));
        } else {
            lines.push((start, text));
        }
    }
    lines.extend(pending);
    lines
}

/// A line continues when it ends in an odd run of backslashes.
fn continues(text: &str) -> bool {
    let run = text.chars().rev().take_while(|ch| *ch == '\\').count();
    !run.is_multiple_of(2)
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (index, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
            continue;
        }
        if ch == '=' || ch == ':' || ch.is_whitespace() {
            let (key, rest) = line.split_at(index);
            let mut tail = rest.chars();
            tail.next();
            let after = tail.as_str().trim_start();
            let value = if ch.is_whitespace() {
                after
                    .strip_prefix(['=', ':'])
                    .map_or(after, str::trim_start)
            } else {
                after
            };
            return (key, value);
        }
    }
    (line, "")
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => out.push(unicode_escape(&mut chars).ok_or(PropertiesError { line })?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn hex_unit(chars: &mut Chars<'_>) -> Option<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    (hex.len() == 4)
        .then(|| u32::from_str_radix(&hex, 16).ok())
        .flatten()
}

/// Decode the digits after `\u`, joining a surrogate pair written as two
/// consecutive escapes.
fn unicode_escape(chars: &mut Chars<'_>) -> Option<char> {
    let high = hex_unit(chars)?;
    if !HIGH_SURROGATES.contains(&high) {
        return char::from_u32(high);
    }
    let mut rest = chars.as_str().strip_prefix("\\u")?.chars();
    let low = hex_unit(&mut rest)?;
    if !LOW_SURROGATES.contains(&low) {
        return None;
    }
    *chars = rest;
    char::from_u32(0x1_0000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}
