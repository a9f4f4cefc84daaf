//! Scanner for the `[store] ["/" key]` key syntax.
//!
//! The store name is a dotted identifier (`errors.db`). A `/` closes it and
//! whatever follows, minus surrounding whitespace, is the key. Text that
//! stops looking like a dotted identifier before any `/` is a bare key in its
//! own right, so `"Disk full: retry later"` and `"a.b  /  c"` are both
//! literal keys.

use super::KeyError;

/// Store part of a parsed key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSpec {
    /// No store was named; the key may still bind to a default store.
    Absent,
    /// The text began with `/`, selecting the default store.
    Default,
    /// A dotted store name preceded the `/`.
    Named(String),
}

/// Result of scanning key text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    /// Which store the key refers to.
    pub store: StoreSpec,
    /// Non-empty key, or the whole trimmed input when no store applies.
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    NameSegmentStart,
    Name,
    KeyStart,
    Key,
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Scan `input` into its store and key parts.
///
/// # Errors
///
/// Returns [`KeyError::Malformed`] for empty or whitespace-only input, a
/// lone `/`, and text that ends before a key begins (`errors.db/`,
/// `errors.`).
///
/// # Examples
///
/// ```rust
/// use causeway::key::grammar::{StoreSpec, parse};
///
/// let parsed = parse(" errors.db / timeout ").unwrap();
/// assert_eq!(parsed.store, StoreSpec::Named("errors.db".into()));
/// assert_eq!(parsed.key, "timeout");
/// ```
pub fn parse(input: &str) -> Result<ParsedKey, KeyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Err(KeyError::malformed(input));
    }

    let mut state = State::Start;
    let mut store = StoreSpec::Absent;
    let mut buffer = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        state = match state {
            State::Start if is_identifier_start(ch) => {
                buffer.push(ch);
                State::Name
            }
            State::Start if ch == '/' => {
                store = StoreSpec::Default;
                State::KeyStart
            }
            State::Start if ch.is_whitespace() => State::Start,
            State::NameSegmentStart if is_identifier_start(ch) => {
                buffer.push(ch);
                State::Name
            }
            State::Name if ch == '.' => {
                buffer.push(ch);
                State::NameSegmentStart
            }
            State::Name if ch == '/' => {
                store = StoreSpec::Named(std::mem::take(&mut buffer));
                State::KeyStart
            }
            State::Name if is_identifier_part(ch) => {
                buffer.push(ch);
                State::Name
            }
            State::KeyStart if ch.is_whitespace() => State::KeyStart,
            State::Start | State::NameSegmentStart | State::Name | State::KeyStart | State::Key => {
                buffer.push(ch);
                State::Key
            }
        };
    }

    match state {
        State::Key => Ok(ParsedKey {
            store,
            key: buffer.trim_end().to_owned(),
        }),
        State::Name => Ok(ParsedKey {
            store: StoreSpec::Absent,
            key: buffer,
        }),
        State::Start | State::NameSegmentStart | State::KeyStart => Err(KeyError::malformed(input)),
    }
}
