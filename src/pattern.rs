//! Seams to the structural pattern matcher.
//!
//! The catalog never interprets pattern text. It asks a [`PatternCompiler`]
//! to compile each pattern line and asks each [`Pattern`] whether it matches
//! the start of an input sequence. A successful match is reported as a
//! [`MatchResult`] whose groups and variables feed template bindings.
//!
//! [`chain`](crate::chain) provides one implementation over error
//! cause-chains; [`Captures`] is a ready-made [`MatchResult`] for others.

use indexmap::IndexMap;
use serde_json::Value;
use std::error::Error;
use std::hash::Hash;

/// A compiled matcher over sequences of `Item`.
///
/// Patterns are compared with `Eq`/`Hash` so a catalog can hold each one
/// at most once per key.
pub trait Pattern: Eq + Hash {
    /// Element type of the sequences this pattern matches.
    type Item;
    /// Result produced by a successful match.
    type Match: MatchResult;

    /// Match `input` from its first element.
    ///
    /// The match does not have to consume the whole input; trailing
    /// elements are ignored unless the pattern itself anchors to the end.
    fn looking_at(&self, input: &[Self::Item]) -> Option<Self::Match>;
}

/// Data captured by a successful match.
pub trait MatchResult {
    /// Number of capture groups, including group 0 (the whole match).
    fn group_count(&self) -> usize;

    /// Value of capture group `index`, if it exists.
    fn group(&self, index: usize) -> Option<Value>;

    /// Named variables gathered while matching, in binding order.
    fn variables(&self) -> IndexMap<String, Value>;
}

/// Compiles pattern text into patterns.
pub trait PatternCompiler {
    /// Compiled pattern type.
    type Pattern: Pattern;
    /// Compilation failure.
    type Error: Error + Send + Sync + 'static;

    /// Compile one pattern.
    ///
    /// # Errors
    ///
    /// Returns the compiler's error when `source` is not a valid pattern.
    fn compile(&self, source: &str) -> Result<Self::Pattern, Self::Error>;
}

/// Plain [`MatchResult`] built from explicit groups and variables.
///
/// ```rust
/// use causeway::pattern::{Captures, MatchResult};
/// use serde_json::json;
///
/// let captures = Captures::new(json!(["a"])).with_variable("farg", json!("blah"));
/// assert_eq!(captures.group_count(), 1);
/// assert_eq!(captures.variables().get("farg"), Some(&json!("blah")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Captures {
    groups: Vec<Value>,
    variables: IndexMap<String, Value>,
}

impl Captures {
    /// Captures whose group 0 is `whole`.
    #[must_use]
    pub fn new(whole: Value) -> Self {
        Self {
            groups: vec![whole],
            variables: IndexMap::new(),
        }
    }

    /// Append the next numbered group.
    #[must_use]
    pub fn with_group(mut self, value: Value) -> Self {
        self.groups.push(value);
        self
    }

    /// Bind a named variable, replacing any earlier binding of `name`.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }
}

impl MatchResult for Captures {
    fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn group(&self, index: usize) -> Option<Value> {
        self.groups.get(index).cloned()
    }

    fn variables(&self) -> IndexMap<String, Value> {
        self.variables.clone()
    }
}
