//! Structural patterns over error cause-chains.
//!
//! A chain is a slice of [`Fault`]s, outermost first. A [`ChainPattern`] is a
//! whitespace-separated list of steps, each a `glob` over the fault kind:
//!
//! ```text
//! app.*  @cause:db.*...  io.*  $
//! ```
//!
//! * `GLOB` matches exactly one fault whose kind matches the glob.
//! * `GLOB...` matches zero or more such faults, preferring the longest run.
//! * `@name:STEP` also binds what the step matched as variable `name`.
//! * A final `$` requires the match to consume the whole chain.
//!
//! Step `n` (1-based) is capture group `n`; group 0 is the matched prefix.
//! Every group is a list of faults. Single steps bind their variable as one
//! fault object, repeating steps as a list.

mod error;
mod pattern;

pub use error::{ChainPatternError, FaultError};
pub use pattern::{ChainCompiler, ChainPattern};

use crate::localization::{self, keys};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// One link of a cause chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fault {
    /// Type of the failure, such as `io.not_found` or `java.sql.SQLException`.
    pub kind: String,
    /// Human-readable detail, possibly empty.
    pub message: String,
}

impl Fault {
    /// Fault of `kind` with `message`.
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// The fault as a template value: `{ "kind": ..., "message": ... }`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({ "kind": self.kind, "message": self.message })
    }

    /// Walk `error` and its [`Error::source`] chain, outermost first.
    ///
    /// Rust errors carry no runtime type name, so `kind_of` decides each
    /// fault's kind. The message is the error's `Display` output.
    ///
    /// ```rust
    /// use causeway::chain::Fault;
    /// use std::io;
    ///
    /// let err = io::Error::other("disk on fire");
    /// let chain = Fault::chain_of(&err, |_| "io".to_owned());
    /// assert_eq!(chain, vec![Fault::new("io", "disk on fire")]);
    /// ```
    #[must_use]
    pub fn chain_of(
        error: &(dyn Error + 'static),
        mut kind_of: impl FnMut(&(dyn Error + 'static)) -> String,
    ) -> Vec<Self> {
        let mut chain = Vec::new();
        let mut current = Some(error);
        while let Some(err) = current {
            chain.push(Self::new(kind_of(err), err.to_string()));
            current = err.source();
        }
        chain
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl FromStr for Fault {
    type Err = FaultError;

    /// Parse `kind[:message]`; the kind is trimmed, the message kept as is.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (raw_kind, message) = text.split_once(':').unwrap_or((text, ""));
        let kind = raw_kind.trim();
        if kind.is_empty() {
            return Err(FaultError {
                input: text.to_owned(),
                message: localization::message(keys::CHAIN_FAULT_EMPTY),
            });
        }
        Ok(Self::new(kind, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io;

    #[rstest]
    #[case("db.timeout:query took too long", "db.timeout", "query took too long")]
    #[case("  io.closed  ", "io.closed", "")]
    #[case("http:status: 503", "http", "status: 503")]
    fn parses_kind_and_message(#[case] text: &str, #[case] kind: &str, #[case] message: &str) {
        let fault: Fault = text.parse().unwrap_or_else(|err| panic!("{text}: {err}"));
        assert_eq!(fault, Fault::new(kind, message));
    }

    #[rstest]
    #[case("")]
    #[case("  :message only")]
    fn rejects_faults_without_kind(#[case] text: &str) {
        assert!(text.parse::<Fault>().is_err());
    }

    #[derive(Debug, thiserror::Error)]
    #[error("request failed")]
    struct RequestError(#[source] io::Error);

    #[rstest]
    fn chain_of_follows_sources() {
        let err = RequestError(io::Error::new(io::ErrorKind::TimedOut, "socket timed out"));
        let chain = Fault::chain_of(&err, |e| {
            if e.is::<io::Error>() { "io".into() } else { "request".into() }
        });
        assert_eq!(
            chain,
            vec![
                Fault::new("request", "request failed"),
                Fault::new("io", "socket timed out"),
            ]
        );
    }
}
