//! Errors for chain patterns and fault text.

use crate::localization::LocalizedMessage;
use miette::Diagnostic;
use thiserror::Error;

/// Chain pattern text that cannot be compiled.
#[derive(Debug, Error, Diagnostic)]
pub enum ChainPatternError {
    /// The pattern had no steps.
    #[error("{message}")]
    #[diagnostic(code(causeway::chain::empty))]
    Empty {
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// A step's kind glob is invalid.
    #[error("{message}")]
    #[diagnostic(code(causeway::chain::invalid_glob))]
    InvalidGlob {
        /// Offending step.
        step: String,
        /// Glob parser failure.
        #[source]
        source: glob::PatternError,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// A step has no kind glob, as in `...` or `@name:`.
    #[error("{message}")]
    #[diagnostic(code(causeway::chain::missing_kind))]
    MissingKind {
        /// Offending step.
        step: String,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// A step's `@name:` binding is not an identifier.
    #[error("{message}")]
    #[diagnostic(code(causeway::chain::invalid_binding))]
    InvalidBinding {
        /// Offending step.
        step: String,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// `$` appeared somewhere other than the last step.
    #[error("{message}")]
    #[diagnostic(code(causeway::chain::misplaced_anchor))]
    MisplacedAnchor {
        /// Whole pattern text.
        pattern: String,
        /// Localised error message.
        message: LocalizedMessage,
    },
}

/// Fault text with no kind.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(causeway::chain::empty_fault))]
pub struct FaultError {
    /// Text as supplied.
    pub input: String,
    /// Localised error message.
    pub message: LocalizedMessage,
}
