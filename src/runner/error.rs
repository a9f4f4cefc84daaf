//! Error types for the runner module.

use crate::localization::{self, LocalizedMessage, keys};
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while explaining a chain from the command line.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// No catalog entry matched and no fallback message was given.
    #[error("{message}")]
    #[diagnostic(code(causeway::runner::no_match))]
    NoMatch {
        /// Number of faults in the chain.
        faults: usize,
        /// Localised error message.
        message: LocalizedMessage,
    },
}

impl RunnerError {
    pub(crate) fn no_match(faults: usize) -> Self {
        Self::NoMatch {
            faults,
            message: localization::message(keys::CLI_NO_MATCH),
        }
    }
}
