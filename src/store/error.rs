//! Errors raised while opening text stores.

use crate::localization::{self, LocalizedMessage, keys};
use miette::Diagnostic;
use ortho_config::LanguageIdentifier;
use thiserror::Error;

/// Failure to open a store.
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    /// No candidate bundle exists for the name and locale.
    #[error("{message}")]
    #[diagnostic(code(causeway::store::not_found))]
    NotFound {
        /// Store name that was requested.
        name: String,
        /// Locale that was requested.
        locale: String,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// A candidate bundle exists but could not be read.
    #[error("{message}")]
    #[diagnostic(code(causeway::store::io))]
    Io {
        /// Path of the unreadable bundle.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// A bundle contained an invalid escape sequence.
    #[error("{message}")]
    #[diagnostic(code(causeway::store::parse))]
    Parse {
        /// Path or label of the offending bundle.
        origin: String,
        /// 1-based line of the logical entry.
        line: usize,
        /// Localised error message.
        message: LocalizedMessage,
    },
}

impl StoreError {
    pub(crate) fn not_found(name: &str, locale: &LanguageIdentifier) -> Self {
        Self::NotFound {
            name: name.to_owned(),
            locale: locale.to_string(),
            message: localization::message(keys::STORE_NOT_FOUND)
                .with_arg("name", name)
                .with_arg("locale", locale),
        }
    }

    pub(crate) fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
            message: localization::message(keys::STORE_IO).with_arg("path", path),
        }
    }

    pub(crate) fn parse(origin: &str, line: usize) -> Self {
        Self::Parse {
            origin: origin.to_owned(),
            line,
            message: localization::message(keys::STORE_PARSE)
                .with_arg("path", origin)
                .with_arg("line", line),
        }
    }
}
