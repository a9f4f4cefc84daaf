//! Errors raised while parsing and resolving message keys.

use crate::localization::{self, LocalizedMessage, keys};
use crate::store::{StoreError, StoreId};
use miette::Diagnostic;
use thiserror::Error;

/// Failure to parse or resolve a key reference.
#[derive(Debug, Error, Diagnostic)]
pub enum KeyError {
    /// The key text does not follow `[store] ["/" key]`.
    #[error("{message}")]
    #[diagnostic(code(causeway::key::malformed))]
    Malformed {
        /// Text as supplied, before trimming.
        input: String,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// A store was found but does not define the key.
    #[error("{message}")]
    #[diagnostic(code(causeway::key::not_found))]
    NotFound {
        /// Store that was consulted, as `name` or `name (locale)`.
        store: String,
        /// Key that was missing.
        key: String,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// The named store could not be opened.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

impl KeyError {
    pub(crate) fn malformed(input: &str) -> Self {
        let key = if input.trim().is_empty() {
            keys::KEY_MALFORMED_EMPTY
        } else if input.trim() == "/" {
            keys::KEY_MALFORMED_SEPARATOR_ONLY
        } else {
            keys::KEY_MALFORMED_TRUNCATED
        };
        Self::Malformed {
            input: input.to_owned(),
            message: localization::message(key).with_arg("input", input.trim()),
        }
    }

    pub(crate) fn not_found(store: &StoreId, key: &str) -> Self {
        Self::NotFound {
            store: store.to_string(),
            key: key.to_owned(),
            message: localization::message(keys::KEY_NOT_FOUND)
                .with_arg("store", store)
                .with_arg("key", key),
        }
    }

    /// Whether this error reports a key missing from its store.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
