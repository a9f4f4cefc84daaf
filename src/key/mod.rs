//! Message keys: `[store] ["/" key]` text bound to localized stores.
//!
//! [`grammar`] scans key text; [`KeyReference::parse`] binds the result
//! using a [`KeyContext`], which carries the optional default store for
//! relative keys and the [`LoaderParams`] used to open named stores.

mod error;
pub mod grammar;
mod reference;

pub use error::KeyError;
pub use reference::KeyReference;

use crate::store::{LoaderParams, TextStore};
use std::sync::Arc;

/// Everything key parsing needs besides the text itself.
#[derive(Clone, Debug, Default)]
pub struct KeyContext {
    default_store: Option<Arc<dyn TextStore>>,
    params: LoaderParams,
}

impl KeyContext {
    /// Context opening named stores with `params` and no default store.
    #[must_use]
    pub const fn new(params: LoaderParams) -> Self {
        Self {
            default_store: None,
            params,
        }
    }

    /// Use `store` for bare and `/`-prefixed keys.
    #[must_use]
    pub fn with_default_store(mut self, store: Arc<dyn TextStore>) -> Self {
        self.default_store = Some(store);
        self
    }

    /// Store relative keys resolve against.
    #[must_use]
    pub const fn default_store(&self) -> Option<&Arc<dyn TextStore>> {
        self.default_store.as_ref()
    }

    /// Parameters for opening named stores.
    #[must_use]
    pub const fn params(&self) -> &LoaderParams {
        &self.params
    }
}
