//! Copy-on-write catalog for concurrent lookups.

use super::MessageCatalog;
use std::sync::{Arc, PoisonError, RwLock};

/// A [`MessageCatalog`] shared between threads.
///
/// Readers take a cheap [`snapshot`](SharedCatalog::snapshot) and query it
/// without holding a lock. Writers clone the current catalog, change the
/// clone and publish it, so a snapshot never observes a half-applied
/// update.
#[derive(Debug)]
pub struct SharedCatalog<P> {
    current: RwLock<Arc<MessageCatalog<P>>>,
}

impl<P> SharedCatalog<P> {
    /// Share `catalog`.
    #[must_use]
    pub fn new(catalog: MessageCatalog<P>) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog as of now.
    #[must_use]
    pub fn snapshot(&self) -> Arc<MessageCatalog<P>> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Publish `catalog`, replacing the current one.
    pub fn replace(&self, catalog: MessageCatalog<P>) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(catalog);
    }
}

impl<P: Clone> SharedCatalog<P> {
    /// Apply `change` to a copy of the catalog and publish the copy.
    ///
    /// Concurrent updates are serialised; snapshots taken earlier keep
    /// seeing the previous catalog.
    pub fn update<R>(&self, change: impl FnOnce(&mut MessageCatalog<P>) -> R) -> R {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = MessageCatalog::clone(&guard);
        let result = change(&mut next);
        *guard = Arc::new(next);
        result
    }
}

impl<P> From<MessageCatalog<P>> for SharedCatalog<P> {
    fn from(catalog: MessageCatalog<P>) -> Self {
        Self::new(catalog)
    }
}
