//! In-memory stores and loader.

use super::{LoadStrategy, RawText, StoreError, StoreId, StoreLoader, TextStore, layer_candidates};
use indexmap::IndexMap;
use ortho_config::LanguageIdentifier;
use std::collections::HashMap;
use std::sync::Arc;

/// An ordered key → text table.
///
/// Loaders return their layered results as `MapStore`s; callers can also
/// build one directly to use as a default store.
#[derive(Debug, Clone)]
pub struct MapStore {
    id: StoreId,
    entries: IndexMap<String, RawText>,
}

impl MapStore {
    /// Empty store with a locale-independent identity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StoreId::new(name),
            entries: IndexMap::new(),
        }
    }

    /// Empty store localized to `locale`.
    #[must_use]
    pub fn localized(name: impl Into<String>, locale: LanguageIdentifier) -> Self {
        Self {
            id: StoreId::localized(name, locale),
            entries: IndexMap::new(),
        }
    }

    /// Store built from `.properties` text; every value is templated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Parse`] for malformed escapes.
    pub fn from_properties(id: StoreId, source: &str) -> Result<Self, StoreError> {
        let entries = super::parse_properties(source)
            .map_err(|err| StoreError::parse(id.name(), err.line))?;
        Ok(Self {
            id,
            entries: entries
                .into_iter()
                .map(|(key, value)| (key, RawText::Templated(value)))
                .collect(),
        })
    }

    /// Add a templated entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, RawText::Templated(text.into()));
        self
    }

    /// Add a literal entry that is never evaluated.
    #[must_use]
    pub fn with_literal(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, RawText::Literal(text.into()));
        self
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, text: RawText) {
        self.entries.insert(key.into(), text);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn entries(&self) -> &IndexMap<String, RawText> {
        &self.entries
    }
}

impl Extend<(String, RawText)> for MapStore {
    fn extend<I: IntoIterator<Item = (String, RawText)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl TextStore for MapStore {
    fn id(&self) -> &StoreId {
        &self.id
    }

    fn get(&self, key: &str) -> Option<RawText> {
        self.entries.get(key).cloned()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Loader over bundles registered in memory.
///
/// Bundles are registered per name and candidate suffix, mirroring the file
/// layout [`DirectoryLoader`](super::DirectoryLoader) reads: a bundle added
/// with [`MemoryLoader::with_root`] is the root bundle; one added with
/// [`MemoryLoader::with_bundle`] for `es-ES` answers the `es_ES` candidate.
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
    bundles: HashMap<(String, String), MapStore>,
}

impl MemoryLoader {
    /// Loader with no bundles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the root bundle for `store`'s name.
    #[must_use]
    pub fn with_root(mut self, store: MapStore) -> Self {
        let name = store.id().name().to_owned();
        self.bundles.insert((name, String::new()), store);
        self
    }

    /// Register `store` as the bundle for `locale` exactly.
    #[must_use]
    pub fn with_bundle(mut self, locale: &LanguageIdentifier, store: MapStore) -> Self {
        let name = store.id().name().to_owned();
        let suffix = LoadStrategy::Exact
            .candidates(locale)
            .into_iter()
            .next()
            .unwrap_or_default();
        self.bundles.insert((name, suffix), store);
        self
    }
}

impl StoreLoader for MemoryLoader {
    fn load(
        &self,
        name: &str,
        locale: &LanguageIdentifier,
        strategy: LoadStrategy,
    ) -> Result<Arc<dyn TextStore>, StoreError> {
        let store = layer_candidates(name, locale, strategy, |suffix| {
            Ok(self
                .bundles
                .get(&(name.to_owned(), suffix.to_owned()))
                .map(|bundle| bundle.entries().clone()))
        })?;
        Ok(Arc::new(store))
    }
}
