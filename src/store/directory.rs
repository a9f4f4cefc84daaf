//! Loader for `.properties` bundles under a directory.
//!
//! The store `errors.db` for `es-ES` is looked up as `errors/db_es_ES.properties`,
//! `errors/db_es.properties` and `errors/db.properties` relative to the root.
//! Loaded stores are kept in an LRU cache keyed by name, locale and strategy.

use super::{LoadStrategy, MapStore, RawText, StoreError, StoreId, StoreLoader, TextStore};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use indexmap::IndexMap;
use lru::LruCache;
use ortho_config::LanguageIdentifier;
use std::fmt;
use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::MIN.saturating_add(31);
const EXTENSION: &str = "properties";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    name: String,
    locale: LanguageIdentifier,
    strategy: LoadStrategy,
}

/// Opens stores from `.properties` files below a root directory.
pub struct DirectoryLoader {
    root: Utf8PathBuf,
    cache: Mutex<LruCache<CacheKey, Arc<MapStore>>>,
}

impl fmt::Debug for DirectoryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryLoader")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl DirectoryLoader {
    /// Loader rooted at `root`. The directory is opened on each cache miss.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(LruCache::new(CACHE_CAPACITY)),
        }
    }

    /// Root directory bundles are resolved against.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Drop every cached store.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    fn lock_cache(&self) -> MutexGuard<'_, LruCache<CacheKey, Arc<MapStore>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_bundle(
        &self,
        dir: &Dir,
        name: &str,
        suffix: &str,
    ) -> Result<Option<IndexMap<String, RawText>>, StoreError> {
        let relative = bundle_path(name, suffix);
        let display = self.root.join(&relative);
        let source = match dir.read_to_string(&relative) {
            Ok(source) => source,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::io(display.as_str(), err)),
        };
        let store = MapStore::from_properties(StoreId::new(name), &source).map_err(|err| {
            match err {
                StoreError::Parse { line, .. } => StoreError::parse(display.as_str(), line),
                other => other,
            }
        })?;
        Ok(Some(store.entries().clone()))
    }
}

fn bundle_path(name: &str, suffix: &str) -> Utf8PathBuf {
    let mut path: Utf8PathBuf = name.split('.').collect();
    let stem = path.file_name().unwrap_or(name).to_owned();
    if suffix.is_empty() {
        path.set_file_name(format!("{stem}.{EXTENSION}"));
    } else {
        path.set_file_name(format!("{stem}_{suffix}.{EXTENSION}"));
    }
    path
}

impl StoreLoader for DirectoryLoader {
    fn load(
        &self,
        name: &str,
        locale: &LanguageIdentifier,
        strategy: LoadStrategy,
    ) -> Result<Arc<dyn TextStore>, StoreError> {
        let key = CacheKey {
            name: name.to_owned(),
            locale: locale.clone(),
            strategy,
        };
        if let Some(cached) = self.lock_cache().get(&key) {
            tracing::debug!(store = name, %locale, "store cache hit");
            let store: Arc<dyn TextStore> = Arc::clone(cached) as Arc<dyn TextStore>;
            return Ok(store);
        }
        let dir = Dir::open_ambient_dir(&self.root, ambient_authority())
            .map_err(|err| StoreError::io(self.root.as_str(), err))?;
        let store = Arc::new(super::layer_candidates(name, locale, strategy, |suffix| {
            self.read_bundle(&dir, name, suffix)
        })?);
        tracing::debug!(store = name, %locale, root = %self.root, "loaded store");
        self.lock_cache().put(key, Arc::clone(&store));
        Ok(store)
    }
}
