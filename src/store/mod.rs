//! Localized text stores.
//!
//! A [`TextStore`] maps message keys to [`RawText`] for one locale. A
//! [`StoreLoader`] opens stores by dotted name (`errors.db`) using the locale
//! and [`LoadStrategy`] carried in [`LoaderParams`]. Two loaders ship with the
//! crate: [`MemoryLoader`] for embedded tables and [`DirectoryLoader`] for
//! `.properties` bundles on disk.
//!
//! Both loaders walk the same candidate chain. For `es-ES` under
//! [`LoadStrategy::Fallback`] the bundles `name_es_ES`, `name_es` and the root
//! bundle `name` are layered so the most specific definition of each key
//! wins.

mod directory;
mod error;
mod memory;
mod properties;

pub use directory::DirectoryLoader;
pub use error::StoreError;
pub use memory::{MapStore, MemoryLoader};
pub use properties::{PropertiesError, parse_properties};

use crate::locale_resolution::{self, SysLocale};
use indexmap::IndexMap;
use ortho_config::LanguageIdentifier;
use std::fmt;
use std::sync::Arc;

/// Message text as returned by a store.
///
/// The variant is decided when the store is populated: literal text is
/// emitted verbatim, templated text is evaluated with match bindings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawText {
    /// Text emitted as-is.
    Literal(String),
    /// Text evaluated as a template before it is emitted.
    Templated(String),
}

impl RawText {
    /// Borrow the underlying text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(text) | Self::Templated(text) => text,
        }
    }

    /// Consume the value, yielding the underlying text.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Literal(text) | Self::Templated(text) => text,
        }
    }
}

/// Identity of a loaded store: its name and, if localized, its locale.
///
/// Two key references point at "the same store" exactly when their
/// `StoreId`s are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreId {
    name: String,
    locale: Option<LanguageIdentifier>,
}

impl StoreId {
    /// Identity for a locale-independent store.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: None,
        }
    }

    /// Identity for a store localized to `locale`.
    #[must_use]
    pub fn localized(name: impl Into<String>, locale: LanguageIdentifier) -> Self {
        Self {
            name: name.into(),
            locale: Some(locale),
        }
    }

    /// Store name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locale the store was loaded for, if any.
    #[must_use]
    pub const fn locale(&self) -> Option<&LanguageIdentifier> {
        self.locale.as_ref()
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(locale) = &self.locale {
            write!(f, " ({locale})")?;
        }
        Ok(())
    }
}

/// A key → text table for one locale.
pub trait TextStore: fmt::Debug + Send + Sync {
    /// Identity used for key-reference equality.
    fn id(&self) -> &StoreId;

    /// Text for `key`, if the store defines it.
    fn get(&self, key: &str) -> Option<RawText>;

    /// Whether the store defines `key`.
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Opens stores by name.
pub trait StoreLoader: fmt::Debug + Send + Sync {
    /// Load the store `name` for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no candidate bundle exists, or an
    /// I/O or parse error when a candidate cannot be read.
    fn load(
        &self,
        name: &str,
        locale: &LanguageIdentifier,
        strategy: LoadStrategy,
    ) -> Result<Arc<dyn TextStore>, StoreError>;
}

/// How a loader searches for the bundles of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadStrategy {
    /// Layer every candidate from the root bundle up to the full locale.
    #[default]
    Fallback,
    /// Accept only a bundle for the exact locale.
    Exact,
}

impl LoadStrategy {
    /// Bundle suffixes to look for, most specific first.
    ///
    /// The empty suffix names the root bundle.
    #[must_use]
    pub fn candidates(self, locale: &LanguageIdentifier) -> Vec<String> {
        let mut suffixes = locale_suffixes(locale);
        match self {
            Self::Fallback => suffixes.push(String::new()),
            Self::Exact => suffixes.truncate(1),
        }
        if suffixes.is_empty() {
            suffixes.push(String::new());
        }
        suffixes
    }
}

fn locale_suffixes(locale: &LanguageIdentifier) -> Vec<String> {
    let language = locale.language.as_str();
    if language == "und" {
        return Vec::new();
    }
    let script = locale.script.as_ref().map(|script| script.as_str());
    let region = locale.region.as_ref().map(|region| region.as_str());
    let mut suffixes = Vec::with_capacity(4);
    if let (Some(script_tag), Some(region_tag)) = (script, region) {
        suffixes.push(format!("{language}_{script_tag}_{region_tag}"));
    }
    if let Some(script_tag) = script {
        suffixes.push(format!("{language}_{script_tag}"));
    }
    if let Some(region_tag) = region {
        suffixes.push(format!("{language}_{region_tag}"));
    }
    suffixes.push(language.to_owned());
    suffixes
}

/// Build a layered [`MapStore`] from the candidates `fetch` can supply.
///
/// `fetch` receives each candidate suffix and returns its entries when that
/// bundle exists. Parents are applied first so children override them.
pub(crate) fn layer_candidates(
    name: &str,
    locale: &LanguageIdentifier,
    strategy: LoadStrategy,
    mut fetch: impl FnMut(&str) -> Result<Option<IndexMap<String, RawText>>, StoreError>,
) -> Result<MapStore, StoreError> {
    let mut found = Vec::new();
    for suffix in strategy.candidates(locale) {
        if let Some(entries) = fetch(&suffix)? {
            tracing::debug!(store = name, bundle = %suffix, "loaded bundle candidate");
            found.push(entries);
        }
    }
    if found.is_empty() {
        return Err(StoreError::not_found(name, locale));
    }
    let mut store = MapStore::localized(name, locale.clone());
    for entries in found.into_iter().rev() {
        store.extend(entries);
    }
    Ok(store)
}

/// Locale, strategy and loader used to open stores by name.
///
/// Values are immutable; derive variants with the `with_*` builders.
#[derive(Clone, Debug)]
pub struct LoaderParams {
    locale: LanguageIdentifier,
    strategy: LoadStrategy,
    loader: Arc<dyn StoreLoader>,
}

impl LoaderParams {
    /// Parameters using `loader`, the system locale and the default
    /// strategy.
    #[must_use]
    pub fn new(loader: Arc<dyn StoreLoader>) -> Self {
        Self {
            locale: locale_resolution::default_locale(&SysLocale),
            strategy: LoadStrategy::default(),
            loader,
        }
    }

    /// Replace the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: LanguageIdentifier) -> Self {
        self.locale = locale;
        self
    }

    /// Replace the load strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: LoadStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Locale stores are opened for.
    #[must_use]
    pub const fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Strategy stores are opened with.
    #[must_use]
    pub const fn strategy(&self) -> LoadStrategy {
        self.strategy
    }

    /// Loader stores are opened through.
    #[must_use]
    pub fn loader(&self) -> &Arc<dyn StoreLoader> {
        &self.loader
    }

    /// Open `name` for the configured locale.
    ///
    /// # Errors
    ///
    /// Propagates the loader's [`StoreError`].
    pub fn load(&self, name: &str) -> Result<Arc<dyn TextStore>, StoreError> {
        self.load_for(name, &self.locale)
    }

    /// Open `name` for `locale` with the configured strategy.
    ///
    /// # Errors
    ///
    /// Propagates the loader's [`StoreError`].
    pub fn load_for(
        &self,
        name: &str,
        locale: &LanguageIdentifier,
    ) -> Result<Arc<dyn TextStore>, StoreError> {
        self.loader.load(name, locale, self.strategy)
    }
}

impl Default for LoaderParams {
    /// Bundles under the current directory, system locale, fallback search.
    fn default() -> Self {
        Self::new(Arc::new(DirectoryLoader::new(".")))
    }
}
