//! Resolved references to message text.

use super::grammar::{self, StoreSpec};
use super::{KeyContext, KeyError};
use crate::store::{LoaderParams, RawText, StoreId, TextStore};
use ortho_config::LanguageIdentifier;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A message key bound to the store that defines it, or a literal message.
///
/// Two references are equal when their keys match and they point at the
/// same store identity (name and locale), or both have no store.
#[derive(Clone)]
pub struct KeyReference {
    store: Option<Arc<dyn TextStore>>,
    store_name: Option<String>,
    key: String,
    params: LoaderParams,
}

impl KeyReference {
    /// Parse `text` and bind it according to `context`.
    ///
    /// * `key` binds to the default store when that store defines `key`,
    ///   and otherwise stands alone as literal message text.
    /// * `/key` binds to the default store, preferring an entry spelled
    ///   `/key`. Without a default store the key stands alone.
    /// * `store.name/key` opens `store.name` through the context's loader
    ///   and requires the key to exist.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Malformed`] for text the grammar rejects,
    /// [`KeyError::Store`] when a named store cannot be opened and
    /// [`KeyError::NotFound`] when it lacks the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use causeway::key::{KeyContext, KeyReference};
    ///
    /// let key = KeyReference::parse("Something went wrong", &KeyContext::default()).unwrap();
    /// assert_eq!(key.key(), "Something went wrong");
    /// assert!(key.store().is_none());
    /// ```
    pub fn parse(text: &str, context: &KeyContext) -> Result<Self, KeyError> {
        let parsed = grammar::parse(text)?;
        let params = context.params().clone();
        let reference = match (parsed.store, context.default_store()) {
            (StoreSpec::Absent, Some(store)) if store.contains_key(&parsed.key) => Self {
                store: Some(Arc::clone(store)),
                store_name: None,
                key: parsed.key,
                params,
            },
            (StoreSpec::Default, Some(store)) => Self {
                key: prefer_raw(&**store, parsed.key),
                store: Some(Arc::clone(store)),
                store_name: None,
                params,
            },
            (StoreSpec::Named(name), _) => {
                let store = params.load(&name)?;
                let key = prefer_raw(&*store, parsed.key);
                if !store.contains_key(&key) {
                    return Err(KeyError::not_found(store.id(), &key));
                }
                Self {
                    store: Some(store),
                    store_name: Some(name),
                    key,
                    params,
                }
            }
            (StoreSpec::Absent | StoreSpec::Default, _) => Self {
                store: None,
                store_name: None,
                key: parsed.key,
                params,
            },
        };
        tracing::debug!(key = %reference, "parsed key reference");
        Ok(reference)
    }

    /// A storeless reference whose key is the message text itself.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Malformed`] when `text` is blank.
    pub fn literal(text: impl Into<String>) -> Result<Self, KeyError> {
        let key = text.into();
        if key.trim().is_empty() {
            return Err(KeyError::malformed(&key));
        }
        Ok(Self {
            store: None,
            store_name: None,
            key,
            params: LoaderParams::default(),
        })
    }

    /// A reference to `key` in an already opened store.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Malformed`] for a blank key and
    /// [`KeyError::NotFound`] when `store` lacks it.
    pub fn in_store(store: Arc<dyn TextStore>, text: impl Into<String>) -> Result<Self, KeyError> {
        let key = text.into();
        if key.trim().is_empty() {
            return Err(KeyError::malformed(&key));
        }
        if !store.contains_key(&key) {
            return Err(KeyError::not_found(store.id(), &key));
        }
        Ok(Self {
            store: Some(store),
            store_name: None,
            key,
            params: LoaderParams::default(),
        })
    }

    /// Key text: a store key, or the literal message when storeless.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Store the key is bound to, if any.
    #[must_use]
    pub const fn store(&self) -> Option<&Arc<dyn TextStore>> {
        self.store.as_ref()
    }

    /// Identity of the bound store, if any.
    #[must_use]
    pub fn store_id(&self) -> Option<&StoreId> {
        self.store.as_deref().map(TextStore::id)
    }

    /// Name the store was requested under, for explicitly named stores.
    #[must_use]
    pub fn store_name(&self) -> Option<&str> {
        self.store_name.as_deref()
    }

    /// Parameters used to (re)open the store.
    #[must_use]
    pub const fn params(&self) -> &LoaderParams {
        &self.params
    }

    /// Text for this key in `locale`, or in the bound store's own locale
    /// when `locale` is `None`.
    ///
    /// Storeless references yield their key as templated text. A store that
    /// was opened by name is reopened when `locale` differs from the one it
    /// was loaded for; default stores are always used as supplied.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Store`] when reopening fails and
    /// [`KeyError::NotFound`] when the store lacks the key.
    pub fn resolve(&self, locale: Option<&LanguageIdentifier>) -> Result<RawText, KeyError> {
        let Some(bound) = &self.store else {
            return Ok(RawText::Templated(self.key.clone()));
        };
        let store = match (&self.store_name, locale) {
            (Some(name), Some(wanted)) if bound.id().locale() != Some(wanted) => {
                tracing::debug!(store = %name, locale = %wanted, "reopening store for locale");
                self.params.load_for(name, wanted)?
            }
            _ => Arc::clone(bound),
        };
        store
            .get(&self.key)
            .ok_or_else(|| KeyError::not_found(store.id(), &self.key))
    }
}

/// `/key` wins over `key` when the store spells the entry with its slash.
fn prefer_raw(store: &dyn TextStore, key: String) -> String {
    let raw = format!("/{key}");
    if store.contains_key(&raw) { raw } else { key }
}

impl PartialEq for KeyReference {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.store_id() == other.store_id()
    }
}

impl Eq for KeyReference {}

impl Hash for KeyReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.store_id().hash(state);
    }
}

impl fmt::Debug for KeyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyReference")
            .field("store", &self.store_id())
            .field("store_name", &self.store_name)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for KeyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = self.store_id() {
            write!(f, "{}/", id.name())?;
        }
        f.write_str(&self.key)
    }
}
