//! Ordered key → pattern-set catalogs and message selection.
//!
//! A [`MessageCatalog`] keeps every [`KeyReference`] in the order it was
//! first registered, each with an ordered set of patterns. Selection walks
//! keys, then patterns, in that order and stops at the first pattern that
//! matches the start of the input, so registration order alone decides
//! precedence.

mod error;
mod reader;
mod shared;

pub use error::{CatalogError, CatalogErrorKind};
pub use reader::CatalogReader;
pub use shared::SharedCatalog;

use crate::key::{KeyError, KeyReference};
use crate::pattern::Pattern;
use crate::render::{RenderError, Renderer};
use crate::store::RawText;
use indexmap::{IndexMap, IndexSet};
use miette::Diagnostic;
use ortho_config::LanguageIdentifier;
use thiserror::Error;

/// Failure to produce a message for a matched input.
#[derive(Debug, Error, Diagnostic)]
pub enum MessageError {
    /// The selected key could not be resolved.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Key(#[from] KeyError),
    /// The resolved text could not be rendered.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}

/// The key and match chosen for an input.
#[derive(Debug)]
pub struct Selection<'a, M> {
    key: &'a KeyReference,
    matched: M,
}

impl<'a, M> Selection<'a, M> {
    /// Key whose pattern matched.
    #[must_use]
    pub const fn key(&self) -> &'a KeyReference {
        self.key
    }

    /// Result of the winning match.
    #[must_use]
    pub const fn matched(&self) -> &M {
        &self.matched
    }

    /// Consume the selection, yielding the match.
    #[must_use]
    pub fn into_match(self) -> M {
        self.matched
    }
}

/// Ordered associations from message keys to the patterns that select them.
#[derive(Debug, Clone)]
pub struct MessageCatalog<P> {
    entries: IndexMap<KeyReference, IndexSet<P>>,
    renderer: Renderer,
}

impl<P> Default for MessageCatalog<P> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            renderer: Renderer::default(),
        }
    }
}

impl<P> MessageCatalog<P> {
    /// Empty catalog rendering with [`Renderer::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the renderer used for templated text.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys and their patterns in precedence order.
    pub fn entries(&self) -> impl Iterator<Item = (&KeyReference, &IndexSet<P>)> {
        self.entries.iter()
    }

    /// Text for `key` in `locale`; see [`KeyReference::resolve`].
    ///
    /// # Errors
    ///
    /// Propagates [`KeyError`] from resolution.
    pub fn resolve(
        &self,
        key: &KeyReference,
        locale: Option<&LanguageIdentifier>,
    ) -> Result<RawText, KeyError> {
        key.resolve(locale)
    }

    /// Remove `key` and all its patterns, keeping the order of the rest.
    pub fn remove_key(&mut self, key: &KeyReference) -> bool {
        self.entries.shift_remove(key).is_some()
    }
}

impl<P: Pattern> MessageCatalog<P> {
    /// Register `patterns` under `key`.
    ///
    /// A new key goes after every existing key; a known key keeps its
    /// place. Patterns already registered for the key are skipped. Returns
    /// whether anything was added.
    pub fn register(&mut self, key: KeyReference, patterns: impl IntoIterator<Item = P>) -> bool {
        let label = key.to_string();
        let set = self.entries.entry(key).or_default();
        let before = set.len();
        set.extend(patterns);
        let added = set.len() - before;
        tracing::debug!(key = %label, added, total = set.len(), "registered patterns");
        added > 0
    }

    /// Register a single pattern under `key`.
    pub fn register_one(&mut self, key: KeyReference, pattern: P) -> bool {
        self.register(key, [pattern])
    }

    /// Remove `pattern` from `key`'s set. The key itself stays registered.
    pub fn remove_pattern(&mut self, key: &KeyReference, pattern: &P) -> bool {
        self.entries
            .get_mut(key)
            .is_some_and(|set| set.shift_remove(pattern))
    }

    /// Patterns registered for `key`, in registration order.
    #[must_use]
    pub fn patterns(&self, key: &KeyReference) -> Option<&IndexSet<P>> {
        self.entries.get(key)
    }

    /// First key whose pattern matches the start of `input`.
    #[must_use]
    pub fn select(&self, input: &[P::Item]) -> Option<Selection<'_, P::Match>> {
        self.entries.iter().find_map(|(key, patterns)| {
            patterns
                .iter()
                .find_map(|pattern| pattern.looking_at(input))
                .map(|matched| Selection { key, matched })
        })
    }

    /// Message for `input` in `locale`, or `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Key`] when the selected key does not resolve
    /// and [`MessageError::Render`] when its text does not render.
    pub fn message(
        &self,
        input: &[P::Item],
        locale: Option<&LanguageIdentifier>,
    ) -> Result<Option<String>, MessageError> {
        let Some(selection) = self.select(input) else {
            return Ok(None);
        };
        tracing::debug!(key = %selection.key, "selected message");
        let raw = selection.key.resolve(locale)?;
        let text = self.renderer.render(raw, Some(&selection.matched))?;
        Ok(Some(text))
    }

    /// Like [`MessageCatalog::message`], substituting `default` when nothing
    /// matches or the selected key is missing from its store.
    ///
    /// # Errors
    ///
    /// Propagates every other [`MessageError`].
    pub fn message_or(
        &self,
        input: &[P::Item],
        locale: Option<&LanguageIdentifier>,
        default: &str,
    ) -> Result<String, MessageError> {
        match self.message(input, locale) {
            Ok(Some(text)) => Ok(text),
            Ok(None) => {
                tracing::debug!("no pattern matched; using default message");
                Ok(default.to_owned())
            }
            Err(MessageError::Key(err)) if err.is_not_found() => {
                tracing::debug!(error = %err, "message key missing; using default message");
                Ok(default.to_owned())
            }
            Err(err) => Err(err),
        }
    }
}
