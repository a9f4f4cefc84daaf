//! Fluent-backed copy for causeway's own diagnostics.
//!
//! Errors raised by the key grammar, stores, catalog reader and renderer carry
//! a [`LocalizedMessage`] that resolves against the active [`Localizer`] when
//! displayed. The default localizer uses the embedded English bundle; binaries
//! may swap it (see [`set_localizer`]) to honour `--locale` or
//! `CAUSEWAY_LOCALE`.
//!
//! This only affects how causeway describes its *own* failures. The locale
//! used to resolve catalog messages is always passed explicitly.

pub mod keys;

use ortho_config::{LocalizationArgs, Localizer};
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

static LOCALIZER: OnceLock<RwLock<Arc<dyn Localizer>>> = OnceLock::new();

fn storage() -> &'static RwLock<Arc<dyn Localizer>> {
    LOCALIZER.get_or_init(|| {
        let _ = keys::ALL_KEYS;
        RwLock::new(Arc::from(crate::cli_localization::build_localizer(None)))
    })
}

/// Replace the localizer used when rendering diagnostics.
pub fn set_localizer(localizer: Arc<dyn Localizer>) {
    let mut guard = storage().write().unwrap_or_else(PoisonError::into_inner);
    *guard = localizer;
}

/// Returns the active diagnostics localizer.
#[must_use]
pub fn localizer() -> Arc<dyn Localizer> {
    let guard = storage().read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&guard)
}

/// Restores the previous localizer when dropped.
pub struct LocalizerGuard {
    previous: Arc<dyn Localizer>,
}

impl fmt::Debug for LocalizerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizerGuard").finish_non_exhaustive()
    }
}

impl Drop for LocalizerGuard {
    fn drop(&mut self) {
        set_localizer(Arc::clone(&self.previous));
    }
}

/// Install `localizer` until the returned guard is dropped.
#[must_use]
pub fn set_localizer_for_tests(localizer: Arc<dyn Localizer>) -> LocalizerGuard {
    let previous = self::localizer();
    set_localizer(localizer);
    LocalizerGuard { previous }
}

/// A Fluent message identifier plus its named arguments, rendered lazily.
///
/// Rendering is deferred to [`fmt::Display`] so an error built under one
/// localizer is described in whichever localizer is active when it is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedMessage {
    key: &'static str,
    args: Vec<(&'static str, String)>,
}

impl LocalizedMessage {
    /// Create a message with no arguments.
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            args: Vec::new(),
        }
    }

    /// Attach a named Fluent argument.
    #[must_use]
    #[expect(
        clippy::needless_pass_by_value,
        reason = "Owned values keep call sites terse for temporaries."
    )]
    pub fn with_arg(mut self, name: &'static str, value: impl ToString) -> Self {
        self.args.push((name, value.to_string()));
        self
    }

    /// Fluent identifier of the message.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    fn fluent_args(&self) -> Option<LocalizationArgs<'_>> {
        if self.args.is_empty() {
            return None;
        }
        let mut args = LocalizationArgs::default();
        for (name, value) in &self.args {
            args.insert(*name, value.clone().into());
        }
        Some(args)
    }
}

impl fmt::Display for LocalizedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.fluent_args();
        let text = localizer().message(self.key, args.as_ref(), self.key);
        f.write_str(&text)
    }
}

/// Shorthand for [`LocalizedMessage::new`].
#[must_use]
pub const fn message(key: &'static str) -> LocalizedMessage {
    LocalizedMessage::new(key)
}
