//! Locale precedence and normalization.
//!
//! The library never reads process-wide locale state on its own: callers pass
//! a [`LanguageIdentifier`] explicitly. These helpers decide which identifier
//! to pass, for the binary and for [`LoaderParams`](crate::store::LoaderParams)
//! defaults.

use ortho_config::LanguageIdentifier;
use std::str::FromStr;

/// Environment variable consulted for the catalog locale.
pub const CAUSEWAY_LOCALE_ENV: &str = "CAUSEWAY_LOCALE";

/// Locale used when nothing else yields a valid tag.
pub const FALLBACK_LOCALE: &str = "en-US";

/// Read-only environment access used for locale resolution.
pub trait EnvProvider {
    /// Fetch the environment variable value for `key`.
    fn var(&self, key: &str) -> Option<String>;
}

/// Environment provider backed by the process environment.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Source of the host's preferred locale.
pub trait SystemLocale {
    /// Return the system locale string when available.
    fn system_locale(&self) -> Option<String>;
}

/// System locale provider backed by `sys-locale`.
#[derive(Debug, Default, Copy, Clone)]
pub struct SysLocale;

impl SystemLocale for SysLocale {
    fn system_locale(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// Normalize a raw locale string into a BCP 47 language tag.
///
/// Encoding suffixes (`.UTF-8`) and modifiers (`@euro`) are dropped and
/// underscores become hyphens.
///
/// # Examples
///
/// ```rust
/// use causeway::locale_resolution::normalize_locale_tag;
///
/// assert_eq!(normalize_locale_tag("es_ES.UTF-8"), Some("es-ES".to_owned()));
/// assert_eq!(normalize_locale_tag("  "), None);
/// ```
#[must_use]
pub fn normalize_locale_tag(raw: &str) -> Option<String> {
    let stripped = raw.trim().split(['.', '@']).next().unwrap_or_default().trim();
    if stripped.is_empty() {
        return None;
    }
    LanguageIdentifier::from_str(&stripped.replace('_', "-"))
        .ok()
        .map(|lang| lang.to_string())
}

/// Pick the first candidate that normalizes to a valid tag.
fn first_valid<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find_map(normalize_locale_tag)
}

/// Resolve the catalog locale.
///
/// Precedence is the explicit flag, then `CAUSEWAY_LOCALE`, then the system
/// locale. Returns `None` when none of them is a valid tag.
#[must_use]
pub fn resolve_locale(
    explicit: Option<&str>,
    env: &impl EnvProvider,
    system: &impl SystemLocale,
) -> Option<String> {
    let env_locale = env.var(CAUSEWAY_LOCALE_ENV);
    let system_locale = system.system_locale();
    first_valid([explicit, env_locale.as_deref(), system_locale.as_deref()])
}

/// Locale identifier for `system`, or [`FALLBACK_LOCALE`].
#[must_use]
pub fn default_locale(system: &impl SystemLocale) -> LanguageIdentifier {
    let system_locale = system.system_locale();
    first_valid([system_locale.as_deref(), Some(FALLBACK_LOCALE)])
        .and_then(|tag| LanguageIdentifier::from_str(&tag).ok())
        .unwrap_or_default()
}
