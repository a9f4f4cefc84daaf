//! Test helpers for localizer configuration.

use causeway::cli_localization;
use causeway::localization::{self, LocalizerGuard};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Mutex used to serialize process-wide localizer mutations in tests.
pub static LOCALIZER_TEST_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Acquire the global localizer test lock.
pub fn localizer_test_lock() -> Result<MutexGuard<'static, ()>, PoisonError<MutexGuard<'static, ()>>> {
    LOCALIZER_TEST_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
}

/// Install the diagnostics localizer for `locale` until the guard drops.
///
/// Hold [`localizer_test_lock`] while the guard is alive; the localizer is
/// shared by every test in the process.
pub fn set_localizer_for(locale: &str) -> LocalizerGuard {
    let localizer = cli_localization::build_localizer(Some(locale));
    localization::set_localizer_for_tests(Arc::from(localizer))
}

/// Install the English localizer for tests.
pub fn set_en_localizer() -> LocalizerGuard {
    set_localizer_for("en-US")
}
