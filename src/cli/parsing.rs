//! CLI parsing helpers for clap value parsers.

use ortho_config::{LanguageIdentifier, LocalizationArgs, Localizer};
use std::str::FromStr;

use crate::chain::Fault;
use crate::localization::keys;

pub(super) fn parse_locale(localizer: &dyn Localizer, s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(super::validation_message(
            localizer,
            keys::CLI_LOCALE_EMPTY,
            None,
            "locale must not be empty",
        ));
    }
    LanguageIdentifier::from_str(trimmed)
        .map(|_| trimmed.to_owned())
        .map_err(|_| {
            let mut args = LocalizationArgs::default();
            args.insert("locale", trimmed.to_owned().into());
            super::validation_message(
                localizer,
                keys::CLI_LOCALE_INVALID,
                Some(&args),
                &format!("invalid locale '{trimmed}'"),
            )
        })
}

/// Parse a `kind[:message]` fault.
pub(super) fn parse_fault(localizer: &dyn Localizer, s: &str) -> Result<Fault, String> {
    Fault::from_str(s).map_err(|_| {
        super::validation_message(
            localizer,
            keys::CHAIN_FAULT_EMPTY,
            None,
            "fault must name a kind",
        )
    })
}
