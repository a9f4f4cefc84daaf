//! Builds the Fluent localizer used for causeway diagnostics.
//!
//! English ships as the base bundle. Spanish is layered over it so any
//! message the Spanish bundle lacks still renders in English.

use ortho_config::{
    FluentLocalizer, FluentLocalizerBuilder, LanguageIdentifier, LocalizationArgs, Localizer,
    NoOpLocalizer,
};
use std::str::FromStr;

const CAUSEWAY_EN_US: &str = include_str!("../locales/en-US/messages.ftl");
const CAUSEWAY_ES_ES: &str = include_str!("../locales/es-ES/messages.ftl");

struct LayeredLocalizer {
    primary: Box<dyn Localizer>,
    fallback: Box<dyn Localizer>,
}

impl Localizer for LayeredLocalizer {
    fn lookup(&self, id: &str, args: Option<&LocalizationArgs<'_>>) -> Option<String> {
        self.primary
            .lookup(id, args)
            .or_else(|| self.fallback.lookup(id, args))
    }
}

fn english() -> Box<dyn Localizer> {
    FluentLocalizer::with_en_us_defaults([CAUSEWAY_EN_US]).map_or_else(
        |_| Box::new(NoOpLocalizer::new()) as Box<dyn Localizer>,
        |localizer| Box::new(localizer) as Box<dyn Localizer>,
    )
}

fn consumer_bundle(
    builder: FluentLocalizerBuilder,
    resource: &'static str,
) -> Option<Box<dyn Localizer>> {
    builder
        .with_consumer_resources([resource])
        .disable_defaults()
        .try_build()
        .ok()
        .map(|localizer| Box::new(localizer) as Box<dyn Localizer>)
}

/// Build the diagnostics localizer for `preferred_locale`.
///
/// Unknown or unparsable locales fall back to English.
#[must_use]
pub fn build_localizer(preferred_locale: Option<&str>) -> Box<dyn Localizer> {
    let fallback = english();
    let Some(locale) = preferred_locale.and_then(|tag| LanguageIdentifier::from_str(tag).ok())
    else {
        return fallback;
    };
    if locale.language.as_str() != "es" {
        return fallback;
    }
    match consumer_bundle(FluentLocalizer::builder(locale), CAUSEWAY_ES_ES) {
        Some(primary) => Box::new(LayeredLocalizer { primary, fallback }),
        None => fallback,
    }
}
