//! CLI execution logic.
//!
//! Keeps `main` minimal: [`run`] wires the parsed [`Cli`] into a bundle
//! loader, reads the catalog and writes the selected message.

mod error;

pub use error::RunnerError;

use crate::catalog::CatalogReader;
use crate::chain::ChainCompiler;
use crate::cli::Cli;
use crate::key::KeyContext;
use crate::locale_resolution::{self, EnvProvider, SystemLocale};
use crate::store::{DirectoryLoader, LoaderParams};
use anyhow::{Context, Result};
use ortho_config::LanguageIdentifier;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Locale used for catalog messages.
///
/// `--locale` wins over `CAUSEWAY_LOCALE`, which wins over the system
/// locale; [`locale_resolution::FALLBACK_LOCALE`] applies when none of them
/// is a valid tag.
#[must_use]
pub fn catalog_locale(
    cli: &Cli,
    env: &impl EnvProvider,
    system: &impl SystemLocale,
) -> LanguageIdentifier {
    locale_resolution::resolve_locale(cli.locale.as_deref(), env, system)
        .and_then(|tag| LanguageIdentifier::from_str(&tag).ok())
        .unwrap_or_else(|| locale_resolution::default_locale(system))
}

/// Explain the chain given on the command line, writing the message to `out`.
///
/// # Errors
///
/// Returns an error when the default store or catalog cannot be loaded, when
/// the selected message cannot be produced, when nothing matches and no
/// fallback was given, or when writing fails.
pub fn run(cli: &Cli, locale: &LanguageIdentifier, out: &mut impl Write) -> Result<()> {
    debug!(locale = %locale, catalog = %cli.catalog, bundles = %cli.bundles, "explaining chain");
    let loader = Arc::new(DirectoryLoader::new(cli.bundles.clone()));
    let params = LoaderParams::new(loader)
        .with_locale(locale.clone())
        .with_strategy(cli.strategy());

    let mut context = KeyContext::new(params.clone());
    if let Some(name) = &cli.default_store {
        context = context.with_default_store(params.load(name)?);
    }

    let catalog = CatalogReader::new(ChainCompiler, context).read_file(&cli.catalog)?;
    debug!(entries = catalog.len(), "catalog loaded");

    let message = match &cli.fallback {
        Some(default) => catalog.message_or(&cli.faults, Some(locale), default)?,
        None => catalog
            .message(&cli.faults, Some(locale))?
            .ok_or_else(|| RunnerError::no_match(cli.faults.len()))?,
    };
    writeln!(out, "{message}").context("write message")?;
    Ok(())
}
