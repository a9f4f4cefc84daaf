//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and the localized parsing entry
//! point used by the `causeway` binary.

use camino::Utf8PathBuf;
use clap::builder::{TypedValueParser, ValueParser};
use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use ortho_config::localize_clap_error_with_command;
use ortho_config::{LanguageIdentifier, LocalizationArgs, Localizer};
use std::ffi::OsString;
use std::str::FromStr;
use std::sync::Arc;

use crate::chain::Fault;
pub use crate::cli_l10n::locale_hint_from_args;
use crate::cli_l10n::localize_command;
use crate::store::LoadStrategy;
mod parsing;

use parsing::{parse_fault, parse_locale};

#[derive(Clone)]
struct LocalizedValueParser<F> {
    localizer: Arc<dyn Localizer>,
    parser: F,
}

impl<F> LocalizedValueParser<F> {
    fn new(localizer: Arc<dyn Localizer>, parser: F) -> Self {
        Self { localizer, parser }
    }
}

impl<F, T> TypedValueParser for LocalizedValueParser<F>
where
    F: Fn(&dyn Localizer, &str) -> Result<T, String> + Clone + Send + Sync + 'static,
    T: Send + Sync + Clone + 'static,
{
    type Value = T;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        _arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let mut command = cmd.clone();
        let Some(raw_value) = value.to_str() else {
            return Err(command.error(ErrorKind::InvalidUtf8, "invalid UTF-8"));
        };
        (self.parser)(self.localizer.as_ref(), raw_value)
            .map_err(|err| command.error(ErrorKind::ValueValidation, err))
    }
}

fn validation_message(
    localizer: &dyn Localizer,
    key: &'static str,
    args: Option<&LocalizationArgs<'_>>,
    fallback: &str,
) -> String {
    localizer.message(key, args, fallback)
}

/// Explain an error cause chain with a localized message from a catalog.
#[derive(Debug, Clone, Parser)]
#[command(name = "causeway", author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file mapping chain patterns to message keys.
    #[arg(long, value_name = "FILE")]
    pub catalog: Utf8PathBuf,

    /// Directory holding the .properties bundles.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub bundles: Utf8PathBuf,

    /// Bundle that relative message keys are looked up in.
    #[arg(long, value_name = "NAME")]
    pub default_store: Option<String>,

    /// Locale for messages and diagnostics (for example: en-US, es-ES).
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Only accept bundles for the exact locale, without fallback.
    #[arg(long)]
    pub exact: bool,

    /// Message printed when no catalog entry matches.
    #[arg(long, value_name = "TEXT")]
    pub fallback: Option<String>,

    /// Enable verbose diagnostic logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Faults as kind[:message], outermost first.
    #[arg(value_name = "FAULT", required = true)]
    pub faults: Vec<Fault>,
}

impl Cli {
    /// Bundle search strategy selected by `--exact`.
    #[must_use]
    pub const fn strategy(&self) -> LoadStrategy {
        if self.exact {
            LoadStrategy::Exact
        } else {
            LoadStrategy::Fallback
        }
    }

    /// The `--locale` value as a language identifier.
    ///
    /// `None` when the flag is absent. The value was validated during
    /// parsing, so a tag that still fails to parse is treated as absent.
    #[must_use]
    pub fn locale_id(&self) -> Option<LanguageIdentifier> {
        self.locale
            .as_deref()
            .and_then(|tag| LanguageIdentifier::from_str(tag).ok())
    }
}

/// Parse CLI arguments with localized clap output.
///
/// # Errors
///
/// Returns a `clap::Error` with localization applied when parsing fails.
pub fn parse_with_localizer_from<I, T>(
    iter: I,
    localizer: &Arc<dyn Localizer>,
) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = localize_command(Cli::command(), localizer.as_ref());
    command = configure_validation_parsers(command, localizer);
    let mut matches = command
        .try_get_matches_from_mut(iter)
        .map_err(|err| localize_clap_error_with_command(err, localizer.as_ref(), Some(&command)))?;
    Cli::from_arg_matches_mut(&mut matches).map_err(|clap_err| {
        let with_cmd = clap_err.with_cmd(&command);
        localize_clap_error_with_command(with_cmd, localizer.as_ref(), Some(&command))
    })
}

fn configure_validation_parsers(
    mut command: clap::Command,
    localizer: &Arc<dyn Localizer>,
) -> clap::Command {
    let locale_parser = LocalizedValueParser::new(Arc::clone(localizer), parse_locale);
    let fault_parser = LocalizedValueParser::new(Arc::clone(localizer), parse_fault);

    command = command.mut_arg("locale", |arg| {
        arg.value_parser(ValueParser::new(locale_parser))
    });
    command = command.mut_arg("faults", |arg| {
        arg.value_parser(ValueParser::new(fault_parser))
    });
    command
}
