//! Localization of clap help and usage text.
//!
//! Kept apart from [`crate::cli`] so the argument definitions stay readable.

use clap::Command;
use ortho_config::{LocalizationArgs, Localizer};
use std::ffi::OsString;

use crate::localization::keys;

fn usage_body(usage: &str) -> &str {
    usage.strip_prefix("Usage: ").unwrap_or(usage)
}

pub(crate) fn localize_command(mut command: Command, localizer: &dyn Localizer) -> Command {
    let rendered_usage = command.clone().render_usage().to_string();
    let fallback_usage = usage_body(&rendered_usage).to_owned();
    let mut args = LocalizationArgs::default();
    args.insert("binary", command.get_name().to_owned().into());
    args.insert("usage", fallback_usage.clone().into());
    let usage = localizer.message(keys::CLI_USAGE, Some(&args), &fallback_usage);
    command = command.override_usage(usage);

    if let Some(about) = command.get_about().map(ToString::to_string) {
        command = command.about(localizer.message(keys::CLI_ABOUT, None, &about));
    } else if let Some(message) = localizer.lookup(keys::CLI_ABOUT, None) {
        command = command.about(message);
    }

    command.mut_args(|arg| {
        let Some(key) = flag_help_key(arg.get_id().as_str()) else {
            return arg;
        };
        if let Some(help) = arg.get_help().map(ToString::to_string) {
            let message = localizer.message(key, None, &help);
            return arg.help(message);
        }
        if let Some(message) = localizer.lookup(key, None) {
            return arg.help(message);
        }
        arg
    })
}

fn flag_help_key(arg_id: &str) -> Option<&'static str> {
    match arg_id {
        "catalog" => Some(keys::CLI_FLAG_CATALOG_HELP),
        "bundles" => Some(keys::CLI_FLAG_BUNDLES_HELP),
        "default_store" => Some(keys::CLI_FLAG_DEFAULT_STORE_HELP),
        "locale" => Some(keys::CLI_FLAG_LOCALE_HELP),
        "exact" => Some(keys::CLI_FLAG_EXACT_HELP),
        "fallback" => Some(keys::CLI_FLAG_FALLBACK_HELP),
        "verbose" => Some(keys::CLI_FLAG_VERBOSE_HELP),
        "faults" => Some(keys::CLI_FLAG_FAULTS_HELP),
        _ => None,
    }
}

/// Inspect raw arguments and extract the `--locale` value when present.
///
/// Runs before clap so that clap's own errors can already be localized.
/// When several `--locale` flags are given, the last one wins.
#[must_use]
pub fn locale_hint_from_args(args: &[OsString]) -> Option<String> {
    let mut hint = None;
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        let text = arg.to_string_lossy();
        if text == "--" {
            break;
        }
        if text == "--locale" {
            let Some(next) = iter.peek() else {
                break;
            };
            let next_text = next.to_string_lossy();
            if next_text == "--" {
                break;
            }
            hint = Some(next_text.into_owned());
            iter.next();
            continue;
        }
        if let Some(value) = text.strip_prefix("--locale=") {
            hint = Some(value.to_owned());
        }
    }
    hint
}
