//! Application entry point.
//!
//! Installs the diagnostics localizer, parses command-line arguments and
//! delegates execution to [`runner::run`].

use causeway::cli_localization::build_localizer;
use causeway::locale_resolution::{SysLocale, SystemEnv, resolve_locale};
use causeway::{cli, localization, runner};
use ortho_config::Localizer;
use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();
    let hint = cli::locale_hint_from_args(&args);
    let ui_locale = resolve_locale(hint.as_deref(), &SystemEnv, &SysLocale);
    let localizer: Arc<dyn Localizer> = Arc::from(build_localizer(ui_locale.as_deref()));
    localization::set_localizer(Arc::clone(&localizer));

    let parsed = match cli::parse_with_localizer_from(args, &localizer) {
        Ok(parsed) => parsed,
        Err(err) => err.exit(),
    };
    let max_level = if parsed.verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();

    let locale = runner::catalog_locale(&parsed, &SystemEnv, &SysLocale);
    let stdout = io::stdout();
    match runner::run(&parsed, &locale, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let report = format!("{err:#}");
            tracing::error!(error = %report, "causeway failed");
            ExitCode::FAILURE
        }
    }
}
