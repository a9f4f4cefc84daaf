//! Localized diagnostics and their English fallback.

use anyhow::{Result, ensure};
use causeway::catalog::CatalogReader;
use causeway::chain::ChainCompiler;
use causeway::key::{KeyContext, KeyReference};
use miette::Diagnostic;
use rstest::rstest;
use test_support::fluent::normalize_fluent_isolates;
use test_support::localizer::{localizer_test_lock, set_en_localizer, set_localizer_for};

fn malformed_message() -> String {
    let err = KeyReference::parse("errors/", &KeyContext::default()).expect_err("malformed");
    normalize_fluent_isolates(&err.to_string())
}

#[rstest]
fn key_errors_use_spanish_messages() -> Result<()> {
    let _lock = localizer_test_lock();
    let _guard = set_localizer_for("es-ES");
    let message = malformed_message();
    ensure!(
        message.contains("termina antes"),
        "expected Spanish translation, got: {message}"
    );
    Ok(())
}

#[rstest]
#[case("fr-FR")]
#[case("en-GB")]
fn unknown_locales_fall_back_to_english(#[case] locale: &str) -> Result<()> {
    let _lock = localizer_test_lock();
    let _guard = set_localizer_for(locale);
    let message = malformed_message();
    ensure!(
        message == "Message key \"errors/\" ends before a key was given.",
        "expected English fallback, got: {message}"
    );
    Ok(())
}

#[rstest]
fn messages_render_in_the_localizer_active_when_displayed() -> Result<()> {
    let _lock = localizer_test_lock();
    let err = {
        let _guard = set_localizer_for("es-ES");
        KeyReference::parse("", &KeyContext::default()).expect_err("empty key")
    };
    let _guard = set_en_localizer();
    let message = normalize_fluent_isolates(&err.to_string());
    ensure!(message == "Message key must not be empty.", "got: {message}");
    Ok(())
}

#[rstest]
fn catalog_errors_name_the_catalog_and_line() -> Result<()> {
    let _lock = localizer_test_lock();
    let _guard = set_en_localizer();
    let reader = CatalogReader::new(ChainCompiler, KeyContext::default());
    let err = reader
        .read_str("service.catalog", "*\n\n--\nkey\n")
        .expect_err("blank line inside patterns");
    let message = normalize_fluent_isolates(&err.to_string());
    ensure!(
        message == "An empty line is not permitted here in service.catalog at line 2.",
        "got: {message}"
    );
    let code = err.code().map(|code| code.to_string());
    ensure!(
        code.as_deref() == Some("causeway::catalog::blank_in_patterns"),
        "code: {code:?}"
    );
    let help = err.help().map(|help| normalize_fluent_isolates(&help.to_string()));
    ensure!(
        help.is_some_and(|text| text.contains("\"--\" line")),
        "missing format hint"
    );
    Ok(())
}
