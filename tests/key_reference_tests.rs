//! Key references resolved against bundles on disk.

use anyhow::{Context, Result, ensure};
use causeway::key::{KeyContext, KeyError, KeyReference};
use causeway::store::{DirectoryLoader, LoadStrategy, LoaderParams, RawText, StoreError};
use ortho_config::LanguageIdentifier;
use rstest::{fixture, rstest};
use std::str::FromStr;
use std::sync::Arc;

const BUNDLES: &str = "tests/data/bundles";

fn langid(tag: &str) -> LanguageIdentifier {
    LanguageIdentifier::from_str(tag).unwrap_or_else(|err| panic!("bad tag {tag}: {err}"))
}

#[fixture]
fn params() -> LoaderParams {
    LoaderParams::new(Arc::new(DirectoryLoader::new(BUNDLES))).with_locale(langid("en-US"))
}

#[fixture]
fn context(params: LoaderParams) -> KeyContext {
    KeyContext::new(params)
}

#[rstest]
fn named_store_key_resolves_to_its_text(context: KeyContext) -> Result<()> {
    let key = KeyReference::parse("a.b.c.d/key", &context)?;
    ensure!(key.store_name() == Some("a.b.c.d"), "store name: {key:?}");
    ensure!(key.key() == "key", "key: {key:?}");
    let text = key.resolve(None)?;
    ensure!(text == RawText::Templated("value".into()), "got {text:?}");
    Ok(())
}

#[rstest]
#[case("xyz")]
#[case("There was a database exception.")]
#[case("Disk full: retry later")]
fn storeless_keys_resolve_to_themselves(context: KeyContext, #[case] text: &str) -> Result<()> {
    let key = KeyReference::parse(text, &context)?;
    ensure!(key.store().is_none(), "{text:?} bound a store");
    ensure!(key.resolve(None)?.as_str() == text, "{text:?} changed");
    Ok(())
}

#[rstest]
fn whitespace_inside_the_store_name_makes_a_literal(context: KeyContext) -> Result<()> {
    let key = KeyReference::parse("  a.b.c.d  /   key ", &context)?;
    ensure!(key.store().is_none(), "bound a store: {key:?}");
    ensure!(key.key() == "a.b.c.d  /   key", "key: {:?}", key.key());
    Ok(())
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("/")]
#[case("a.b.c.d/")]
fn malformed_text_is_rejected(context: KeyContext, #[case] text: &str) {
    let err = KeyReference::parse(text, &context).expect_err("malformed key");
    assert!(matches!(err, KeyError::Malformed { .. }), "{text:?} gave {err:?}");
}

#[rstest]
fn lone_separator_is_rejected_even_with_a_default_store(params: LoaderParams) -> Result<()> {
    let store = params.load("errors").context("open errors bundle")?;
    let context = KeyContext::new(params).with_default_store(store);
    let err = KeyReference::parse("/", &context).expect_err("malformed key");
    ensure!(matches!(err, KeyError::Malformed { .. }), "got {err:?}");
    Ok(())
}

#[rstest]
fn missing_key_in_named_store_fails_fast(context: KeyContext) {
    let err = KeyReference::parse("a.b.c.d/absent", &context).expect_err("missing key");
    assert!(err.is_not_found(), "got {err:?}");
}

#[rstest]
fn missing_store_reports_the_store_error(context: KeyContext) {
    let err = KeyReference::parse("no.such.store/key", &context).expect_err("missing store");
    assert!(
        matches!(err, KeyError::Store(StoreError::NotFound { ref name, .. }) if name == "no.such.store"),
        "got {err:?}"
    );
}

#[rstest]
fn named_store_is_reopened_for_another_locale(context: KeyContext) -> Result<()> {
    let key = KeyReference::parse("errors/unknown", &context)?;
    ensure!(key.resolve(None)?.as_str() == "Something went wrong", "root text");
    let spanish = key.resolve(Some(&langid("es-MX")))?;
    ensure!(spanish.as_str() == "Algo salió mal", "got {spanish:?}");
    Ok(())
}

#[rstest]
fn key_absent_from_a_reopened_locale_falls_back_to_the_root_bundle(
    context: KeyContext,
) -> Result<()> {
    let key = KeyReference::parse("errors/timeout", &context)?;
    let text = key.resolve(Some(&langid("es")))?;
    ensure!(
        text.as_str() == "Timed out waiting for {{ timeout.message }}",
        "got {text:?}"
    );
    Ok(())
}

#[rstest]
fn exact_strategy_rejects_missing_locale_bundles(params: LoaderParams) {
    let exact = params.with_strategy(LoadStrategy::Exact).with_locale(langid("fr"));
    let context = KeyContext::new(exact);
    let err = KeyReference::parse("errors/unknown", &context).expect_err("no fr bundle");
    assert!(
        matches!(err, KeyError::Store(StoreError::NotFound { .. })),
        "got {err:?}"
    );
}

#[rstest]
fn relative_keys_bind_to_the_default_store(params: LoaderParams) -> Result<()> {
    let store = params.load("errors").context("open errors bundle")?;
    let context = KeyContext::new(params).with_default_store(store);

    let relative = KeyReference::parse("/unknown", &context)?;
    ensure!(relative.store_id().is_some(), "unbound: {relative:?}");
    ensure!(relative.resolve(None)?.as_str() == "Something went wrong", "relative text");

    let bare = KeyReference::parse("unknown", &context)?;
    ensure!(bare == relative, "{bare:?} != {relative:?}");

    let literal = KeyReference::parse("not a key in the store", &context)?;
    ensure!(literal.store().is_none(), "bound: {literal:?}");
    Ok(())
}

#[rstest]
fn equality_follows_key_and_store_identity(context: KeyContext) -> Result<()> {
    let first = KeyReference::parse("a.b.c.d/key", &context)?;
    let second = KeyReference::parse("a.b.c.d/ key", &context)?;
    let literal = KeyReference::parse("key", &context)?;
    ensure!(first == second, "same store and key should be equal");
    ensure!(first != literal, "storeless key should differ");
    ensure!(first.to_string() == "a.b.c.d/key", "display: {first}");
    Ok(())
}
