//! Selection, rendering and registration behaviour of message catalogs.

use anyhow::{Result, ensure};
use causeway::catalog::{CatalogReader, MessageCatalog, MessageError, SharedCatalog};
use causeway::chain::{ChainCompiler, ChainPattern, Fault};
use causeway::key::{KeyContext, KeyReference};
use causeway::pattern::{Captures, Pattern};
use causeway::render::RenderError;
use causeway::store::{DirectoryLoader, LoadStrategy, LoaderParams, MapStore, MemoryLoader};
use ortho_config::LanguageIdentifier;
use rstest::{fixture, rstest};
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

/// Matches inputs that start with the given characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Prefix(&'static str);

impl Pattern for Prefix {
    type Item = char;
    type Match = Captures;

    fn looking_at(&self, input: &[char]) -> Option<Captures> {
        let wanted: Vec<char> = self.0.chars().collect();
        let matched = input.get(..wanted.len()).filter(|head| *head == wanted.as_slice())?;
        Some(Captures::new(json!(matched.iter().collect::<String>())))
    }
}

fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

fn literal(text: &str) -> KeyReference {
    KeyReference::literal(text).unwrap_or_else(|err| panic!("{text:?}: {err}"))
}

fn langid(tag: &str) -> LanguageIdentifier {
    LanguageIdentifier::from_str(tag).unwrap_or_else(|err| panic!("bad tag {tag}: {err}"))
}

#[fixture]
fn disk_catalog() -> MessageCatalog<ChainPattern> {
    let params = LoaderParams::new(Arc::new(DirectoryLoader::new("tests/data/bundles")))
        .with_locale(langid("en-US"));
    CatalogReader::new(ChainCompiler, KeyContext::new(params))
        .read_file("tests/data/messages.catalog")
        .unwrap_or_else(|err| panic!("read catalog: {err}"))
}

#[rstest]
fn whole_match_is_bound_as_group_zero() -> Result<()> {
    let mut catalog = MessageCatalog::new();
    catalog.register_one(literal("Hi, {{ _0 }}"), Prefix("a"));
    let message = catalog.message(&chars("abc"), None)?;
    ensure!(message.as_deref() == Some("Hi, a"), "got {message:?}");
    Ok(())
}

#[rstest]
fn unmatched_input_yields_none() -> Result<()> {
    let mut catalog = MessageCatalog::new();
    catalog.register_one(literal("Hi"), Prefix("a"));
    ensure!(catalog.message(&chars("zzz"), None)?.is_none(), "matched");
    ensure!(catalog.select(&chars("")).is_none(), "empty input matched");
    Ok(())
}

#[rstest]
fn registering_twice_changes_nothing() {
    let mut catalog = MessageCatalog::new();
    assert!(catalog.register_one(literal("first"), Prefix("a")));
    assert!(catalog.register_one(literal("second"), Prefix("b")));
    assert!(!catalog.register_one(literal("first"), Prefix("a")));

    let order: Vec<_> = catalog.entries().map(|(key, _)| key.key().to_owned()).collect();
    assert_eq!(order, ["first", "second"]);
    assert_eq!(catalog.patterns(&literal("first")).map(|set| set.len()), Some(1));
}

#[rstest]
fn later_patterns_join_an_existing_key_in_place() -> Result<()> {
    let mut catalog = MessageCatalog::new();
    catalog.register(literal("first"), [Prefix("a")]);
    catalog.register(literal("second"), [Prefix("b")]);
    catalog.register(literal("first"), [Prefix("b"), Prefix("c")]);

    let selected = catalog.select(&chars("b")).map(|selection| selection.key().key().to_owned());
    ensure!(selected.as_deref() == Some("first"), "got {selected:?}");
    Ok(())
}

#[rstest]
fn removal_keeps_the_remaining_order() {
    let mut catalog = MessageCatalog::new();
    catalog.register(literal("one"), [Prefix("a")]);
    catalog.register(literal("two"), [Prefix("a"), Prefix("b")]);
    catalog.register(literal("three"), [Prefix("c")]);

    assert!(catalog.remove_pattern(&literal("two"), &Prefix("a")));
    assert!(catalog.remove_key(&literal("one")));
    assert!(!catalog.remove_key(&literal("one")));

    let order: Vec<_> = catalog.entries().map(|(key, _)| key.key().to_owned()).collect();
    assert_eq!(order, ["two", "three"]);
    assert_eq!(catalog.len(), 2);
}

#[rstest]
fn message_or_covers_no_match_and_missing_keys() -> Result<()> {
    let loader = MemoryLoader::new()
        .with_bundle(&langid("en"), MapStore::new("errors").with_entry("gone", "Gone"))
        .with_bundle(&langid("es"), MapStore::new("errors").with_entry("other", "Otro"));
    let params = LoaderParams::new(Arc::new(loader))
        .with_locale(langid("en"))
        .with_strategy(LoadStrategy::Exact);
    let key = KeyReference::parse("errors/gone", &KeyContext::new(params))?;
    let mut catalog = MessageCatalog::new();
    catalog.register_one(literal("plain"), Prefix("p"));
    catalog.register_one(key, Prefix("g"));

    ensure!(catalog.message_or(&chars("x"), None, "default")? == "default", "no match");
    ensure!(catalog.message_or(&chars("p"), None, "default")? == "plain", "match");
    ensure!(catalog.message_or(&chars("g"), None, "default")? == "Gone", "store");
    let missing = catalog.message_or(&chars("g"), Some(&langid("es")), "default")?;
    ensure!(missing == "default", "missing key gave {missing:?}");
    let strict = catalog.message(&chars("g"), Some(&langid("es")));
    ensure!(
        matches!(strict, Err(MessageError::Key(ref err)) if err.is_not_found()),
        "got {strict:?}"
    );
    Ok(())
}

#[rstest]
fn in_store_keys_skip_the_loader() -> Result<()> {
    let store = Arc::new(MapStore::new("inline").with_literal("raw", "{{ kept }}"));
    let mut catalog = MessageCatalog::new();
    catalog.register_one(KeyReference::in_store(store, "raw")?, Prefix("r"));
    let message = catalog.message(&chars("r"), Some(&langid("es")))?;
    ensure!(message.as_deref() == Some("{{ kept }}"), "got {message:?}");
    Ok(())
}

#[rstest]
fn render_failures_are_not_swallowed() {
    let mut catalog = MessageCatalog::new();
    catalog.register_one(literal("Hi, {{ nobody }}"), Prefix("a"));
    let err = catalog
        .message_or(&chars("a"), None, "default")
        .expect_err("undefined placeholder");
    assert!(
        matches!(err, MessageError::Render(RenderError::Template { .. })),
        "got {err:?}"
    );
}

#[rstest]
fn chain_variables_reach_the_template(disk_catalog: MessageCatalog<ChainPattern>) -> Result<()> {
    let chain = [
        Fault::new("app.request", "request failed"),
        Fault::new("db.pool", "pool exhausted"),
    ];
    let message = disk_catalog.message(&chain, None)?;
    ensure!(
        message.as_deref() == Some("There was a database exception: pool exhausted"),
        "got {message:?}"
    );
    Ok(())
}

#[rstest]
fn messages_follow_the_requested_locale(disk_catalog: MessageCatalog<ChainPattern>) -> Result<()> {
    let chain = [Fault::new("app.request", ""), Fault::new("db.pool", "sin conexiones")];
    let message = disk_catalog.message(&chain, Some(&langid("es-ES")))?;
    ensure!(
        message.as_deref() == Some("Hubo una excepción de base de datos: sin conexiones"),
        "got {message:?}"
    );
    Ok(())
}

#[rstest]
fn second_group_explains_timeouts(disk_catalog: MessageCatalog<ChainPattern>) -> Result<()> {
    let chain = [
        Fault::new("app.request", ""),
        Fault::new("net.timeout", "billing"),
        Fault::new("io.eof", ""),
    ];
    let message = disk_catalog.message(&chain, None)?;
    ensure!(
        message.as_deref() == Some("Timed out waiting for billing"),
        "got {message:?}"
    );
    Ok(())
}

#[rstest]
fn snapshots_do_not_see_later_updates() -> Result<()> {
    let mut catalog = MessageCatalog::new();
    catalog.register_one(literal("before"), Prefix("a"));
    let shared = Arc::new(SharedCatalog::new(catalog));

    let before = shared.snapshot();
    shared.update(|catalog| catalog.register_one(literal("after"), Prefix("b")));

    ensure!(before.len() == 1, "old snapshot changed");
    ensure!(shared.snapshot().len() == 2, "update not published");

    let reader = Arc::clone(&shared);
    let seen = thread::spawn(move || reader.snapshot().message(&chars("b"), None))
        .join()
        .map_err(|_| anyhow::anyhow!("reader thread panicked"))??;
    ensure!(seen.as_deref() == Some("after"), "got {seen:?}");
    Ok(())
}
