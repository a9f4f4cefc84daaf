//! Reading catalog text into message catalogs.

use anyhow::{Context, Result, ensure};
use causeway::catalog::{CatalogError, CatalogErrorKind, CatalogReader, MessageCatalog};
use causeway::chain::{ChainCompiler, ChainPattern, Fault};
use causeway::key::{KeyContext, KeyError};
use causeway::store::{DirectoryLoader, LoaderParams};
use rstest::{fixture, rstest};
use std::io::Cursor;
use std::sync::Arc;
use test_support::error::display_error_chain;
use test_support::fluent::normalize_fluent_isolates;

#[fixture]
fn reader() -> CatalogReader<ChainCompiler> {
    CatalogReader::new(ChainCompiler, KeyContext::default())
}

#[fixture]
fn disk_reader() -> CatalogReader<ChainCompiler> {
    let params = LoaderParams::new(Arc::new(DirectoryLoader::new("tests/data/bundles")));
    CatalogReader::new(ChainCompiler, KeyContext::new(params))
}

fn chain(kinds: &[&str]) -> Vec<Fault> {
    kinds.iter().map(|kind| Fault::new(*kind, "detail")).collect()
}

fn keys(catalog: &MessageCatalog<ChainPattern>) -> Vec<String> {
    catalog.entries().map(|(key, _)| key.to_string()).collect()
}

fn message(catalog: &MessageCatalog<ChainPattern>, kinds: &[&str]) -> Result<Option<String>> {
    Ok(catalog.message(&chain(kinds), None)?)
}

#[rstest]
fn earlier_groups_take_precedence(reader: CatalogReader<ChainCompiler>) -> Result<()> {
    let catalog = reader.read_str(
        "precedence",
        "*... db.* $\n--\nThere was a database exception.\n\n*\n--\nAn unknown error occurred\n",
    )?;
    ensure!(
        keys(&catalog) == ["There was a database exception.", "An unknown error occurred"],
        "order: {:?}",
        keys(&catalog)
    );
    let database = message(&catalog, &["app.request", "db.access"])?;
    ensure!(
        database.as_deref() == Some("There was a database exception."),
        "got {database:?}"
    );
    let other = message(&catalog, &["app.request", "net.reset"])?;
    ensure!(other.as_deref() == Some("An unknown error occurred"), "got {other:?}");
    Ok(())
}

#[rstest]
fn group_at_end_of_input_is_finalized(reader: CatalogReader<ChainCompiler>) -> Result<()> {
    let catalog = reader.read_str("eof", "*\n--\nLast words")?;
    ensure!(keys(&catalog) == ["Last words"], "got {:?}", keys(&catalog));
    Ok(())
}

#[rstest]
fn comments_and_blank_lines_between_groups_are_skipped(
    reader: CatalogReader<ChainCompiler>,
) -> Result<()> {
    let text = "# heading\n\n\n# another\napp.*\n# about db\ndb.*\n--\n\nFirst\n\n# trailer\n";
    let catalog = reader.read_str("comments", text)?;
    let (key, patterns) = catalog.entries().next().context("one entry")?;
    ensure!(key.key() == "First", "key: {key}");
    let sources: Vec<_> = patterns.iter().map(ChainPattern::as_str).collect();
    ensure!(sources == ["app.*", "db.*"], "patterns: {sources:?}");
    Ok(())
}

#[rstest]
fn multi_line_keys_are_joined(reader: CatalogReader<ChainCompiler>) -> Result<()> {
    let catalog = reader.read_str("multi", "*\n--\nFirst line\n  second line  \n\n")?;
    let (key, _) = catalog.entries().next().context("one entry")?;
    let expected = ["First line", "second line"].join(if cfg!(windows) { "\r\n" } else { "\n" });
    ensure!(key.key() == expected, "key: {:?}", key.key());
    Ok(())
}

#[rstest]
fn repeated_groups_merge_into_the_first_registration(
    reader: CatalogReader<ChainCompiler>,
) -> Result<()> {
    let text = "a.*\n--\nShared\n\nb.*\n--\nOther\n\na.*\nc.*\n--\nShared\n";
    let catalog = reader.read_str("merge", text)?;
    ensure!(keys(&catalog) == ["Shared", "Other"], "order: {:?}", keys(&catalog));
    let (_, patterns) = catalog.entries().next().context("first entry")?;
    let sources: Vec<_> = patterns.iter().map(ChainPattern::as_str).collect();
    ensure!(sources == ["a.*", "c.*"], "patterns: {sources:?}");
    Ok(())
}

fn read_error(reader: &CatalogReader<ChainCompiler>, text: &str) -> CatalogError {
    reader
        .read_str("broken", text)
        .expect_err("catalog should be rejected")
}

#[rstest]
#[case("--\nkey\n", 1)]
#[case("*\n--\nkey\n\n--\n", 5)]
fn separator_outside_a_group_is_rejected(
    reader: CatalogReader<ChainCompiler>,
    #[case] text: &str,
    #[case] line: usize,
) {
    let err = read_error(&reader, text);
    assert!(
        matches!(err.kind(), CatalogErrorKind::MisplacedSeparator { .. }),
        "got {err:?}"
    );
    assert_eq!(err.line(), Some(line));
}

#[rstest]
fn blank_line_inside_patterns_is_rejected(reader: CatalogReader<ChainCompiler>) {
    let err = read_error(&reader, "# x\napp.*\n\ndb.*\n--\nkey\n");
    assert!(
        matches!(err.kind(), CatalogErrorKind::BlankInPatterns { .. }),
        "got {err:?}"
    );
    assert_eq!(err.line(), Some(3));
}

#[rstest]
#[case("\n\napp.*\ndb.*\n", 3)]
#[case("app.*\n--\n\n\n", 1)]
fn unterminated_groups_are_rejected(
    reader: CatalogReader<ChainCompiler>,
    #[case] text: &str,
    #[case] line: usize,
) {
    let err = read_error(&reader, text);
    assert!(
        matches!(err.kind(), CatalogErrorKind::UnterminatedGroup { .. }),
        "got {err:?}"
    );
    assert_eq!(err.line(), Some(line));
}

#[rstest]
fn invalid_patterns_report_their_line(reader: CatalogReader<ChainCompiler>) {
    let err = read_error(&reader, "*\n--\nok\n\napp.[\n--\nkey\n");
    assert!(matches!(err.kind(), CatalogErrorKind::Pattern { .. }), "got {err:?}");
    assert_eq!(err.line(), Some(5));
}

#[rstest]
fn unresolvable_keys_report_their_line(disk_reader: CatalogReader<ChainCompiler>) {
    let err = read_error(&disk_reader, "*\n--\n\nerrors/absent\n");
    match err.kind() {
        CatalogErrorKind::Key { line, source, .. } => {
            assert_eq!(*line, 4);
            assert!(source.is_not_found(), "got {source:?}");
        }
        other => panic!("expected a key error, got {other:?}"),
    }
    let chain = normalize_fluent_isolates(&display_error_chain(&err));
    assert!(chain.contains("has no message for key \"absent\""), "chain: {chain}");
}

#[rstest]
fn malformed_keys_are_wrapped(reader: CatalogReader<ChainCompiler>) {
    let err = read_error(&reader, "*\n--\nerrors/\n");
    assert!(
        matches!(
            err.kind(),
            CatalogErrorKind::Key {
                source: KeyError::Malformed { .. },
                ..
            }
        ),
        "got {err:?}"
    );
}

#[rstest]
fn failed_reads_register_nothing(reader: CatalogReader<ChainCompiler>) -> Result<()> {
    let mut catalog = reader.read_str("base", "*\n--\nBase\n")?;
    let result = reader.read_into("more", "a.*\n--\nAdded\n\n--\n", &mut catalog);
    ensure!(result.is_err(), "broken text should fail");
    ensure!(keys(&catalog) == ["Base"], "catalog changed: {:?}", keys(&catalog));
    Ok(())
}

#[rstest]
fn read_into_appends_after_existing_entries(reader: CatalogReader<ChainCompiler>) -> Result<()> {
    let mut catalog = reader.read_str("base", "*\n--\nBase\n")?;
    let count = reader.read_into("more", "a.*\n--\nFirst\n\nb.*\n--\nSecond\n", &mut catalog)?;
    ensure!(count == 2, "groups read: {count}");
    ensure!(
        keys(&catalog) == ["Base", "First", "Second"],
        "order: {:?}",
        keys(&catalog)
    );
    Ok(())
}

#[rstest]
fn reads_from_any_reader(reader: CatalogReader<ChainCompiler>) -> Result<()> {
    let catalog = reader.read("cursor", Cursor::new("*\n--\nFrom a cursor\n"))?;
    ensure!(catalog.len() == 1, "entries: {}", catalog.len());
    Ok(())
}

#[rstest]
fn reads_catalog_files(disk_reader: CatalogReader<ChainCompiler>) -> Result<()> {
    let catalog = disk_reader.read_file("tests/data/messages.catalog")?;
    ensure!(
        keys(&catalog) == ["errors/database", "errors/timeout", "An unknown error occurred"],
        "order: {:?}",
        keys(&catalog)
    );
    Ok(())
}

#[rstest]
fn missing_catalog_files_are_io_errors(reader: CatalogReader<ChainCompiler>) {
    let err = reader
        .read_file("tests/data/no-such.catalog")
        .expect_err("missing file");
    assert!(matches!(err.kind(), CatalogErrorKind::Io { .. }), "got {err:?}");
    assert_eq!(err.line(), None);
}
