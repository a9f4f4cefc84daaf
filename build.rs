//! Build script: keeps the Fluent bundles aligned with the declared message
//! identifiers in `src/localization/keys.rs`.

use std::collections::BTreeSet;
use std::error::Error;
use std::fs;

const KEYS_PATH: &str = "src/localization/keys.rs";
const BUNDLES: [(&str, &str); 2] = [
    ("en-US", "locales/en-US/messages.ftl"),
    ("es-ES", "locales/es-ES/messages.ftl"),
];

/// Identifiers declared as `NAME => "identifier",` inside `define_keys!`.
fn declared_keys(source: &str) -> Result<BTreeSet<String>, Box<dyn Error>> {
    let body = source
        .split_once("define_keys! {")
        .map(|(_, rest)| rest)
        .ok_or("define_keys! invocation not found")?;
    let keys: BTreeSet<String> = body
        .lines()
        .filter_map(|line| line.split_once("=>"))
        .filter_map(|(_, value)| value.trim().strip_prefix('"'))
        .filter_map(|value| value.split_once('"'))
        .map(|(id, _)| id.to_owned())
        .collect();
    if keys.is_empty() {
        return Err(format!("no message identifiers declared in {KEYS_PATH}").into());
    }
    Ok(keys)
}

/// Message identifiers of a Fluent bundle. Comments, attributes, terms and
/// continuation lines are skipped.
fn bundle_keys(source: &str) -> BTreeSet<String> {
    source
        .lines()
        .filter(|line| !line.starts_with([' ', '\t', '#', '.', '-']))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}

fn audit() -> Result<(), Box<dyn Error>> {
    let declared = declared_keys(&fs::read_to_string(KEYS_PATH)?)?;
    let mut problems = Vec::new();
    for (locale, path) in BUNDLES {
        let present = bundle_keys(&fs::read_to_string(path)?);
        let missing: Vec<_> = declared.difference(&present).cloned().collect();
        let orphaned: Vec<_> = present.difference(&declared).cloned().collect();
        if !missing.is_empty() {
            problems.push(format!("missing in {locale}: {}", missing.join(", ")));
        }
        if !orphaned.is_empty() {
            problems.push(format!("orphaned in {locale}: {}", orphaned.join(", ")));
        }
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(format!("localization key audit failed:\n- {}", problems.join("\n- ")).into())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed={KEYS_PATH}");
    for (_, path) in BUNDLES {
        println!("cargo:rerun-if-changed={path}");
    }
    audit()
}
