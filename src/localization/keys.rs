//! Fluent message identifiers used by causeway diagnostics.
//!
//! Every identifier declared here must exist in both `locales/en-US` and
//! `locales/es-ES`; `build.rs` audits the two bundles against this list.

macro_rules! define_keys {
    ($($(#[$meta:meta])* $name:ident => $value:literal,)+) => {
        $(
            $(#[$meta])*
            pub const $name: &str = $value;
        )+

        /// Every declared message identifier.
        pub const ALL_KEYS: &[&str] = &[$($value),+];
    };
}

define_keys! {
    /// Key text was empty or whitespace.
    KEY_MALFORMED_EMPTY => "key-malformed-empty",
    /// Key text consisted of a lone separator.
    KEY_MALFORMED_SEPARATOR_ONLY => "key-malformed-separator-only",
    /// Key text ended before a key was scanned.
    KEY_MALFORMED_TRUNCATED => "key-malformed-truncated",
    /// A store does not define the requested key.
    KEY_NOT_FOUND => "key-not-found",
    /// No bundle exists for a store name and locale.
    STORE_NOT_FOUND => "store-not-found",
    /// A bundle file could not be read.
    STORE_IO => "store-io",
    /// A bundle file contained an invalid escape.
    STORE_PARSE => "store-parse",
    /// A `--` separator appeared outside a pattern group.
    CATALOG_MISPLACED_SEPARATOR => "catalog-misplaced-separator",
    /// A blank line interrupted a pattern group.
    CATALOG_BLANK_IN_PATTERNS => "catalog-blank-in-patterns",
    /// The catalog ended inside a group.
    CATALOG_UNTERMINATED_GROUP => "catalog-unterminated-group",
    /// A pattern line failed to compile.
    CATALOG_PATTERN => "catalog-pattern",
    /// A group's key text failed to resolve.
    CATALOG_KEY => "catalog-key",
    /// The catalog file could not be read.
    CATALOG_IO => "catalog-io",
    /// Help text pointing at the catalog grammar.
    CATALOG_FORMAT_HINT => "catalog-format-hint",
    /// Template evaluation failed.
    RENDER_TEMPLATE => "render-template",
    /// A chain pattern had no steps.
    CHAIN_PATTERN_EMPTY => "chain-pattern-empty",
    /// A chain pattern step had an invalid kind glob.
    CHAIN_PATTERN_INVALID_GLOB => "chain-pattern-invalid-glob",
    /// A chain pattern step named no fault kind.
    CHAIN_PATTERN_MISSING_KIND => "chain-pattern-missing-kind",
    /// A chain pattern step had an invalid variable binding.
    CHAIN_PATTERN_INVALID_BINDING => "chain-pattern-invalid-binding",
    /// The end anchor appeared before the final step.
    CHAIN_PATTERN_MISPLACED_ANCHOR => "chain-pattern-misplaced-anchor",
    /// Fault text named no kind.
    CHAIN_FAULT_EMPTY => "chain-fault-empty",
    /// Usage line of the command.
    CLI_USAGE => "cli-usage",
    /// Short description of the command.
    CLI_ABOUT => "cli-about",
    /// Help for `--catalog`.
    CLI_FLAG_CATALOG_HELP => "cli-flag-catalog-help",
    /// Help for `--bundles`.
    CLI_FLAG_BUNDLES_HELP => "cli-flag-bundles-help",
    /// Help for `--default-store`.
    CLI_FLAG_DEFAULT_STORE_HELP => "cli-flag-default-store-help",
    /// Help for `--locale`.
    CLI_FLAG_LOCALE_HELP => "cli-flag-locale-help",
    /// Help for `--exact`.
    CLI_FLAG_EXACT_HELP => "cli-flag-exact-help",
    /// Help for `--fallback`.
    CLI_FLAG_FALLBACK_HELP => "cli-flag-fallback-help",
    /// Help for `--verbose`.
    CLI_FLAG_VERBOSE_HELP => "cli-flag-verbose-help",
    /// Help for the positional faults.
    CLI_FLAG_FAULTS_HELP => "cli-flag-faults-help",
    /// Locale flag was empty.
    CLI_LOCALE_EMPTY => "cli-locale-empty",
    /// Locale flag was not a valid language tag.
    CLI_LOCALE_INVALID => "cli-locale-invalid",
    /// No catalog entry matched the supplied chain.
    CLI_NO_MATCH => "cli-no-match",
}
