//! Causeway core library.
//!
//! Causeway picks a localized, human-readable explanation for a sequence of
//! values, typically an error's cause chain. A [`catalog::MessageCatalog`]
//! maps message keys to ordered sets of patterns; the first pattern that
//! matches the start of the input selects its key, the key is resolved
//! against a localized [`store::TextStore`], and the text is rendered with
//! the values captured during matching.
//!
//! ```rust
//! use causeway::catalog::CatalogReader;
//! use causeway::chain::{ChainCompiler, Fault};
//! use causeway::key::KeyContext;
//!
//! let reader = CatalogReader::new(ChainCompiler, KeyContext::default());
//! let catalog = reader
//!     .read_str("inline", "app.* db.*\n--\nThe database said: {{ _2[0].message }}\n")
//!     .expect("catalog parses");
//! let chain = [Fault::new("app.request", "failed"), Fault::new("db.timeout", "too slow")];
//! let message = catalog.message(&chain, None).expect("renders");
//! assert_eq!(message.as_deref(), Some("The database said: too slow"));
//! ```

pub mod catalog;
pub mod chain;
pub mod cli;
mod cli_l10n;
pub mod cli_localization;
pub mod key;
pub mod locale_resolution;
pub mod localization;
pub mod pattern;
pub mod render;
pub mod runner;
pub mod store;
