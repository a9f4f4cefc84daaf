//! Shared helpers for causeway's integration tests.
//!
//! Covers temporary bundle trees, the process-wide diagnostics localizer,
//! deterministic locale providers and stable error formatting.

pub mod bundles;
pub mod error;
pub mod fluent;
pub mod locale_stubs;
pub mod localizer;

pub use bundles::BundleDir;
