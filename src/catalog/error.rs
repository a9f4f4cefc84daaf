//! Errors raised while reading catalog text.

use crate::key::KeyError;
use crate::localization::{self, LocalizedMessage, keys};
use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use std::fmt;
use thiserror::Error;

/// Where in a catalog an error was found.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Site<'a> {
    pub(crate) name: &'a str,
    pub(crate) text: &'a str,
    pub(crate) line: usize,
    pub(crate) span: SourceSpan,
}

impl Site<'_> {
    fn source(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.text.to_owned())
    }
}

/// The specific catalog failure.
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogErrorKind {
    /// A `--` line appeared where a pattern was expected.
    #[error("{message}")]
    #[diagnostic(code(causeway::catalog::misplaced_separator))]
    MisplacedSeparator {
        /// Catalog display name.
        name: String,
        /// 1-based line of the separator.
        line: usize,
        /// Catalog text.
        #[source_code]
        src: NamedSource<String>,
        /// Span of the offending line.
        #[label]
        span: SourceSpan,
        /// Reminder of the group layout.
        #[help]
        help: LocalizedMessage,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// A blank line interrupted a group before its `--` line.
    #[error("{message}")]
    #[diagnostic(code(causeway::catalog::blank_in_patterns))]
    BlankInPatterns {
        /// Catalog display name.
        name: String,
        /// 1-based line of the blank line.
        line: usize,
        /// Catalog text.
        #[source_code]
        src: NamedSource<String>,
        /// Span of the offending line.
        #[label]
        span: SourceSpan,
        /// Reminder of the group layout.
        #[help]
        help: LocalizedMessage,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// The text ended before a group received its message key.
    #[error("{message}")]
    #[diagnostic(code(causeway::catalog::unterminated_group))]
    UnterminatedGroup {
        /// Catalog display name.
        name: String,
        /// 1-based line where the group starts.
        line: usize,
        /// Catalog text.
        #[source_code]
        src: NamedSource<String>,
        /// Span of the group's first line.
        #[label]
        span: SourceSpan,
        /// Reminder of the group layout.
        #[help]
        help: LocalizedMessage,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// A pattern line did not compile.
    #[error("{message}")]
    #[diagnostic(code(causeway::catalog::pattern))]
    Pattern {
        /// Catalog display name.
        name: String,
        /// 1-based line of the pattern.
        line: usize,
        /// Catalog text.
        #[source_code]
        src: NamedSource<String>,
        /// Span of the pattern line.
        #[label]
        span: SourceSpan,
        /// Compiler failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// A group's message key did not parse or resolve.
    #[error("{message}")]
    #[diagnostic(code(causeway::catalog::key))]
    Key {
        /// Catalog display name.
        name: String,
        /// 1-based line where the key text starts.
        line: usize,
        /// Catalog text.
        #[source_code]
        src: NamedSource<String>,
        /// Span of the key text.
        #[label]
        span: SourceSpan,
        /// Key failure.
        #[source]
        #[diagnostic_source]
        source: KeyError,
        /// Localised error message.
        message: LocalizedMessage,
    },
    /// The catalog could not be read.
    #[error("{message}")]
    #[diagnostic(code(causeway::catalog::io))]
    Io {
        /// Catalog display name.
        name: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
        /// Localised error message.
        message: LocalizedMessage,
    },
}

/// Failure to read a catalog.
///
/// The details live in [`CatalogErrorKind`], reachable through
/// [`CatalogError::kind`].
#[derive(Debug, Error)]
#[error(transparent)]
pub struct CatalogError(Box<CatalogErrorKind>);

impl CatalogError {
    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &CatalogErrorKind {
        &self.0
    }

    /// Consume the error, yielding its details.
    #[must_use]
    pub fn into_kind(self) -> CatalogErrorKind {
        *self.0
    }

    /// 1-based catalog line the error refers to, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match &*self.0 {
            CatalogErrorKind::MisplacedSeparator { line, .. }
            | CatalogErrorKind::BlankInPatterns { line, .. }
            | CatalogErrorKind::UnterminatedGroup { line, .. }
            | CatalogErrorKind::Pattern { line, .. }
            | CatalogErrorKind::Key { line, .. } => Some(*line),
            CatalogErrorKind::Io { .. } => None,
        }
    }

    pub(crate) fn misplaced_separator(site: &Site<'_>) -> Self {
        Self::from(CatalogErrorKind::MisplacedSeparator {
            name: site.name.to_owned(),
            line: site.line,
            src: site.source(),
            span: site.span,
            help: localization::message(keys::CATALOG_FORMAT_HINT),
            message: located(keys::CATALOG_MISPLACED_SEPARATOR, site),
        })
    }

    pub(crate) fn blank_in_patterns(site: &Site<'_>) -> Self {
        Self::from(CatalogErrorKind::BlankInPatterns {
            name: site.name.to_owned(),
            line: site.line,
            src: site.source(),
            span: site.span,
            help: localization::message(keys::CATALOG_FORMAT_HINT),
            message: located(keys::CATALOG_BLANK_IN_PATTERNS, site),
        })
    }

    pub(crate) fn unterminated_group(site: &Site<'_>) -> Self {
        Self::from(CatalogErrorKind::UnterminatedGroup {
            name: site.name.to_owned(),
            line: site.line,
            src: site.source(),
            span: site.span,
            help: localization::message(keys::CATALOG_FORMAT_HINT),
            message: located(keys::CATALOG_UNTERMINATED_GROUP, site),
        })
    }

    pub(crate) fn pattern(
        site: &Site<'_>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::from(CatalogErrorKind::Pattern {
            name: site.name.to_owned(),
            line: site.line,
            src: site.source(),
            span: site.span,
            source: source.into(),
            message: located(keys::CATALOG_PATTERN, site),
        })
    }

    pub(crate) fn key(site: &Site<'_>, source: KeyError) -> Self {
        Self::from(CatalogErrorKind::Key {
            name: site.name.to_owned(),
            line: site.line,
            src: site.source(),
            span: site.span,
            source,
            message: located(keys::CATALOG_KEY, site),
        })
    }

    pub(crate) fn io(name: &str, source: std::io::Error) -> Self {
        Self::from(CatalogErrorKind::Io {
            name: name.to_owned(),
            source,
            message: localization::message(keys::CATALOG_IO).with_arg("name", name),
        })
    }
}

fn located(key: &'static str, site: &Site<'_>) -> LocalizedMessage {
    localization::message(key)
        .with_arg("name", site.name)
        .with_arg("line", site.line)
}

impl From<CatalogErrorKind> for CatalogError {
    fn from(kind: CatalogErrorKind) -> Self {
        Self(Box::new(kind))
    }
}

impl Diagnostic for CatalogError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.0.source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.0.labels()
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        self.0.diagnostic_source()
    }
}
