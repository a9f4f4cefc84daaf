//! Reader for the line-oriented catalog format.
//!
//! ```text
//! # Database failures first.
//! app.* @cause:db.*
//! db.*
//! --
//! errors/database
//!
//! *
//! --
//! An unknown error occurred
//! ```
//!
//! A group is one or more pattern lines, a line starting with `--`, then one
//! or more lines of key text ended by a blank line or the end of input.
//! Lines are trimmed. `#` lines are comments outside key text. Multi-line
//! key text is joined with the platform line separator before it is parsed
//! as a key.

use super::error::Site;
use super::{CatalogError, MessageCatalog};
use crate::key::{KeyContext, KeyReference};
use crate::pattern::PatternCompiler;
use camino::Utf8Path;
use miette::SourceSpan;
use std::io::Read;

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

/// Reader position: between groups, in a group's patterns, or in its key
/// text.
enum State<'a, P> {
    Normal,
    Patterns(Group<'a, P>),
    Message(Group<'a, P>),
}

/// One physical line of catalog text.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
    span: SourceSpan,
}

fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    source
        .split_inclusive('\n')
        .scan(0usize, |offset, segment| {
            let start = *offset;
            *offset += segment.len();
            let without_newline = segment.strip_suffix('\n').unwrap_or(segment);
            let raw = without_newline.strip_suffix('\r').unwrap_or(without_newline);
            Some((start, raw))
        })
        .enumerate()
        .map(|(index, (start, raw))| Line {
            number: index + 1,
            text: raw.trim(),
            span: SourceSpan::from((start, raw.len())),
        })
}

/// A group being accumulated.
struct Group<'a, P> {
    first: Line<'a>,
    patterns: Vec<P>,
    key_start: Option<Line<'a>>,
    key_end: usize,
    key_lines: Vec<&'a str>,
}

impl<'a, P> Group<'a, P> {
    const fn new(first: Line<'a>) -> Self {
        Self {
            first,
            patterns: Vec::new(),
            key_start: None,
            key_end: 0,
            key_lines: Vec::new(),
        }
    }

    fn push_key_line(&mut self, line: Line<'a>) {
        if self.key_start.is_none() {
            self.key_start = Some(line);
        }
        self.key_end = line.span.offset() + line.span.len();
        self.key_lines.push(line.text);
    }
}

/// Parses catalog text into a [`MessageCatalog`].
///
/// Patterns are compiled with the reader's [`PatternCompiler`] and key text
/// is bound with its [`KeyContext`].
#[derive(Debug, Clone)]
pub struct CatalogReader<C> {
    compiler: C,
    context: KeyContext,
}

impl<C: PatternCompiler> CatalogReader<C> {
    /// Reader compiling patterns with `compiler` and binding keys in
    /// `context`.
    #[must_use]
    pub const fn new(compiler: C, context: KeyContext) -> Self {
        Self { compiler, context }
    }

    /// Context key text is bound in.
    #[must_use]
    pub const fn context(&self) -> &KeyContext {
        &self.context
    }

    /// Read `source`, reporting errors against `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for malformed group structure, patterns that
    /// do not compile and key text that does not resolve.
    pub fn read_str(
        &self,
        name: &str,
        source: &str,
    ) -> Result<MessageCatalog<C::Pattern>, CatalogError> {
        let mut catalog = MessageCatalog::new();
        self.read_into(name, source, &mut catalog)?;
        Ok(catalog)
    }

    /// Read everything from `reader`.
    ///
    /// # Errors
    ///
    /// As [`CatalogReader::read_str`], plus [`CatalogError`] for I/O
    /// failures.
    pub fn read(
        &self,
        name: &str,
        mut reader: impl Read,
    ) -> Result<MessageCatalog<C::Pattern>, CatalogError> {
        let mut source = String::new();
        reader
            .read_to_string(&mut source)
            .map_err(|err| CatalogError::io(name, err))?;
        self.read_str(name, &source)
    }

    /// Read the catalog file at `path`.
    ///
    /// # Errors
    ///
    /// As [`CatalogReader::read`].
    pub fn read_file(
        &self,
        path: impl AsRef<Utf8Path>,
    ) -> Result<MessageCatalog<C::Pattern>, CatalogError> {
        let path_ref = path.as_ref();
        let source =
            std::fs::read_to_string(path_ref).map_err(|err| CatalogError::io(path_ref.as_str(), err))?;
        self.read_str(path_ref.as_str(), &source)
    }

    /// Read `source` and register its groups in `catalog`.
    ///
    /// Nothing is registered unless the whole text is valid. Returns the
    /// number of groups read.
    ///
    /// # Errors
    ///
    /// As [`CatalogReader::read_str`].
    pub fn read_into(
        &self,
        name: &str,
        source: &str,
        catalog: &mut MessageCatalog<C::Pattern>,
    ) -> Result<usize, CatalogError> {
        let groups = self.parse_groups(name, source)?;
        let count = groups.len();
        for (key, patterns) in groups {
            catalog.register(key, patterns);
        }
        tracing::debug!(catalog = name, groups = count, "read catalog");
        Ok(count)
    }

    fn parse_groups(
        &self,
        name: &str,
        source: &str,
    ) -> Result<Vec<(KeyReference, Vec<C::Pattern>)>, CatalogError> {
        let site = |line: Line<'_>| Site {
            name,
            text: source,
            line: line.number,
            span: line.span,
        };
        let mut groups = Vec::new();
        let mut state = State::Normal;

        for line in lines(source) {
            let text = line.text;
            state = match state {
                State::Normal if text.is_empty() || text.starts_with('#') => State::Normal,
                State::Normal if text.starts_with("--") => {
                    return Err(CatalogError::misplaced_separator(&site(line)));
                }
                State::Normal => {
                    let mut group = Group::new(line);
                    group.patterns.push(self.compile(text, &site(line))?);
                    State::Patterns(group)
                }
                State::Patterns(_) if text.is_empty() => {
                    return Err(CatalogError::blank_in_patterns(&site(line)));
                }
                State::Patterns(group) if text.starts_with("--") => State::Message(group),
                State::Patterns(mut group) => {
                    if !text.starts_with('#') {
                        group.patterns.push(self.compile(text, &site(line))?);
                    }
                    State::Patterns(group)
                }
                State::Message(mut group) if !text.is_empty() => {
                    group.push_key_line(line);
                    State::Message(group)
                }
                State::Message(group) if group.key_lines.is_empty() => State::Message(group),
                State::Message(group) => {
                    groups.push(self.finish(name, source, group)?);
                    State::Normal
                }
            };
        }

        match state {
            State::Normal => {}
            State::Patterns(group) => {
                return Err(CatalogError::unterminated_group(&site(group.first)));
            }
            State::Message(group) if group.key_lines.is_empty() => {
                return Err(CatalogError::unterminated_group(&site(group.first)));
            }
            State::Message(group) => groups.push(self.finish(name, source, group)?),
        }
        Ok(groups)
    }

    fn compile(&self, text: &str, site: &Site<'_>) -> Result<C::Pattern, CatalogError> {
        self.compiler
            .compile(text)
            .map_err(|err| CatalogError::pattern(site, err))
    }

    fn finish(
        &self,
        name: &str,
        source: &str,
        group: Group<'_, C::Pattern>,
    ) -> Result<(KeyReference, Vec<C::Pattern>), CatalogError> {
        let start = group.key_start.unwrap_or(group.first);
        let span_start = start.span.offset();
        let site = Site {
            name,
            text: source,
            line: start.number,
            span: SourceSpan::from((span_start, group.key_end.saturating_sub(span_start))),
        };
        let text = group.key_lines.join(LINE_SEPARATOR);
        let key = KeyReference::parse(&text, &self.context)
            .map_err(|err| CatalogError::key(&site, err))?;
        Ok((key, group.patterns))
    }
}
