//! Turns resolved message text and match captures into final strings.
//!
//! Capture group `n` is bound as `_n` (`_0` is the whole match) and every
//! named variable is bound under its own name. A variable that reuses a
//! capture name replaces it. Literal text is returned untouched; templated
//! text goes through a [`TemplateEngine`], by default [`MiniJinjaEngine`].

use crate::localization::{self, LocalizedMessage, keys};
use crate::pattern::MatchResult;
use crate::store::RawText;
use indexmap::IndexMap;
use miette::Diagnostic;
use minijinja::{Environment, UndefinedBehavior};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Template context: binding name to value, in binding order.
pub type Bindings = IndexMap<String, Value>;

/// Failure to evaluate a message template.
#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    /// The engine rejected or failed to evaluate the template.
    #[error("{message}")]
    #[diagnostic(code(causeway::render::template))]
    Template {
        /// Template text that failed.
        template: String,
        /// Engine failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        /// Localised error message.
        message: LocalizedMessage,
    },
}

impl RenderError {
    /// Wrap an engine failure for `template`.
    #[must_use]
    pub fn template(
        template: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Template {
            template: template.to_owned(),
            source: source.into(),
            message: localization::message(keys::RENDER_TEMPLATE).with_arg("template", template),
        }
    }
}

/// Binding name for capture group `index`.
///
/// ```rust
/// assert_eq!(causeway::render::capture_name(2), "_2");
/// ```
#[must_use]
pub fn capture_name(index: usize) -> String {
    format!("_{index}")
}

/// Collect the bindings a match contributes to a template.
#[must_use]
pub fn bindings<M: MatchResult + ?Sized>(matched: &M) -> Bindings {
    let mut bound = Bindings::new();
    for index in 0..matched.group_count() {
        if let Some(value) = matched.group(index) {
            bound.insert(capture_name(index), value);
        }
    }
    for (name, value) in matched.variables() {
        if bound.insert(name.clone(), value).is_some() {
            tracing::debug!(variable = %name, "named variable shadows a capture group");
        }
    }
    bound
}

/// Evaluates template text against bindings.
pub trait TemplateEngine: fmt::Debug + Send + Sync {
    /// Render `template` with `bindings` in scope.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the template is invalid or refers to
    /// something the bindings do not provide.
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String, RenderError>;
}

/// [`TemplateEngine`] backed by `minijinja`.
///
/// Undefined names are errors, so a typo in a placeholder fails loudly
/// instead of rendering an empty string.
#[derive(Debug)]
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Engine with strict undefined handling.
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String, RenderError> {
        self.env
            .render_str(template, bindings)
            .map_err(|err| RenderError::template(template, err))
    }
}

/// Renders [`RawText`] with match bindings.
#[derive(Clone, Debug)]
pub struct Renderer {
    engine: Arc<dyn TemplateEngine>,
}

impl Renderer {
    /// Renderer delegating templated text to `engine`.
    #[must_use]
    pub const fn new(engine: Arc<dyn TemplateEngine>) -> Self {
        Self { engine }
    }

    /// Produce the final string for `raw`.
    ///
    /// Without a match, templated text is still evaluated with empty
    /// bindings.
    ///
    /// # Errors
    ///
    /// Propagates the engine's [`RenderError`].
    pub fn render<M: MatchResult + ?Sized>(
        &self,
        raw: RawText,
        matched: Option<&M>,
    ) -> Result<String, RenderError> {
        match raw {
            RawText::Literal(text) => Ok(text),
            RawText::Templated(template) => {
                let bound = matched.map(bindings).unwrap_or_default();
                self.engine.render(&template, &bound)
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Arc::new(MiniJinjaEngine::new()))
    }
}
