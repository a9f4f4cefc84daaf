//! Compilation and matching of chain patterns.

use super::{ChainPatternError, Fault};
use crate::localization::{self, keys};
use crate::pattern::{Captures, Pattern, PatternCompiler};
use serde_json::Value;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

const ANCHOR: &str = "$";
const REPEAT: &str = "...";

#[derive(Debug, Clone)]
struct Step {
    binding: Option<String>,
    kind: glob::Pattern,
    repeat: bool,
}

impl Step {
    fn parse(token: &str) -> Result<Self, ChainPatternError> {
        let (binding, body) = match token.strip_prefix('@') {
            Some(rest) => {
                let (name, body) = rest
                    .split_once(':')
                    .filter(|(name, _)| is_variable_name(name))
                    .ok_or_else(|| invalid_binding(token))?;
                (Some(name.to_owned()), body)
            }
            None => (None, token),
        };
        let (glob_text, repeat) = body
            .strip_suffix(REPEAT)
            .map_or((body, false), |stripped| (stripped, true));
        if glob_text.is_empty() {
            return Err(ChainPatternError::MissingKind {
                step: token.to_owned(),
                message: localization::message(keys::CHAIN_PATTERN_MISSING_KIND)
                    .with_arg("step", token),
            });
        }
        let kind = glob::Pattern::new(glob_text).map_err(|source| ChainPatternError::InvalidGlob {
            step: token.to_owned(),
            source,
            message: localization::message(keys::CHAIN_PATTERN_INVALID_GLOB).with_arg("step", token),
        })?;
        Ok(Self {
            binding,
            kind,
            repeat,
        })
    }

    fn accepts(&self, fault: &Fault) -> bool {
        self.kind.matches(&fault.kind)
    }
}

fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn invalid_binding(token: &str) -> ChainPatternError {
    ChainPatternError::InvalidBinding {
        step: token.to_owned(),
        message: localization::message(keys::CHAIN_PATTERN_INVALID_BINDING).with_arg("step", token),
    }
}

/// A compiled chain pattern. Equality and hashing use the pattern text.
#[derive(Debug, Clone)]
pub struct ChainPattern {
    source: String,
    steps: Vec<Step>,
    anchored: bool,
}

impl ChainPattern {
    /// Compile `text`; surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ChainPatternError`] for empty text, steps with no kind glob,
    /// invalid globs or bindings, and a `$` that is not the last step.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use causeway::chain::{ChainPattern, Fault};
    /// use causeway::pattern::{MatchResult, Pattern};
    ///
    /// let pattern = ChainPattern::new("app.* @cause:db.*").unwrap();
    /// let chain = [Fault::new("app.request", "failed"), Fault::new("db.timeout", "slow")];
    /// let matched = pattern.looking_at(&chain).unwrap();
    /// assert_eq!(matched.group_count(), 3);
    /// assert_eq!(matched.variables()["cause"]["message"], "slow");
    /// ```
    pub fn new(text: &str) -> Result<Self, ChainPatternError> {
        let source = text.trim();
        let mut tokens: Vec<&str> = source.split_whitespace().collect();
        let anchored = tokens.last() == Some(&ANCHOR);
        if anchored {
            tokens.pop();
        }
        if tokens.contains(&ANCHOR) {
            return Err(ChainPatternError::MisplacedAnchor {
                pattern: source.to_owned(),
                message: localization::message(keys::CHAIN_PATTERN_MISPLACED_ANCHOR)
                    .with_arg("pattern", source),
            });
        }
        if tokens.is_empty() {
            return Err(ChainPatternError::Empty {
                message: localization::message(keys::CHAIN_PATTERN_EMPTY),
            });
        }
        let steps = tokens
            .into_iter()
            .map(Step::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source: source.to_owned(),
            steps,
            anchored,
        })
    }

    /// Pattern text as compiled.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Find step spans for `input` from `position`, backtracking over repeats.
    ///
    /// `failed` records `(step_index, position)` states already known not to
    /// match, so each state is explored at most once.
    fn spans_from(
        &self,
        step_index: usize,
        position: usize,
        input: &[Fault],
        spans: &mut Vec<(usize, usize)>,
        failed: &mut HashSet<(usize, usize)>,
    ) -> Option<usize> {
        if failed.contains(&(step_index, position)) {
            return None;
        }
        let Some(step) = self.steps.get(step_index) else {
            return (!self.anchored || position == input.len()).then_some(position);
        };
        let remaining = input.iter().skip(position);
        let longest = if step.repeat {
            remaining.take_while(|fault| step.accepts(fault)).count()
        } else {
            usize::from(remaining.take(1).any(|fault| step.accepts(fault)))
        };
        let shortest = usize::from(!step.repeat);
        for taken in (shortest..=longest).rev() {
            spans.push((position, position + taken));
            if let Some(end) =
                self.spans_from(step_index + 1, position + taken, input, spans, failed)
            {
                return Some(end);
            }
            spans.pop();
        }
        failed.insert((step_index, position));
        None
    }
}

fn faults_value(faults: &[Fault]) -> Value {
    Value::Array(faults.iter().map(Fault::to_value).collect())
}

impl PartialEq for ChainPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for ChainPattern {}

impl Hash for ChainPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl Pattern for ChainPattern {
    type Item = Fault;
    type Match = Captures;

    fn looking_at(&self, input: &[Fault]) -> Option<Captures> {
        let mut spans = Vec::with_capacity(self.steps.len());
        let end = self.spans_from(0, 0, input, &mut spans, &mut HashSet::new())?;
        let mut captures = Captures::new(faults_value(input.get(..end).unwrap_or_default()));
        for (step, (start, stop)) in self.steps.iter().zip(spans) {
            let matched = input.get(start..stop).unwrap_or_default();
            captures = captures.with_group(faults_value(matched));
            if let Some(name) = &step.binding {
                let bound = match (step.repeat, matched) {
                    (false, [fault]) => fault.to_value(),
                    _ => faults_value(matched),
                };
                captures = captures.with_variable(name.clone(), bound);
            }
        }
        Some(captures)
    }
}

/// [`PatternCompiler`] for [`ChainPattern`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainCompiler;

impl PatternCompiler for ChainCompiler {
    type Pattern = ChainPattern;
    type Error = ChainPatternError;

    fn compile(&self, source: &str) -> Result<ChainPattern, ChainPatternError> {
        ChainPattern::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::MatchResult;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn chain() -> Vec<Fault> {
        vec![
            Fault::new("app.request", "request failed"),
            Fault::new("db.pool", "no connection"),
            Fault::new("db.timeout", "bottom"),
        ]
    }

    fn compile(source: &str) -> ChainPattern {
        ChainPattern::new(source).unwrap_or_else(|err| panic!("{source}: {err}"))
    }

    #[rstest]
    #[case("app.*", true)]
    #[case("db.*", false)]
    #[case("* db.pool", true)]
    #[case("*... db.timeout $", true)]
    #[case("*... db.pool $", false)]
    #[case("app.* db.* $", false)]
    #[case("app.* db.*... $", true)]
    #[case("*... io.*", false)]
    #[case("* * * *", false)]
    fn matches_prefixes_of_the_chain(chain: Vec<Fault>, #[case] source: &str, #[case] expected: bool) {
        assert_eq!(compile(source).looking_at(&chain).is_some(), expected, "{source}");
    }

    #[rstest]
    fn repeated_steps_back_off_for_later_steps(chain: Vec<Fault>) {
        let matched = compile("@head:*... @last:db.* $")
            .looking_at(&chain)
            .unwrap_or_else(|| panic!("no match"));
        assert_eq!(matched.group_count(), 3);
        let variables = matched.variables();
        let head = variables.get("head").and_then(Value::as_array);
        assert_eq!(head.map(Vec::len), Some(2));
        assert_eq!(
            variables.get("last").and_then(|last| last.get("message")),
            Some(&json!("bottom"))
        );
    }

    #[rstest]
    fn many_repeated_steps_fail_quickly_on_long_chains() {
        let long: Vec<_> = (0..40).map(|n| Fault::new(format!("app.layer{n}"), "")).collect();
        let pattern = compile("*... *... *... *... *... *... nope.*");
        assert!(pattern.looking_at(&long).is_none());
        let anchored = compile("*... *... *... *... *... *... app.layer39 $");
        assert!(anchored.looking_at(&long).is_some());
    }

    #[rstest]
    fn groups_are_fault_lists(chain: Vec<Fault>) {
        let matched = compile("app.* db.pool")
            .looking_at(&chain)
            .unwrap_or_else(|| panic!("no match"));
        assert_eq!(
            matched.group(0),
            Some(json!([
                {"kind": "app.request", "message": "request failed"},
                {"kind": "db.pool", "message": "no connection"},
            ]))
        );
        assert_eq!(matched.group(2), Some(json!([{"kind": "db.pool", "message": "no connection"}])));
        assert_eq!(matched.group(3), None);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("$")]
    fn empty_patterns_are_rejected(#[case] source: &str) {
        assert!(matches!(ChainPattern::new(source), Err(ChainPatternError::Empty { .. })));
    }

    #[rstest]
    #[case("@:db.*")]
    #[case("@9x:db.*")]
    #[case("@name")]
    fn bad_bindings_are_rejected(#[case] source: &str) {
        assert!(matches!(
            ChainPattern::new(source),
            Err(ChainPatternError::InvalidBinding { .. })
        ));
    }

    #[rstest]
    #[case("...")]
    #[case("@name:")]
    #[case("@name:...")]
    #[case("app.* ...")]
    fn steps_without_a_kind_are_rejected(#[case] source: &str) {
        assert!(matches!(
            ChainPattern::new(source),
            Err(ChainPatternError::MissingKind { .. })
        ));
    }

    #[rstest]
    fn bad_globs_are_rejected() {
        assert!(matches!(
            ChainPattern::new("db.[unclosed"),
            Err(ChainPatternError::InvalidGlob { .. })
        ));
    }

    #[rstest]
    fn anchors_must_come_last() {
        assert!(matches!(
            ChainPattern::new("app.* $ db.*"),
            Err(ChainPatternError::MisplacedAnchor { .. })
        ));
    }

    #[rstest]
    fn equality_uses_pattern_text() {
        assert_eq!(compile("app.*  db.*"), compile("  app.*  db.*"));
        assert_ne!(compile("app.* db.*"), compile("app.*  db.*"));
    }
}
