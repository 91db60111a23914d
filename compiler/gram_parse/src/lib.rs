//! Gram Parse - backtracking combinator parsing engine
//!
//! Interprets a [`ResolvedGrammar`] over a terminated [`TokenList`]:
//!
//! - ordered choice with furthest-failure reporting
//! - cuts that turn later failures into hard, non-backtracking failures
//! - skip recovery into error nodes, with dont-skip protected regions
//! - left-recursion detection and a configurable nesting limit
//!
//! The result is a typed AST ([`Value`]) or diagnostics, and never a node
//! with missing fields. One [`ResolvedGrammar`] can serve any number of
//! parses, on any number of threads.

mod cursor;
mod dump;
mod engine;
mod error;
mod outcome;
mod snapshot;

use gram_diagnostic::{Diagnostic, DiagnosticSink, Severity};
use gram_grammar::{ResolvedGrammar, RuleId};
use gram_ir::TokenList;

use crate::engine::Engine;
use crate::outcome::Outcome;

pub use dump::{dump, TreeDump};
pub use error::EngineError;
pub use gram_grammar::{Node, Value};

/// Parse settings.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseConfig {
    /// Maximum nesting of rule invocations.
    pub max_depth: usize,
    /// Whether skip combinators may consume tokens.
    pub recovery: bool,
}

impl ParseConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 4096;

    /// Recovery disabled: every skip fails.
    pub fn strict() -> Self {
        ParseConfig {
            recovery: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            recovery: true,
        }
    }
}

/// Result of a whole-input parse.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseOutput {
    /// The tree, when the entry rule matched the whole input. It may
    /// contain error nodes if skip recovery engaged.
    pub root: Option<Value>,
    /// Errors and warnings, in the order they were produced.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

/// Parse `tokens` from the grammar's entry rule.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(
    grammar: &ResolvedGrammar,
    tokens: &TokenList,
    config: &ParseConfig,
) -> Result<ParseOutput, EngineError> {
    let mut engine = Engine::new(grammar, tokens, config, 0);
    let outcome = engine.run_rule(grammar.entry())?;
    let root = engine.finish(outcome);
    Ok(ParseOutput {
        root,
        diagnostics: engine.into_diagnostics(),
    })
}

/// Parse and hand the diagnostics to `sink`.
pub fn parse_with_sink(
    grammar: &ResolvedGrammar,
    tokens: &TokenList,
    config: &ParseConfig,
    sink: &mut impl DiagnosticSink,
) -> Result<Option<Value>, EngineError> {
    let output = parse(grammar, tokens, config)?;
    for diagnostic in output.diagnostics {
        sink.emit(diagnostic);
    }
    Ok(output.root)
}

/// Why a single rule attempt failed.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseFailure {
    /// Token index of the failure.
    pub position: usize,
    /// Whether the failure happened after a cut.
    pub committed: bool,
    /// Descriptions of what would have been accepted there.
    pub expected: Vec<String>,
}

/// Result of running one rule from one position, without requiring it to
/// reach the end of input.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RuleAttempt {
    pub result: Result<Vec<Value>, ParseFailure>,
    /// Cursor position after the attempt. A failure that is not committed
    /// leaves it at the start.
    pub cursor: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run `rule` at token index `start`.
pub fn parse_rule_at(
    grammar: &ResolvedGrammar,
    tokens: &TokenList,
    rule: RuleId,
    start: usize,
    config: &ParseConfig,
) -> Result<RuleAttempt, EngineError> {
    let mut engine = Engine::new(grammar, tokens, config, start);
    let result = match engine.run_rule(rule)? {
        Outcome::Success(values) => Ok(values.into_vec()),
        Outcome::SoftFail(failure) => Err((failure, false)),
        Outcome::HardFail(failure) => Err((failure, true)),
    };
    let result = result.map_err(|(failure, committed)| ParseFailure {
        position: failure.position,
        committed,
        expected: failure.describe_expected(grammar),
    });
    let cursor = engine.position();
    Ok(RuleAttempt {
        result,
        cursor,
        diagnostics: engine.into_diagnostics(),
    })
}
