//! The backtracking interpreter.
//!
//! Runs a [`ResolvedGrammar`]'s combinator arena directly over a token
//! list. Every combinator returns an [`Outcome`]; engine faults (left
//! recursion, depth limit) short-circuit as `Err` through `?`.
//!
//! Invariants:
//! - a `SoftFail` leaves the cursor where the combinator found it;
//! - a `HardFail` leaves the cursor wherever the failure happened, and
//!   nothing above it backtracks except a recovering choice;
//! - diagnostics emitted on an abandoned path are discarded with it.

mod recovery;
mod report;

use gram_diagnostic::Diagnostic;
use gram_grammar::{
    CombinatorId, FieldKind, ListMin, Node, NodeTypeId, Op, ResolvedGrammar, RuleId, Value,
};
use gram_ir::{Name, TokenKind, TokenList};
use gram_stack::{ensure_sufficient_stack, RecursionLimit};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::outcome::{Expectation, Failure, Outcome, Values};
use crate::snapshot::Snapshot;
use crate::{EngineError, ParseConfig};

type Step = Result<Outcome, EngineError>;

pub(crate) struct Engine<'a> {
    grammar: &'a ResolvedGrammar,
    config: &'a ParseConfig,
    cursor: Cursor<'a>,
    /// Pending diagnostics, truncated on backtrack.
    diagnostics: Vec<Diagnostic>,
    /// Furthest failure seen anywhere, with merged expectations.
    furthest: Option<Failure>,
    depth: RecursionLimit,
    /// Rule invocations in progress, by start position.
    active: FxHashSet<(RuleId, usize)>,
    /// Protected combinators of the enclosing dont-skip regions, innermost last.
    dont_skip: Vec<CombinatorId>,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(
        grammar: &'a ResolvedGrammar,
        tokens: &'a TokenList,
        config: &'a ParseConfig,
        start: usize,
    ) -> Self {
        Engine {
            grammar,
            config,
            cursor: Cursor::at(tokens, start),
            diagnostics: Vec::new(),
            furthest: None,
            depth: RecursionLimit::new(config.max_depth),
            active: FxHashSet::default(),
            dont_skip: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.cursor.position()
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    #[inline]
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.cursor.position(),
            diagnostics: self.diagnostics.len(),
        }
    }

    #[inline]
    fn restore(&mut self, snapshot: Snapshot) {
        self.cursor.set_position(snapshot.position);
        self.diagnostics.truncate(snapshot.diagnostics);
    }

    /// Record a leaf failure with the furthest-failure tracker.
    fn fail(&mut self, failure: Failure) -> Outcome {
        match &mut self.furthest {
            Some(furthest) => furthest.merge(&failure),
            None => self.furthest = Some(failure.clone()),
        }
        Outcome::SoftFail(failure)
    }

    /// Invoke a rule at the current position.
    pub(crate) fn run_rule(&mut self, rule: RuleId) -> Step {
        let grammar = self.grammar;
        let def = grammar.rule(rule);
        let position = self.cursor.position();

        if !self.active.insert((rule, position)) {
            return Err(EngineError::InfiniteRecursion {
                rule: def.name.to_string(),
                position,
            });
        }
        if let Err(exceeded) = self.depth.enter() {
            self.active.remove(&(rule, position));
            return Err(EngineError::RecursionLimit {
                limit: exceeded.limit,
                position,
            });
        }

        trace!(rule = &*def.name, position, "enter rule");
        let result = ensure_sufficient_stack(|| self.run(def.body));
        self.depth.exit();
        self.active.remove(&(rule, position));
        trace!(
            rule = &*def.name,
            position = self.cursor.position(),
            success = result.as_ref().is_ok_and(Outcome::is_success),
            "exit rule"
        );
        result
    }

    fn run(&mut self, id: CombinatorId) -> Step {
        let grammar = self.grammar;
        match grammar.op(id) {
            Op::Token { kind, text, keep } => Ok(self.token(*kind, *text, *keep)),
            Op::Rule(rule) => self.run_rule(*rule),
            Op::Seq(items) => self.seq(items),
            Op::Or {
                alternatives,
                recovers,
            } => self.or(alternatives, *recovers),
            Op::Opt(inner) => self.opt(*inner),
            Op::OptGroup(inner) => self.opt_group(*inner),
            Op::List {
                element,
                separator,
                min,
            } => self.list(*element, *separator, *min),
            // A cut outside a sequence commits nothing.
            Op::Cut => Ok(Outcome::empty()),
            Op::Predicate { predicate, inner } => {
                let start = self.snapshot();
                match self.run(*inner)? {
                    Outcome::Success(values) => {
                        let check = &grammar.predicate(*predicate).check;
                        if values.first().is_some_and(|value| check(value)) {
                            Ok(Outcome::Success(values))
                        } else {
                            debug!(
                                predicate = &*grammar.predicate(*predicate).name,
                                position = start.position,
                                "predicate rejected value"
                            );
                            self.restore(start);
                            Ok(self.fail(Failure::expecting(
                                start.position,
                                Expectation::Predicate(*predicate),
                            )))
                        }
                    }
                    failed => Ok(failed),
                }
            }
            Op::Skip(ty) => self.skip(*ty),
            Op::DontSkip { inner, protected } => self.dont_skip(*inner, *protected),
            Op::Null(ty) => Ok(Outcome::single(Value::Absent(*ty))),
            Op::Node { ty, inner, fields } => self.node(*ty, *inner, fields),
            Op::Enum { ty, alt, inner } => {
                let start = self.cursor.position();
                match self.run(*inner)? {
                    Outcome::Success(_) => Ok(Outcome::single(Value::Enum {
                        ty: *ty,
                        alt: *alt,
                        span: self.cursor.span_since(start),
                    })),
                    failed => Ok(failed),
                }
            }
        }
    }

    fn token(&mut self, kind: TokenKind, text: Option<Name>, keep: bool) -> Outcome {
        let token = self.cursor.current();
        if token.kind == kind && text.is_none_or(|text| token.text == text) {
            let token = *self.cursor.advance();
            if keep {
                Outcome::single(Value::Token(token))
            } else {
                Outcome::empty()
            }
        } else {
            let position = self.cursor.position();
            self.fail(Failure::expecting(position, Expectation::Token { kind, text }))
        }
    }

    fn seq(&mut self, items: &[CombinatorId]) -> Step {
        let start = self.snapshot();
        let mut values = Values::new();
        let mut committed = false;

        for &item in items {
            if matches!(self.grammar.op(item), Op::Cut) {
                committed = true;
                continue;
            }
            match self.run(item)? {
                Outcome::Success(item_values) => values.extend(item_values),
                Outcome::SoftFail(failure) if committed => {
                    debug!(position = failure.position, "failure after cut");
                    return Ok(Outcome::HardFail(failure));
                }
                Outcome::SoftFail(failure) => {
                    self.restore(start);
                    return Ok(Outcome::SoftFail(failure));
                }
                hard @ Outcome::HardFail(_) => return Ok(hard),
            }
        }
        Ok(Outcome::Success(values))
    }

    /// Ordered choice. A recovering choice answers a hard failure in one of
    /// its alternatives by reporting it and retrying its skip alternatives
    /// from its start.
    fn or(&mut self, alternatives: &[CombinatorId], recovers: bool) -> Step {
        let recovers = recovers && self.config.recovery;
        let start = self.snapshot();
        let mut best: Option<Failure> = None;
        let mut committed: Option<Failure> = None;

        for &alternative in alternatives {
            let is_skip = matches!(self.grammar.op(alternative), Op::Skip(_));
            if committed.is_some() && !is_skip {
                continue;
            }
            match self.run(alternative)? {
                success @ Outcome::Success(_) => return Ok(success),
                Outcome::SoftFail(failure) => {
                    self.restore(start);
                    best = Some(match best {
                        Some(best) => best.furthest(failure),
                        None => failure,
                    });
                }
                Outcome::HardFail(failure) if recovers => {
                    self.restore(start);
                    self.report_committed(&failure);
                    committed = Some(failure);
                }
                hard @ Outcome::HardFail(_) => return Ok(hard),
            }
        }

        match committed {
            Some(failure) => {
                // Nothing could be skipped: drop the report, the caller
                // sees the hard failure itself.
                self.restore(start);
                Ok(Outcome::HardFail(failure))
            }
            None => Ok(Outcome::SoftFail(
                best.unwrap_or_else(|| Failure::at(start.position)),
            )),
        }
    }

    fn opt(&mut self, inner: CombinatorId) -> Step {
        let start = self.snapshot();
        match self.run(inner)? {
            Outcome::SoftFail(_) => {
                self.restore(start);
                let nulls = std::iter::repeat_n(Value::Null, self.grammar.arity(inner));
                Ok(Outcome::Success(nulls.collect()))
            }
            other => Ok(other),
        }
    }

    fn opt_group(&mut self, inner: CombinatorId) -> Step {
        let start = self.snapshot();
        match self.run(inner)? {
            Outcome::Success(values) => Ok(Outcome::single(Value::List(values.into_vec()))),
            Outcome::SoftFail(_) => {
                self.restore(start);
                Ok(Outcome::single(Value::List(Vec::new())))
            }
            hard @ Outcome::HardFail(_) => Ok(hard),
        }
    }

    fn list(
        &mut self,
        element: CombinatorId,
        separator: Option<CombinatorId>,
        min: ListMin,
    ) -> Step {
        let start = self.snapshot();
        let mut items: Vec<Value> = Vec::new();
        let mut last_failure: Option<Failure> = None;

        loop {
            let iteration = self.snapshot();
            if let (Some(separator), false) = (separator, items.is_empty()) {
                match self.run(separator)? {
                    Outcome::Success(_) => {}
                    Outcome::SoftFail(failure) => {
                        self.restore(iteration);
                        last_failure = Some(failure);
                        break;
                    }
                    hard @ Outcome::HardFail(_) => return Ok(hard),
                }
            }
            match self.run(element)? {
                Outcome::Success(values) => {
                    // An element that consumes nothing would match forever.
                    if self.cursor.position() == iteration.position {
                        self.restore(iteration);
                        break;
                    }
                    items.extend(values);
                }
                Outcome::SoftFail(failure) => {
                    // Also gives back a separator consumed in this iteration.
                    self.restore(iteration);
                    last_failure = Some(failure);
                    break;
                }
                hard @ Outcome::HardFail(_) => return Ok(hard),
            }
        }

        if min == ListMin::One && items.is_empty() {
            self.restore(start);
            return Ok(Outcome::SoftFail(
                last_failure.unwrap_or_else(|| Failure::at(start.position)),
            ));
        }
        Ok(Outcome::single(Value::List(items)))
    }

    fn node(&mut self, ty: NodeTypeId, inner: CombinatorId, fields: &[FieldKind]) -> Step {
        let start = self.cursor.position();
        let values = match self.run(inner)? {
            Outcome::Success(values) => values,
            failed => return Ok(failed),
        };
        debug_assert_eq!(
            values.len(),
            fields.len(),
            "resolved node construction yields one value per field"
        );
        let fields = values
            .into_iter()
            .zip(fields)
            .map(|(value, kind)| normalize_null(value, kind))
            .collect();
        Ok(Outcome::single(Value::Node(Box::new(Node {
            ty,
            span: self.cursor.span_since(start),
            fields,
        }))))
    }
}

/// Store an optional's null in the form its field expects.
fn normalize_null(value: Value, kind: &FieldKind) -> Value {
    match (value, kind) {
        (Value::Null, FieldKind::Node(ty)) => Value::Absent(*ty),
        (Value::Null, FieldKind::List(_)) => Value::List(Vec::new()),
        (value, _) => value,
    }
}
