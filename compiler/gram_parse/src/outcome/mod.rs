//! Three-way combinator outcome.
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Success` | Matched; carries the positional values |
//! | `SoftFail` | Failed without crossing a cut. Cursor restored, try alternatives |
//! | `HardFail` | Failed after a cut. Cursor left where it stopped, no backtracking |
//!
//! Only a sequence produces `HardFail`, when an element after a [`Cut`]
//! fails. Every combinator except a recovering choice passes it through
//! untouched.
//!
//! [`Cut`]: gram_grammar::Op::Cut

use gram_grammar::{PredicateId, ResolvedGrammar, Value};
use gram_ir::{Name, TokenKind};
use smallvec::SmallVec;

/// Positional values yielded by a combinator.
pub(crate) type Values = SmallVec<[Value; 2]>;

/// Something the parser would have accepted at a failure position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) enum Expectation {
    Token { kind: TokenKind, text: Option<Name> },
    Predicate(PredicateId),
}

impl Expectation {
    pub(crate) fn describe(self, grammar: &ResolvedGrammar) -> String {
        match self {
            Expectation::Token { kind, text } => grammar.describe_token(kind, text),
            Expectation::Predicate(id) => {
                format!("a value accepted by `{}`", grammar.predicate(id).name)
            }
        }
    }
}

/// Where a combinator failed and what would have been accepted there.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct Failure {
    /// Token index.
    pub position: usize,
    pub expected: SmallVec<[Expectation; 2]>,
}

impl Failure {
    /// A failure with no expectation, such as a refused skip.
    pub(crate) fn at(position: usize) -> Self {
        Failure {
            position,
            expected: SmallVec::new(),
        }
    }

    pub(crate) fn expecting(position: usize, expected: Expectation) -> Self {
        let mut failure = Failure::at(position);
        failure.expected.push(expected);
        failure
    }

    /// Keep the further of two failures. Ties keep `self`.
    #[must_use]
    pub(crate) fn furthest(self, other: Failure) -> Failure {
        if other.position > self.position {
            other
        } else {
            self
        }
    }

    /// Merge `other` into `self`: a further failure replaces this one, a
    /// failure at the same position contributes its expectations.
    pub(crate) fn merge(&mut self, other: &Failure) {
        if other.position > self.position {
            self.clone_from(other);
        } else if other.position == self.position {
            for expected in &other.expected {
                if !self.expected.contains(expected) {
                    self.expected.push(*expected);
                }
            }
        }
    }

    /// Describe the expectations, deduplicated, in discovery order.
    pub(crate) fn describe_expected(&self, grammar: &ResolvedGrammar) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.expected.len());
        for expected in &self.expected {
            let text = expected.describe(grammar);
            if !out.contains(&text) {
                out.push(text);
            }
        }
        out
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) enum Outcome {
    Success(Values),
    SoftFail(Failure),
    HardFail(Failure),
}

impl Outcome {
    /// Success with no values.
    #[inline]
    pub(crate) fn empty() -> Self {
        Outcome::Success(Values::new())
    }

    #[inline]
    pub(crate) fn single(value: Value) -> Self {
        let mut values = Values::new();
        values.push(value);
        Outcome::Success(values)
    }

    #[inline]
    pub(crate) fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}
