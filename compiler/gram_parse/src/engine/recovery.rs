//! Skip recovery.
//!
//! A skip consumes exactly one token and stands in an error node for it,
//! unless one of the protected combinators of the enclosing dont-skip
//! regions would match at the cursor. Protected content is what lets a
//! surrounding construct close: a class body must not skip its own `}`.

use gram_diagnostic::{committed_failure, skipped_token};
use gram_grammar::{CombinatorId, Node, NodeTypeId, Value};
use tracing::{debug, trace};

use super::{Engine, Step};
use crate::outcome::{Failure, Outcome};
use crate::EngineError;

impl Engine<'_> {
    pub(super) fn skip(&mut self, ty: NodeTypeId) -> Step {
        let position = self.cursor.position();
        if !self.config.recovery || self.cursor.is_at_end() {
            return Ok(self.fail(Failure::at(position)));
        }
        if self.is_protected()? {
            trace!(position, "skip refused at protected token");
            return Ok(self.fail(Failure::at(position)));
        }

        let token = *self.cursor.advance();
        let found = self.describe_found(&token);
        debug!(position, found = %found, "skipped token");
        self.diagnostics.push(skipped_token(token.span, &found));
        Ok(Outcome::single(Value::Node(Box::new(Node {
            ty,
            span: token.span,
            fields: Vec::new(),
        }))))
    }

    pub(super) fn dont_skip(&mut self, inner: CombinatorId, protected: CombinatorId) -> Step {
        self.dont_skip.push(protected);
        let result = self.run(inner);
        self.dont_skip.pop();
        result
    }

    /// Whether any protected combinator matches at the cursor.
    ///
    /// Probes run outside every dont-skip region and rule invocation, and
    /// leave no trace: cursor, diagnostics and furthest failure are
    /// restored afterwards.
    fn is_protected(&mut self) -> Result<bool, EngineError> {
        if self.dont_skip.is_empty() {
            return Ok(false);
        }
        let protected = std::mem::take(&mut self.dont_skip);
        let active = std::mem::take(&mut self.active);
        let furthest = self.furthest.take();

        let result = self.probe_any(&protected);

        self.dont_skip = protected;
        self.active = active;
        self.furthest = furthest;
        result
    }

    fn probe_any(&mut self, protected: &[CombinatorId]) -> Result<bool, EngineError> {
        for &combinator in protected.iter().rev() {
            let start = self.snapshot();
            let outcome = self.run(combinator)?;
            self.restore(start);
            if outcome.is_success() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Report a hard failure that a recovering choice is about to absorb.
    pub(super) fn report_committed(&mut self, failure: &Failure) {
        let token = self.cursor.tokens()[failure.position];
        let expected = failure.describe_expected(self.grammar);
        let found = self.describe_found(&token);
        debug!(
            position = failure.position,
            found = %found,
            "recovering from failure after cut"
        );
        self.diagnostics
            .push(committed_failure(token.span, &expected, &found));
    }
}
