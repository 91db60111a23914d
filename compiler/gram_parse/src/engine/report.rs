//! Top-level result and syntax error reporting.

use gram_diagnostic::{syntax_error, trailing_input};
use gram_grammar::Value;
use gram_ir::Token;
use tracing::debug;

use super::Engine;
use crate::outcome::{Failure, Outcome};

impl Engine<'_> {
    /// How a token reads in "found ..." messages.
    pub(super) fn describe_found(&self, token: &Token) -> String {
        if token.kind.is_termination() {
            return "end of input".to_string();
        }
        let vocabulary = self.grammar.vocabulary();
        match vocabulary.literal(token.kind) {
            Some(text) => format!("'{text}'"),
            None => format!(
                "{} '{}'",
                vocabulary.name(token.kind),
                self.grammar.interner().lookup(token.text)
            ),
        }
    }

    /// Turn the entry rule's outcome into the tree root, reporting a syntax
    /// error when the rule failed or stopped before the termination token.
    pub(crate) fn finish(&mut self, outcome: Outcome) -> Option<Value> {
        match outcome {
            Outcome::Success(mut values) if self.cursor.is_at_end() => {
                if values.len() == 1 {
                    values.pop()
                } else {
                    Some(Value::List(values.into_vec()))
                }
            }
            Outcome::Success(_) => {
                self.report_trailing();
                None
            }
            Outcome::SoftFail(failure) | Outcome::HardFail(failure) => {
                self.report_syntax_error(&failure);
                None
            }
        }
    }

    fn report_trailing(&mut self) {
        let position = self.cursor.position();
        let token = *self.cursor.current();
        let found = self.describe_found(&token);

        match self.furthest.take() {
            Some(furthest) if furthest.position > position && !furthest.expected.is_empty() => {
                self.report_syntax_error(&furthest);
            }
            Some(furthest) if furthest.position == position && !furthest.expected.is_empty() => {
                let mut expected = furthest.describe_expected(self.grammar);
                expected.push("end of input".to_string());
                debug!(position, "entry rule stopped before end of input");
                self.diagnostics
                    .push(syntax_error(token.span, &expected, &found));
            }
            _ => {
                debug!(position, "trailing input");
                self.diagnostics.push(trailing_input(token.span, &found));
            }
        }
    }

    fn report_syntax_error(&mut self, failure: &Failure) {
        let mut furthest = self
            .furthest
            .take()
            .unwrap_or_else(|| Failure::at(failure.position));
        furthest.merge(failure);

        let token = self.cursor.tokens()[furthest.position];
        let expected = furthest.describe_expected(self.grammar);
        let found = self.describe_found(&token);
        debug!(position = furthest.position, found = %found, "syntax error");
        self.diagnostics
            .push(syntax_error(token.span, &expected, &found));
    }
}
