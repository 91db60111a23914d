//! Engine faults.
//!
//! These are not syntax errors: they mean the grammar cannot be run on
//! this input at all. A parse that hits one is cancelled without a tree.

use gram_diagnostic::{Diagnostic, ErrorCode};
use gram_ir::TokenList;

#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum EngineError {
    /// A rule was re-entered at the same token while still active.
    #[error("rule `{rule}` is left-recursive: re-entered at token {position} without consuming input")]
    InfiniteRecursion { rule: String, position: usize },

    #[error("rule nesting exceeded the limit of {limit} at token {position}")]
    RecursionLimit { limit: usize, position: usize },
}

impl EngineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::InfiniteRecursion { .. } => ErrorCode::E9001,
            EngineError::RecursionLimit { .. } => ErrorCode::E9002,
        }
    }

    /// Token index the fault was raised at.
    pub fn position(&self) -> usize {
        match self {
            EngineError::InfiniteRecursion { position, .. }
            | EngineError::RecursionLimit { position, .. } => *position,
        }
    }

    /// Render as a diagnostic pointing at the offending token.
    pub fn to_diagnostic(&self, tokens: &TokenList) -> Diagnostic {
        let position = self.position().min(tokens.termination_position());
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(tokens[position].span, "parsing stopped here");
        match self {
            EngineError::InfiniteRecursion { .. } => {
                diag.with_note("rewrite the rule so it consumes a token before referring to itself")
            }
            EngineError::RecursionLimit { .. } => {
                diag.with_note("raise the depth limit or reduce the input's nesting")
            }
        }
    }
}
