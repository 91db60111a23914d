//! Token cursor for navigating the token stream.

use gram_ir::{Span, Token, TokenList};
use tracing::trace;

/// Position in a terminated token list.
///
/// The cursor never moves past the termination token, so [`current`]
/// is always valid.
///
/// [`current`]: Cursor::current
pub(crate) struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at `pos`, clamped to the termination token.
    pub(crate) fn at(tokens: &'a TokenList, pos: usize) -> Self {
        Cursor {
            tokens,
            pos: pos.min(tokens.termination_position()),
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Set the cursor position directly, for snapshot restoration.
    pub(crate) fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos < self.tokens.len(),
            "cursor position {} out of bounds (max {})",
            pos,
            self.tokens.len() - 1
        );
        self.pos = pos;
    }

    #[inline]
    pub(crate) fn tokens(&self) -> &'a TokenList {
        self.tokens
    }

    #[inline]
    pub(crate) fn current(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token, or a dummy span at the start.
    #[inline]
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.current().kind.is_termination()
    }

    /// Consume the current token and return it. At the termination token
    /// the cursor stays put.
    pub(crate) fn advance(&mut self) -> &'a Token {
        let token = self.current();
        trace!(
            pos = self.pos,
            kind = token.kind.index(),
            span_start = token.span.start,
            span_end = token.span.end,
            "advance"
        );
        if !token.kind.is_termination() {
            self.pos += 1;
        }
        token
    }

    /// Span covering the tokens consumed since `start`, or a point span at
    /// the current token when nothing was consumed.
    pub(crate) fn span_since(&self, start: usize) -> Span {
        if self.pos > start {
            self.tokens[start].span.merge(self.previous_span())
        } else {
            Span::point(self.current_span().start)
        }
    }
}
