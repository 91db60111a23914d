//! Gram IR - shared primitive types
//!
//! This crate contains the data every other Gram crate agrees on:
//! - Spans for source locations
//! - Names for interned identifiers and token texts
//! - Token kinds, the token vocabulary of a language, and terminated token
//!   lists (the lexer's output and the parser's input)
//!
//! Lexing itself is not done here. A language's lexer builds a [`TokenList`]
//! whose kinds come from the language's [`Vocabulary`].

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod span;
mod token;

pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList, Vocabulary};
