//! LKT lexer.
//!
//! Tokenizes source with the logos-generated [`RawToken`] scanner and maps
//! raw tokens onto the language's [`Vocabulary`]. Comments and whitespace
//! are dropped; invalid characters and unterminated strings are reported
//! as diagnostics and dropped too, so the parser only sees valid tokens.

mod raw_token;

use gram_diagnostic::{Diagnostic, ErrorCode};
use gram_ir::{SharedInterner, Span, Token, TokenKind, TokenList, Vocabulary};
use logos::Logos;
use rustc_hash::FxHashMap;
use tracing::debug;

use raw_token::{RawToken, TOKEN_KINDS};

/// Build the LKT token vocabulary.
pub fn vocabulary() -> Vocabulary {
    let mut vocab = Vocabulary::new();
    for &(_, name, text) in TOKEN_KINDS {
        match text {
            Some(text) => vocab.define_literal(name, text),
            None => vocab.define(name),
        };
    }
    vocab
}

/// Lexer output: tokens ending in the termination token, plus lexical
/// errors.
#[derive(Clone, Debug)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lexer bound to one vocabulary and interner.
#[derive(Clone)]
pub struct Lexer {
    kinds: FxHashMap<RawToken, TokenKind>,
    interner: SharedInterner,
}

impl Lexer {
    pub fn new(vocabulary: &Vocabulary, interner: SharedInterner) -> Self {
        let kinds = TOKEN_KINDS
            .iter()
            .filter_map(|&(raw, name, _)| vocabulary.kind(name).map(|kind| (raw, kind)))
            .collect();
        Lexer { kinds, interner }
    }

    /// Tokenize `source`.
    ///
    /// Sources longer than `u32::MAX` bytes are not lexed: the output holds
    /// only the termination token and an E0003 diagnostic.
    pub fn lex(&self, source: &str) -> LexOutput {
        let end = match source_end(source.len()) {
            Ok(end) => end,
            Err(diagnostic) => {
                return LexOutput {
                    tokens: TokenList::new(Vec::new(), 0),
                    diagnostics: vec![diagnostic],
                };
            }
        };

        let mut tokens = Vec::new();
        let mut diagnostics = Vec::new();
        let mut logos = RawToken::lexer(source);

        while let Some(result) = logos.next() {
            let Ok(span) = Span::try_from_range(logos.span()) else {
                break;
            };
            let slice = logos.slice();

            match result {
                Ok(RawToken::Comment) => {}
                Ok(RawToken::UnterminatedString) => {
                    diagnostics.push(
                        Diagnostic::error(ErrorCode::E0002)
                            .with_message("unterminated string literal")
                            .with_label(span, "missing closing `\"`"),
                    );
                }
                Ok(raw) => {
                    if let Some(&kind) = self.kinds.get(&raw) {
                        tokens.push(Token::new(kind, self.interner.intern(slice), span));
                    }
                }
                Err(()) => {
                    diagnostics.push(
                        Diagnostic::error(ErrorCode::E0001)
                            .with_message(format!("invalid character `{slice}`"))
                            .with_label(span, "not valid in LKT source"),
                    );
                }
            }
        }

        debug!(
            tokens = tokens.len(),
            errors = diagnostics.len(),
            "lexed source"
        );
        LexOutput {
            tokens: TokenList::new(tokens, end),
            diagnostics,
        }
    }
}

/// End offset of a source of `len` bytes, if spans can address it.
fn source_end(len: usize) -> Result<u32, Diagnostic> {
    u32::try_from(len).map_err(|_| {
        Diagnostic::error(ErrorCode::E0003)
            .with_message(format!("source file is {len} bytes, the limit is {}", u32::MAX))
            .with_label(Span::point(0), "file not lexed")
    })
}
