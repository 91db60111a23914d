//! Gram LKT - the Langkit grammar-description language
//!
//! LKT is both a demonstration language and a self-describing one: its
//! grammar declarations (`grammar foo { rule <- ... }`) are written in the
//! same combinator vocabulary this workspace implements.
//!
//! [`Lkt`] bundles the lexer and the resolved grammar so that a source
//! file goes from text to tree in one call.

pub mod grammar;
pub mod lexer;

use gram_diagnostic::Diagnostic;
use gram_grammar::{GrammarErrors, Resolve, ResolvedGrammar};
use gram_ir::{SharedInterner, StringInterner, TokenList};
use gram_parse::{EngineError, ParseConfig, ParseOutput, Value};
use tracing::debug;

pub use lexer::{LexOutput, Lexer};

/// A lexed and parsed LKT file.
#[derive(Clone, Debug)]
pub struct ParsedFile {
    /// The tree, when the file parsed to the end. It may contain error
    /// nodes.
    pub root: Option<Value>,
    /// Lexical diagnostics followed by syntax diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedFile {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// The LKT front end.
///
/// Holds one resolved grammar; cheap to share across threads by reference.
pub struct Lkt {
    grammar: ResolvedGrammar,
    lexer: Lexer,
}

impl Lkt {
    /// Build the front end with a fresh interner.
    pub fn new() -> Result<Self, GrammarErrors> {
        Self::with_interner(StringInterner::shared())
    }

    /// Build the front end over an existing interner.
    pub fn with_interner(interner: SharedInterner) -> Result<Self, GrammarErrors> {
        let grammar = grammar::grammar(interner.clone())?.resolve()?;
        let lexer = Lexer::new(grammar.vocabulary(), interner);
        Ok(Lkt { grammar, lexer })
    }

    pub fn grammar(&self) -> &ResolvedGrammar {
        &self.grammar
    }

    pub fn lex(&self, source: &str) -> LexOutput {
        self.lexer.lex(source)
    }

    /// Parse already-lexed tokens.
    pub fn parse_tokens(
        &self,
        tokens: &TokenList,
        config: &ParseConfig,
    ) -> Result<ParseOutput, EngineError> {
        gram_parse::parse(&self.grammar, tokens, config)
    }

    /// Lex and parse `source`.
    ///
    /// Lexical errors do not stop parsing: the offending text is dropped
    /// and the parser sees the remaining tokens.
    pub fn parse(&self, source: &str, config: &ParseConfig) -> Result<ParsedFile, EngineError> {
        let LexOutput {
            tokens,
            mut diagnostics,
        } = self.lex(source);
        let output = self.parse_tokens(&tokens, config)?;
        debug!(
            lex_errors = diagnostics.len(),
            parse_diagnostics = output.diagnostics.len(),
            "parsed LKT source"
        );
        diagnostics.extend(output.diagnostics);
        Ok(ParsedFile {
            root: output.root,
            diagnostics,
        })
    }
}
