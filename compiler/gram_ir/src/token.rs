//! Token kinds, vocabularies and token lists.
//!
//! Token kinds are not a fixed enum: every language declares its own kinds
//! in a [`Vocabulary`]. Kind `0` is always the distinguished termination
//! kind, so every [`TokenList`] can end with it regardless of language.

use std::fmt;
use std::ops::Index;

use rustc_hash::FxHashMap;

use super::{Name, Span};

/// A token kind, as declared in a [`Vocabulary`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TokenKind(u16);

impl TokenKind {
    /// The end-of-input kind present in every vocabulary.
    pub const TERMINATION: TokenKind = TokenKind(0);

    /// Create a kind from its index in a vocabulary.
    #[inline]
    pub const fn from_index(index: u16) -> Self {
        TokenKind(index)
    }

    /// Index of this kind in its vocabulary.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_termination(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenKind({})", self.0)
    }
}

#[derive(Clone, Debug)]
struct KindEntry {
    name: Box<str>,
    literal: Option<Box<str>>,
}

/// The set of token kinds a language's lexer produces.
///
/// Kinds are either plain (`Identifier`, `String`) or carry a fixed literal
/// text (`"<-"`, `"grammar"`). Grammar literals are resolved to kinds through
/// the literal table.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    kinds: Vec<KindEntry>,
    by_name: FxHashMap<Box<str>, TokenKind>,
    by_literal: FxHashMap<Box<str>, TokenKind>,
}

impl Vocabulary {
    /// Name of the termination kind.
    pub const TERMINATION_NAME: &'static str = "Termination";

    /// Create a vocabulary containing only the termination kind.
    pub fn new() -> Self {
        let mut vocab = Vocabulary {
            kinds: Vec::new(),
            by_name: FxHashMap::default(),
            by_literal: FxHashMap::default(),
        };
        vocab.push(Self::TERMINATION_NAME, None);
        vocab
    }

    fn push(&mut self, name: &str, literal: Option<&str>) -> TokenKind {
        let index = u16::try_from(self.kinds.len())
            .unwrap_or_else(|_| panic!("vocabulary exceeded {} token kinds", u16::MAX));
        let kind = TokenKind(index);
        self.kinds.push(KindEntry {
            name: name.into(),
            literal: literal.map(Into::into),
        });
        self.by_name.insert(name.into(), kind);
        if let Some(text) = literal {
            self.by_literal.entry(text.into()).or_insert(kind);
        }
        kind
    }

    /// Define a plain token kind. Redefining a name returns the existing kind.
    pub fn define(&mut self, name: &str) -> TokenKind {
        if let Some(&kind) = self.by_name.get(name) {
            return kind;
        }
        self.push(name, None)
    }

    /// Define a token kind whose tokens always have the given text.
    ///
    /// Redefining a name returns the existing kind. If the text is already
    /// bound to another kind, the first binding wins for literal lookups.
    pub fn define_literal(&mut self, name: &str, text: &str) -> TokenKind {
        if let Some(&kind) = self.by_name.get(name) {
            return kind;
        }
        self.push(name, Some(text))
    }

    /// Look up a kind by name.
    pub fn kind(&self, name: &str) -> Option<TokenKind> {
        self.by_name.get(name).copied()
    }

    /// Look up the kind bound to a literal text.
    pub fn literal_kind(&self, text: &str) -> Option<TokenKind> {
        self.by_literal.get(text).copied()
    }

    /// Name of a kind (`"?"` for kinds from another vocabulary).
    pub fn name(&self, kind: TokenKind) -> &str {
        self.kinds.get(kind.index()).map_or("?", |e| &e.name)
    }

    /// Fixed literal text of a kind, if it has one.
    pub fn literal(&self, kind: TokenKind) -> Option<&str> {
        self.kinds.get(kind.index()).and_then(|e| e.literal.as_deref())
    }

    /// Human-readable description for "expected ..." messages.
    ///
    /// Literal kinds render as their quoted text (`'<-'`), plain kinds as
    /// their name (`Identifier`).
    pub fn describe(&self, kind: TokenKind) -> String {
        match self.literal(kind) {
            Some(text) => format!("'{text}'"),
            None => self.name(kind).to_string(),
        }
    }

    /// Number of kinds, including termination.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false: the termination kind is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all kinds in definition order.
    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        (0..self.kinds.len()).filter_map(|i| u16::try_from(i).ok().map(TokenKind))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

/// A token: kind, interned literal text and source span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Name,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: Name, span: Span) -> Self {
        Token { kind, text, span }
    }

    /// The termination token placed at `offset`.
    #[inline]
    pub fn termination(offset: u32) -> Self {
        Token {
            kind: TokenKind::TERMINATION,
            text: Name::EMPTY,
            span: Span::point(offset),
        }
    }
}

/// A token stream that always ends with exactly one termination token.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Build a list from lexer output, appending the termination token at
    /// `end_offset` unless the tokens already end with one.
    ///
    /// Termination tokens before the end are dropped so the termination
    /// token is always last and unique.
    pub fn new(tokens: Vec<Token>, end_offset: u32) -> Self {
        let mut tokens: Vec<Token> = tokens;
        let terminated = tokens.last().is_some_and(|t| t.kind.is_termination());
        let last = if terminated { tokens.pop() } else { None };
        tokens.retain(|t| !t.kind.is_termination());
        tokens.push(last.unwrap_or_else(|| Token::termination(end_offset)));
        TokenList { tokens }
    }

    /// Number of tokens, including the termination token.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false: a token list holds at least the termination token.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Index of the termination token.
    #[inline]
    pub fn termination_position(&self) -> usize {
        self.tokens.len() - 1
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
