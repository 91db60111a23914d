//! Raw Token Definition
//!
//! The logos-derived tokenizer output, before interning and the mapping
//! onto the language's token vocabulary.

use logos::Logos;

#[derive(Logos, Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    // Trivia: lexed, never emitted.
    #[regex(r"#([^#\n][^\n]*)?")]
    Comment,

    #[regex(r"##[^\n]*")]
    DocComment,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,
    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,
    #[regex(r"[0-9]+")]
    Number,

    #[token("grammar")]
    Grammar,
    #[token("class")]
    Class,
    #[token("fun")]
    Fun,
    #[token("isa")]
    Isa,
    #[token("null")]
    Null,
    #[token("or")]
    Or,
    #[token("list+")]
    ListPlus,
    #[token("list*")]
    ListStar,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LPar,
    #[token(")")]
    RPar,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("<-")]
    LArrow,
    #[token("=>")]
    FatRightArrow,
    #[token("|>")]
    PipeGt,
    #[token("|")]
    Pipe,
    #[token("?")]
    Question,
    #[token("/")]
    Slash,
    #[token("@")]
    At,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("=")]
    Equal,
    #[token(".")]
    Dot,
    #[token("!")]
    Excl,
}

/// Token kinds of the language in vocabulary order: raw token, kind name,
/// fixed text. Raw tokens missing here are trivia or lexer errors.
pub(crate) const TOKEN_KINDS: &[(RawToken, &str, Option<&str>)] = &[
    (RawToken::Identifier, "Identifier", None),
    (RawToken::String, "String", None),
    (RawToken::Number, "Number", None),
    (RawToken::DocComment, "DocComment", None),
    (RawToken::Grammar, "Grammar", Some("grammar")),
    (RawToken::Class, "Class", Some("class")),
    (RawToken::Fun, "Fun", Some("fun")),
    (RawToken::Isa, "Isa", Some("isa")),
    (RawToken::Null, "Null", Some("null")),
    (RawToken::Or, "Or", Some("or")),
    (RawToken::ListPlus, "ListPlus", Some("list+")),
    (RawToken::ListStar, "ListStar", Some("list*")),
    (RawToken::LBrace, "LBrace", Some("{")),
    (RawToken::RBrace, "RBrace", Some("}")),
    (RawToken::LPar, "LPar", Some("(")),
    (RawToken::RPar, "RPar", Some(")")),
    (RawToken::LBrack, "LBrack", Some("[")),
    (RawToken::RBrack, "RBrack", Some("]")),
    (RawToken::LArrow, "LArrow", Some("<-")),
    (RawToken::FatRightArrow, "FatRightArrow", Some("=>")),
    (RawToken::PipeGt, "PipeGt", Some("|>")),
    (RawToken::Pipe, "Pipe", Some("|")),
    (RawToken::Question, "Question", Some("?")),
    (RawToken::Slash, "Slash", Some("/")),
    (RawToken::At, "At", Some("@")),
    (RawToken::Colon, "Colon", Some(":")),
    (RawToken::Comma, "Comma", Some(",")),
    (RawToken::Equal, "Equal", Some("=")),
    (RawToken::Dot, "Dot", Some(".")),
    (RawToken::Excl, "Excl", Some("!")),
];
