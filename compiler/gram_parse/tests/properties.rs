//! Property-based tests for the parsing engine.
//!
//! Random token streams over a small expression grammar check that:
//! 1. A failure that is not committed leaves the cursor at its start.
//! 2. Running the same rule twice from the same start gives the same result.
//! 3. Ordered choice returns its first matching alternative.
//! 4. A tree is returned only when no syntax error was reported.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use gram_diagnostic::ErrorCode;
use gram_grammar::{
    cut, kind, list_plus, list_star, lit, node, or, rule, seq, skip, FieldKind, Grammar, Resolve,
    ResolvedGrammar,
};
use gram_ir::{Span, StringInterner, Token, TokenList, Vocabulary};
use gram_parse::{parse, parse_rule_at, ParseConfig};
use proptest::prelude::*;

const WORDS: &[&str] = &["a", "b", "1", "2", "(", ")", ",", "+", "fun", ";"];

fn vocabulary() -> Vocabulary {
    let mut vocab = Vocabulary::new();
    vocab.define("Identifier");
    vocab.define("Number");
    for (name, text) in [
        ("LParen", "("),
        ("RParen", ")"),
        ("Comma", ","),
        ("Plus", "+"),
        ("Fun", "fun"),
        ("Semi", ";"),
    ] {
        vocab.define_literal(name, text);
    }
    vocab
}

/// ```text
/// items = (decl | sum ";" | skip)*
/// decl  = FunDecl("fun" ! Identifier "(" ")")
/// sum   = expr ("+" expr)*
/// expr  = call | Ref(Identifier) | Num(Number)
/// call  = Call(Identifier "(" (expr ("," expr)*)? ")")
/// ```
fn grammar() -> ResolvedGrammar {
    let mut g = Grammar::new("items", vocabulary(), StringInterner::shared());
    let reg = g.registry_mut();
    let expr = reg.declare_abstract("Expr", None).unwrap();
    let call = reg.declare_node("Call", Some("Expr")).unwrap();
    reg.add_field(call, "callee", FieldKind::Token).unwrap();
    reg.add_field(call, "args", FieldKind::list_of(expr)).unwrap();
    let r = reg.declare_node("Ref", Some("Expr")).unwrap();
    reg.add_field(r, "name", FieldKind::Token).unwrap();
    let num = reg.declare_node("Num", Some("Expr")).unwrap();
    reg.add_field(num, "value", FieldKind::Token).unwrap();
    reg.declare_abstract("Item", None).unwrap();
    let fun = reg.declare_node("FunDecl", Some("Item")).unwrap();
    reg.add_field(fun, "name", FieldKind::Token).unwrap();
    let sum = reg.declare_node("Sum", Some("Item")).unwrap();
    reg.add_field(sum, "terms", FieldKind::list_of(expr)).unwrap();
    reg.declare_error("ErrorItem", Some("Item")).unwrap();

    g.rule(
        "items",
        list_star(or([rule("decl"), rule("sum"), skip("ErrorItem")])),
    )
    .unwrap();
    g.rule(
        "decl",
        node(
            "FunDecl",
            seq([lit("fun"), cut(), kind("Identifier"), lit("("), lit(")")]),
        ),
    )
    .unwrap();
    g.rule(
        "sum",
        node(
            "Sum",
            seq([list_plus(rule("expr")).sep(lit("+")), lit(";")]),
        ),
    )
    .unwrap();
    g.rule(
        "expr",
        or([
            rule("call"),
            node("Ref", kind("Identifier")),
            node("Num", kind("Number")),
        ]),
    )
    .unwrap();
    g.rule(
        "call",
        node(
            "Call",
            seq([
                kind("Identifier"),
                lit("("),
                list_star(rule("expr")).sep(lit(",")),
                lit(")"),
            ]),
        ),
    )
    .unwrap();
    g.resolve().unwrap()
}

fn lex(grammar: &ResolvedGrammar, words: &[usize]) -> TokenList {
    let vocab = grammar.vocabulary();
    let mut tokens = Vec::new();
    let mut offset = 0u32;
    for &index in words {
        let word = WORDS[index % WORDS.len()];
        let kind = vocab.literal_kind(word).unwrap_or_else(|| {
            if word.starts_with(|c: char| c.is_ascii_digit()) {
                vocab.kind("Number").unwrap()
            } else {
                vocab.kind("Identifier").unwrap()
            }
        });
        let len = u32::try_from(word.len()).unwrap();
        let text = grammar.interner().intern(word);
        tokens.push(Token::new(kind, text, Span::new(offset, offset + len)));
        offset += len + 1;
    }
    TokenList::new(tokens, offset)
}

fn words() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..WORDS.len(), 0..16)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_soft_failure_restores_cursor(words in words(), start in 0usize..18) {
        let g = grammar();
        let tokens = lex(&g, &words);
        let start = start.min(tokens.termination_position());
        let config = ParseConfig::strict();

        for name in ["expr", "sum", "decl", "items"] {
            let rule = g.lookup_rule(name).unwrap();
            let first = parse_rule_at(&g, &tokens, rule, start, &config).unwrap();
            let second = parse_rule_at(&g, &tokens, rule, start, &config).unwrap();
            prop_assert_eq!(&first, &second);

            match &first.result {
                Err(failure) if !failure.committed => {
                    prop_assert_eq!(first.cursor, start, "rule `{}`", name);
                    prop_assert!(failure.position >= start);
                }
                Err(_) => {}
                Ok(_) => {
                    prop_assert!(first.cursor >= start);
                }
            }
        }
    }

    #[test]
    fn prop_first_matching_alternative_wins(words in words(), start in 0usize..18) {
        let g = grammar();
        let tokens = lex(&g, &words);
        let start = start.min(tokens.termination_position());
        let config = ParseConfig::default();

        let expr = g.lookup_rule("expr").unwrap();
        let call = g.lookup_rule("call").unwrap();
        let choice = parse_rule_at(&g, &tokens, expr, start, &config).unwrap();
        let first = parse_rule_at(&g, &tokens, call, start, &config).unwrap();

        if first.result.is_ok() {
            prop_assert_eq!(&choice.result, &first.result);
            prop_assert_eq!(choice.cursor, first.cursor);
        } else if choice.result.is_ok() {
            // A later single-token alternative matched instead.
            prop_assert_eq!(choice.cursor, start + 1);
        }
    }

    #[test]
    fn prop_tree_only_without_syntax_errors(words in words()) {
        let g = grammar();
        let tokens = lex(&g, &words);
        let end = tokens[tokens.termination_position()].span.end;

        for config in [ParseConfig::default(), ParseConfig::strict()] {
            let output = parse(&g, &tokens, &config).unwrap();
            let fatal = output
                .diagnostics
                .iter()
                .any(|d| matches!(d.code, ErrorCode::E1001 | ErrorCode::E1002));
            prop_assert_eq!(output.root.is_some(), !fatal);
            prop_assert_eq!(output.clone(), parse(&g, &tokens, &config).unwrap());

            for diagnostic in &output.diagnostics {
                let span = diagnostic.primary_span().unwrap();
                prop_assert!(span.end <= end);
            }
            if !config.recovery {
                prop_assert!(output.warnings().next().is_none());
            }
        }
    }
}
