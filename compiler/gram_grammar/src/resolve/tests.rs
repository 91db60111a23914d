#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::{
    cut, enum_alt, kind, list_plus, list_star, lit, node, null, opt, opt_group, or, predicate,
    rule, seq, skip, GrammarError, Value,
};
use gram_ir::StringInterner;
use pretty_assertions::assert_eq;

fn vocabulary() -> Vocabulary {
    let mut vocab = Vocabulary::new();
    vocab.define("Identifier");
    vocab.define_literal("LArrow", "<-");
    vocab.define_literal("Comma", ",");
    vocab.define_literal("LParen", "(");
    vocab.define_literal("RParen", ")");
    vocab
}

/// `Main(id, expr)` over `Expr <- Ref(Identifier)`.
fn base() -> Grammar {
    let mut g = Grammar::new("main", vocabulary(), StringInterner::shared());
    let reg = g.registry_mut();
    let expr = reg.declare_abstract("Expr", None).unwrap();
    let main = reg.declare_node("Main", None).unwrap();
    let r = reg.declare_node("Ref", Some("Expr")).unwrap();
    reg.add_field(main, "name", FieldKind::Token).unwrap();
    reg.add_field(main, "value", FieldKind::Node(expr)).unwrap();
    reg.add_field(r, "name", FieldKind::Token).unwrap();
    g
}

fn errors_of(g: &Grammar) -> Vec<GrammarError> {
    g.resolve().unwrap_err().0
}

#[test]
fn test_resolve_end_to_end_grammar() {
    let mut g = base();
    g.rule("main", node("Main", seq([kind("Identifier"), lit("<-"), rule("expr")])))
        .unwrap();
    g.rule("expr", node("Ref", kind("Identifier"))).unwrap();

    let resolved = g.resolve().unwrap();
    let main = resolved.lookup_rule("main").unwrap();
    assert_eq!(resolved.entry(), main);
    assert_eq!(resolved.rule(main).arity, 1);

    let Op::Node { inner, fields, .. } = resolved.op(resolved.rule(main).body) else {
        panic!("main is a node construction");
    };
    assert_eq!(resolved.arity(*inner), 2, "the '<-' literal is discarded");
    assert_eq!(fields.len(), 2);
}

#[test]
fn test_rule_references_become_handles() {
    let mut g = base();
    g.rule("main", node("Main", seq([kind("Identifier"), rule("expr")])))
        .unwrap();
    g.rule("expr", node("Ref", kind("Identifier"))).unwrap();
    let resolved = g.resolve().unwrap();

    let expr = resolved.lookup_rule("expr").unwrap();
    let refs: Vec<RuleId> = (0..resolved.op_count())
        .filter_map(|i| match resolved.op(CombinatorId::from_len(i)) {
            Op::Rule(r) => Some(*r),
            _ => None,
        })
        .collect();
    assert_eq!(refs, vec![expr]);
}

#[test]
fn test_resolve_is_idempotent() {
    let mut g = base();
    g.rule("main", node("Main", seq([kind("Identifier"), rule("expr")])))
        .unwrap();
    g.rule("expr", node("Ref", kind("Identifier"))).unwrap();

    let first = g.resolve().unwrap();
    let again = first.resolve().unwrap();
    assert!(again.ptr_eq(&first));
    assert_eq!(again, first);

    let fresh = resolve(&g).unwrap();
    assert!(!fresh.ptr_eq(&first));
    assert_eq!(fresh, first, "resolving twice yields the same structure");
}

#[test]
fn test_undefined_rule_and_no_entry_are_collected() {
    let mut g = Grammar::new("start", vocabulary(), StringInterner::shared());
    g.rule("a", rule("missing")).unwrap();
    g.rule("b", seq([rule("also_missing"), rule("a")])).unwrap();

    assert_eq!(
        errors_of(&g),
        vec![
            GrammarError::NoEntryRule {
                name: "start".into()
            },
            GrammarError::UndefinedRule {
                rule: "a".into(),
                name: "missing".into()
            },
            GrammarError::UndefinedRule {
                rule: "b".into(),
                name: "also_missing".into()
            },
        ]
    );
}

#[test]
fn test_unknown_names() {
    let mut g = Grammar::new("main", vocabulary(), StringInterner::shared());
    g.rule(
        "main",
        seq([
            kind("Number"),
            lit("=>"),
            node("Nope", seq([])),
            predicate("nope", kind("Identifier")),
            enum_alt("Kind", "one", lit(",")),
        ]),
    )
    .unwrap();

    assert_eq!(
        errors_of(&g),
        vec![
            GrammarError::UnknownTokenKind {
                rule: "main".into(),
                name: "Number".into()
            },
            GrammarError::UnknownLiteral {
                rule: "main".into(),
                text: "=>".into()
            },
            GrammarError::UnknownNodeType {
                name: "Nope".into()
            },
            GrammarError::UndefinedPredicate {
                rule: "main".into(),
                name: "nope".into()
            },
            GrammarError::UnknownEnumType {
                name: "Kind".into()
            },
        ]
    );
}

#[test]
fn test_field_count_mismatch() {
    let mut g = base();
    g.rule("main", node("Main", kind("Identifier"))).unwrap();

    assert_eq!(
        errors_of(&g),
        vec![GrammarError::FieldCountMismatch {
            rule: "main".into(),
            ty: "Main".into(),
            expected: 2,
            found: 1,
        }]
    );
}

#[test]
fn test_field_kind_mismatch() {
    let mut g = base();
    g.rule("main", node("Main", seq([kind("Identifier"), kind("Identifier")])))
        .unwrap();

    assert_eq!(
        errors_of(&g),
        vec![GrammarError::FieldKindMismatch {
            rule: "main".into(),
            ty: "Main".into(),
            field: "value".into(),
            expected: "a `Expr` node".into(),
            found: "a token".into(),
        }]
    );
}

#[test]
fn test_abstract_construction() {
    let mut g = base();
    g.rule("main", node("Expr", seq([]))).unwrap();
    assert_eq!(
        errors_of(&g),
        vec![GrammarError::AbstractConstruction {
            rule: "main".into(),
            ty: "Expr".into(),
        }]
    );
}

#[test]
fn test_choice_arity_must_agree() {
    let mut g = base();
    g.rule(
        "main",
        or([kind("Identifier"), seq([kind("Identifier"), kind("Identifier")])]),
    )
    .unwrap();
    assert_eq!(
        errors_of(&g),
        vec![GrammarError::ArityMismatch {
            rule: "main".into(),
            context: crate::ArityContext::Alternatives,
            expected: 1,
            found: 2,
        }]
    );
}

#[test]
fn test_list_element_and_predicate_arity() {
    let mut g = base();
    g.predicate("p", |_| true);
    g.rule("main", seq([list_star(lit(",")), predicate("p", seq([]))]))
        .unwrap();
    assert_eq!(
        errors_of(&g),
        vec![
            GrammarError::ArityMismatch {
                rule: "main".into(),
                context: crate::ArityContext::ListElement,
                expected: 1,
                found: 0,
            },
            GrammarError::ArityMismatch {
                rule: "main".into(),
                context: crate::ArityContext::Predicate,
                expected: 1,
                found: 0,
            },
        ]
    );
}

#[test]
fn test_skip_requires_error_node() {
    let mut g = base();
    g.rule("main", or([node("Ref", kind("Identifier")), skip("Ref")]))
        .unwrap();
    assert_eq!(
        errors_of(&g),
        vec![GrammarError::NotAnErrorNode {
            rule: "main".into(),
            ty: "Ref".into(),
        }]
    );
}

#[test]
fn test_skip_alternative_marks_recovery_point() {
    let mut g = base();
    g.registry_mut().declare_error("ErrorExpr", Some("Expr")).unwrap();
    g.rule("main", list_plus(or([rule("expr"), skip("ErrorExpr")])))
        .unwrap();
    g.rule("expr", node("Ref", kind("Identifier"))).unwrap();

    let resolved = g.resolve().unwrap();
    let recovering = (0..resolved.op_count())
        .filter(|&i| {
            matches!(
                resolved.op(CombinatorId::from_len(i)),
                Op::Or { recovers: true, .. }
            )
        })
        .count();
    assert_eq!(recovering, 1);
}

#[test]
fn test_recursive_rules_reach_fixpoint() {
    let mut g = base();
    let reg = g.registry_mut();
    let expr = reg.lookup("Expr").unwrap();
    let call = reg.declare_node("Call", Some("Expr")).unwrap();
    reg.add_field(call, "callee", FieldKind::Token).unwrap();
    reg.add_field(call, "arg", FieldKind::Node(expr)).unwrap();

    g.rule("main", rule("expr")).unwrap();
    g.rule(
        "expr",
        or([
            node(
                "Call",
                seq([kind("Identifier"), lit("("), rule("expr"), lit(")")]),
            ),
            node("Ref", kind("Identifier")),
        ]),
    )
    .unwrap();

    // The first alternative only becomes known once the second has been.
    g.rule(
        "paren",
        or([
            seq([lit("("), rule("paren"), lit(")")]),
            kind("Identifier"),
        ]),
    )
    .unwrap();

    let resolved = g.resolve().unwrap();
    let expr_rule = resolved.lookup_rule("expr").unwrap();
    assert_eq!(resolved.rule(expr_rule).arity, 1);
    let paren = resolved.lookup_rule("paren").unwrap();
    assert_eq!(resolved.rule(paren).arity, 1);
}

#[test]
fn test_choice_joins_to_common_ancestor() {
    // Main.value is an Expr; a choice between Ref and Null(Expr) fits it.
    let mut g = base();
    g.rule(
        "main",
        node(
            "Main",
            seq([kind("Identifier"), or([rule("ref"), null("Expr")])]),
        ),
    )
    .unwrap();
    g.rule("ref", node("Ref", kind("Identifier"))).unwrap();
    assert!(g.resolve().is_ok());
}

#[test]
fn test_optional_group_and_list_fields() {
    let mut g = base();
    let reg = g.registry_mut();
    let expr = reg.lookup("Expr").unwrap();
    let args = reg.declare_node("Args", None).unwrap();
    reg.add_field(args, "items", FieldKind::list_of(expr)).unwrap();
    reg.add_field(args, "extra", FieldKind::list_of(expr)).unwrap();

    g.rule(
        "main",
        node(
            "Args",
            seq([
                list_star(rule("ref")).sep(lit(",")),
                opt_group(seq([lit("("), rule("ref"), lit(")")])),
            ]),
        ),
    )
    .unwrap();
    g.rule("ref", node("Ref", kind("Identifier"))).unwrap();
    assert!(g.resolve().is_ok());
}

#[test]
fn test_unproductive_rule() {
    let mut g = base();
    g.rule("main", seq([kind("Identifier"), rule("loop")])).unwrap();
    g.rule("loop", seq([lit(","), rule("loop")])).unwrap();

    assert_eq!(
        errors_of(&g),
        vec![
            GrammarError::UnproductiveRule {
                rule: "main".into()
            },
            GrammarError::UnproductiveRule {
                rule: "loop".into()
            },
        ]
    );
}

#[test]
fn test_enum_alternative_checks() {
    let mut g = base();
    g.registry_mut().declare_enum("Kind", &["one", "zero"]).unwrap();
    g.rule(
        "main",
        seq([
            enum_alt("Kind", "many", lit(",")),
            enum_alt("Kind", "one", kind("Identifier")),
        ]),
    )
    .unwrap();
    assert_eq!(
        errors_of(&g),
        vec![GrammarError::UnknownEnumAlternative {
            ty: "Kind".into(),
            alt: "many".into(),
        }]
    );

    let mut g = base();
    g.registry_mut().declare_enum("Kind", &["one", "zero"]).unwrap();
    g.rule("main", enum_alt("Kind", "one", kind("Identifier"))).unwrap();
    assert_eq!(
        errors_of(&g),
        vec![GrammarError::ArityMismatch {
            rule: "main".into(),
            context: crate::ArityContext::EnumAlternative,
            expected: 0,
            found: 1,
        }]
    );
}

#[test]
fn test_cut_and_opt_have_expected_arity() {
    let mut g = base();
    g.rule("main", seq([cut(), opt(kind("Identifier"))])).unwrap();
    let resolved = g.resolve().unwrap();
    assert_eq!(resolved.rule(resolved.entry()).arity, 1);
}

#[test]
fn test_predicates_are_carried_over() {
    let mut g = base();
    g.predicate("never", |_: &Value| false);
    g.rule("main", predicate("never", kind("Identifier"))).unwrap();

    let resolved = g.resolve().unwrap();
    let Op::Predicate { predicate, .. } = resolved.op(resolved.rule(resolved.entry()).body)
    else {
        panic!("entry is a predicate");
    };
    let p = resolved.predicate(*predicate);
    assert_eq!(&*p.name, "never");
    assert!(!(p.check)(&Value::Null));
}

#[test]
fn test_describe_token() {
    let mut g = base();
    g.rule("main", kind("Identifier")).unwrap();
    let resolved = g.resolve().unwrap();
    let vocab = resolved.vocabulary();
    let arrow = vocab.kind("LArrow").unwrap();
    let ident = vocab.kind("Identifier").unwrap();
    let skip_text = resolved.interner().intern("skip");

    assert_eq!(resolved.describe_token(arrow, None), "'<-'");
    assert_eq!(resolved.describe_token(ident, None), "Identifier");
    assert_eq!(resolved.describe_token(ident, Some(skip_text)), "'skip'");
}

#[test]
fn test_errors_display() {
    let mut g = Grammar::new("main", vocabulary(), StringInterner::shared());
    g.rule("other", seq([])).unwrap();
    let text = g.resolve().unwrap_err().to_string();
    assert_eq!(text, "grammar has 1 error\n  entry rule `main` is not defined");
}
