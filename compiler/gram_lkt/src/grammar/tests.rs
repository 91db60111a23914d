#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use gram_grammar::{FieldKind, NodeFlags, Resolve};
use gram_ir::StringInterner;
use pretty_assertions::assert_eq;

#[test]
fn test_grammar_resolves() {
    let grammar = grammar(StringInterner::shared()).unwrap();
    assert_eq!(grammar.entry(), ENTRY_RULE);
    assert!(grammar.rule_body("grammar_expr").is_some());

    let resolved = grammar.resolve().unwrap();
    assert_eq!(resolved.lookup_rule(ENTRY_RULE), Some(resolved.entry()));
    assert_eq!(resolved.rule(resolved.entry()).arity, 1);
}

#[test]
fn test_node_hierarchy() {
    let grammar = grammar(StringInterner::shared()).unwrap();
    let registry = grammar.registry();
    let decl = registry.lookup("Decl").unwrap();
    let error = registry.lookup("ErrorDecl").unwrap();
    let field_decl = registry.lookup("FieldDecl").unwrap();

    assert!(registry.is_abstract(decl));
    assert!(registry.node(error).flags.contains(NodeFlags::ERROR));
    assert!(registry.is_subtype(field_decl, decl));
    assert_eq!(registry.field_count(error), 0);

    let names: Vec<&str> = registry
        .fields(field_decl)
        .iter()
        .map(|f| &*f.name)
        .collect();
    assert_eq!(names, vec!["name", "type"]);
}

#[test]
fn test_or_expr_field_is_list_of_lists() {
    let grammar = grammar(StringInterner::shared()).unwrap();
    let registry = grammar.registry();
    let or_expr = registry.lookup("GrammarOrExpr").unwrap();
    let expr = registry.lookup("GrammarExpr").unwrap();
    assert_eq!(
        registry.fields(or_expr)[0].kind,
        FieldKind::List(Box::new(FieldKind::list_of(expr)))
    );
}
