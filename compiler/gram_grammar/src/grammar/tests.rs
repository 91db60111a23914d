#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::{kind, rule, seq};
use gram_ir::StringInterner;

fn empty() -> Grammar {
    Grammar::new("main", Vocabulary::new(), StringInterner::shared())
}

#[test]
fn test_rules_keep_insertion_order() {
    let mut g = empty();
    g.rule("main", rule("b")).unwrap();
    g.rule("b", kind("Identifier")).unwrap();

    let names: Vec<&str> = g.rules().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["main", "b"]);
    assert_eq!(g.rule_body("b"), Some(&kind("Identifier")));
    assert_eq!(g.rule_count(), 2);
    assert_eq!(g.entry(), "main");
}

#[test]
fn test_duplicate_rule_fails() {
    let mut g = empty();
    g.rule("main", seq([])).unwrap();
    assert_eq!(
        g.rule("main", seq([])),
        Err(GrammarError::DuplicateRule { name: "main".into() })
    );
}

#[test]
fn test_predicate_replacement() {
    let mut g = empty();
    g.predicate("p", |_| false);
    g.predicate("q", |_| false);
    g.predicate("p", |_| true);

    let preds = g.predicates();
    assert_eq!(preds.len(), 2);
    assert_eq!(preds[0].0, "p");
    assert!((preds[0].1)(&Value::Null));
}

#[test]
fn test_debug_lists_summary() {
    let mut g = empty();
    g.predicate("is_upper", |_| true);
    let text = format!("{g:?}");
    assert!(text.contains("entry: \"main\""));
    assert!(text.contains("is_upper"));
}
