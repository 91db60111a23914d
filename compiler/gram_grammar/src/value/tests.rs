#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::FieldKind;
use gram_ir::{Name, TokenKind};

fn token(start: u32, end: u32) -> Token {
    Token::new(TokenKind::from_index(1), Name::EMPTY, Span::new(start, end))
}

#[test]
fn test_field_by_name_includes_inherited() {
    let mut reg = NodeRegistry::new();
    let expr = reg.declare_abstract("Expr", None).unwrap();
    let call = reg.declare_node("Call", Some("Expr")).unwrap();
    reg.add_field(expr, "open", FieldKind::Token).unwrap();
    reg.add_field(call, "callee", FieldKind::Token).unwrap();

    let node = Node {
        ty: call,
        span: Span::new(0, 4),
        fields: vec![Value::Token(token(0, 1)), Value::Token(token(2, 4))],
    };

    assert_eq!(node.field(&reg, "open"), Some(&Value::Token(token(0, 1))));
    assert_eq!(node.field(&reg, "callee"), Some(&Value::Token(token(2, 4))));
    assert_eq!(node.field(&reg, "missing"), None);
    assert!(node.is_a(&reg, expr));
    assert!(!node.is_error(&reg));
}

#[test]
fn test_list_span_merges_elements() {
    let list = Value::List(vec![
        Value::Null,
        Value::Token(token(3, 4)),
        Value::Token(token(8, 10)),
    ]);
    assert_eq!(list.span(), Some(Span::new(3, 10)));
    assert_eq!(Value::List(Vec::new()).span(), None);
}

#[test]
fn test_absent_forms() {
    let ty = NodeTypeId::new(0);
    assert!(Value::Null.is_absent());
    assert!(Value::Absent(ty).is_absent());
    assert_eq!(Value::Absent(ty).node_type(), Some(ty));
    assert!(!Value::List(Vec::new()).is_absent());
    assert_eq!(Value::Null.as_node(), None);
}
