#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

fn sample() -> NodeRegistry {
    let mut reg = NodeRegistry::new();
    reg.declare_abstract("Node", None).unwrap();
    reg.declare_abstract("Expr", Some("Node")).unwrap();
    reg.declare_node("Ref", Some("Expr")).unwrap();
    reg.declare_node("Call", Some("Expr")).unwrap();
    reg.declare_node("Decl", Some("Node")).unwrap();
    reg
}

#[test]
fn test_declare_and_lookup() {
    let reg = sample();
    let expr = reg.lookup("Expr").unwrap();
    assert!(reg.is_abstract(expr));
    assert!(!reg.is_error(expr));
    assert_eq!(reg.name(expr), "Expr");
    assert_eq!(reg.node(expr).parent, reg.lookup("Node"));
    assert_eq!(reg.len(), 5);
    assert_eq!(reg.lookup("Missing"), None);
}

#[test]
fn test_declare_duplicate_fails() {
    let mut reg = sample();
    assert_eq!(
        reg.declare_node("Ref", None),
        Err(GrammarError::DuplicateNodeType { name: "Ref".into() })
    );
}

#[test]
fn test_declare_unknown_parent_fails() {
    let mut reg = NodeRegistry::new();
    assert_eq!(
        reg.declare_node("Child", Some("Parent")),
        Err(GrammarError::UnknownParent {
            name: "Child".into(),
            parent: "Parent".into(),
        })
    );
    assert!(reg.is_empty());
}

#[test]
fn test_subtyping() {
    let reg = sample();
    let node = reg.lookup("Node").unwrap();
    let expr = reg.lookup("Expr").unwrap();
    let r = reg.lookup("Ref").unwrap();
    let call = reg.lookup("Call").unwrap();
    let decl = reg.lookup("Decl").unwrap();

    assert!(reg.is_subtype(r, expr));
    assert!(reg.is_subtype(r, node));
    assert!(reg.is_subtype(r, r));
    assert!(!reg.is_subtype(expr, r));
    assert_eq!(reg.common_ancestor(r, call), Some(expr));
    assert_eq!(reg.common_ancestor(r, decl), Some(node));
    assert_eq!(reg.common_ancestor(r, r), Some(r));
}

#[test]
fn test_fields_are_inherited_root_first() {
    let mut reg = sample();
    let expr = reg.lookup("Expr").unwrap();
    let call = reg.lookup("Call").unwrap();

    assert_eq!(reg.add_field(expr, "span_hint", FieldKind::Token).unwrap(), 0);
    assert_eq!(reg.add_field(call, "callee", FieldKind::Node(expr)).unwrap(), 1);
    assert_eq!(reg.add_field(call, "args", FieldKind::list_of(expr)).unwrap(), 2);

    let names: Vec<&str> = reg.fields(call).iter().map(|f| &*f.name).collect();
    assert_eq!(names, vec!["span_hint", "callee", "args"]);
    assert_eq!(reg.field_count(call), 3);
    assert_eq!(reg.field_index(call, "args"), Some(2));
    assert_eq!(reg.field_index(call, "missing"), None);
    assert_eq!(reg.node(call).own_fields().len(), 2);
}

#[test]
fn test_duplicate_field_on_ancestor_fails() {
    let mut reg = sample();
    let expr = reg.lookup("Expr").unwrap();
    let r = reg.lookup("Ref").unwrap();
    reg.add_field(expr, "name", FieldKind::Token).unwrap();

    assert_eq!(
        reg.add_field(r, "name", FieldKind::Token),
        Err(GrammarError::DuplicateField {
            ty: "Ref".into(),
            field: "name".into(),
        })
    );
    assert_eq!(
        reg.add_field(expr, "name", FieldKind::Token),
        Err(GrammarError::DuplicateField {
            ty: "Expr".into(),
            field: "name".into(),
        })
    );
}

#[test]
fn test_duplicate_field_on_subtype_fails() {
    let mut reg = sample();
    let expr = reg.lookup("Expr").unwrap();
    let r = reg.lookup("Ref").unwrap();
    reg.add_field(r, "name", FieldKind::Token).unwrap();

    assert!(matches!(
        reg.add_field(expr, "name", FieldKind::Token),
        Err(GrammarError::DuplicateField { .. })
    ));
}

#[test]
fn test_parent_field_after_subtype_fields_fails() {
    let mut reg = sample();
    let expr = reg.lookup("Expr").unwrap();
    let call = reg.lookup("Call").unwrap();
    assert_eq!(reg.add_field(call, "callee", FieldKind::Token).unwrap(), 0);

    assert_eq!(
        reg.add_field(expr, "late", FieldKind::Token),
        Err(GrammarError::FieldAfterSubtype {
            ty: "Expr".into(),
            field: "late".into(),
            subtype: "Call".into(),
        })
    );
    assert_eq!(reg.field_index(call, "callee"), Some(0));
    assert_eq!(reg.field_count(expr), 0);

    let node = reg.lookup("Node").unwrap();
    assert!(matches!(
        reg.add_field(node, "id", FieldKind::Token),
        Err(GrammarError::FieldAfterSubtype { .. })
    ));
}

#[test]
fn test_parent_field_with_bare_subtypes_is_allowed() {
    let mut reg = NodeRegistry::new();
    let item = reg.declare_abstract("Item", None).unwrap();
    let import = reg.declare_node("Import", Some("Item")).unwrap();

    assert_eq!(reg.add_field(item, "doc", FieldKind::Token).unwrap(), 0);
    assert_eq!(reg.add_field(import, "path", FieldKind::Token).unwrap(), 1);
}

#[test]
fn test_error_nodes_have_no_fields() {
    let mut reg = sample();
    let err = reg.declare_error("ErrorDecl", Some("Node")).unwrap();
    assert!(reg.is_error(err));

    assert_eq!(
        reg.add_field(err, "x", FieldKind::Token),
        Err(GrammarError::ErrorNodeField {
            ty: "ErrorDecl".into()
        })
    );

    // Giving the parent a field would give the error node one too.
    let node = reg.lookup("Node").unwrap();
    assert_eq!(
        reg.add_field(node, "x", FieldKind::Token),
        Err(GrammarError::ErrorNodeField {
            ty: "ErrorDecl".into()
        })
    );
}

#[test]
fn test_error_node_under_parent_with_fields_fails() {
    let mut reg = sample();
    let decl = reg.lookup("Decl").unwrap();
    reg.add_field(decl, "name", FieldKind::Token).unwrap();

    assert_eq!(
        reg.declare_error("BadDecl", Some("Decl")),
        Err(GrammarError::ErrorNodeField {
            ty: "BadDecl".into()
        })
    );
}

#[test]
fn test_enums() {
    let mut reg = NodeRegistry::new();
    let kind = reg.declare_enum("ListKind", &["one", "zero"]).unwrap();

    assert_eq!(reg.lookup_enum("ListKind"), Some(kind));
    assert_eq!(reg.enum_alternative(kind, "zero"), Some(1));
    assert_eq!(reg.enum_alternative(kind, "many"), None);
    assert_eq!(reg.enum_count(), 1);
    assert_eq!(reg.enum_ids().collect::<Vec<_>>(), vec![kind]);
    assert_eq!(
        reg.declare_enum("ListKind", &[]),
        Err(GrammarError::DuplicateEnumType {
            name: "ListKind".into()
        })
    );
}

#[test]
fn test_describe_kind() {
    let mut reg = sample();
    let kind = reg.declare_enum("ListKind", &["one"]).unwrap();
    let expr = reg.lookup("Expr").unwrap();

    assert_eq!(reg.describe_kind(&FieldKind::Token), "a token");
    assert_eq!(reg.describe_kind(&FieldKind::list_of(expr)), "a list of a `Expr` node");
    assert_eq!(reg.describe_kind(&FieldKind::Enum(kind)), "a `ListKind` value");
}
