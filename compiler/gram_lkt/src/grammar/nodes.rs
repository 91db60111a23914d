//! The LKT node hierarchy.

use gram_grammar::{FieldKind, GrammarError, NodeFlags, NodeRegistry, NodeTypeId};

const ABSTRACT: NodeFlags = NodeFlags::ABSTRACT;
const CONCRETE: NodeFlags = NodeFlags::empty();
const ERROR: NodeFlags = NodeFlags::ERROR;

/// `(name, parent, flags)`, parents before children.
const NODE_TYPES: &[(&str, Option<&str>, NodeFlags)] = &[
    ("LKNode", None, ABSTRACT),
    ("LangkitRoot", Some("LKNode"), CONCRETE),
    ("FullDecl", Some("LKNode"), CONCRETE),
    ("Doc", Some("LKNode"), CONCRETE),
    ("DocComment", Some("LKNode"), CONCRETE),
    ("DeclAnnotation", Some("LKNode"), CONCRETE),
    ("Param", Some("LKNode"), CONCRETE),
    // Declarations
    ("Decl", Some("LKNode"), ABSTRACT),
    ("ErrorDecl", Some("Decl"), ERROR),
    ("BaseGrammarDecl", Some("Decl"), ABSTRACT),
    ("GrammarDecl", Some("BaseGrammarDecl"), CONCRETE),
    ("GrammarRuleDecl", Some("Decl"), CONCRETE),
    ("ClassDecl", Some("Decl"), CONCRETE),
    ("FunDecl", Some("Decl"), CONCRETE),
    ("ValDecl", Some("Decl"), ABSTRACT),
    ("FunArgDecl", Some("ValDecl"), CONCRETE),
    ("LambdaArgDecl", Some("ValDecl"), CONCRETE),
    ("FieldDecl", Some("ValDecl"), CONCRETE),
    // Types
    ("TypeRef", Some("LKNode"), ABSTRACT),
    ("SimpleTypeRef", Some("TypeRef"), CONCRETE),
    ("GenericTypeRef", Some("TypeRef"), CONCRETE),
    // Expressions
    ("Expr", Some("LKNode"), ABSTRACT),
    ("Name", Some("Expr"), ABSTRACT),
    ("Id", Some("Name"), CONCRETE),
    ("DottedName", Some("Name"), CONCRETE),
    ("NullLit", Some("Expr"), CONCRETE),
    ("NumLit", Some("Expr"), CONCRETE),
    ("StringLit", Some("Expr"), CONCRETE),
    ("ArrayLiteral", Some("Expr"), CONCRETE),
    ("Isa", Some("Expr"), CONCRETE),
    ("ParenExpr", Some("Expr"), CONCRETE),
    ("CallExpr", Some("Expr"), CONCRETE),
    ("GenericInstantiation", Some("Expr"), CONCRETE),
    ("ErrorOnNull", Some("Expr"), CONCRETE),
    ("LambdaExpr", Some("Expr"), CONCRETE),
    // Grammar expressions
    ("GrammarExpr", Some("Expr"), ABSTRACT),
    ("ParseNodeExpr", Some("GrammarExpr"), CONCRETE),
    ("GrammarRuleRef", Some("GrammarExpr"), CONCRETE),
    ("TokenLit", Some("GrammarExpr"), CONCRETE),
    ("GrammarPick", Some("GrammarExpr"), CONCRETE),
    ("GrammarToken", Some("GrammarExpr"), CONCRETE),
    ("GrammarOrExpr", Some("GrammarExpr"), CONCRETE),
    ("GrammarOpt", Some("GrammarExpr"), CONCRETE),
    ("GrammarOptGroup", Some("GrammarExpr"), CONCRETE),
    ("GrammarCut", Some("GrammarExpr"), CONCRETE),
    ("GrammarNull", Some("GrammarExpr"), CONCRETE),
    ("GrammarSkip", Some("GrammarExpr"), CONCRETE),
    ("GrammarPredicate", Some("GrammarExpr"), CONCRETE),
    ("GrammarDontSkip", Some("GrammarExpr"), CONCRETE),
    ("GrammarList", Some("GrammarExpr"), CONCRETE),
];

/// Field kinds by type name.
#[derive(Copy, Clone)]
enum Kind {
    Token,
    Node(&'static str),
    List(&'static str),
    ListOfLists(&'static str),
    Enum(&'static str),
}

/// `(node type, field, kind)`, in layout order per type.
const FIELDS: &[(&str, &str, Kind)] = &[
    ("LangkitRoot", "decls", Kind::List("LKNode")),
    ("FullDecl", "doc", Kind::Node("Doc")),
    ("FullDecl", "decl_annotations", Kind::List("DeclAnnotation")),
    ("FullDecl", "decl", Kind::Node("Decl")),
    ("Doc", "lines", Kind::List("DocComment")),
    ("DocComment", "token", Kind::Token),
    ("DeclAnnotation", "name", Kind::Node("Id")),
    ("DeclAnnotation", "params", Kind::List("Param")),
    ("Param", "name", Kind::Node("Id")),
    ("Param", "value", Kind::Node("Expr")),
    ("GrammarDecl", "name", Kind::Node("Id")),
    ("GrammarDecl", "rules", Kind::List("Decl")),
    ("GrammarRuleDecl", "name", Kind::Node("Id")),
    ("GrammarRuleDecl", "expr", Kind::Node("GrammarExpr")),
    ("ClassDecl", "name", Kind::Node("Id")),
    ("ClassDecl", "base_class", Kind::Node("TypeRef")),
    ("ClassDecl", "decls", Kind::List("LKNode")),
    ("FunDecl", "name", Kind::Node("Id")),
    ("FunDecl", "args", Kind::List("FunArgDecl")),
    ("FunDecl", "return_type", Kind::Node("TypeRef")),
    ("FunDecl", "body", Kind::Node("Expr")),
    ("ValDecl", "name", Kind::Node("Id")),
    ("ValDecl", "type", Kind::Node("TypeRef")),
    ("FunArgDecl", "default_val", Kind::Node("Expr")),
    ("LambdaArgDecl", "default_val", Kind::Node("Expr")),
    ("SimpleTypeRef", "type_name", Kind::Node("Name")),
    ("GenericTypeRef", "type_name", Kind::Node("Name")),
    ("GenericTypeRef", "params", Kind::List("TypeRef")),
    ("Id", "token", Kind::Token),
    ("DottedName", "prefix", Kind::Node("Name")),
    ("DottedName", "suffix", Kind::Node("Name")),
    ("NullLit", "token", Kind::Token),
    ("NumLit", "token", Kind::Token),
    ("StringLit", "token", Kind::Token),
    ("ArrayLiteral", "exprs", Kind::List("Expr")),
    ("Isa", "expr", Kind::Node("Expr")),
    ("Isa", "dest_type", Kind::Node("TypeRef")),
    ("ParenExpr", "expr", Kind::Node("Expr")),
    ("CallExpr", "name", Kind::Node("Expr")),
    ("CallExpr", "args", Kind::List("Param")),
    ("GenericInstantiation", "name", Kind::Node("Expr")),
    ("GenericInstantiation", "args", Kind::List("Param")),
    ("ErrorOnNull", "expr", Kind::Node("Expr")),
    ("LambdaExpr", "params", Kind::List("LambdaArgDecl")),
    ("LambdaExpr", "body", Kind::Node("Expr")),
    ("ParseNodeExpr", "node_name", Kind::Node("Id")),
    ("ParseNodeExpr", "sub_exprs", Kind::List("GrammarExpr")),
    ("GrammarRuleRef", "node_name", Kind::Node("Id")),
    ("TokenLit", "token", Kind::Token),
    ("GrammarPick", "exprs", Kind::List("GrammarExpr")),
    ("GrammarToken", "token_name", Kind::Node("Id")),
    ("GrammarToken", "expr", Kind::Node("TokenLit")),
    ("GrammarOrExpr", "sub_exprs", Kind::ListOfLists("GrammarExpr")),
    ("GrammarOpt", "expr", Kind::Node("GrammarExpr")),
    ("GrammarOptGroup", "expr", Kind::List("GrammarExpr")),
    ("GrammarNull", "name", Kind::Node("Id")),
    ("GrammarSkip", "name", Kind::Node("Id")),
    ("GrammarPredicate", "expr", Kind::Node("GrammarExpr")),
    ("GrammarPredicate", "prop_ref", Kind::Node("Name")),
    ("GrammarDontSkip", "expr", Kind::Node("GrammarExpr")),
    ("GrammarDontSkip", "dont_skip", Kind::Node("GrammarExpr")),
    ("GrammarList", "kind", Kind::Enum("ListKind")),
    ("GrammarList", "expr", Kind::Node("GrammarExpr")),
    ("GrammarList", "sep", Kind::Node("GrammarExpr")),
];

/// Declare every LKT node type, enum and field.
pub(super) fn declare(registry: &mut NodeRegistry) -> Result<(), GrammarError> {
    registry.declare_enum("ListKind", &["one", "zero"])?;
    for &(name, parent, flags) in NODE_TYPES {
        registry.declare(name, parent, flags)?;
    }
    for &(ty, field, kind) in FIELDS {
        let ty = node_type(registry, ty)?;
        let kind = field_kind(registry, kind)?;
        registry.add_field(ty, field, kind)?;
    }
    Ok(())
}

fn node_type(registry: &NodeRegistry, name: &str) -> Result<NodeTypeId, GrammarError> {
    registry
        .lookup(name)
        .ok_or_else(|| GrammarError::UnknownNodeType { name: name.into() })
}

fn field_kind(registry: &NodeRegistry, kind: Kind) -> Result<FieldKind, GrammarError> {
    Ok(match kind {
        Kind::Token => FieldKind::Token,
        Kind::Node(ty) => FieldKind::Node(node_type(registry, ty)?),
        Kind::List(ty) => FieldKind::list_of(node_type(registry, ty)?),
        Kind::ListOfLists(ty) => {
            FieldKind::List(Box::new(FieldKind::list_of(node_type(registry, ty)?)))
        }
        Kind::Enum(name) => FieldKind::Enum(
            registry
                .lookup_enum(name)
                .ok_or_else(|| GrammarError::UnknownEnumType { name: name.into() })?,
        ),
    })
}
