//! LKT grammar rules.
//!
//! Left-recursive productions are written right-recursively: dotted names
//! nest to the right (`a.b.c` is `DottedName(a, DottedName(b, c))`), and a
//! call, instantiation or `!` applies to a name once, not to another
//! postfix expression. Grammar expressions take at most one `|>` suffix.

use gram_grammar::{
    cut, dont_skip, enum_alt, kind, kind_text, list_plus, list_star, lit, node, opt, or, rule,
    seq, skip, Combinator, Grammar, GrammarError, Value,
};
use gram_ir::StringInterner;

fn declarations() -> Vec<(&'static str, Combinator)> {
    vec![
        (
            "main_rule",
            node(
                "LangkitRoot",
                seq([rule("decls"), kind("Termination").discard()]),
            ),
        ),
        ("id", node("Id", kind("Identifier"))),
        ("doc_comment", node("DocComment", kind("DocComment"))),
        ("doc", node("Doc", list_star(rule("doc_comment")))),
        ("decls", list_star(or([rule("decl"), skip("ErrorDecl")]))),
        (
            "decl",
            node(
                "FullDecl",
                seq([
                    rule("doc"),
                    list_star(rule("decl_annotation")),
                    or([
                        rule("class_decl"),
                        rule("fun_decl"),
                        rule("grammar_decl"),
                        rule("grammar_rule"),
                        rule("field_decl"),
                    ]),
                ]),
            ),
        ),
        (
            "decl_annotation",
            node(
                "DeclAnnotation",
                seq([
                    lit("@"),
                    rule("id"),
                    opt(seq([lit("("), rule("params"), lit(")")])),
                ]),
            ),
        ),
        (
            "class_decl",
            node(
                "ClassDecl",
                seq([
                    lit("class"),
                    cut(),
                    rule("id").when("is_type_name"),
                    opt(seq([lit(":"), rule("type_ref")])),
                    lit("{"),
                    dont_skip(rule("decls"), lit("}")),
                    lit("}"),
                ]),
            ),
        ),
        (
            "fun_decl",
            node(
                "FunDecl",
                seq([
                    lit("fun"),
                    cut(),
                    rule("id"),
                    lit("("),
                    rule("fun_arg_list"),
                    lit(")"),
                    lit(":"),
                    rule("type_ref"),
                    opt(seq([lit("="), rule("expr")])),
                ]),
            ),
        ),
        (
            "fun_arg_decl",
            node(
                "FunArgDecl",
                seq([
                    rule("id"),
                    lit(":"),
                    rule("type_ref"),
                    opt(seq([lit("="), rule("expr")])),
                ]),
            ),
        ),
        (
            "fun_arg_list",
            list_star(rule("fun_arg_decl")).sep(lit(",")),
        ),
        (
            "lambda_arg_decl",
            node(
                "LambdaArgDecl",
                seq([
                    rule("id"),
                    opt(seq([lit(":"), rule("type_ref")])),
                    opt(seq([lit("="), rule("expr")])),
                ]),
            ),
        ),
        (
            "lambda_arg_list",
            list_star(rule("lambda_arg_decl")).sep(lit(",")),
        ),
        (
            "field_decl",
            node("FieldDecl", seq([rule("id"), lit(":"), rule("type_ref")])),
        ),
        (
            "type_ref",
            or([
                node(
                    "GenericTypeRef",
                    seq([
                        rule("basic_name"),
                        lit("["),
                        list_plus(rule("type_ref")).sep(lit(",")),
                        lit("]"),
                    ]),
                ),
                node("SimpleTypeRef", rule("basic_name")),
            ]),
        ),
    ]
}

fn grammar_rules() -> Vec<(&'static str, Combinator)> {
    vec![
        (
            "grammar_decl",
            node(
                "GrammarDecl",
                seq([
                    lit("grammar"),
                    cut(),
                    rule("id"),
                    lit("{"),
                    dont_skip(
                        list_star(or([rule("grammar_rule"), skip("ErrorDecl")])),
                        lit("}"),
                    ),
                    lit("}"),
                ]),
            ),
        ),
        (
            "grammar_rule",
            node(
                "GrammarRuleDecl",
                seq([rule("id"), lit("<-"), cut(), rule("grammar_expr")]),
            ),
        ),
        (
            "grammar_expr",
            or([
                node(
                    "GrammarDontSkip",
                    seq([
                        rule("grammar_primary"),
                        lit("|>"),
                        kind_text("Identifier", "dont_skip").discard(),
                        lit("("),
                        rule("grammar_expr"),
                        lit(")"),
                    ]),
                ),
                node(
                    "GrammarPredicate",
                    seq([
                        rule("grammar_primary"),
                        lit("|>"),
                        kind_text("Identifier", "when").discard(),
                        lit("("),
                        rule("basic_name"),
                        lit(")"),
                    ]),
                ),
                rule("grammar_primary"),
            ]),
        ),
        (
            "grammar_primary",
            or([
                rule("token_literal"),
                rule("grammar_cut"),
                rule("grammar_skip"),
                rule("grammar_null"),
                rule("grammar_list_expr"),
                rule("grammar_token"),
                rule("parse_node_expr"),
                rule("grammar_opt"),
                rule("grammar_or_expr"),
                rule("grammar_rule_ref"),
                rule("grammar_pick"),
            ]),
        ),
        (
            "grammar_pick",
            node(
                "GrammarPick",
                seq([lit("("), list_plus(rule("grammar_expr")), lit(")")]),
            ),
        ),
        (
            "grammar_opt",
            or([
                node("GrammarOpt", seq([lit("?"), rule("grammar_expr")])),
                node(
                    "GrammarOptGroup",
                    seq([
                        lit("?"),
                        lit("("),
                        list_star(rule("grammar_expr")),
                        lit(")"),
                    ]),
                ),
            ]),
        ),
        ("grammar_cut", node("GrammarCut", lit("/"))),
        (
            "grammar_or_expr",
            node(
                "GrammarOrExpr",
                seq([
                    lit("or"),
                    lit("("),
                    opt(lit("|")),
                    list_plus(list_plus(rule("grammar_expr"))).sep(lit("|")),
                    lit(")"),
                ]),
            ),
        ),
        ("token_literal", node("TokenLit", kind("String"))),
        (
            "parse_node_expr",
            node(
                "ParseNodeExpr",
                seq([
                    rule("id"),
                    lit("("),
                    list_star(rule("grammar_expr")),
                    lit(")"),
                ]),
            ),
        ),
        ("grammar_rule_ref", node("GrammarRuleRef", rule("id"))),
        (
            "grammar_list_expr",
            node(
                "GrammarList",
                seq([
                    or([
                        enum_alt("ListKind", "one", lit("list+")),
                        enum_alt("ListKind", "zero", lit("list*")),
                    ]),
                    lit("("),
                    rule("grammar_expr"),
                    opt(seq([lit(","), rule("grammar_expr")])),
                    lit(")"),
                ]),
            ),
        ),
        (
            "grammar_skip",
            node(
                "GrammarSkip",
                seq([
                    kind_text("Identifier", "skip").discard(),
                    lit("("),
                    rule("id"),
                    lit(")"),
                ]),
            ),
        ),
        (
            "grammar_null",
            node(
                "GrammarNull",
                seq([lit("null"), lit("("), rule("id"), lit(")")]),
            ),
        ),
        (
            "grammar_token",
            node(
                "GrammarToken",
                seq([
                    lit("@"),
                    rule("id"),
                    opt(seq([lit("("), rule("token_literal"), lit(")")])),
                ]),
            ),
        ),
    ]
}

fn expressions() -> Vec<(&'static str, Combinator)> {
    vec![
        ("expr", rule("isa_or_primary")),
        (
            "isa_or_primary",
            or([
                node(
                    "Isa",
                    seq([rule("primary"), lit("isa"), rule("type_ref")]),
                ),
                rule("primary"),
            ]),
        ),
        (
            "primary",
            or([
                rule("basic_expr"),
                rule("null"),
                node("NumLit", kind("Number")),
                node("StringLit", kind("String")),
                rule("lambda_expr"),
                node("ParenExpr", seq([lit("("), rule("expr"), lit(")")])),
                rule("array_literal"),
            ]),
        ),
        (
            "array_literal",
            node(
                "ArrayLiteral",
                seq([
                    lit("["),
                    list_star(rule("expr")).sep(lit(",")),
                    lit("]"),
                ]),
            ),
        ),
        (
            "basic_expr",
            or([
                node(
                    "CallExpr",
                    seq([rule("basic_name"), lit("("), rule("params"), lit(")")]),
                ),
                node(
                    "GenericInstantiation",
                    seq([rule("basic_name"), lit("["), rule("params"), lit("]")]),
                ),
                node("ErrorOnNull", seq([rule("basic_name"), lit("!")])),
                rule("basic_name"),
            ]),
        ),
        (
            "basic_name",
            or([
                node(
                    "DottedName",
                    seq([rule("id"), lit("."), rule("basic_name")]),
                ),
                rule("id"),
            ]),
        ),
        (
            "lambda_expr",
            node(
                "LambdaExpr",
                seq([
                    lit("("),
                    rule("lambda_arg_list"),
                    lit(")"),
                    lit("=>"),
                    cut(),
                    rule("expr"),
                ]),
            ),
        ),
        ("null", node("NullLit", lit("null").keep())),
        ("params", list_plus(rule("param")).sep(lit(","))),
        (
            "param",
            node(
                "Param",
                seq([opt(seq([rule("id"), lit("=")])), rule("expr")]),
            ),
        ),
    ]
}

/// Whether a class name reads as a type name: it starts with an
/// uppercase letter.
fn is_type_name(interner: &StringInterner, value: &Value) -> bool {
    value
        .as_node()
        .and_then(|id| id.fields.first())
        .and_then(Value::as_token)
        .is_some_and(|token| {
            interner
                .lookup(token.text)
                .starts_with(char::is_uppercase)
        })
}

/// Add every LKT rule and predicate to `grammar`.
pub(super) fn define(grammar: &mut Grammar) -> Result<(), GrammarError> {
    for (name, body) in declarations()
        .into_iter()
        .chain(grammar_rules())
        .chain(expressions())
    {
        grammar.rule(name, body)?;
    }
    let interner = grammar.interner().clone();
    grammar.predicate("is_type_name", move |value| is_type_name(&interner, value));
    Ok(())
}
