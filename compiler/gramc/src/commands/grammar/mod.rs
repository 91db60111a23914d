//! The `grammar` command: summarize the bundled LKT grammar.

use std::fmt::Write;

use gram_grammar::{FieldKind, NodeFlags, NodeRegistry, ResolvedGrammar};
use gram_lkt::Lkt;

fn kind_name(registry: &NodeRegistry, kind: &FieldKind) -> String {
    match kind {
        FieldKind::Token => "token".to_string(),
        FieldKind::Node(ty) => registry.name(*ty).to_string(),
        FieldKind::Enum(e) => registry.enum_type(*e).name.to_string(),
        FieldKind::List(inner) => format!("[{}]", kind_name(registry, inner)),
    }
}

/// Render enums, node types with their own fields, and rules with their
/// value counts.
pub fn grammar_summary(grammar: &ResolvedGrammar) -> String {
    let registry = grammar.registry();
    let mut out = String::new();
    let entry = &grammar.rule(grammar.entry()).name;
    let rules = grammar.rules().count();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "grammar {entry}: {rules} rules, {} node types, {} enums",
        registry.len(),
        registry.enum_count()
    );

    out.push('\n');
    for id in registry.enum_ids() {
        let ty = registry.enum_type(id);
        let _ = writeln!(out, "enum {} {{ {} }}", ty.name, ty.alternatives.join(", "));
    }

    out.push('\n');
    for id in registry.ids() {
        let node = registry.node(id);
        out.push_str("node ");
        out.push_str(&node.name);
        if let Some(parent) = node.parent {
            let _ = write!(out, " : {}", registry.name(parent));
        }
        if node.flags.contains(NodeFlags::ABSTRACT) {
            out.push_str(" (abstract)");
        }
        if node.flags.contains(NodeFlags::ERROR) {
            out.push_str(" (error)");
        }
        out.push('\n');
        for field in node.own_fields() {
            let _ = writeln!(out, "  {}: {}", field.name, kind_name(registry, &field.kind));
        }
    }

    out.push('\n');
    for (_, rule) in grammar.rules() {
        let _ = writeln!(out, "rule {} -> {}", rule.name, rule.arity);
    }
    out
}

/// Run `gram grammar`.
pub fn print_grammar() -> bool {
    match Lkt::new() {
        Ok(lkt) => {
            print!("{}", grammar_summary(lkt.grammar()));
            true
        }
        Err(errors) => {
            eprintln!("error: the bundled LKT grammar is invalid: {errors}");
            false
        }
    }
}
