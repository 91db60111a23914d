//! Indented text rendering of parse trees.
//!
//! ```text
//! Main
//!   name: Identifier "x"
//!   value: Ref
//!     name: Identifier "y"
//! ```
//!
//! Error nodes are marked `<error>`, lists are bracketed one element per
//! line, enum values render as `Type.alternative`, and absent values as
//! `null` (with the node type for typed placeholders).

use std::fmt::{self, Write};

use gram_grammar::{ResolvedGrammar, Value};
use gram_ir::Token;

/// Displays a value as an indented tree.
pub struct TreeDump<'a> {
    grammar: &'a ResolvedGrammar,
    value: &'a Value,
}

impl<'a> TreeDump<'a> {
    pub fn new(grammar: &'a ResolvedGrammar, value: &'a Value) -> Self {
        TreeDump { grammar, value }
    }

    fn write_value(
        &self,
        f: &mut impl Write,
        label: Option<&str>,
        value: &Value,
        indent: usize,
    ) -> fmt::Result {
        write!(f, "{:indent$}", "")?;
        if let Some(label) = label {
            write!(f, "{label}: ")?;
        }

        let registry = self.grammar.registry();
        match value {
            Value::Node(node) => {
                f.write_str(registry.name(node.ty))?;
                if registry.is_error(node.ty) {
                    f.write_str(" <error>")?;
                }
                f.write_char('\n')?;
                for (field, value) in registry.fields(node.ty).iter().zip(&node.fields) {
                    self.write_value(f, Some(&field.name), value, indent + 2)?;
                }
                Ok(())
            }
            Value::List(items) if items.is_empty() => f.write_str("[]\n"),
            Value::List(items) => {
                f.write_str("[\n")?;
                for item in items {
                    self.write_value(f, None, item, indent + 2)?;
                }
                writeln!(f, "{:indent$}]", "")
            }
            Value::Token(token) => {
                self.write_token(f, token)?;
                f.write_char('\n')
            }
            Value::Enum { ty, alt, .. } => {
                let enum_type = registry.enum_type(*ty);
                let alternative = enum_type
                    .alternatives
                    .get(*alt as usize)
                    .map_or("?", |alt| &**alt);
                writeln!(f, "{}.{alternative}", enum_type.name)
            }
            Value::Null => f.write_str("null\n"),
            Value::Absent(ty) => writeln!(f, "null {}", registry.name(*ty)),
        }
    }

    fn write_token(&self, f: &mut impl Write, token: &Token) -> fmt::Result {
        let vocabulary = self.grammar.vocabulary();
        match vocabulary.literal(token.kind) {
            Some(text) => write!(f, "'{text}'"),
            None if token.kind.is_termination() => f.write_str(vocabulary.name(token.kind)),
            None => write!(
                f,
                "{} {:?}",
                vocabulary.name(token.kind),
                self.grammar.interner().lookup(token.text)
            ),
        }
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_value(f, None, self.value, 0)
    }
}

/// Render a value as an indented tree, one line per value.
pub fn dump(grammar: &ResolvedGrammar, value: &Value) -> String {
    TreeDump::new(grammar, value).to_string()
}
