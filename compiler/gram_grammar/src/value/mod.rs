//! Parse results.
//!
//! A [`Value`] is what a combinator yields: a token, a node, a list, an
//! enum value, or one of the two absent forms. Nodes own their fields and
//! are never mutated once built.

use gram_ir::{Span, Token};

use crate::{EnumTypeId, NodeRegistry, NodeTypeId};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Value {
    Token(Token),
    Node(Box<Node>),
    List(Vec<Value>),
    Enum {
        ty: EnumTypeId,
        alt: u32,
        span: Span,
    },
    /// An optional that matched nothing, in a field with no node type.
    Null,
    /// Typed absent placeholder of a node type.
    Absent(NodeTypeId),
}

/// An AST node instance.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Node {
    pub ty: NodeTypeId,
    /// From the first to the last token consumed while building the node;
    /// a point at the next token when the node consumed nothing.
    pub span: Span,
    /// Field values in the type's full layout order.
    pub fields: Vec<Value>,
}

impl Node {
    /// Look up a field (own or inherited) by name.
    pub fn field<'a>(&'a self, registry: &NodeRegistry, name: &str) -> Option<&'a Value> {
        registry
            .field_index(self.ty, name)
            .and_then(|i| self.fields.get(i))
    }

    /// Whether this node's type is `ty` or a subtype of it.
    pub fn is_a(&self, registry: &NodeRegistry, ty: NodeTypeId) -> bool {
        registry.is_subtype(self.ty, ty)
    }

    /// Whether this node is a skip-recovery placeholder.
    pub fn is_error(&self, registry: &NodeRegistry) -> bool {
        registry.is_error(self.ty)
    }
}

impl Value {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Value::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this is `Null` or an `Absent` placeholder.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null | Value::Absent(_))
    }

    /// Node type of a node or a typed placeholder.
    pub fn node_type(&self) -> Option<NodeTypeId> {
        match self {
            Value::Node(node) => Some(node.ty),
            Value::Absent(ty) => Some(*ty),
            _ => None,
        }
    }

    /// Source span, if the value covers any tokens.
    pub fn span(&self) -> Option<Span> {
        match self {
            Value::Token(token) => Some(token.span),
            Value::Node(node) => Some(node.span),
            Value::Enum { span, .. } => Some(*span),
            Value::List(items) => items
                .iter()
                .filter_map(Value::span)
                .reduce(Span::merge),
            Value::Null | Value::Absent(_) => None,
        }
    }
}

#[cfg(test)]
mod tests;
