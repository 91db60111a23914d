//! Node Type Registry.
//!
//! Catalog of the AST node types a grammar can build: a name, an optional
//! parent (single inheritance), flags, and an ordered list of named fields.
//! A node's field layout is its ancestors' fields (root first) followed by
//! its own, so a subtype's instance always starts with the parent's fields.
//!
//! Enum types live here too: a name plus an ordered list of alternatives.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::{EnumTypeId, GrammarError, NodeTypeId};

bitflags! {
    /// Node type properties.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct NodeFlags: u8 {
        /// Cannot be constructed; only usable as a parent or field type.
        const ABSTRACT = 1 << 0;
        /// Placeholder produced by skip recovery. Never has fields.
        const ERROR = 1 << 1;
    }
}

/// Declared kind of a node field.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FieldKind {
    /// A token.
    Token,
    /// A child node of the given type or one of its subtypes.
    Node(NodeTypeId),
    /// An enum value.
    Enum(EnumTypeId),
    /// A list whose elements all have the inner kind.
    List(Box<FieldKind>),
}

impl FieldKind {
    /// Shorthand for a list of nodes.
    pub fn list_of(ty: NodeTypeId) -> Self {
        FieldKind::List(Box::new(FieldKind::Node(ty)))
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldDef {
    pub name: Box<str>,
    pub kind: FieldKind,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeType {
    pub name: Box<str>,
    pub parent: Option<NodeTypeId>,
    pub flags: NodeFlags,
    own_fields: Vec<FieldDef>,
}

impl NodeType {
    /// Fields declared on this type itself, without inherited ones.
    pub fn own_fields(&self) -> &[FieldDef] {
        &self.own_fields
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EnumType {
    pub name: Box<str>,
    pub alternatives: Vec<Box<str>>,
}

#[derive(Clone, Default, Debug, Eq, PartialEq)]
pub struct NodeRegistry {
    nodes: Vec<NodeType>,
    by_name: FxHashMap<Box<str>, NodeTypeId>,
    enums: Vec<EnumType>,
    enums_by_name: FxHashMap<Box<str>, EnumTypeId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node type.
    ///
    /// The parent, if any, must already be declared.
    pub fn declare(
        &mut self,
        name: &str,
        parent: Option<&str>,
        flags: NodeFlags,
    ) -> Result<NodeTypeId, GrammarError> {
        if self.by_name.contains_key(name) {
            return Err(GrammarError::DuplicateNodeType { name: name.into() });
        }
        let parent = match parent {
            Some(parent_name) => Some(self.lookup(parent_name).ok_or_else(|| {
                GrammarError::UnknownParent {
                    name: name.into(),
                    parent: parent_name.into(),
                }
            })?),
            None => None,
        };
        if flags.contains(NodeFlags::ERROR) && parent.is_some_and(|p| self.field_count(p) > 0) {
            return Err(GrammarError::ErrorNodeField { ty: name.into() });
        }

        let id = NodeTypeId::from_len(self.nodes.len());
        self.nodes.push(NodeType {
            name: name.into(),
            parent,
            flags,
            own_fields: Vec::new(),
        });
        self.by_name.insert(name.into(), id);
        Ok(id)
    }

    /// Declare a concrete node type.
    pub fn declare_node(
        &mut self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<NodeTypeId, GrammarError> {
        self.declare(name, parent, NodeFlags::empty())
    }

    pub fn declare_abstract(
        &mut self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<NodeTypeId, GrammarError> {
        self.declare(name, parent, NodeFlags::ABSTRACT)
    }

    /// Declare an error node type, the target of skip recovery.
    pub fn declare_error(
        &mut self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<NodeTypeId, GrammarError> {
        self.declare(name, parent, NodeFlags::ERROR)
    }

    /// Append a field to a node type, returning its index in the type's
    /// full field layout.
    ///
    /// Field names are unique along the whole inheritance line: a name may
    /// not repeat one of an ancestor's fields or one of a subtype's. A type
    /// takes no new fields once one of its subtypes has fields of its own.
    pub fn add_field(
        &mut self,
        ty: NodeTypeId,
        name: &str,
        kind: FieldKind,
    ) -> Result<usize, GrammarError> {
        if self.is_error(ty) {
            return Err(GrammarError::ErrorNodeField {
                ty: self.name(ty).into(),
            });
        }
        if let Some(error_subtype) = self
            .subtypes(ty)
            .find(|&sub| self.is_error(sub))
        {
            return Err(GrammarError::ErrorNodeField {
                ty: self.name(error_subtype).into(),
            });
        }

        let clashes_up = self.fields(ty).iter().any(|f| &*f.name == name);
        let clashes_down = self
            .subtypes(ty)
            .any(|sub| self.nodes[sub.index()].own_fields.iter().any(|f| &*f.name == name));
        if clashes_up || clashes_down {
            return Err(GrammarError::DuplicateField {
                ty: self.name(ty).into(),
                field: name.into(),
            });
        }

        // Subtype layouts start with the inherited fields, so a late parent
        // field would shift indices already handed out.
        if let Some(subtype) = self
            .subtypes(ty)
            .find(|&sub| !self.nodes[sub.index()].own_fields.is_empty())
        {
            return Err(GrammarError::FieldAfterSubtype {
                ty: self.name(ty).into(),
                field: name.into(),
                subtype: self.name(subtype).into(),
            });
        }

        let index = self.field_count(ty);
        self.nodes[ty.index()].own_fields.push(FieldDef {
            name: name.into(),
            kind,
        });
        Ok(index)
    }

    /// Declare an enum type with its alternatives, in order.
    pub fn declare_enum(
        &mut self,
        name: &str,
        alternatives: &[&str],
    ) -> Result<EnumTypeId, GrammarError> {
        if self.enums_by_name.contains_key(name) {
            return Err(GrammarError::DuplicateEnumType { name: name.into() });
        }
        let id = EnumTypeId::from_len(self.enums.len());
        self.enums.push(EnumType {
            name: name.into(),
            alternatives: alternatives.iter().map(|&alt| alt.into()).collect(),
        });
        self.enums_by_name.insert(name.into(), id);
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<NodeTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn lookup_enum(&self, name: &str) -> Option<EnumTypeId> {
        self.enums_by_name.get(name).copied()
    }

    /// # Panics
    /// Panics if `id` does not belong to this registry.
    pub fn node(&self, id: NodeTypeId) -> &NodeType {
        &self.nodes[id.index()]
    }

    pub fn name(&self, id: NodeTypeId) -> &str {
        self.nodes.get(id.index()).map_or("?", |n| &n.name)
    }

    pub fn is_abstract(&self, id: NodeTypeId) -> bool {
        self.node(id).flags.contains(NodeFlags::ABSTRACT)
    }

    pub fn is_error(&self, id: NodeTypeId) -> bool {
        self.node(id).flags.contains(NodeFlags::ERROR)
    }

    /// `id` and its ancestors, nearest first.
    pub fn ancestors(&self, id: NodeTypeId) -> impl Iterator<Item = NodeTypeId> + '_ {
        std::iter::successors(Some(id), |&cur| self.node(cur).parent)
    }

    /// Strict subtypes of `id`, in declaration order.
    fn subtypes(&self, id: NodeTypeId) -> impl Iterator<Item = NodeTypeId> + '_ {
        self.ids()
            .filter(move |&other| other != id && self.is_subtype(other, id))
    }

    /// Whether `sub` is `sup` or derives from it.
    pub fn is_subtype(&self, sub: NodeTypeId, sup: NodeTypeId) -> bool {
        self.ancestors(sub).any(|a| a == sup)
    }

    /// Nearest type both `a` and `b` derive from.
    pub fn common_ancestor(&self, a: NodeTypeId, b: NodeTypeId) -> Option<NodeTypeId> {
        self.ancestors(a).find(|&candidate| self.is_subtype(b, candidate))
    }

    /// Full field layout: inherited fields first, root ancestor first.
    pub fn fields(&self, id: NodeTypeId) -> Vec<&FieldDef> {
        let mut chain: Vec<NodeTypeId> = self.ancestors(id).collect();
        chain.reverse();
        chain
            .into_iter()
            .flat_map(|ty| self.nodes[ty.index()].own_fields.iter())
            .collect()
    }

    pub fn field_count(&self, id: NodeTypeId) -> usize {
        self.ancestors(id)
            .map(|ty| self.nodes[ty.index()].own_fields.len())
            .sum()
    }

    /// Index of a field (own or inherited) in `id`'s layout.
    pub fn field_index(&self, id: NodeTypeId, name: &str) -> Option<usize> {
        self.fields(id).iter().position(|f| &*f.name == name)
    }

    /// # Panics
    /// Panics if `id` does not belong to this registry.
    pub fn enum_type(&self, id: EnumTypeId) -> &EnumType {
        &self.enums[id.index()]
    }

    /// Index of an alternative within its enum.
    pub fn enum_alternative(&self, id: EnumTypeId, alt: &str) -> Option<u32> {
        self.enum_type(id)
            .alternatives
            .iter()
            .position(|a| &**a == alt)
            .and_then(|i| u32::try_from(i).ok())
    }

    /// Human-readable description of a field kind.
    pub fn describe_kind(&self, kind: &FieldKind) -> String {
        match kind {
            FieldKind::Token => "a token".to_string(),
            FieldKind::Node(ty) => format!("a `{}` node", self.name(*ty)),
            FieldKind::Enum(e) => format!("a `{}` value", self.enum_type(*e).name),
            FieldKind::List(inner) => format!("a list of {}", self.describe_kind(inner)),
        }
    }

    /// Number of node types.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node type handles in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = NodeTypeId> + '_ {
        (0..self.nodes.len()).map(NodeTypeId::from_len)
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// All enum type handles in declaration order.
    pub fn enum_ids(&self) -> impl Iterator<Item = EnumTypeId> + '_ {
        (0..self.enums.len()).map(EnumTypeId::from_len)
    }
}

#[cfg(test)]
mod tests;
