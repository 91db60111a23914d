//! Rule Resolver.
//!
//! Resolution turns a [`Grammar`] into a [`ResolvedGrammar`]:
//!
//! 1. Lowering: every rule body is flattened into one combinator arena.
//!    Rule, token kind, node type, enum and predicate names become handles.
//! 2. Signatures: the positional values every combinator yields are
//!    inferred, iterating to a fixpoint over recursive rules.
//! 3. Validation: node-construction field counts and kinds, choice
//!    agreement, list element and predicate arity, skip targets.
//!
//! Resolution never stops at the first problem. All errors are reported
//! together, in rule insertion order.

mod lower;
mod shape;

use std::fmt;
use std::sync::Arc;

use gram_ir::{Name, SharedInterner, TokenKind, Vocabulary};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::combinator::ListMin;
use crate::{
    CombinatorId, EnumTypeId, FieldKind, Grammar, GrammarErrors, NodeRegistry, NodeTypeId,
    PredicateFn, PredicateId, RuleId,
};

/// A lowered combinator.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Op {
    Token {
        kind: TokenKind,
        text: Option<Name>,
        keep: bool,
    },
    Rule(RuleId),
    Seq(Box<[CombinatorId]>),
    Or {
        alternatives: Box<[CombinatorId]>,
        /// Has a skip alternative, so it recovers from committed failures.
        recovers: bool,
    },
    Opt(CombinatorId),
    OptGroup(CombinatorId),
    List {
        element: CombinatorId,
        separator: Option<CombinatorId>,
        min: ListMin,
    },
    Cut,
    Predicate {
        predicate: PredicateId,
        inner: CombinatorId,
    },
    Skip(NodeTypeId),
    DontSkip {
        inner: CombinatorId,
        protected: CombinatorId,
    },
    Null(NodeTypeId),
    Node {
        ty: NodeTypeId,
        inner: CombinatorId,
        /// Field kinds of `ty`, in layout order.
        fields: Box<[FieldKind]>,
    },
    Enum {
        ty: EnumTypeId,
        alt: u32,
        inner: CombinatorId,
    },
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RuleDef {
    pub name: Box<str>,
    pub body: CombinatorId,
    /// Number of positional values the rule yields.
    pub arity: usize,
}

#[derive(Clone)]
pub struct Predicate {
    pub name: Box<str>,
    pub check: PredicateFn,
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("name", &self.name).finish()
    }
}

struct Program {
    interner: SharedInterner,
    vocabulary: Vocabulary,
    registry: NodeRegistry,
    ops: Vec<Op>,
    arity: Vec<usize>,
    rules: Vec<RuleDef>,
    rule_index: FxHashMap<Box<str>, RuleId>,
    predicates: Vec<Predicate>,
    entry: RuleId,
}

/// A grammar whose every reference is a direct handle.
///
/// Immutable and cheap to clone; clones share one program, so many threads
/// can parse with it at once.
#[derive(Clone)]
pub struct ResolvedGrammar {
    program: Arc<Program>,
}

impl ResolvedGrammar {
    /// # Panics
    /// Panics if `id` does not belong to this grammar.
    #[inline]
    pub fn op(&self, id: CombinatorId) -> &Op {
        &self.program.ops[id.index()]
    }

    /// Number of positional values `id` yields.
    #[inline]
    pub fn arity(&self, id: CombinatorId) -> usize {
        self.program.arity[id.index()]
    }

    #[inline]
    pub fn rule(&self, id: RuleId) -> &RuleDef {
        &self.program.rules[id.index()]
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &RuleDef)> {
        self.program
            .rules
            .iter()
            .enumerate()
            .map(|(i, r)| (RuleId::from_len(i), r))
    }

    pub fn lookup_rule(&self, name: &str) -> Option<RuleId> {
        self.program.rule_index.get(name).copied()
    }

    pub fn entry(&self) -> RuleId {
        self.program.entry
    }

    pub fn predicate(&self, id: PredicateId) -> &Predicate {
        &self.program.predicates[id.index()]
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.program.registry
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.program.vocabulary
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.program.interner
    }

    pub fn op_count(&self) -> usize {
        self.program.ops.len()
    }

    /// Description of what a token match expects, for diagnostics.
    pub fn describe_token(&self, kind: TokenKind, text: Option<Name>) -> String {
        match text {
            Some(text) => format!("'{}'", self.program.interner.lookup(text)),
            None => self.program.vocabulary.describe(kind),
        }
    }

    /// Whether two handles share one resolved program.
    pub fn ptr_eq(&self, other: &ResolvedGrammar) -> bool {
        Arc::ptr_eq(&self.program, &other.program)
    }
}

/// Structural equality: same arena, rules, entry, registry and predicate
/// names. Predicate functions and vocabularies are not compared.
impl PartialEq for ResolvedGrammar {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&*self.program, &*other.program);
        self.ptr_eq(other)
            || (a.ops == b.ops
                && a.arity == b.arity
                && a.rules == b.rules
                && a.entry == b.entry
                && a.registry == b.registry
                && a.predicates.len() == b.predicates.len()
                && a
                    .predicates
                    .iter()
                    .zip(&b.predicates)
                    .all(|(p, q)| p.name == q.name))
    }
}

impl fmt::Debug for ResolvedGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedGrammar")
            .field("entry", &self.rule(self.entry()).name)
            .field("rules", &self.program.rules.len())
            .field("ops", &self.program.ops.len())
            .finish_non_exhaustive()
    }
}

/// Something that can be resolved into a [`ResolvedGrammar`].
pub trait Resolve {
    fn resolve(&self) -> Result<ResolvedGrammar, GrammarErrors>;
}

impl Resolve for Grammar {
    #[tracing::instrument(level = "debug", skip_all, fields(entry = self.entry()))]
    fn resolve(&self) -> Result<ResolvedGrammar, GrammarErrors> {
        let lowered = lower::lower(self)?;
        let signatures = shape::infer(self.registry(), &lowered)?;

        debug!(
            rules = lowered.rules.len(),
            ops = lowered.ops.len(),
            "grammar resolved"
        );

        let rule_index = lowered
            .rules
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), RuleId::from_len(i)))
            .collect();
        let rules = lowered
            .rules
            .into_iter()
            .map(|r| RuleDef {
                arity: signatures.arity[r.body.index()],
                name: r.name,
                body: r.body,
            })
            .collect();

        Ok(ResolvedGrammar {
            program: Arc::new(Program {
                interner: Arc::clone(self.interner()),
                vocabulary: self.vocabulary().clone(),
                registry: self.registry().clone(),
                ops: lowered.ops,
                arity: signatures.arity,
                rules,
                rule_index,
                predicates: lowered.predicates,
                entry: lowered.entry,
            }),
        })
    }
}

/// Resolving a resolved grammar returns it unchanged.
impl Resolve for ResolvedGrammar {
    fn resolve(&self) -> Result<ResolvedGrammar, GrammarErrors> {
        Ok(self.clone())
    }
}

/// Resolve `grammar`.
pub fn resolve(grammar: &impl Resolve) -> Result<ResolvedGrammar, GrammarErrors> {
    grammar.resolve()
}

#[cfg(test)]
mod tests;
