//! Lowering rule bodies into the combinator arena.
//!
//! Children are pushed before their parent, so inside one rule every
//! combinator's operands have smaller handles than the combinator itself.
//! Each rule's combinators occupy one contiguous range of the arena.

use std::ops::Range;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{Op, Predicate};
use crate::combinator::{TokenMatch, TokenRef};
use crate::{
    CombinatorId, Combinator, Grammar, GrammarError, GrammarErrors, NodeTypeId, PredicateId,
    RuleId,
};

pub(super) struct LoweredRule {
    pub name: Box<str>,
    pub body: CombinatorId,
    /// Arena range holding this rule's combinators.
    pub ops: Range<usize>,
}

pub(super) struct Lowered {
    pub ops: Vec<Op>,
    pub rules: Vec<LoweredRule>,
    pub predicates: Vec<Predicate>,
    pub entry: RuleId,
}

struct Lowerer<'g> {
    grammar: &'g Grammar,
    rule_ids: FxHashMap<&'g str, RuleId>,
    predicate_ids: FxHashMap<&'g str, PredicateId>,
    ops: Vec<Op>,
    errors: Vec<GrammarError>,
    /// Name of the rule being lowered, for error messages.
    rule: &'g str,
}

pub(super) fn lower(grammar: &Grammar) -> Result<Lowered, GrammarErrors> {
    let rule_ids = grammar
        .rules()
        .enumerate()
        .map(|(i, (name, _))| (name, RuleId::from_len(i)))
        .collect::<FxHashMap<_, _>>();
    let predicate_ids = grammar
        .predicates()
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.as_str(), PredicateId::from_len(i)))
        .collect();
    let predicates = grammar
        .predicates()
        .iter()
        .map(|(name, check)| Predicate {
            name: name.as_str().into(),
            check: Arc::clone(check),
        })
        .collect();

    let mut errors = Vec::new();
    let entry = rule_ids.get(grammar.entry()).copied();
    if entry.is_none() {
        errors.push(GrammarError::NoEntryRule {
            name: grammar.entry().into(),
        });
    }

    let mut cx = Lowerer {
        grammar,
        rule_ids,
        predicate_ids,
        ops: Vec::new(),
        errors,
        rule: "",
    };

    let mut rules = Vec::with_capacity(grammar.rule_count());
    for (name, body) in grammar.rules() {
        cx.rule = name;
        let start = cx.ops.len();
        let body = cx.lower(body);
        rules.push(LoweredRule {
            name: name.into(),
            body,
            ops: start..cx.ops.len(),
        });
    }

    match entry {
        Some(entry) if cx.errors.is_empty() => Ok(Lowered {
            ops: cx.ops,
            rules,
            predicates,
            entry,
        }),
        _ => Err(GrammarErrors(cx.errors)),
    }
}

impl Lowerer<'_> {
    fn push(&mut self, op: Op) -> CombinatorId {
        let id = CombinatorId::from_len(self.ops.len());
        self.ops.push(op);
        id
    }

    /// Placeholder for a combinator that failed to lower. Never executed:
    /// lowering errors abort resolution.
    fn placeholder(&mut self, error: GrammarError) -> Op {
        self.errors.push(error);
        Op::Cut
    }

    fn lower(&mut self, combinator: &Combinator) -> CombinatorId {
        let op = match combinator {
            Combinator::Token(m) => self.lower_token(m),
            Combinator::Rule(name) => match self.rule_ids.get(name.as_str()).copied() {
                Some(rule) => Op::Rule(rule),
                None => self.placeholder(GrammarError::UndefinedRule {
                    rule: self.rule.into(),
                    name: name.clone(),
                }),
            },
            Combinator::Seq(items) => Op::Seq(items.iter().map(|c| self.lower(c)).collect()),
            Combinator::Or(alternatives) => {
                let recovers = alternatives
                    .iter()
                    .any(|alt| matches!(alt, Combinator::Skip(_)));
                Op::Or {
                    alternatives: alternatives.iter().map(|c| self.lower(c)).collect(),
                    recovers,
                }
            }
            Combinator::Opt(inner) => Op::Opt(self.lower(inner)),
            Combinator::OptGroup(inner) => Op::OptGroup(self.lower(inner)),
            Combinator::List {
                element,
                separator,
                min,
            } => {
                let element = self.lower(element);
                let separator = separator.as_deref().map(|sep| self.lower(sep));
                Op::List {
                    element,
                    separator,
                    min: *min,
                }
            }
            Combinator::Cut => Op::Cut,
            Combinator::Predicate { name, inner } => {
                let inner = self.lower(inner);
                match self.predicate_ids.get(name.as_str()).copied() {
                    Some(predicate) => Op::Predicate { predicate, inner },
                    None => self.placeholder(GrammarError::UndefinedPredicate {
                        rule: self.rule.into(),
                        name: name.clone(),
                    }),
                }
            }
            Combinator::Skip(ty) => match self.node_type(ty) {
                Ok(ty) => Op::Skip(ty),
                Err(e) => self.placeholder(e),
            },
            Combinator::DontSkip { inner, protected } => {
                let inner = self.lower(inner);
                let protected = self.lower(protected);
                Op::DontSkip { inner, protected }
            }
            Combinator::Null(ty) => match self.node_type(ty) {
                Ok(ty) => Op::Null(ty),
                Err(e) => self.placeholder(e),
            },
            Combinator::Node { ty, inner } => {
                let inner = self.lower(inner);
                match self.node_type(ty) {
                    Ok(ty) => Op::Node {
                        ty,
                        inner,
                        fields: self
                            .grammar
                            .registry()
                            .fields(ty)
                            .iter()
                            .map(|f| f.kind.clone())
                            .collect(),
                    },
                    Err(e) => self.placeholder(e),
                }
            }
            Combinator::Enum { ty, alt, inner } => {
                let inner = self.lower(inner);
                self.lower_enum(ty, alt, inner)
            }
        };
        self.push(op)
    }

    fn lower_token(&mut self, m: &TokenMatch) -> Op {
        let grammar = self.grammar;
        let vocabulary = grammar.vocabulary();
        let kind = match &m.token {
            TokenRef::Kind(name) => vocabulary.kind(name).ok_or_else(|| {
                GrammarError::UnknownTokenKind {
                    rule: self.rule.into(),
                    name: name.clone(),
                }
            }),
            TokenRef::Literal(text) => vocabulary.literal_kind(text).ok_or_else(|| {
                GrammarError::UnknownLiteral {
                    rule: self.rule.into(),
                    text: text.clone(),
                }
            }),
        };
        match kind {
            Ok(kind) => Op::Token {
                kind,
                text: m.text.as_deref().map(|t| grammar.interner().intern(t)),
                keep: m.keep,
            },
            Err(e) => self.placeholder(e),
        }
    }

    fn lower_enum(&mut self, ty: &str, alt: &str, inner: CombinatorId) -> Op {
        let grammar = self.grammar;
        let registry = grammar.registry();
        let Some(enum_ty) = registry.lookup_enum(ty) else {
            return self.placeholder(GrammarError::UnknownEnumType { name: ty.into() });
        };
        match registry.enum_alternative(enum_ty, alt) {
            Some(alt) => Op::Enum {
                ty: enum_ty,
                alt,
                inner,
            },
            None => self.placeholder(GrammarError::UnknownEnumAlternative {
                ty: ty.into(),
                alt: alt.into(),
            }),
        }
    }

    fn node_type(&self, name: &str) -> Result<NodeTypeId, GrammarError> {
        self.grammar
            .registry()
            .lookup(name)
            .ok_or_else(|| GrammarError::UnknownNodeType { name: name.into() })
    }
}
