//! Positional signatures and static validation.
//!
//! A combinator's signature is the list of value shapes it yields, one per
//! positional result. Rule signatures are found by iterating to a fixpoint:
//! a rule is unknown until one of its alternatives can be computed without
//! it, which is what makes recursive rules work. A rule still unknown at
//! the fixpoint can never finish matching.

use smallvec::SmallVec;

use super::lower::Lowered;
use super::Op;
use crate::error::ArityContext;
use crate::{
    CombinatorId, EnumTypeId, FieldKind, GrammarError, GrammarErrors, NodeRegistry, NodeTypeId,
};

/// Static approximation of a value.
#[derive(Clone, Eq, PartialEq, Debug)]
enum Shape {
    Token,
    Node(NodeTypeId),
    Enum(EnumTypeId),
    List(Box<Shape>),
    /// Nothing is known yet, or the value is always absent.
    Null,
    /// Incompatible shapes were joined; accepted everywhere.
    Any,
}

type Signature = SmallVec<[Shape; 2]>;

pub(super) struct Signatures {
    /// Value count of every combinator in the arena.
    pub arity: Vec<usize>,
}

fn join(registry: &NodeRegistry, a: &Shape, b: &Shape) -> Shape {
    match (a, b) {
        (a, b) if a == b => a.clone(),
        (Shape::Null, other) | (other, Shape::Null) => other.clone(),
        (Shape::Node(x), Shape::Node(y)) => registry
            .common_ancestor(*x, *y)
            .map_or(Shape::Any, Shape::Node),
        (Shape::List(x), Shape::List(y)) => Shape::List(Box::new(join(registry, x, y))),
        _ => Shape::Any,
    }
}

fn compatible(registry: &NodeRegistry, shape: &Shape, kind: &FieldKind) -> bool {
    match (shape, kind) {
        (Shape::Any | Shape::Null, _) | (Shape::Token, FieldKind::Token) => true,
        (Shape::Node(sub), FieldKind::Node(sup)) => registry.is_subtype(*sub, *sup),
        (Shape::Enum(a), FieldKind::Enum(b)) => a == b,
        (Shape::List(elem), FieldKind::List(inner)) => compatible(registry, elem, inner),
        _ => false,
    }
}

fn describe(registry: &NodeRegistry, shape: &Shape) -> String {
    match shape {
        Shape::Token => "a token".to_string(),
        Shape::Node(ty) => format!("a `{}` node", registry.name(*ty)),
        Shape::Enum(e) => format!("a `{}` value", registry.enum_type(*e).name),
        Shape::List(elem) => format!("a list of {}", describe(registry, elem)),
        Shape::Null => "nothing".to_string(),
        Shape::Any => "a value".to_string(),
    }
}

fn compute(
    registry: &NodeRegistry,
    op: &Op,
    ops: &[Option<Signature>],
    rules: &[Option<Signature>],
) -> Option<Signature> {
    let sig = move |id: CombinatorId| ops[id.index()].as_ref();
    let one = |shape: Shape| -> Option<Signature> { Some(smallvec::smallvec![shape]) };

    match op {
        Op::Token { keep, .. } => Some(if *keep {
            smallvec::smallvec![Shape::Token]
        } else {
            SmallVec::new()
        }),
        Op::Rule(rule) => rules[rule.index()].clone(),
        Op::Seq(items) => {
            let mut out = Signature::new();
            for item in items.iter() {
                out.extend(sig(*item)?.iter().cloned());
            }
            Some(out)
        }
        Op::Or { alternatives, .. } => {
            let mut known = alternatives.iter().filter_map(|alt| sig(*alt));
            let mut out = known.next()?.clone();
            let arity = out.len();
            for other in known.filter(|s| s.len() == arity) {
                for (slot, shape) in out.iter_mut().zip(other.iter()) {
                    *slot = join(registry, slot, shape);
                }
            }
            Some(out)
        }
        Op::Opt(inner) | Op::Predicate { inner, .. } | Op::DontSkip { inner, .. } => {
            sig(*inner).cloned()
        }
        Op::OptGroup(inner) => {
            let elem = sig(*inner).map_or(Shape::Null, |s| {
                s.iter().fold(Shape::Null, |acc, x| join(registry, &acc, x))
            });
            one(Shape::List(Box::new(elem)))
        }
        Op::List { element, .. } => {
            let elem = match sig(*element) {
                Some(s) if s.len() == 1 => s[0].clone(),
                Some(_) => Shape::Any,
                None => Shape::Null,
            };
            one(Shape::List(Box::new(elem)))
        }
        Op::Cut => Some(SmallVec::new()),
        Op::Skip(ty) | Op::Null(ty) | Op::Node { ty, .. } => one(Shape::Node(*ty)),
        Op::Enum { ty, .. } => one(Shape::Enum(*ty)),
    }
}

/// Infer every signature, then validate the arena against them.
pub(super) fn infer(
    registry: &NodeRegistry,
    lowered: &Lowered,
) -> Result<Signatures, GrammarErrors> {
    let mut op_sigs: Vec<Option<Signature>> = vec![None; lowered.ops.len()];
    let mut rule_sigs: Vec<Option<Signature>> = vec![None; lowered.rules.len()];

    // Each round can only make a rule known or widen one of its shapes,
    // both of which happen finitely often; the cap guards the loop anyway.
    let max_rounds = 2 * (lowered.rules.len() + registry.len()) + 8;
    for round in 0..max_rounds {
        for (i, op) in lowered.ops.iter().enumerate() {
            let sig = compute(registry, op, &op_sigs, &rule_sigs);
            op_sigs[i] = sig;
        }
        let mut changed = false;
        for (slot, rule) in rule_sigs.iter_mut().zip(&lowered.rules) {
            let sig = &op_sigs[rule.body.index()];
            if *slot != *sig {
                slot.clone_from(sig);
                changed = true;
            }
        }
        if !changed {
            tracing::trace!(rounds = round + 1, "signature fixpoint reached");
            break;
        }
    }

    let errors = validate(registry, lowered, &op_sigs, &rule_sigs);
    if !errors.is_empty() {
        return Err(GrammarErrors(errors));
    }

    Ok(Signatures {
        arity: op_sigs.iter().map(|s| s.as_ref().map_or(0, SmallVec::len)).collect(),
    })
}

fn validate(
    registry: &NodeRegistry,
    lowered: &Lowered,
    op_sigs: &[Option<Signature>],
    rule_sigs: &[Option<Signature>],
) -> Vec<GrammarError> {
    let mut errors = Vec::new();
    let arity = |id: CombinatorId| op_sigs[id.index()].as_ref().map(SmallVec::len);

    for (rule, rule_sig) in lowered.rules.iter().zip(rule_sigs) {
        let name = || rule.name.to_string();
        if rule_sig.is_none() {
            errors.push(GrammarError::UnproductiveRule { rule: name() });
        }

        for op in &lowered.ops[rule.ops.clone()] {
            let mismatch = |context, expected, found| GrammarError::ArityMismatch {
                rule: name(),
                context,
                expected,
                found,
            };
            match op {
                Op::Or { alternatives, .. } => {
                    let mut known = alternatives.iter().filter_map(|alt| arity(*alt));
                    if let Some(expected) = known.next() {
                        if let Some(found) = known.find(|&n| n != expected) {
                            errors.push(mismatch(ArityContext::Alternatives, expected, found));
                        }
                    }
                }
                Op::List { element, .. } => {
                    if let Some(found) = arity(*element).filter(|&n| n != 1) {
                        errors.push(mismatch(ArityContext::ListElement, 1, found));
                    }
                }
                Op::Predicate { inner, .. } => {
                    if let Some(found) = arity(*inner).filter(|&n| n != 1) {
                        errors.push(mismatch(ArityContext::Predicate, 1, found));
                    }
                }
                Op::Enum { inner, .. } => {
                    if let Some(found) = arity(*inner).filter(|&n| n != 0) {
                        errors.push(mismatch(ArityContext::EnumAlternative, 0, found));
                    }
                }
                Op::Skip(ty) if !registry.is_error(*ty) => {
                    errors.push(GrammarError::NotAnErrorNode {
                        rule: name(),
                        ty: registry.name(*ty).into(),
                    });
                }
                Op::Node { ty, inner, fields } => {
                    if registry.is_abstract(*ty) {
                        errors.push(GrammarError::AbstractConstruction {
                            rule: name(),
                            ty: registry.name(*ty).into(),
                        });
                        continue;
                    }
                    let Some(values) = op_sigs[inner.index()].as_ref() else {
                        continue;
                    };
                    if values.len() != fields.len() {
                        errors.push(GrammarError::FieldCountMismatch {
                            rule: name(),
                            ty: registry.name(*ty).into(),
                            expected: fields.len(),
                            found: values.len(),
                        });
                        continue;
                    }
                    let defs = registry.fields(*ty);
                    for ((shape, kind), def) in values.iter().zip(fields.iter()).zip(&defs) {
                        if !compatible(registry, shape, kind) {
                            errors.push(GrammarError::FieldKindMismatch {
                                rule: name(),
                                ty: registry.name(*ty).into(),
                                field: def.name.to_string(),
                                expected: registry.describe_kind(kind),
                                found: describe(registry, shape),
                            });
                        }
                    }
                }
                _ => {}
            }
        }
    }
    errors
}
