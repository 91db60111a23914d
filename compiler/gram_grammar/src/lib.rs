//! Gram Grammar - declarative grammars as combinator trees
//!
//! A grammar is built in three parts and then resolved once:
//! - the [`NodeRegistry`] of typed AST node variants and enums
//! - named rules bound to [`Combinator`] trees built with the functions in
//!   this crate ([`seq`], [`or`], [`list_plus`], [`node`], ...)
//! - named semantic predicates over already-built [`Value`]s
//!
//! [`Resolve::resolve`] checks and lowers everything into a
//! [`ResolvedGrammar`], the immutable input of the parsing engine.

mod combinator;
mod error;
mod grammar;
mod ids;
mod registry;
mod resolve;
mod value;

pub use combinator::{
    cut, dont_skip, enum_alt, kind, kind_text, list_plus, list_star, lit, node, null, opt,
    opt_group, or, predicate, rule, seq, skip, Combinator, ListMin, TokenMatch, TokenRef,
};
pub use error::{ArityContext, GrammarError, GrammarErrors};
pub use grammar::{Grammar, PredicateFn};
pub use ids::{CombinatorId, EnumTypeId, NodeTypeId, PredicateId, RuleId};
pub use registry::{EnumType, FieldDef, FieldKind, NodeFlags, NodeRegistry, NodeType};
pub use resolve::{resolve, Op, Predicate, Resolve, ResolvedGrammar, RuleDef};
pub use value::{Node, Value};
