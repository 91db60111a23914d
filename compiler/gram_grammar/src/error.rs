//! Build-time grammar errors.
//!
//! Registry operations fail immediately with a single [`GrammarError`].
//! Resolution keeps going after the first problem and reports everything it
//! found, in rule insertion order, as [`GrammarErrors`].

use std::fmt;

/// Which positional-arity rule a combinator broke.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArityContext {
    /// Alternatives of an ordered choice produce different value counts.
    Alternatives,
    /// A list element must produce exactly one value.
    ListElement,
    /// A predicate operand must produce exactly one value.
    Predicate,
    /// An enum alternative's match must produce no values.
    EnumAlternative,
}

impl fmt::Display for ArityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityContext::Alternatives => write!(f, "choice alternatives disagree"),
            ArityContext::ListElement => write!(f, "list element"),
            ArityContext::Predicate => write!(f, "predicate operand"),
            ArityContext::EnumAlternative => write!(f, "enum alternative"),
        }
    }
}

/// A grammar construction or resolution error.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GrammarError {
    #[error("node type `{name}` is already declared")]
    DuplicateNodeType { name: String },

    #[error("parent `{parent}` of node type `{name}` is not declared")]
    UnknownParent { name: String, parent: String },

    #[error("field `{field}` already exists on `{ty}`, one of its ancestors or one of its subtypes")]
    DuplicateField { ty: String, field: String },

    #[error("error node type `{ty}` cannot have fields")]
    ErrorNodeField { ty: String },

    #[error("cannot add field `{field}` to `{ty}`: its subtype `{subtype}` already has fields")]
    FieldAfterSubtype {
        ty: String,
        field: String,
        subtype: String,
    },

    #[error("unknown node type `{name}`")]
    UnknownNodeType { name: String },

    #[error("enum type `{name}` is already declared")]
    DuplicateEnumType { name: String },

    #[error("unknown enum type `{name}`")]
    UnknownEnumType { name: String },

    #[error("enum `{ty}` has no alternative `{alt}`")]
    UnknownEnumAlternative { ty: String, alt: String },

    #[error("rule `{name}` is already defined")]
    DuplicateRule { name: String },

    #[error("rule `{rule}` references undefined rule `{name}`")]
    UndefinedRule { rule: String, name: String },

    #[error("entry rule `{name}` is not defined")]
    NoEntryRule { name: String },

    #[error("unknown token kind `{name}` in rule `{rule}`")]
    UnknownTokenKind { rule: String, name: String },

    #[error("no token kind has the literal text {text:?} (in rule `{rule}`)")]
    UnknownLiteral { rule: String, text: String },

    #[error("undefined predicate `{name}` in rule `{rule}`")]
    UndefinedPredicate { rule: String, name: String },

    #[error("node `{ty}` has {expected} field(s) but rule `{rule}` produces {found} value(s) for it")]
    FieldCountMismatch {
        rule: String,
        ty: String,
        expected: usize,
        found: usize,
    },

    #[error("field `{ty}.{field}` expects {expected} but rule `{rule}` produces {found}")]
    FieldKindMismatch {
        rule: String,
        ty: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("abstract node type `{ty}` cannot be constructed (rule `{rule}`)")]
    AbstractConstruction { rule: String, ty: String },

    #[error("{context} in rule `{rule}`: expected {expected} value(s), found {found}")]
    ArityMismatch {
        rule: String,
        context: ArityContext,
        expected: usize,
        found: usize,
    },

    #[error("rule `{rule}` can never finish: every alternative recurses into a rule without a base case")]
    UnproductiveRule { rule: String },

    #[error("`{ty}` is not an error node type and cannot be skipped to (rule `{rule}`)")]
    NotAnErrorNode { rule: String, ty: String },
}

/// Every error found while resolving a grammar.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{}", render(.0))]
pub struct GrammarErrors(pub Vec<GrammarError>);

fn render(errors: &[GrammarError]) -> String {
    let mut out = format!(
        "grammar has {} error{}",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
    for error in errors {
        out.push_str("\n  ");
        out.push_str(&error.to_string());
    }
    out
}

impl GrammarErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, GrammarError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<GrammarError> for GrammarErrors {
    fn from(error: GrammarError) -> Self {
        GrammarErrors(vec![error])
    }
}

impl<'a> IntoIterator for &'a GrammarErrors {
    type Item = &'a GrammarError;
    type IntoIter = std::slice::Iter<'a, GrammarError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
