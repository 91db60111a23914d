//! Combinator Model: the builder API for rule bodies.
//!
//! A [`Combinator`] is an immutable tree that still refers to everything by
//! name: rules, token kinds, node types, enum types and predicates. Names
//! become handles when the grammar is resolved.
//!
//! ```text
//! grammar.rule("main", node("Main", seq([kind("Identifier"), lit("<-"), rule("expr")])))?;
//! ```
//!
//! Token matches built with [`lit`] are discarded from positional results;
//! [`kind`] and [`kind_text`] keep theirs. [`Combinator::keep`] and
//! [`Combinator::discard`] override the default.

/// How a token match identifies its kind.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenRef {
    /// A kind given by name (`Identifier`).
    Kind(String),
    /// A kind given by its fixed literal text (`"<-"`).
    Literal(String),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TokenMatch {
    pub token: TokenRef,
    /// Exact text the token must have, if any.
    pub text: Option<String>,
    /// Whether the matched token is a positional result.
    pub keep: bool,
}

/// Minimum element count of a list.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ListMin {
    /// `list*`: zero or more.
    Zero,
    /// `list+`: one or more.
    One,
}

/// A combinator expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Combinator {
    Token(TokenMatch),
    /// Reference to a rule by name.
    Rule(String),
    Seq(Vec<Combinator>),
    /// Ordered choice.
    Or(Vec<Combinator>),
    Opt(Box<Combinator>),
    /// Optional group: yields its values as one list, empty when absent.
    OptGroup(Box<Combinator>),
    List {
        element: Box<Combinator>,
        separator: Option<Box<Combinator>>,
        min: ListMin,
    },
    Cut,
    Predicate {
        name: String,
        inner: Box<Combinator>,
    },
    /// Skip recovery producing the named error node type.
    Skip(String),
    DontSkip {
        inner: Box<Combinator>,
        protected: Box<Combinator>,
    },
    /// Typed absent placeholder of the named node type.
    Null(String),
    /// Build the named node type from the inner values.
    Node {
        ty: String,
        inner: Box<Combinator>,
    },
    /// Yield an enum value when the (value-less) inner match succeeds.
    Enum {
        ty: String,
        alt: String,
        inner: Box<Combinator>,
    },
}

impl Combinator {
    /// Keep a token match's token as a positional result.
    ///
    /// Has no effect on other combinators.
    #[must_use]
    pub fn keep(self) -> Self {
        self.with_keep(true)
    }

    /// Drop a token match's token from the positional results.
    ///
    /// Has no effect on other combinators.
    #[must_use]
    pub fn discard(self) -> Self {
        self.with_keep(false)
    }

    fn with_keep(self, keep: bool) -> Self {
        match self {
            Combinator::Token(m) => Combinator::Token(TokenMatch { keep, ..m }),
            other => other,
        }
    }

    /// Separate list elements with `separator`. Has no effect on other
    /// combinators.
    #[must_use]
    pub fn sep(self, sep: Combinator) -> Self {
        match self {
            Combinator::List { element, min, .. } => Combinator::List {
                element,
                separator: Some(Box::new(sep)),
                min,
            },
            other => other,
        }
    }

    /// Gate this combinator on a named predicate.
    #[must_use]
    pub fn when(self, predicate_name: &str) -> Self {
        predicate(predicate_name, self)
    }

    /// Protect `protected` from skip recovery while this combinator runs.
    #[must_use]
    pub fn dont_skip(self, protected: Combinator) -> Self {
        dont_skip(self, protected)
    }
}

/// Match the token kind whose literal text is `text`; discarded.
pub fn lit(text: &str) -> Combinator {
    Combinator::Token(TokenMatch {
        token: TokenRef::Literal(text.into()),
        text: None,
        keep: false,
    })
}

/// Match any token of the named kind; kept.
pub fn kind(name: &str) -> Combinator {
    Combinator::Token(TokenMatch {
        token: TokenRef::Kind(name.into()),
        text: None,
        keep: true,
    })
}

/// Match a token of the named kind with exactly `text`; kept.
pub fn kind_text(name: &str, text: &str) -> Combinator {
    Combinator::Token(TokenMatch {
        token: TokenRef::Kind(name.into()),
        text: Some(text.into()),
        keep: true,
    })
}

pub fn rule(name: &str) -> Combinator {
    Combinator::Rule(name.into())
}

pub fn seq(items: impl IntoIterator<Item = Combinator>) -> Combinator {
    Combinator::Seq(items.into_iter().collect())
}

pub fn or(alternatives: impl IntoIterator<Item = Combinator>) -> Combinator {
    Combinator::Or(alternatives.into_iter().collect())
}

pub fn opt(inner: Combinator) -> Combinator {
    Combinator::Opt(Box::new(inner))
}

pub fn opt_group(inner: Combinator) -> Combinator {
    Combinator::OptGroup(Box::new(inner))
}

/// One or more `element`s.
pub fn list_plus(element: Combinator) -> Combinator {
    Combinator::List {
        element: Box::new(element),
        separator: None,
        min: ListMin::One,
    }
}

/// Zero or more `element`s.
pub fn list_star(element: Combinator) -> Combinator {
    Combinator::List {
        element: Box::new(element),
        separator: None,
        min: ListMin::Zero,
    }
}

pub fn cut() -> Combinator {
    Combinator::Cut
}

pub fn predicate(name: &str, inner: Combinator) -> Combinator {
    Combinator::Predicate {
        name: name.into(),
        inner: Box::new(inner),
    }
}

pub fn skip(error_node: &str) -> Combinator {
    Combinator::Skip(error_node.into())
}

pub fn dont_skip(inner: Combinator, protected: Combinator) -> Combinator {
    Combinator::DontSkip {
        inner: Box::new(inner),
        protected: Box::new(protected),
    }
}

pub fn null(ty: &str) -> Combinator {
    Combinator::Null(ty.into())
}

pub fn node(ty: &str, inner: Combinator) -> Combinator {
    Combinator::Node {
        ty: ty.into(),
        inner: Box::new(inner),
    }
}

pub fn enum_alt(ty: &str, alt: &str, inner: Combinator) -> Combinator {
    Combinator::Enum {
        ty: ty.into(),
        alt: alt.into(),
        inner: Box::new(inner),
    }
}
