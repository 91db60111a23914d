//! Grammar assembly.
//!
//! A [`Grammar`] gathers everything a parser needs before resolution: the
//! token vocabulary, the node registry, named rule bodies, semantic
//! predicates and the entry rule's name. It shares its string interner
//! with the lexers that produce its input.

use std::fmt;
use std::sync::Arc;

use gram_ir::{SharedInterner, Vocabulary};
use rustc_hash::FxHashMap;

use crate::{Combinator, GrammarError, NodeRegistry, Value};

/// A named semantic check over an already-built value.
///
/// Must be total and free of side effects: the engine may call it any
/// number of times while backtracking.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

pub struct Grammar {
    interner: SharedInterner,
    vocabulary: Vocabulary,
    registry: NodeRegistry,
    /// Rule bodies in insertion order.
    rules: Vec<(String, Combinator)>,
    rule_index: FxHashMap<String, usize>,
    predicates: Vec<(String, PredicateFn)>,
    entry: String,
}

impl Grammar {
    /// Create an empty grammar whose parses start at rule `entry`.
    pub fn new(entry: &str, vocabulary: Vocabulary, interner: SharedInterner) -> Self {
        Grammar {
            interner,
            vocabulary,
            registry: NodeRegistry::new(),
            rules: Vec::new(),
            rule_index: FxHashMap::default(),
            predicates: Vec::new(),
            entry: entry.into(),
        }
    }

    /// Bind `name` to `body`. Rule names are unique.
    pub fn rule(&mut self, name: &str, body: Combinator) -> Result<(), GrammarError> {
        if self.rule_index.contains_key(name) {
            return Err(GrammarError::DuplicateRule { name: name.into() });
        }
        self.rule_index.insert(name.into(), self.rules.len());
        self.rules.push((name.into(), body));
        Ok(())
    }

    /// Register a predicate. Registering a name again replaces the check.
    pub fn predicate(
        &mut self,
        name: &str,
        check: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) {
        let check: PredicateFn = Arc::new(check);
        match self.predicates.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = check,
            None => self.predicates.push((name.into(), check)),
        }
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut NodeRegistry {
        &mut self.registry
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn rule_body(&self, name: &str) -> Option<&Combinator> {
        self.rule_index.get(name).map(|&i| &self.rules[i].1)
    }

    /// Rules in insertion order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &Combinator)> {
        self.rules.iter().map(|(name, body)| (name.as_str(), body))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Predicates in registration order.
    pub(crate) fn predicates(&self) -> &[(String, PredicateFn)] {
        &self.predicates
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("entry", &self.entry)
            .field("rules", &self.rules.len())
            .field("node_types", &self.registry.len())
            .field(
                "predicates",
                &self.predicates.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
