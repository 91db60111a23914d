//! The LKT grammar: node hierarchy, rules and predicates.

mod nodes;
mod rules;

use gram_grammar::{Grammar, GrammarError};
use gram_ir::SharedInterner;

use crate::lexer;

/// Name of the LKT entry rule.
pub const ENTRY_RULE: &str = "main_rule";

/// Build the unresolved LKT grammar over `interner`.
pub fn grammar(interner: SharedInterner) -> Result<Grammar, GrammarError> {
    let mut grammar = Grammar::new(ENTRY_RULE, lexer::vocabulary(), interner);
    nodes::declare(grammar.registry_mut())?;
    rules::define(&mut grammar)?;
    Ok(grammar)
}

#[cfg(test)]
mod tests;
