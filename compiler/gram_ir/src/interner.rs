//! String interner for rule names, node names and token texts.
//!
//! Grammars and token streams that are parsed together must share one
//! interner so that literal comparisons are `Name` comparisons.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Interner shared between a grammar and the lexers feeding it.
pub type SharedInterner = Arc<StringInterner>;

struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw`.
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
///
/// Interned strings are leaked and live for the rest of the process, which
/// is what lets [`StringInterner::lookup`] hand out `&'static str`.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            table: RwLock::new(InternTable {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Create a new interner behind an `Arc`.
    pub fn shared() -> SharedInterner {
        Arc::new(Self::new())
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        {
            let guard = self.table.read();
            if let Some(&idx) = guard.map.get(s) {
                return Name::from_raw(idx);
            }
        }

        let mut guard = self.table.write();

        // Double-check after acquiring write lock
        if let Some(&idx) = guard.map.get(s) {
            return Name::from_raw(idx);
        }

        let idx = u32::try_from(guard.strings.len())
            .unwrap_or_else(|_| panic!("string interner exceeded u32::MAX entries"));
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Look up a string that was already interned, without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).map(|&idx| Name::from_raw(idx))
    }

    /// Look up the string for a Name.
    ///
    /// Names from another interner may resolve to an unrelated string or
    /// to the empty string if out of range.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.table.read();
        guard
            .strings
            .get(name.raw() as usize)
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings (including the empty string).
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
