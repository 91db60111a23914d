//! Arena handles.
//!
//! Every handle is a `u32` index into one table owned by the registry or
//! the resolved grammar that produced it. Handles from different grammars
//! must not be mixed.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Handle for the next slot of a table of length `len`.
            ///
            /// # Panics
            /// Panics if the table already holds `u32::MAX` entries.
            pub(crate) fn from_len(len: usize) -> Self {
                $name(u32::try_from(len).unwrap_or_else(|_| {
                    panic!(concat!(stringify!($name), " table exceeded u32::MAX entries"))
                }))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// A node type in a [`NodeRegistry`](crate::NodeRegistry).
    NodeTypeId
);
define_id!(
    /// An enum type in a [`NodeRegistry`](crate::NodeRegistry).
    EnumTypeId
);
define_id!(
    /// A rule of a resolved grammar.
    RuleId
);
define_id!(
    /// A lowered combinator in a resolved grammar's arena.
    CombinatorId
);
define_id!(
    /// A registered semantic predicate.
    PredicateId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = RuleId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{id:?}"), "RuleId(7)");
        assert_eq!(NodeTypeId::from_len(3), NodeTypeId::new(3));
    }
}
