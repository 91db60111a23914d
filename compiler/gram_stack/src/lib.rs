//! Stack safety for deeply nested grammar rules.
//!
//! Two independent guards:
//! - [`ensure_sufficient_stack`] grows the native stack on demand so deep
//!   but legitimate nesting does not overflow.
//! - [`RecursionLimit`] bounds rule nesting to a configured depth so a
//!   runaway grammar fails with an error instead of exhausting memory.
//!
//! On WASM targets stack growth is a passthrough.

use std::fmt;

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// ```text
/// fn invoke_rule(&mut self, rule: RuleId) -> Outcome {
///     ensure_sufficient_stack(|| self.run(body))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Nesting depth counter with a fixed maximum.
#[derive(Clone, Debug)]
pub struct RecursionLimit {
    limit: usize,
    depth: usize,
}

/// Returned by [`RecursionLimit::enter`] when the maximum depth is reached.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LimitExceeded {
    pub limit: usize,
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recursion limit of {} exceeded", self.limit)
    }
}

impl std::error::Error for LimitExceeded {}

impl RecursionLimit {
    pub fn new(limit: usize) -> Self {
        RecursionLimit { limit, depth: 0 }
    }

    /// Enter one nesting level. Every successful `enter` must be paired with
    /// an [`exit`](Self::exit).
    pub fn enter(&mut self) -> Result<(), LimitExceeded> {
        if self.depth >= self.limit {
            return Err(LimitExceeded { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit(&mut self) {
        debug_assert!(self.depth > 0, "RecursionLimit::exit without enter");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests;
