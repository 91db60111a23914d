//! Parser snapshots for backtracking.
//!
//! A snapshot records the cursor position and the length of the pending
//! diagnostics buffer. Restoring it rewinds both, so diagnostics emitted
//! inside an abandoned alternative (skipped-token warnings, recovered
//! failures) disappear with it.
//!
//! The furthest-failure tracker is not part of a snapshot. Expectations
//! gathered on abandoned paths still count towards the final error.

/// Lightweight backtracking point.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Snapshot {
    pub position: usize,
    pub diagnostics: usize,
}
