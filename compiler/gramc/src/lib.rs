//! Gram CLI library.
//!
//! Command handlers live here rather than in the binary so they can be
//! tested directly.

pub mod commands;
mod tracing_setup;

pub use tracing_setup::init_tracing;
