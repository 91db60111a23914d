//! Gram Diagnostic - structured diagnostics for grammar parsing
//!
//! Provides:
//! - [`Diagnostic`] with labels, notes and an [`ErrorCode`]
//! - The [`DiagnosticSink`] the parser engine reports into
//! - [`DiagnosticQueue`], a sink with error limits, deduplication and
//!   position ordering
//! - A terminal emitter for drivers

mod diagnostic;
pub mod emitter;
mod error_code;
mod queue;
pub mod span_utils;

pub use diagnostic::{
    committed_failure, format_expected, skipped_token, syntax_error, trailing_input, Diagnostic,
    Label, Severity,
};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue, DiagnosticSink};
