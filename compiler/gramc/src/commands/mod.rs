//! Command handlers for the `gram` CLI.
//!
//! Each submodule implements one command. Shared helpers like `read_file`
//! live here in the module root.

mod explain;
mod grammar;
mod parse;

pub use explain::explain_error;
pub use grammar::{grammar_summary, print_grammar};
pub use parse::{check_source, parse_files, parse_options, FileReport, ParseOptions};

/// Read a file from disk, describing failures in user terms.
pub(crate) fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("cannot read '{path}': {e}"),
    })
}
