//! The `parse` command: lex and parse LKT files, print trees and
//! diagnostics.
//!
//! Files are parsed in parallel against one shared grammar; reports are
//! printed afterwards in command-line order.

use std::io::IsTerminal;

use gram_diagnostic::emitter::{ColorMode, SourceFile, TerminalEmitter};
use gram_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue};
use gram_lkt::Lkt;
use gram_parse::{dump, ParseConfig};
use rayon::prelude::*;
use tracing::debug;

use super::read_file;

/// Options of `gram parse`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub files: Vec<String>,
    pub config: ParseConfig,
    /// Errors reported per file before the rest are dropped (0 = unlimited).
    pub error_limit: usize,
    /// Print diagnostics only, not trees.
    pub quiet: bool,
    pub color: ColorMode,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            files: Vec::new(),
            config: ParseConfig::default(),
            error_limit: DiagnosticConfig::default().error_limit,
            quiet: false,
            color: ColorMode::Auto,
        }
    }
}

fn numeric(flag: &str, value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value '{value}' for {flag}: expected a number"))
}

/// Parse the arguments following `gram parse`.
pub fn parse_options(args: &[String]) -> Result<ParseOptions, String> {
    let mut options = ParseOptions::default();
    for arg in args {
        if arg == "--strict" {
            options.config.recovery = false;
        } else if arg == "--quiet" || arg == "-q" {
            options.quiet = true;
        } else if let Some(value) = arg.strip_prefix("--max-depth=") {
            let depth = numeric("--max-depth", value)?;
            if depth == 0 {
                return Err("--max-depth must be at least 1".to_string());
            }
            options.config.max_depth = depth;
        } else if let Some(value) = arg.strip_prefix("--error-limit=") {
            options.error_limit = numeric("--error-limit", value)?;
        } else if let Some(value) = arg.strip_prefix("--color=") {
            options.color = match value {
                "auto" => ColorMode::Auto,
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                _ => return Err(format!("invalid value '{value}' for --color")),
            };
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else {
            options.files.push(arg.clone());
        }
    }
    if options.files.is_empty() {
        return Err("no input files".to_string());
    }
    Ok(options)
}

/// What parsing one file produced.
#[derive(Clone, Debug)]
pub struct FileReport {
    pub path: String,
    pub source: String,
    /// Tree dump, when the file parsed to the end.
    pub dump: Option<String>,
    /// Diagnostics after limiting and deduplication, in source order.
    pub diagnostics: Vec<Diagnostic>,
    pub errors: usize,
    pub warnings: usize,
}

/// Lex and parse one source text.
///
/// Engine faults (left recursion, nesting limit) are reported as
/// diagnostics like any other problem with the file.
pub fn check_source(lkt: &Lkt, path: &str, source: String, options: &ParseOptions) -> FileReport {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: options.error_limit,
        deduplicate: true,
    });

    let lexed = lkt.lex(&source);
    for diagnostic in lexed.diagnostics {
        queue.add(diagnostic);
    }
    let dump = match lkt.parse_tokens(&lexed.tokens, &options.config) {
        Ok(output) => {
            for diagnostic in output.diagnostics {
                queue.add(diagnostic);
            }
            output.root.map(|root| dump(lkt.grammar(), &root))
        }
        Err(error) => {
            debug!(path, %error, "parse cancelled");
            queue.add(error.to_diagnostic(&lexed.tokens));
            None
        }
    };

    let errors = queue.error_count();
    let warnings = queue.warning_count();
    FileReport {
        path: path.to_string(),
        source,
        dump,
        diagnostics: queue.flush(),
        errors,
        warnings,
    }
}

/// Run `gram parse`. Returns whether every file parsed without errors.
pub fn parse_files(options: &ParseOptions) -> bool {
    let lkt = match Lkt::new() {
        Ok(lkt) => lkt,
        Err(errors) => {
            eprintln!("error: the bundled LKT grammar is invalid: {errors}");
            return false;
        }
    };

    let reports: Vec<Result<FileReport, String>> = options
        .files
        .par_iter()
        .map(|path| read_file(path).map(|source| check_source(&lkt, path, source, options)))
        .collect();

    let colors = options.color.should_use_colors(std::io::stderr().is_terminal());
    let mut emitter = TerminalEmitter::new(std::io::stderr().lock(), colors);
    let mut errors = 0;
    let mut warnings = 0;
    let headers = options.files.len() > 1;

    for report in reports {
        let report = match report {
            Ok(report) => report,
            Err(message) => {
                eprintln!("error: {message}");
                errors += 1;
                continue;
            }
        };
        errors += report.errors;
        warnings += report.warnings;

        if !options.quiet {
            if let Some(tree) = &report.dump {
                if headers {
                    println!("== {} ==", report.path);
                }
                print!("{tree}");
            }
        }

        let file = SourceFile::new(&report.path, &report.source);
        for diagnostic in &report.diagnostics {
            if let Err(e) = emitter.emit(diagnostic, &file) {
                eprintln!("error: failed to write diagnostics: {e}");
                return false;
            }
        }
    }

    if let Err(e) = emitter
        .emit_summary(errors, warnings)
        .and_then(|()| emitter.flush())
    {
        eprintln!("error: failed to write diagnostics: {e}");
        return false;
    }
    errors == 0
}
