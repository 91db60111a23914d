//! Terminal emitter.
//!
//! Renders diagnostics against their source text with `path:line:col`
//! locations, a source excerpt and carets, optionally with ANSI colors.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Severity};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Source file a batch of diagnostics refers to.
#[derive(Clone, Debug)]
pub struct SourceFile<'a> {
    pub path: &'a str,
    pub text: &'a str,
    lines: LineOffsetTable,
}

impl<'a> SourceFile<'a> {
    pub fn new(path: &'a str, text: &'a str) -> Self {
        SourceFile {
            path,
            text,
            lines: LineOffsetTable::build(text),
        }
    }
}

/// Writes human-readable diagnostics.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, colors: bool) -> Self {
        TerminalEmitter { writer, colors }
    }

    fn paint(&mut self, text: &str, color: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    /// Render one diagnostic.
    pub fn emit(&mut self, diagnostic: &Diagnostic, source: &SourceFile<'_>) -> io::Result<()> {
        let color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.paint(&diagnostic.severity.to_string(), color)?;
        self.paint(&format!("[{}]", diagnostic.code), colors::BOLD)?;
        writeln!(self.writer, ": {}", diagnostic.message)?;

        for label in &diagnostic.labels {
            let (line, col) = source
                .lines
                .offset_to_line_col(source.text, label.span.start);
            let marker = if label.is_primary { "-->" } else { ":::" };
            writeln!(self.writer, "  {marker} {}:{line}:{col}", source.path)?;

            let gutter = line.to_string();
            let pad = " ".repeat(gutter.len());
            let text = source.lines.line_text(source.text, line).unwrap_or("");
            writeln!(self.writer, "{pad} |")?;
            writeln!(self.writer, "{gutter} | {text}")?;

            let width = label.span.len().max(1) as usize;
            let carets = if label.is_primary { "^" } else { "-" }.repeat(width);
            write!(self.writer, "{pad} | {}", " ".repeat(col as usize - 1))?;
            let label_color = if label.is_primary { color } else { colors::SECONDARY };
            self.paint(&format!("{carets} {}", label.message), label_color)?;
            writeln!(self.writer)?;
        }

        for note in &diagnostic.notes {
            writeln!(self.writer, "  = note: {note}")?;
        }
        writeln!(self.writer)
    }

    /// "error: aborting due to N previous errors; M warnings emitted".
    pub fn emit_summary(&mut self, error_count: usize, warning_count: usize) -> io::Result<()> {
        if error_count > 0 {
            self.paint("error", colors::ERROR)?;
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                )
            } else {
                writeln!(self.writer, ": aborting due to {error_part}")
            }
        } else if warning_count > 0 {
            self.paint("warning", colors::WARNING)?;
            writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            )
        } else {
            Ok(())
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests;
