#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::ErrorCode;
use gram_ir::Span;
use pretty_assertions::assert_eq;

fn render(diag: &Diagnostic, text: &str) -> String {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::new(&mut output, false);
    emitter.emit(diag, &SourceFile::new("g.lkt", text)).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_render_primary_label() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("expected '<-', found end of input")
        .with_label(Span::new(12, 13), "expected '<-'");

    assert_eq!(
        render(&diag, "grammar g {\nx\n}"),
        "error[E1001]: expected '<-', found end of input\n  --> g.lkt:2:1\n  |\n2 | x\n  | ^ expected '<-'\n\n"
    );
}

#[test]
fn test_render_secondary_and_note() {
    let diag = Diagnostic::error(ErrorCode::E1003)
        .with_message("msg")
        .with_label(Span::new(4, 6), "here")
        .with_secondary_label(Span::new(0, 1), "opened")
        .with_note("context");

    let out = render(&diag, "(   ab");
    assert!(out.contains("  --> g.lkt:1:5"));
    assert!(out.contains("^^ here"));
    assert!(out.contains("  ::: g.lkt:1:1"));
    assert!(out.contains("- opened"));
    assert!(out.contains("  = note: context"));
}

#[test]
fn test_summary() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::new(&mut output, false);
    emitter.emit_summary(2, 1).unwrap();
    emitter.emit_summary(0, 3).unwrap();
    emitter.emit_summary(0, 0).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "error: aborting due to 2 previous errors; 1 warning emitted\nwarning: 3 warnings emitted\n"
    );
}

#[test]
fn test_color_mode() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}
