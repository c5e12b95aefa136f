use crate::completion::Thrown;
use crate::error::{ErrorKind, EvalError};
use crate::value::{to_display_string, Value};
use std::fmt::Write;
use syntax_js::{Loc, SourceText, SyntaxError};

/// Wrap a fault that bubbled out of a top-level statement with source
/// coordinates and a caret-annotated window.
pub(crate) fn format_thrown(source: &SourceText, loc: Loc, thrown: &Thrown) -> EvalError {
  let (kind, message) = match &thrown.value {
    Value::Error(e) => (e.kind(), e.message().to_string()),
    // A thrown non-error surfaces as a type error carrying the payload's
    // rendering.
    other => (
      ErrorKind::Type,
      format!("uncaught thrown value: {}", to_display_string(other)),
    ),
  };
  let (line, col) = source.line_col(loc.0);
  let rendered = render(source, line, col, kind, &message);
  EvalError {
    kind,
    message,
    pos: Some((line, col)),
    rendered,
  }
}

pub(crate) fn format_syntax_error(source: &SourceText, error: &SyntaxError) -> EvalError {
  let message = error.message();
  let (line, col) = source.line_col(error.loc.0);
  let rendered = render(source, line, col, ErrorKind::Syntax, &message);
  EvalError {
    kind: ErrorKind::Syntax,
    message,
    pos: Some((line, col)),
    rendered,
  }
}

pub(crate) fn fault_at(source: &SourceText, loc: Loc, kind: ErrorKind, message: String) -> EvalError {
  let (line, col) = source.line_col(loc.0);
  let rendered = render(source, line, col, kind, &message);
  EvalError {
    kind,
    message,
    pos: Some((line, col)),
    rendered,
  }
}

/// `<kind>: <message>` followed by a two-line source window ending at the
/// faulting line, with a caret under the column.
fn render(source: &SourceText, line: u32, col: u32, kind: ErrorKind, message: &str) -> String {
  let mut out = String::new();
  writeln!(out, "{kind}: {message}").unwrap();
  writeln!(out, " --> {}:{line}:{col}", source.name).unwrap();

  let first = line.saturating_sub(1).max(1);
  let gutter = line.to_string().len();
  for n in first..=line {
    let Some(text) = source.line_text(n) else {
      continue;
    };
    writeln!(out, "{n:>gutter$} | {text}").unwrap();
  }
  let pad = " ".repeat(col.saturating_sub(1) as usize);
  write!(out, "{blank:>gutter$} | {pad}^", blank = "").unwrap();
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::completion::Thrown;

  #[test]
  fn renders_window_and_caret() {
    let source = SourceText::new("<eval>", "let a = 1;\nbadName;\n");
    let thrown = Thrown::reference_error("badName is not defined");
    let err = format_thrown(&source, Loc(11, 18), &thrown);
    assert_eq!(err.kind, ErrorKind::Reference);
    assert_eq!(err.pos, Some((2, 1)));
    assert!(err.rendered.contains("ReferenceError: badName is not defined"));
    assert!(err.rendered.contains("1 | let a = 1;"));
    assert!(err.rendered.contains("2 | badName;"));
    assert!(err.rendered.ends_with("| ^"));
  }

  #[test]
  fn thrown_non_error_surfaces_as_type_error() {
    let source = SourceText::new("<eval>", "throw 42;");
    let err = format_thrown(&source, Loc(0, 9), &Thrown::new(Value::Number(42.0)));
    assert_eq!(err.kind, ErrorKind::Type);
    assert!(err.message.contains("42"));
  }
}
