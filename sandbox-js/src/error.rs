use std::fmt::{self, Display, Formatter};

/// Classification of runtime faults surfaced to the embedder.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
  /// Reading or assigning an unbound name.
  Reference,
  /// Calling a non-function, property access on nullish values, iterating a
  /// non-iterable, bad `super`, and the like.
  Type,
  /// Raised by the parser only.
  Syntax,
  /// The program used a syntactic form the evaluator does not implement.
  Unsupported,
}

impl ErrorKind {
  pub fn name(&self) -> &'static str {
    match self {
      ErrorKind::Reference => "ReferenceError",
      ErrorKind::Type => "TypeError",
      ErrorKind::Syntax => "SyntaxError",
      ErrorKind::Unsupported => "UnsupportedError",
    }
  }
}

impl Display for ErrorKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A fault with source coordinates and a rendered source window, produced by
/// the diagnostic formatter at the top-level statement boundary.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{rendered}")]
pub struct EvalError {
  pub kind: ErrorKind,
  pub message: String,
  /// 1-based line/column of the faulting statement, when known.
  pub pos: Option<(u32, u32)>,
  pub rendered: String,
}
