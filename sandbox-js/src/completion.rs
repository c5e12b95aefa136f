use crate::error::ErrorKind;
use crate::value::{ErrorRef, Value};

/// A statement completion record.
///
/// The "empty" completion value is modelled explicitly as `None` so statement
/// lists can implement `UpdateEmpty` (e.g. `1; if (true) {}` evaluates to
/// `1`, and `switch` bodies produce the last evaluated value).
///
/// The `throw` signal is not a variant: it travels on the `Err` channel as a
/// [`Thrown`] so `?` propagates it and `try` is the only catcher.
#[derive(Clone, Debug)]
pub enum Completion {
  Normal(Option<Value>),
  Return(Value),
  Break(Option<String>, Option<Value>),
  Continue(Option<String>, Option<Value>),
}

impl Completion {
  pub fn empty() -> Self {
    Completion::Normal(None)
  }

  pub fn normal(value: Value) -> Self {
    Completion::Normal(Some(value))
  }

  pub fn value(&self) -> Option<Value> {
    match self {
      Completion::Normal(v) => v.clone(),
      Completion::Return(v) => Some(v.clone()),
      Completion::Break(_, v) => v.clone(),
      Completion::Continue(_, v) => v.clone(),
    }
  }

  pub fn is_abrupt(&self) -> bool {
    !matches!(self, Completion::Normal(_))
  }

  /// `UpdateEmpty(completion, value)`: fill a value-less completion with the
  /// running statement-list value.
  pub fn update_empty(self, value: Option<Value>) -> Self {
    match self {
      Completion::Normal(None) => Completion::Normal(value),
      Completion::Break(target, None) => Completion::Break(target, value),
      Completion::Continue(target, None) => Completion::Continue(target, value),
      other => other,
    }
  }
}

/// The `throw` signal: carries the thrown value until a `try` handler binds
/// it or the diagnostic formatter surfaces it.
#[derive(Clone, Debug)]
pub struct Thrown {
  pub value: Value,
}

impl Thrown {
  pub fn new(value: Value) -> Thrown {
    Thrown { value }
  }

  pub fn error(kind: ErrorKind, message: impl Into<String>) -> Thrown {
    Thrown {
      value: Value::Error(ErrorRef::new(kind, message)),
    }
  }

  pub fn reference_error(message: impl Into<String>) -> Thrown {
    Thrown::error(ErrorKind::Reference, message)
  }

  pub fn type_error(message: impl Into<String>) -> Thrown {
    Thrown::error(ErrorKind::Type, message)
  }

  pub fn unsupported(message: impl Into<String>) -> Thrown {
    Thrown::error(ErrorKind::Unsupported, message)
  }
}
