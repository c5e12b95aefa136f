use crate::loc::Loc;
use crate::token::TT;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

/// A stable classification of syntax errors produced by the lexer and parser.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  ExpectedSyntax(&'static str),
  InvalidAssignmentTarget,
  InvalidCharacter,
  InvalidCharacterEscape,
  MalformedLiteralNumber,
  ModulesUnsupported,
  RequiredTokenNotFound(TT),
  RestElementNotLast,
  UnexpectedEnd,
  UnsupportedSyntax(&'static str),
  UnterminatedComment,
  UnterminatedString,
  UnterminatedTemplate,
}

impl SyntaxErrorType {
  pub fn message(&self, actual: Option<TT>) -> String {
    match self {
      SyntaxErrorType::ExpectedSyntax(what) => match actual {
        Some(tok) => format!("expected {what}, found {tok}"),
        None => format!("expected {what}"),
      },
      SyntaxErrorType::InvalidAssignmentTarget => "invalid assignment target".to_string(),
      SyntaxErrorType::InvalidCharacter => "invalid character".to_string(),
      SyntaxErrorType::InvalidCharacterEscape => "invalid character escape".to_string(),
      SyntaxErrorType::MalformedLiteralNumber => "malformed number literal".to_string(),
      SyntaxErrorType::ModulesUnsupported => {
        "import and export declarations are not supported".to_string()
      }
      SyntaxErrorType::RequiredTokenNotFound(tt) => match actual {
        Some(tok) => format!("expected {tt}, found {tok}"),
        None => format!("expected {tt}"),
      },
      SyntaxErrorType::RestElementNotLast => {
        "a rest element must be the last element of its pattern".to_string()
      }
      SyntaxErrorType::UnexpectedEnd => "unexpected end of input".to_string(),
      SyntaxErrorType::UnsupportedSyntax(what) => format!("{what} is not supported"),
      SyntaxErrorType::UnterminatedComment => "unterminated block comment".to_string(),
      SyntaxErrorType::UnterminatedString => "unterminated string literal".to_string(),
      SyntaxErrorType::UnterminatedTemplate => "unterminated template literal".to_string(),
    }
  }
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token: None,
    }
  }

  pub fn with_actual_token(typ: SyntaxErrorType, loc: Loc, actual: TT) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token: Some(actual),
    }
  }

  pub fn message(&self) -> String {
    self.typ.message(self.actual_token)
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "SyntaxError at [{}, {}): {}",
      self.loc.0,
      self.loc.1,
      self.message()
    )
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Debug::fmt(self, f)
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ && self.loc == other.loc
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;
