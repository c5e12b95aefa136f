use crate::loc::Loc;
use std::fmt::{self, Debug, Display, Formatter};

/// Token types.
///
/// Keywords that are only reserved in certain positions (`async`, `of`, `get`,
/// `set`, `static`) lex as [`TT::Id`]; the parser inspects the identifier text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TT {
  Eof,

  Id,
  Num,
  Str,
  // `...text...` segment between template delimiters/substitutions.
  TemplateStr,
  // The opening backtick.
  TemplateOpen,
  // The closing backtick.
  TemplateClose,
  // `${` starting a substitution.
  TemplateSubOpen,
  // `}` ending a substitution.
  TemplateSubClose,

  KeywordAwait,
  KeywordBreak,
  KeywordCase,
  KeywordCatch,
  KeywordClass,
  KeywordConst,
  KeywordContinue,
  KeywordDefault,
  KeywordDelete,
  KeywordElse,
  KeywordExport,
  KeywordExtends,
  KeywordFalse,
  KeywordFinally,
  KeywordFor,
  KeywordFunction,
  KeywordIf,
  KeywordImport,
  KeywordIn,
  KeywordInstanceof,
  KeywordLet,
  KeywordNew,
  KeywordNull,
  KeywordReturn,
  KeywordSuper,
  KeywordSwitch,
  KeywordThis,
  KeywordThrow,
  KeywordTrue,
  KeywordTry,
  KeywordTypeof,
  KeywordUndefined,
  KeywordVoid,
  KeywordWhile,

  Ampersand,
  AmpersandAmpersand,
  AmpersandEquals,
  Asterisk,
  AsteriskAsterisk,
  AsteriskAsteriskEquals,
  AsteriskEquals,
  Bar,
  BarBar,
  BarEquals,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  Caret,
  CaretEquals,
  ChevronLeft,
  ChevronLeftChevronLeft,
  ChevronLeftChevronLeftEquals,
  ChevronLeftEquals,
  ChevronRight,
  ChevronRightChevronRight,
  ChevronRightChevronRightChevronRight,
  ChevronRightChevronRightChevronRightEquals,
  ChevronRightChevronRightEquals,
  ChevronRightEquals,
  Colon,
  Comma,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  EqualsEquals,
  EqualsEqualsEquals,
  Exclamation,
  ExclamationEquals,
  ExclamationEqualsEquals,
  Hyphen,
  HyphenEquals,
  HyphenHyphen,
  ParenthesisClose,
  ParenthesisOpen,
  Percent,
  PercentEquals,
  Plus,
  PlusEquals,
  PlusPlus,
  Question,
  QuestionDot,
  QuestionQuestion,
  Semicolon,
  Slash,
  SlashEquals,
  Tilde,
}

impl Display for TT {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Debug::fmt(self, f)
  }
}

#[derive(Clone, Copy, Debug)]
pub struct Token {
  pub typ: TT,
  pub loc: Loc,
  /// Whether at least one line terminator separates this token from the
  /// previous one. Drives automatic semicolon insertion and the restricted
  /// postfix `++`/`--` production.
  pub preceded_by_line_terminator: bool,
}

impl Token {
  pub fn new(typ: TT, loc: Loc, preceded_by_line_terminator: bool) -> Token {
    Token {
      typ,
      loc,
      preceded_by_line_terminator,
    }
  }
}
