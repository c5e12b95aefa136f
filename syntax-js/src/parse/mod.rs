use crate::ast::{Node, Program};
use crate::error::{SyntaxError, SyntaxErrorType, SyntaxResult};
use crate::lex::lex;
use crate::loc::Loc;
use crate::token::{Token, TT};

pub mod class;
pub mod expr;
pub mod func;
pub mod pat;
pub mod stmt;
#[cfg(test)]
mod tests;

pub struct Parser<'a> {
  source: &'a str,
  tokens: Vec<Token>,
  next: usize,
}

#[derive(Clone, Copy)]
pub struct ParserCheckpoint {
  next: usize,
}

impl<'a> Parser<'a> {
  pub fn new(source: &'a str) -> SyntaxResult<Parser<'a>> {
    let tokens = lex(source)?;
    Ok(Parser {
      source,
      tokens,
      next: 0,
    })
  }

  pub fn parse_program(&mut self) -> SyntaxResult<Node<Program>> {
    let start = self.peek().loc;
    let mut body = Vec::new();
    while self.peek().typ != TT::Eof {
      body.push(self.parse_stmt()?);
    }
    let loc = if body.is_empty() {
      start
    } else {
      start + self.prev_loc()
    };
    Ok(Node::new(loc, Program { body }))
  }

  pub(crate) fn peek(&self) -> Token {
    self.tokens[self.next.min(self.tokens.len() - 1)]
  }

  pub(crate) fn nth(&self, offset: usize) -> Token {
    self.tokens[(self.next + offset).min(self.tokens.len() - 1)]
  }

  pub(crate) fn tt(&self) -> TT {
    self.peek().typ
  }

  pub(crate) fn advance(&mut self) -> Token {
    let tok = self.peek();
    if self.next < self.tokens.len() - 1 {
      self.next += 1;
    }
    tok
  }

  pub(crate) fn prev_loc(&self) -> Loc {
    if self.next == 0 {
      Loc::EMPTY
    } else {
      self.tokens[self.next - 1].loc
    }
  }

  pub(crate) fn eat(&mut self, typ: TT) -> Option<Token> {
    if self.tt() == typ {
      Some(self.advance())
    } else {
      None
    }
  }

  pub(crate) fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    if self.tt() == typ {
      Ok(self.advance())
    } else {
      let tok = self.peek();
      Err(SyntaxError::with_actual_token(
        SyntaxErrorType::RequiredTokenNotFound(typ),
        tok.loc,
        tok.typ,
      ))
    }
  }

  pub(crate) fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint { next: self.next }
  }

  pub(crate) fn restore(&mut self, checkpoint: ParserCheckpoint) {
    self.next = checkpoint.next;
  }

  pub(crate) fn str_of(&self, token: &Token) -> &'a str {
    &self.source[token.loc.0 as usize..token.loc.1 as usize]
  }

  /// The raw text of a string token without its surrounding quotes.
  pub(crate) fn str_body_of(&self, token: &Token) -> &'a str {
    &self.source[(token.loc.0 + 1) as usize..(token.loc.1 - 1) as usize]
  }

  pub(crate) fn error_here(&self, typ: SyntaxErrorType) -> SyntaxError {
    let tok = self.peek();
    SyntaxError::with_actual_token(typ, tok.loc, tok.typ)
  }

  /// True when the current token is an identifier with exactly this text.
  /// Used for the contextual keywords (`async`, `of`, `get`, `set`,
  /// `static`).
  pub(crate) fn is_contextual(&self, text: &str) -> bool {
    self.tt() == TT::Id && self.str_of(&self.peek()) == text
  }

  /// Consume a statement terminator: an explicit `;`, or an automatically
  /// inserted one before `}`, end of input, or a token on a new line.
  pub(crate) fn semicolon(&mut self) -> SyntaxResult<()> {
    if self.eat(TT::Semicolon).is_some() {
      return Ok(());
    }
    let tok = self.peek();
    if matches!(tok.typ, TT::BraceClose | TT::Eof) || tok.preceded_by_line_terminator {
      return Ok(());
    }
    Err(SyntaxError::with_actual_token(
      SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon),
      tok.loc,
      tok.typ,
    ))
  }
}

/// True for tokens that may serve as property names (`obj.typeof` and
/// `{ in: 1 }` are legal).
pub(crate) fn is_name_like(typ: TT) -> bool {
  matches!(
    typ,
    TT::Id
      | TT::KeywordAwait
      | TT::KeywordBreak
      | TT::KeywordCase
      | TT::KeywordCatch
      | TT::KeywordClass
      | TT::KeywordConst
      | TT::KeywordContinue
      | TT::KeywordDefault
      | TT::KeywordDelete
      | TT::KeywordElse
      | TT::KeywordExport
      | TT::KeywordExtends
      | TT::KeywordFalse
      | TT::KeywordFinally
      | TT::KeywordFor
      | TT::KeywordFunction
      | TT::KeywordIf
      | TT::KeywordImport
      | TT::KeywordIn
      | TT::KeywordInstanceof
      | TT::KeywordLet
      | TT::KeywordNew
      | TT::KeywordNull
      | TT::KeywordReturn
      | TT::KeywordSuper
      | TT::KeywordSwitch
      | TT::KeywordThis
      | TT::KeywordThrow
      | TT::KeywordTrue
      | TT::KeywordTry
      | TT::KeywordTypeof
      | TT::KeywordUndefined
      | TT::KeywordVoid
      | TT::KeywordWhile
  )
}

/// Parse a standalone source string into a program.
pub fn parse(source: &str) -> SyntaxResult<Node<Program>> {
  let mut parser = Parser::new(source)?;
  parser.parse_program()
}
