use crate::error::{SyntaxError, SyntaxErrorType, SyntaxResult};
use crate::loc::Loc;
use crate::token::{Token, TT};
use ahash::HashMap;
use ahash::HashMapExt;
use memchr::{memchr, memchr3};
use once_cell::sync::Lazy;

static KEYWORDS: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  let mut map = HashMap::new();
  map.insert("await", TT::KeywordAwait);
  map.insert("break", TT::KeywordBreak);
  map.insert("case", TT::KeywordCase);
  map.insert("catch", TT::KeywordCatch);
  map.insert("class", TT::KeywordClass);
  map.insert("const", TT::KeywordConst);
  map.insert("continue", TT::KeywordContinue);
  map.insert("default", TT::KeywordDefault);
  map.insert("delete", TT::KeywordDelete);
  map.insert("else", TT::KeywordElse);
  map.insert("export", TT::KeywordExport);
  map.insert("extends", TT::KeywordExtends);
  map.insert("false", TT::KeywordFalse);
  map.insert("finally", TT::KeywordFinally);
  map.insert("for", TT::KeywordFor);
  map.insert("function", TT::KeywordFunction);
  map.insert("if", TT::KeywordIf);
  map.insert("import", TT::KeywordImport);
  map.insert("in", TT::KeywordIn);
  map.insert("instanceof", TT::KeywordInstanceof);
  map.insert("let", TT::KeywordLet);
  map.insert("new", TT::KeywordNew);
  map.insert("null", TT::KeywordNull);
  map.insert("return", TT::KeywordReturn);
  map.insert("super", TT::KeywordSuper);
  map.insert("switch", TT::KeywordSwitch);
  map.insert("this", TT::KeywordThis);
  map.insert("throw", TT::KeywordThrow);
  map.insert("true", TT::KeywordTrue);
  map.insert("try", TT::KeywordTry);
  map.insert("typeof", TT::KeywordTypeof);
  map.insert("undefined", TT::KeywordUndefined);
  map.insert("void", TT::KeywordVoid);
  map.insert("while", TT::KeywordWhile);
  map
});

fn is_id_start(b: u8) -> bool {
  b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_id_continue(b: u8) -> bool {
  b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

struct Lexer<'a> {
  source: &'a str,
  bytes: &'a [u8],
  next: usize,
  tokens: Vec<Token>,
  line_terminator: bool,
  brace_depth: usize,
  // Brace depth at each open template substitution; the matching `}` at that
  // depth resumes template-chunk scanning instead of closing a block.
  template_stack: Vec<usize>,
}

/// Tokenize the entire source upfront.
///
/// Template literals are flattened into the token stream as
/// `TemplateOpen (TemplateStr (TemplateSubOpen .. TemplateSubClose)?)* TemplateClose`
/// so the parser never has to re-enter the lexer with a mode.
pub fn lex(source: &str) -> SyntaxResult<Vec<Token>> {
  let mut lexer = Lexer {
    source,
    bytes: source.as_bytes(),
    next: 0,
    tokens: Vec::new(),
    line_terminator: false,
    brace_depth: 0,
    template_stack: Vec::new(),
  };
  lexer.run()?;
  Ok(lexer.tokens)
}

impl<'a> Lexer<'a> {
  fn at_end(&self) -> bool {
    self.next >= self.bytes.len()
  }

  fn peek_byte(&self, offset: usize) -> u8 {
    *self.bytes.get(self.next + offset).unwrap_or(&0)
  }

  fn error(&self, typ: SyntaxErrorType, start: usize) -> SyntaxError {
    SyntaxError::new(typ, Loc(start as u32, self.next as u32))
  }

  fn emit(&mut self, typ: TT, start: usize) {
    let loc = Loc(start as u32, self.next as u32);
    let preceded = std::mem::take(&mut self.line_terminator);
    self.tokens.push(Token::new(typ, loc, preceded));
  }

  fn run(&mut self) -> SyntaxResult<()> {
    loop {
      self.skip_trivia()?;
      if self.at_end() {
        if !self.template_stack.is_empty() {
          return Err(self.error(SyntaxErrorType::UnterminatedTemplate, self.next));
        }
        let end = self.next;
        self.emit(TT::Eof, end);
        return Ok(());
      }
      self.lex_token()?;
    }
  }

  fn skip_trivia(&mut self) -> SyntaxResult<()> {
    while !self.at_end() {
      match self.bytes[self.next] {
        b'\n' => {
          self.line_terminator = true;
          self.next += 1;
        }
        b' ' | b'\t' | b'\r' | b'\x0b' | b'\x0c' => {
          self.next += 1;
        }
        b'/' if self.peek_byte(1) == b'/' => {
          match memchr(b'\n', &self.bytes[self.next..]) {
            Some(rel) => self.next += rel,
            None => self.next = self.bytes.len(),
          };
        }
        b'/' if self.peek_byte(1) == b'*' => {
          let start = self.next;
          let mut scan = self.next + 2;
          loop {
            match memchr(b'*', &self.bytes[scan..]) {
              Some(rel) if scan + rel + 1 < self.bytes.len() => {
                scan += rel + 1;
                if self.bytes[scan] == b'/' {
                  scan += 1;
                  break;
                }
              }
              _ => {
                self.next = self.bytes.len();
                return Err(self.error(SyntaxErrorType::UnterminatedComment, start));
              }
            }
          }
          if memchr(b'\n', &self.bytes[start..scan]).is_some() {
            self.line_terminator = true;
          }
          self.next = scan;
        }
        // U+2028/U+2029 count as line terminators; other non-ASCII whitespace
        // is not recognized.
        0xe2 if self.peek_byte(1) == 0x80 && matches!(self.peek_byte(2), 0xa8 | 0xa9) => {
          self.line_terminator = true;
          self.next += 3;
        }
        _ => break,
      }
    }
    Ok(())
  }

  fn lex_token(&mut self) -> SyntaxResult<()> {
    let start = self.next;
    let b = self.bytes[self.next];

    if is_id_start(b) {
      self.next += 1;
      while !self.at_end() && is_id_continue(self.bytes[self.next]) {
        self.next += 1;
      }
      let text = &self.source[start..self.next];
      let typ = KEYWORDS.get(text).copied().unwrap_or(TT::Id);
      self.emit(typ, start);
      return Ok(());
    }

    if b.is_ascii_digit() {
      return self.lex_number(start);
    }

    match b {
      b'"' | b'\'' => self.lex_string(start, b),
      b'`' => {
        self.next += 1;
        self.emit(TT::TemplateOpen, start);
        self.lex_template_chunk()
      }
      b'{' => {
        self.next += 1;
        self.brace_depth += 1;
        self.emit(TT::BraceOpen, start);
        Ok(())
      }
      b'}' => {
        self.next += 1;
        if self.template_stack.last() == Some(&self.brace_depth) {
          self.template_stack.pop();
          self.emit(TT::TemplateSubClose, start);
          self.lex_template_chunk()
        } else {
          self.brace_depth = self.brace_depth.saturating_sub(1);
          self.emit(TT::BraceClose, start);
          Ok(())
        }
      }
      _ => match self.lex_punctuator(b) {
        Some((typ, len)) => {
          self.next += len;
          self.emit(typ, start);
          Ok(())
        }
        None => {
          self.next += 1;
          Err(self.error(SyntaxErrorType::InvalidCharacter, start))
        }
      },
    }
  }

  fn lex_number(&mut self, start: usize) -> SyntaxResult<()> {
    if self.bytes[self.next] == b'0' && matches!(self.peek_byte(1), b'x' | b'X' | b'o' | b'O' | b'b' | b'B') {
      self.next += 2;
      while !self.at_end() && self.bytes[self.next].is_ascii_alphanumeric() {
        self.next += 1;
      }
      self.emit(TT::Num, start);
      return Ok(());
    }

    while !self.at_end() && self.bytes[self.next].is_ascii_digit() {
      self.next += 1;
    }
    if !self.at_end() && self.bytes[self.next] == b'.' {
      self.next += 1;
      while !self.at_end() && self.bytes[self.next].is_ascii_digit() {
        self.next += 1;
      }
    }
    if !self.at_end() && matches!(self.bytes[self.next], b'e' | b'E') {
      let mut scan = self.next + 1;
      if scan < self.bytes.len() && matches!(self.bytes[scan], b'+' | b'-') {
        scan += 1;
      }
      if scan < self.bytes.len() && self.bytes[scan].is_ascii_digit() {
        self.next = scan;
        while !self.at_end() && self.bytes[self.next].is_ascii_digit() {
          self.next += 1;
        }
      }
    }
    if !self.at_end() && is_id_start(self.bytes[self.next]) {
      self.next += 1;
      return Err(self.error(SyntaxErrorType::MalformedLiteralNumber, start));
    }
    self.emit(TT::Num, start);
    Ok(())
  }

  fn lex_string(&mut self, start: usize, quote: u8) -> SyntaxResult<()> {
    self.next += 1;
    loop {
      let rest = &self.bytes[self.next..];
      let Some(rel) = memchr3(quote, b'\\', b'\n', rest) else {
        self.next = self.bytes.len();
        return Err(self.error(SyntaxErrorType::UnterminatedString, start));
      };
      self.next += rel;
      match self.bytes[self.next] {
        b'\n' => return Err(self.error(SyntaxErrorType::UnterminatedString, start)),
        b'\\' => {
          // Skip the escape introducer and the escaped byte; decoding happens
          // when the parser materializes the literal.
          self.next = (self.next + 2).min(self.bytes.len());
        }
        _ => {
          self.next += 1;
          self.emit(TT::Str, start);
          return Ok(());
        }
      }
    }
  }

  fn lex_template_chunk(&mut self) -> SyntaxResult<()> {
    let start = self.next;
    loop {
      let rest = &self.bytes[self.next..];
      let Some(rel) = memchr3(b'`', b'$', b'\\', rest) else {
        self.next = self.bytes.len();
        return Err(self.error(SyntaxErrorType::UnterminatedTemplate, start));
      };
      self.next += rel;
      match self.bytes[self.next] {
        b'\\' => {
          self.next = (self.next + 2).min(self.bytes.len());
        }
        b'$' if self.peek_byte(1) == b'{' => {
          self.emit(TT::TemplateStr, start);
          let sub_start = self.next;
          self.next += 2;
          self.template_stack.push(self.brace_depth);
          self.emit(TT::TemplateSubOpen, sub_start);
          return Ok(());
        }
        b'$' => {
          self.next += 1;
        }
        _ => {
          // Closing backtick.
          self.emit(TT::TemplateStr, start);
          let close_start = self.next;
          self.next += 1;
          self.emit(TT::TemplateClose, close_start);
          return Ok(());
        }
      }
    }
  }

  fn lex_punctuator(&self, b: u8) -> Option<(TT, usize)> {
    let b1 = self.peek_byte(1);
    let b2 = self.peek_byte(2);
    let b3 = self.peek_byte(3);
    Some(match b {
      b'(' => (TT::ParenthesisOpen, 1),
      b')' => (TT::ParenthesisClose, 1),
      b'[' => (TT::BracketOpen, 1),
      b']' => (TT::BracketClose, 1),
      b',' => (TT::Comma, 1),
      b';' => (TT::Semicolon, 1),
      b':' => (TT::Colon, 1),
      b'~' => (TT::Tilde, 1),
      b'.' if b1 == b'.' && b2 == b'.' => (TT::DotDotDot, 3),
      b'.' => (TT::Dot, 1),
      b'?' if b1 == b'.' => (TT::QuestionDot, 2),
      b'?' if b1 == b'?' => (TT::QuestionQuestion, 2),
      b'?' => (TT::Question, 1),
      b'=' if b1 == b'=' && b2 == b'=' => (TT::EqualsEqualsEquals, 3),
      b'=' if b1 == b'=' => (TT::EqualsEquals, 2),
      b'=' if b1 == b'>' => (TT::EqualsChevronRight, 2),
      b'=' => (TT::Equals, 1),
      b'!' if b1 == b'=' && b2 == b'=' => (TT::ExclamationEqualsEquals, 3),
      b'!' if b1 == b'=' => (TT::ExclamationEquals, 2),
      b'!' => (TT::Exclamation, 1),
      b'+' if b1 == b'+' => (TT::PlusPlus, 2),
      b'+' if b1 == b'=' => (TT::PlusEquals, 2),
      b'+' => (TT::Plus, 1),
      b'-' if b1 == b'-' => (TT::HyphenHyphen, 2),
      b'-' if b1 == b'=' => (TT::HyphenEquals, 2),
      b'-' => (TT::Hyphen, 1),
      b'*' if b1 == b'*' && b2 == b'=' => (TT::AsteriskAsteriskEquals, 3),
      b'*' if b1 == b'*' => (TT::AsteriskAsterisk, 2),
      b'*' if b1 == b'=' => (TT::AsteriskEquals, 2),
      b'*' => (TT::Asterisk, 1),
      b'/' if b1 == b'=' => (TT::SlashEquals, 2),
      b'/' => (TT::Slash, 1),
      b'%' if b1 == b'=' => (TT::PercentEquals, 2),
      b'%' => (TT::Percent, 1),
      b'&' if b1 == b'&' => (TT::AmpersandAmpersand, 2),
      b'&' if b1 == b'=' => (TT::AmpersandEquals, 2),
      b'&' => (TT::Ampersand, 1),
      b'|' if b1 == b'|' => (TT::BarBar, 2),
      b'|' if b1 == b'=' => (TT::BarEquals, 2),
      b'|' => (TT::Bar, 1),
      b'^' if b1 == b'=' => (TT::CaretEquals, 2),
      b'^' => (TT::Caret, 1),
      b'<' if b1 == b'<' && b2 == b'=' => (TT::ChevronLeftChevronLeftEquals, 3),
      b'<' if b1 == b'<' => (TT::ChevronLeftChevronLeft, 2),
      b'<' if b1 == b'=' => (TT::ChevronLeftEquals, 2),
      b'<' => (TT::ChevronLeft, 1),
      b'>' if b1 == b'>' && b2 == b'>' && b3 == b'=' => {
        (TT::ChevronRightChevronRightChevronRightEquals, 4)
      }
      b'>' if b1 == b'>' && b2 == b'>' => (TT::ChevronRightChevronRightChevronRight, 3),
      b'>' if b1 == b'>' && b2 == b'=' => (TT::ChevronRightChevronRightEquals, 3),
      b'>' if b1 == b'>' => (TT::ChevronRightChevronRight, 2),
      b'>' if b1 == b'=' => (TT::ChevronRightEquals, 2),
      b'>' => (TT::ChevronRight, 1),
      _ => return None,
    })
  }
}

/// Decode the escape sequences of a string literal body or template chunk.
pub fn decode_string_body(raw: &str, loc: Loc) -> SyntaxResult<String> {
  let mut out = String::with_capacity(raw.len());
  let mut chars = raw.chars();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    let Some(esc) = chars.next() else {
      return Err(SyntaxError::new(SyntaxErrorType::InvalidCharacterEscape, loc));
    };
    match esc {
      'n' => out.push('\n'),
      't' => out.push('\t'),
      'r' => out.push('\r'),
      'b' => out.push('\u{8}'),
      'f' => out.push('\u{c}'),
      'v' => out.push('\u{b}'),
      '0' => out.push('\0'),
      // Line continuation.
      '\n' => {}
      '\r' => {
        // Consume the LF of a CRLF pair. `Chars` has no peek; clone to look
        // ahead.
        let mut ahead = chars.clone();
        if ahead.next() == Some('\n') {
          chars = ahead;
        }
      }
      'x' => {
        let hi = chars.next();
        let lo = chars.next();
        let (Some(hi), Some(lo)) = (hi, lo) else {
          return Err(SyntaxError::new(SyntaxErrorType::InvalidCharacterEscape, loc));
        };
        let code = (hex_digit(hi), hex_digit(lo));
        let (Some(hi), Some(lo)) = code else {
          return Err(SyntaxError::new(SyntaxErrorType::InvalidCharacterEscape, loc));
        };
        out.push((hi * 16 + lo) as u8 as char);
      }
      'u' => {
        let mut ahead = chars.clone();
        if ahead.next() == Some('{') {
          let mut code: u32 = 0;
          let mut any = false;
          loop {
            match ahead.next() {
              Some('}') => break,
              Some(c) => match hex_digit(c) {
                Some(d) => {
                  any = true;
                  code = code.saturating_mul(16).saturating_add(d);
                }
                None => {
                  return Err(SyntaxError::new(SyntaxErrorType::InvalidCharacterEscape, loc));
                }
              },
              None => {
                return Err(SyntaxError::new(SyntaxErrorType::InvalidCharacterEscape, loc));
              }
            }
          }
          let Some(decoded) = any.then(|| char::from_u32(code)).flatten() else {
            return Err(SyntaxError::new(SyntaxErrorType::InvalidCharacterEscape, loc));
          };
          out.push(decoded);
          chars = ahead;
        } else {
          let mut code: u32 = 0;
          for _ in 0..4 {
            let Some(d) = chars.next().and_then(hex_digit) else {
              return Err(SyntaxError::new(SyntaxErrorType::InvalidCharacterEscape, loc));
            };
            code = code * 16 + d;
          }
          // Lone surrogates cannot be represented in a Rust string; map them
          // to U+FFFD.
          out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
        }
      }
      other => out.push(other),
    }
  }
  Ok(out)
}

fn hex_digit(c: char) -> Option<u32> {
  c.to_digit(16)
}

#[cfg(test)]
mod tests {
  use super::{lex, TT};

  fn types(source: &str) -> Vec<TT> {
    lex(source).unwrap().into_iter().map(|t| t.typ).collect()
  }

  #[test]
  fn lexes_punctuators_longest_first() {
    assert_eq!(
      types("a >>>= b"),
      vec![
        TT::Id,
        TT::ChevronRightChevronRightChevronRightEquals,
        TT::Id,
        TT::Eof
      ]
    );
    assert_eq!(
      types("a?.b ?? c"),
      vec![TT::Id, TT::QuestionDot, TT::Id, TT::QuestionQuestion, TT::Id, TT::Eof]
    );
  }

  #[test]
  fn tracks_line_terminators() {
    let tokens = lex("a\nb").unwrap();
    assert!(!tokens[0].preceded_by_line_terminator);
    assert!(tokens[1].preceded_by_line_terminator);
  }

  #[test]
  fn lexes_template_with_substitution() {
    assert_eq!(
      types("`x${y}z`"),
      vec![
        TT::TemplateOpen,
        TT::TemplateStr,
        TT::TemplateSubOpen,
        TT::Id,
        TT::TemplateSubClose,
        TT::TemplateStr,
        TT::TemplateClose,
        TT::Eof
      ]
    );
  }

  #[test]
  fn template_substitution_may_contain_braces() {
    assert_eq!(
      types("`${ {a: 1} }`"),
      vec![
        TT::TemplateOpen,
        TT::TemplateStr,
        TT::TemplateSubOpen,
        TT::BraceOpen,
        TT::Id,
        TT::Colon,
        TT::Num,
        TT::BraceClose,
        TT::TemplateSubClose,
        TT::TemplateStr,
        TT::TemplateClose,
        TT::Eof
      ]
    );
  }

  #[test]
  fn rejects_unterminated_string() {
    assert!(lex("'abc").is_err());
  }
}
