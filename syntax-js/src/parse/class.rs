use super::{is_name_like, Parser};
use crate::ast::class::{ClassDef, ClassMember, MethodKind};
use crate::ast::pat::PropKey;
use crate::ast::Node;
use crate::error::{SyntaxErrorType, SyntaxResult};
use crate::token::TT;

impl<'a> Parser<'a> {
  pub(crate) fn parse_class_def(&mut self, require_name: bool) -> SyntaxResult<Node<ClassDef>> {
    let start = self.require(TT::KeywordClass)?.loc;
    let name = if self.tt() == TT::Id {
      let tok = self.advance();
      Some(self.str_of(&tok).to_string())
    } else if require_name {
      return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("class name")));
    } else {
      None
    };
    let extends = match self.eat(TT::KeywordExtends) {
      Some(_) => Some(self.parse_lhs()?),
      None => None,
    };
    self.require(TT::BraceOpen)?;

    let mut members = Vec::new();
    loop {
      if self.eat(TT::Semicolon).is_some() {
        continue;
      }
      if self.tt() == TT::BraceClose {
        break;
      }
      members.push(self.parse_class_member()?);
    }
    self.require(TT::BraceClose)?;
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      ClassDef {
        name,
        extends,
        members,
      },
    ))
  }

  fn parse_class_member(&mut self) -> SyntaxResult<Node<ClassMember>> {
    let start = self.peek().loc;

    // Each modifier only applies when it is *not* itself the member name
    // (i.e. not directly followed by a parameter list).
    let is_static = self.is_contextual("static") && self.nth(1).typ != TT::ParenthesisOpen;
    if is_static {
      self.advance();
    }

    let mut kind = MethodKind::Method;
    if (self.is_contextual("get") || self.is_contextual("set"))
      && self.nth(1).typ != TT::ParenthesisOpen
      && (is_name_like(self.nth(1).typ)
        || matches!(self.nth(1).typ, TT::Str | TT::Num | TT::BracketOpen))
    {
      kind = if self.is_contextual("get") {
        MethodKind::Get
      } else {
        MethodKind::Set
      };
      self.advance();
    }

    let is_async = self.is_contextual("async")
      && self.nth(1).typ != TT::ParenthesisOpen
      && !self.nth(1).preceded_by_line_terminator
      && (is_name_like(self.nth(1).typ)
        || matches!(self.nth(1).typ, TT::Str | TT::Num | TT::BracketOpen));
    if is_async {
      self.advance();
    }

    if self.tt() == TT::Asterisk {
      return Err(self.error_here(SyntaxErrorType::UnsupportedSyntax("generator functions")));
    }

    let key = self.parse_prop_key()?;
    if kind == MethodKind::Method && !is_static {
      if let PropKey::Direct(name) = &key {
        if name == "constructor" {
          kind = MethodKind::Constructor;
        }
      }
    }

    if self.tt() != TT::ParenthesisOpen {
      return Err(self.error_here(SyntaxErrorType::UnsupportedSyntax("class fields")));
    }

    let name = match &key {
      PropKey::Direct(name) => Some(name.clone()),
      PropKey::Computed(_) => None,
    };
    let func = self.parse_func_params_and_body(name, is_async, false)?;
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      ClassMember {
        kind,
        is_static,
        key,
        func,
      },
    ))
  }
}
