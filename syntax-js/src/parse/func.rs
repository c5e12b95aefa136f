use super::Parser;
use crate::ast::func::{Func, FuncBody, Param};
use crate::ast::Node;
use crate::error::{SyntaxErrorType, SyntaxResult};
use crate::token::TT;
use std::rc::Rc;

impl<'a> Parser<'a> {
  /// Parse the remainder of a `function` definition after the keyword:
  /// optional name, parameter list, and block body.
  pub(crate) fn parse_func_tail(
    &mut self,
    require_name: bool,
    is_async: bool,
  ) -> SyntaxResult<Rc<Node<Func>>> {
    if self.tt() == TT::Asterisk {
      return Err(self.error_here(SyntaxErrorType::UnsupportedSyntax("generator functions")));
    }
    let name = if self.tt() == TT::Id {
      let tok = self.advance();
      Some(self.str_of(&tok).to_string())
    } else if require_name {
      return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("function name")));
    } else {
      None
    };
    self.parse_func_params_and_body(name, is_async, false)
  }

  /// Parameter list plus block body; shared by functions, methods, and object
  /// method shorthand.
  pub(crate) fn parse_func_params_and_body(
    &mut self,
    name: Option<String>,
    is_async: bool,
    is_arrow: bool,
  ) -> SyntaxResult<Rc<Node<Func>>> {
    let start = self.peek().loc;
    let params = self.parse_params()?;
    let block = self.parse_block()?;
    let loc = start + self.prev_loc();
    Ok(Rc::new(Node::new(
      loc,
      Func {
        name,
        params,
        body: FuncBody::Block(block.stx.body),
        is_async,
        is_arrow,
      },
    )))
  }

  pub(crate) fn parse_params(&mut self) -> SyntaxResult<Vec<Node<Param>>> {
    self.require(TT::ParenthesisOpen)?;
    let mut params = Vec::new();
    loop {
      if self.tt() == TT::ParenthesisClose {
        break;
      }
      let start = self.peek().loc;
      let rest = self.eat(TT::DotDotDot).is_some();
      let pattern = self.parse_pat()?;
      let default = match self.eat(TT::Equals) {
        Some(_) => Some(self.parse_assign(false)?),
        None => None,
      };
      let loc = start + self.prev_loc();
      params.push(Node::new(loc, Param {
        pattern,
        default,
        rest,
      }));
      if rest && self.tt() != TT::ParenthesisClose {
        return Err(self.error_here(SyntaxErrorType::RestElementNotLast));
      }
      if self.eat(TT::Comma).is_none() {
        break;
      }
    }
    self.require(TT::ParenthesisClose)?;
    Ok(params)
  }
}
