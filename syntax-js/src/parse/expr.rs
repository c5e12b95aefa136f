use super::{is_name_like, Parser};
use crate::ast::expr::*;
use crate::ast::func::{Func, FuncBody};
use crate::ast::op::{BinaryOp, LogicalOp, UnaryOp, UpdateOp};
use crate::ast::pat::PropKey;
use crate::ast::Node;
use crate::error::{SyntaxError, SyntaxErrorType, SyntaxResult};
use crate::lex::decode_string_body;
use crate::loc::Loc;
use crate::num;
use crate::token::TT;

enum BinOpKind {
  Bin(BinaryOp),
  Log(LogicalOp),
}

/// Binding power and operator for a binary/logical token; higher binds
/// tighter. `**` is right-associative and handled in the climb.
fn binary_power(typ: TT, no_in: bool) -> Option<(u8, BinOpKind)> {
  Some(match typ {
    TT::QuestionQuestion => (1, BinOpKind::Log(LogicalOp::Nullish)),
    TT::BarBar => (2, BinOpKind::Log(LogicalOp::Or)),
    TT::AmpersandAmpersand => (3, BinOpKind::Log(LogicalOp::And)),
    TT::Bar => (4, BinOpKind::Bin(BinaryOp::BitOr)),
    TT::Caret => (5, BinOpKind::Bin(BinaryOp::BitXor)),
    TT::Ampersand => (6, BinOpKind::Bin(BinaryOp::BitAnd)),
    TT::EqualsEquals => (7, BinOpKind::Bin(BinaryOp::LooseEq)),
    TT::ExclamationEquals => (7, BinOpKind::Bin(BinaryOp::LooseNeq)),
    TT::EqualsEqualsEquals => (7, BinOpKind::Bin(BinaryOp::StrictEq)),
    TT::ExclamationEqualsEquals => (7, BinOpKind::Bin(BinaryOp::StrictNeq)),
    TT::ChevronLeft => (8, BinOpKind::Bin(BinaryOp::Lt)),
    TT::ChevronLeftEquals => (8, BinOpKind::Bin(BinaryOp::LtEq)),
    TT::ChevronRight => (8, BinOpKind::Bin(BinaryOp::Gt)),
    TT::ChevronRightEquals => (8, BinOpKind::Bin(BinaryOp::GtEq)),
    TT::KeywordIn if !no_in => (8, BinOpKind::Bin(BinaryOp::In)),
    TT::KeywordInstanceof => (8, BinOpKind::Bin(BinaryOp::Instanceof)),
    TT::ChevronLeftChevronLeft => (9, BinOpKind::Bin(BinaryOp::Shl)),
    TT::ChevronRightChevronRight => (9, BinOpKind::Bin(BinaryOp::Shr)),
    TT::ChevronRightChevronRightChevronRight => (9, BinOpKind::Bin(BinaryOp::ShrUnsigned)),
    TT::Plus => (10, BinOpKind::Bin(BinaryOp::Add)),
    TT::Hyphen => (10, BinOpKind::Bin(BinaryOp::Sub)),
    TT::Asterisk => (11, BinOpKind::Bin(BinaryOp::Mul)),
    TT::Slash => (11, BinOpKind::Bin(BinaryOp::Div)),
    TT::Percent => (11, BinOpKind::Bin(BinaryOp::Rem)),
    TT::AsteriskAsterisk => (12, BinOpKind::Bin(BinaryOp::Exp)),
    _ => return None,
  })
}

fn assign_operator(typ: TT) -> Option<Option<BinaryOp>> {
  Some(match typ {
    TT::Equals => None,
    TT::PlusEquals => Some(BinaryOp::Add),
    TT::HyphenEquals => Some(BinaryOp::Sub),
    TT::AsteriskEquals => Some(BinaryOp::Mul),
    TT::AsteriskAsteriskEquals => Some(BinaryOp::Exp),
    TT::SlashEquals => Some(BinaryOp::Div),
    TT::PercentEquals => Some(BinaryOp::Rem),
    TT::AmpersandEquals => Some(BinaryOp::BitAnd),
    TT::BarEquals => Some(BinaryOp::BitOr),
    TT::CaretEquals => Some(BinaryOp::BitXor),
    TT::ChevronLeftChevronLeftEquals => Some(BinaryOp::Shl),
    TT::ChevronRightChevronRightEquals => Some(BinaryOp::Shr),
    TT::ChevronRightChevronRightChevronRightEquals => Some(BinaryOp::ShrUnsigned),
    _ => return None,
  })
}

impl<'a> Parser<'a> {
  /// Full expression including the comma operator.
  pub(crate) fn parse_expr_seq(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc;
    let first = self.parse_assign(no_in)?;
    if self.tt() != TT::Comma {
      return Ok(first);
    }
    let mut expressions = vec![first];
    while self.eat(TT::Comma).is_some() {
      expressions.push(self.parse_assign(no_in)?);
    }
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Expr::Seq(Node::new(loc, SeqExpr { expressions })),
    ))
  }

  /// Assignment-level expression (no comma operator).
  pub(crate) fn parse_assign(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    if let Some(arrow) = self.try_parse_arrow(no_in)? {
      return Ok(arrow);
    }

    let start = self.peek().loc;
    let lhs = self.parse_cond(no_in)?;
    let Some(operator) = assign_operator(self.tt()) else {
      return Ok(lhs);
    };
    self.advance();
    let target = if operator.is_none() {
      Self::expr_to_pat(lhs)?
    } else {
      // Compound assignment targets must be simple (identifier or member).
      match &*lhs.stx {
        Expr::Id(_) | Expr::Member(_) | Expr::ComputedMember(_) => Self::expr_to_pat(lhs)?,
        _ => return Err(SyntaxError::new(SyntaxErrorType::InvalidAssignmentTarget, lhs.loc)),
      }
    };
    let value = self.parse_assign(no_in)?;
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Expr::Assign(Node::new(
        loc,
        AssignExpr {
          operator,
          target,
          value,
        },
      )),
    ))
  }

  fn parse_cond(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc;
    let test = self.parse_binary(no_in, 0)?;
    if self.eat(TT::Question).is_none() {
      return Ok(test);
    }
    let consequent = self.parse_assign(false)?;
    self.require(TT::Colon)?;
    let alternate = self.parse_assign(no_in)?;
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Expr::Cond(Node::new(
        loc,
        CondExpr {
          test,
          consequent,
          alternate,
        },
      )),
    ))
  }

  fn parse_binary(&mut self, no_in: bool, min_power: u8) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc;
    let mut left = self.parse_unary(no_in)?;
    while let Some((power, kind)) = binary_power(self.tt(), no_in) {
      if power < min_power {
        break;
      }
      self.advance();
      // `**` is right-associative: allow the same power on the right.
      let next_min = if matches!(kind, BinOpKind::Bin(BinaryOp::Exp)) {
        power
      } else {
        power + 1
      };
      let right = self.parse_binary(no_in, next_min)?;
      let loc = start + self.prev_loc();
      left = match kind {
        BinOpKind::Bin(operator) => Node::new(
          loc,
          Expr::Binary(Node::new(
            loc,
            BinaryExpr {
              operator,
              left,
              right,
            },
          )),
        ),
        BinOpKind::Log(operator) => Node::new(
          loc,
          Expr::Logical(Node::new(
            loc,
            LogicalExpr {
              operator,
              left,
              right,
            },
          )),
        ),
      };
    }
    Ok(left)
  }

  fn parse_unary(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc;
    let operator = match self.tt() {
      TT::Exclamation => Some(UnaryOp::Not),
      TT::Tilde => Some(UnaryOp::BitNot),
      TT::Plus => Some(UnaryOp::Pos),
      TT::Hyphen => Some(UnaryOp::Neg),
      TT::KeywordTypeof => Some(UnaryOp::Typeof),
      TT::KeywordVoid => Some(UnaryOp::Void),
      TT::KeywordDelete => Some(UnaryOp::Delete),
      _ => None,
    };
    if let Some(operator) = operator {
      self.advance();
      let argument = self.parse_unary(no_in)?;
      let loc = start + self.prev_loc();
      return Ok(Node::new(
        loc,
        Expr::Unary(Node::new(loc, UnaryExpr { operator, argument })),
      ));
    }

    match self.tt() {
      TT::KeywordAwait => {
        self.advance();
        let argument = self.parse_unary(no_in)?;
        let loc = start + self.prev_loc();
        Ok(Node::new(
          loc,
          Expr::Await(Node::new(loc, AwaitExpr { argument })),
        ))
      }
      TT::PlusPlus | TT::HyphenHyphen => {
        let operator = if self.advance().typ == TT::PlusPlus {
          UpdateOp::Increment
        } else {
          UpdateOp::Decrement
        };
        let argument = self.parse_unary(no_in)?;
        let loc = start + self.prev_loc();
        Ok(Node::new(
          loc,
          Expr::Update(Node::new(
            loc,
            UpdateExpr {
              operator,
              prefix: true,
              argument,
            },
          )),
        ))
      }
      _ => {
        let operand = self.parse_lhs()?;
        // Postfix `++`/`--` must be on the same line as the operand.
        if matches!(self.tt(), TT::PlusPlus | TT::HyphenHyphen)
          && !self.peek().preceded_by_line_terminator
        {
          let operator = if self.advance().typ == TT::PlusPlus {
            UpdateOp::Increment
          } else {
            UpdateOp::Decrement
          };
          let loc = start + self.prev_loc();
          return Ok(Node::new(
            loc,
            Expr::Update(Node::new(
              loc,
              UpdateExpr {
                operator,
                prefix: false,
                argument: operand,
              },
            )),
          ));
        }
        Ok(operand)
      }
    }
  }

  /// Member/call/new chains over a primary expression.
  pub(crate) fn parse_lhs(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc;
    let base = match self.tt() {
      TT::KeywordNew => self.parse_new()?,
      TT::KeywordSuper => self.parse_super()?,
      _ => self.parse_primary()?,
    };
    let mut has_optional = false;
    let chained = self.parse_chain(start, base, &mut has_optional)?;
    if has_optional {
      let loc = chained.loc;
      Ok(Node::new(loc, Expr::Chain(Node::new(loc, ChainExpr { expr: chained }))))
    } else {
      Ok(chained)
    }
  }

  fn parse_chain(
    &mut self,
    start: Loc,
    mut base: Node<Expr>,
    has_optional: &mut bool,
  ) -> SyntaxResult<Node<Expr>> {
    loop {
      match self.tt() {
        TT::Dot => {
          self.advance();
          let name_tok = self.peek();
          if !is_name_like(name_tok.typ) {
            return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("property name")));
          }
          self.advance();
          let property = self.str_of(&name_tok).to_string();
          let loc = start + self.prev_loc();
          base = Node::new(
            loc,
            Expr::Member(Node::new(
              loc,
              MemberExpr {
                optional: false,
                object: base,
                property,
              },
            )),
          );
        }
        TT::QuestionDot => {
          self.advance();
          *has_optional = true;
          match self.tt() {
            TT::ParenthesisOpen => {
              let arguments = self.parse_call_args()?;
              let loc = start + self.prev_loc();
              base = Node::new(
                loc,
                Expr::Call(Node::new(
                  loc,
                  CallExpr {
                    optional: true,
                    callee: base,
                    arguments,
                  },
                )),
              );
            }
            TT::BracketOpen => {
              self.advance();
              let index = self.parse_expr_seq(false)?;
              self.require(TT::BracketClose)?;
              let loc = start + self.prev_loc();
              base = Node::new(
                loc,
                Expr::ComputedMember(Node::new(
                  loc,
                  ComputedMemberExpr {
                    optional: true,
                    object: base,
                    index,
                  },
                )),
              );
            }
            typ if is_name_like(typ) => {
              let name_tok = self.advance();
              let property = self.str_of(&name_tok).to_string();
              let loc = start + self.prev_loc();
              base = Node::new(
                loc,
                Expr::Member(Node::new(
                  loc,
                  MemberExpr {
                    optional: true,
                    object: base,
                    property,
                  },
                )),
              );
            }
            _ => {
              return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("property name")));
            }
          }
        }
        TT::BracketOpen => {
          self.advance();
          let index = self.parse_expr_seq(false)?;
          self.require(TT::BracketClose)?;
          let loc = start + self.prev_loc();
          base = Node::new(
            loc,
            Expr::ComputedMember(Node::new(
              loc,
              ComputedMemberExpr {
                optional: false,
                object: base,
                index,
              },
            )),
          );
        }
        TT::ParenthesisOpen => {
          let arguments = self.parse_call_args()?;
          let loc = start + self.prev_loc();
          base = Node::new(
            loc,
            Expr::Call(Node::new(
              loc,
              CallExpr {
                optional: false,
                callee: base,
                arguments,
              },
            )),
          );
        }
        TT::TemplateOpen => {
          return Err(self.error_here(SyntaxErrorType::UnsupportedSyntax(
            "tagged template literals",
          )));
        }
        _ => return Ok(base),
      }
    }
  }

  fn parse_new(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::KeywordNew)?.loc;
    // The callee is a member chain without calls; `new a.b()` constructs
    // `a.b`, and `new f()()` calls the construction result.
    let primary = self.parse_primary()?;
    let mut callee = primary;
    loop {
      match self.tt() {
        TT::Dot => {
          self.advance();
          let name_tok = self.peek();
          if !is_name_like(name_tok.typ) {
            return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("property name")));
          }
          self.advance();
          let property = self.str_of(&name_tok).to_string();
          let loc = callee.loc + self.prev_loc();
          callee = Node::new(
            loc,
            Expr::Member(Node::new(
              loc,
              MemberExpr {
                optional: false,
                object: callee,
                property,
              },
            )),
          );
        }
        TT::BracketOpen => {
          self.advance();
          let index = self.parse_expr_seq(false)?;
          self.require(TT::BracketClose)?;
          let loc = callee.loc + self.prev_loc();
          callee = Node::new(
            loc,
            Expr::ComputedMember(Node::new(
              loc,
              ComputedMemberExpr {
                optional: false,
                object: callee,
                index,
              },
            )),
          );
        }
        _ => break,
      }
    }
    let arguments = if self.tt() == TT::ParenthesisOpen {
      self.parse_call_args()?
    } else {
      Vec::new()
    };
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Expr::New(Node::new(loc, NewExpr { callee, arguments })),
    ))
  }

  fn parse_super(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::KeywordSuper)?.loc;
    match self.tt() {
      TT::ParenthesisOpen => {
        let arguments = self.parse_call_args()?;
        let loc = start + self.prev_loc();
        Ok(Node::new(
          loc,
          Expr::SuperCall(Node::new(loc, SuperCallExpr { arguments })),
        ))
      }
      TT::Dot => {
        self.advance();
        let name_tok = self.peek();
        if !is_name_like(name_tok.typ) {
          return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("property name")));
        }
        self.advance();
        let property = self.str_of(&name_tok).to_string();
        let loc = start + self.prev_loc();
        Ok(Node::new(
          loc,
          Expr::SuperMember(Node::new(loc, SuperMemberExpr { property })),
        ))
      }
      _ => Err(self.error_here(SyntaxErrorType::ExpectedSyntax("super call or member"))),
    }
  }

  pub(crate) fn parse_call_args(&mut self) -> SyntaxResult<Vec<Node<CallArg>>> {
    self.require(TT::ParenthesisOpen)?;
    let mut arguments = Vec::new();
    loop {
      if self.tt() == TT::ParenthesisClose {
        break;
      }
      let start = self.peek().loc;
      let spread = self.eat(TT::DotDotDot).is_some();
      let value = self.parse_assign(false)?;
      let loc = start + self.prev_loc();
      arguments.push(Node::new(loc, CallArg { spread, value }));
      if self.eat(TT::Comma).is_none() {
        break;
      }
    }
    self.require(TT::ParenthesisClose)?;
    Ok(arguments)
  }

  fn parse_primary(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc;
    match self.tt() {
      TT::Num => {
        let tok = self.advance();
        let raw = self.str_of(&tok);
        let value = num::parse_numeric_literal(raw)
          .ok_or_else(|| SyntaxError::new(SyntaxErrorType::MalformedLiteralNumber, tok.loc))?;
        Ok(Node::new(tok.loc, Expr::LitNum(Node::new(tok.loc, LitNumExpr { value }))))
      }
      TT::Str => {
        let tok = self.advance();
        let value = decode_string_body(self.str_body_of(&tok), tok.loc)?;
        Ok(Node::new(tok.loc, Expr::LitStr(Node::new(tok.loc, LitStrExpr { value }))))
      }
      TT::TemplateOpen => self.parse_template(),
      TT::KeywordTrue | TT::KeywordFalse => {
        let tok = self.advance();
        let value = tok.typ == TT::KeywordTrue;
        Ok(Node::new(
          tok.loc,
          Expr::LitBool(Node::new(tok.loc, LitBoolExpr { value })),
        ))
      }
      TT::KeywordNull => {
        let tok = self.advance();
        Ok(Node::new(tok.loc, Expr::LitNull(Node::new(tok.loc, LitNullExpr {}))))
      }
      TT::KeywordUndefined => {
        let tok = self.advance();
        Ok(Node::new(
          tok.loc,
          Expr::LitUndefined(Node::new(tok.loc, LitUndefinedExpr {})),
        ))
      }
      TT::KeywordThis => {
        let tok = self.advance();
        Ok(Node::new(tok.loc, Expr::This(Node::new(tok.loc, ThisExpr {}))))
      }
      TT::KeywordFunction => {
        self.advance();
        let func = self.parse_func_tail(false, false)?;
        let loc = start + self.prev_loc();
        Ok(Node::new(loc, Expr::Func(Node::new(loc, FuncExpr { func }))))
      }
      TT::Id
        if self.is_contextual("async")
          && self.nth(1).typ == TT::KeywordFunction
          && !self.nth(1).preceded_by_line_terminator =>
      {
        self.advance();
        self.advance();
        let func = self.parse_func_tail(false, true)?;
        let loc = start + self.prev_loc();
        Ok(Node::new(loc, Expr::Func(Node::new(loc, FuncExpr { func }))))
      }
      TT::KeywordClass => {
        let def = self.parse_class_def(false)?;
        let loc = start + self.prev_loc();
        Ok(Node::new(loc, Expr::Class(Node::new(loc, ClassExpr { def }))))
      }
      TT::Id => {
        let tok = self.advance();
        let name = self.str_of(&tok).to_string();
        Ok(Node::new(tok.loc, Expr::Id(Node::new(tok.loc, IdExpr { name }))))
      }
      TT::ParenthesisOpen => {
        self.advance();
        let expr = self.parse_expr_seq(false)?;
        self.require(TT::ParenthesisClose)?;
        Ok(expr)
      }
      TT::BracketOpen => self.parse_arr_literal(),
      TT::BraceOpen => self.parse_obj_literal(),
      TT::Eof => Err(self.error_here(SyntaxErrorType::UnexpectedEnd)),
      _ => Err(self.error_here(SyntaxErrorType::ExpectedSyntax("expression"))),
    }
  }

  fn parse_template(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::TemplateOpen)?.loc;
    let mut parts = Vec::new();
    loop {
      let chunk = self.require(TT::TemplateStr)?;
      let raw = self.str_of(&chunk);
      let decoded = decode_string_body(raw, chunk.loc)?;
      if !decoded.is_empty() {
        parts.push(TemplatePart::Str(decoded));
      }
      match self.tt() {
        TT::TemplateClose => {
          self.advance();
          break;
        }
        TT::TemplateSubOpen => {
          self.advance();
          let expr = self.parse_expr_seq(false)?;
          self.require(TT::TemplateSubClose)?;
          parts.push(TemplatePart::Expr(expr));
        }
        _ => {
          return Err(self.error_here(SyntaxErrorType::UnterminatedTemplate));
        }
      }
    }
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Expr::Template(Node::new(loc, TemplateExpr { parts })),
    ))
  }

  fn parse_arr_literal(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::BracketOpen)?.loc;
    let mut elements = Vec::new();
    loop {
      match self.tt() {
        TT::BracketClose => break,
        TT::Comma => {
          self.advance();
          elements.push(None);
          continue;
        }
        _ => {}
      }
      let spread = self.eat(TT::DotDotDot).is_some();
      let value = self.parse_assign(false)?;
      elements.push(Some(ArrElem { spread, value }));
      if self.eat(TT::Comma).is_none() {
        break;
      }
    }
    let end = self.require(TT::BracketClose)?.loc;
    let loc = start + end;
    Ok(Node::new(loc, Expr::Arr(Node::new(loc, ArrExpr { elements }))))
  }

  fn parse_obj_literal(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::BraceOpen)?.loc;
    let mut members = Vec::new();
    loop {
      if self.tt() == TT::BraceClose {
        break;
      }
      let member_start = self.peek().loc;

      if self.eat(TT::DotDotDot).is_some() {
        let value = self.parse_assign(false)?;
        let loc = member_start + self.prev_loc();
        members.push(Node::new(loc, ObjMember::Spread { value }));
        if self.eat(TT::Comma).is_none() {
          break;
        }
        continue;
      }

      // `get`/`set` accessor properties are recognized to reject them with a
      // dedicated message rather than a puzzling parse failure.
      if (self.is_contextual("get") || self.is_contextual("set"))
        && is_name_like(self.nth(1).typ)
        && !matches!(self.nth(1).typ, TT::Colon | TT::Comma | TT::BraceClose | TT::ParenthesisOpen)
      {
        return Err(self.error_here(SyntaxErrorType::UnsupportedSyntax(
          "getter/setter properties",
        )));
      }

      let is_async_method = self.is_contextual("async")
        && (is_name_like(self.nth(1).typ) || self.nth(1).typ == TT::Str || self.nth(1).typ == TT::BracketOpen)
        && !matches!(self.nth(1).typ, TT::Colon | TT::Comma | TT::BraceClose | TT::ParenthesisOpen);
      if is_async_method {
        self.advance();
      }

      let key = self.parse_prop_key()?;
      match self.tt() {
        TT::Colon => {
          self.advance();
          let value = self.parse_assign(false)?;
          let loc = member_start + self.prev_loc();
          members.push(Node::new(loc, ObjMember::Prop { key, value }));
        }
        TT::ParenthesisOpen => {
          // Method shorthand desugars to a plain property holding a function
          // expression.
          let name = match &key {
            PropKey::Direct(name) => Some(name.clone()),
            PropKey::Computed(_) => None,
          };
          let func = self.parse_func_params_and_body(name, is_async_method, false)?;
          let loc = member_start + self.prev_loc();
          let value = Node::new(loc, Expr::Func(Node::new(loc, FuncExpr { func })));
          members.push(Node::new(loc, ObjMember::Prop { key, value }));
        }
        _ => {
          if is_async_method {
            return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("method body")));
          }
          let PropKey::Direct(name) = key else {
            return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("property value")));
          };
          let loc = member_start + self.prev_loc();
          members.push(Node::new(loc, ObjMember::Shorthand { name }));
        }
      }
      if self.eat(TT::Comma).is_none() {
        break;
      }
    }
    let end = self.require(TT::BraceClose)?.loc;
    let loc = start + end;
    Ok(Node::new(loc, Expr::Obj(Node::new(loc, ObjExpr { members }))))
  }

  /// Attempt to parse an arrow function at the current position; restores the
  /// parser and returns `None` when the tokens turn out not to start one.
  fn try_parse_arrow(&mut self, no_in: bool) -> SyntaxResult<Option<Node<Expr>>> {
    let start = self.peek().loc;

    // `x => ...`
    if self.tt() == TT::Id
      && !self.is_contextual("async")
      && self.nth(1).typ == TT::EqualsChevronRight
      && !self.nth(1).preceded_by_line_terminator
    {
      return Ok(Some(self.parse_arrow_with_single_param(start, false, no_in)?));
    }
    // `async x => ...`
    if self.is_contextual("async")
      && self.nth(1).typ == TT::Id
      && !self.nth(1).preceded_by_line_terminator
      && self.nth(2).typ == TT::EqualsChevronRight
    {
      self.advance();
      return Ok(Some(self.parse_arrow_with_single_param(start, true, no_in)?));
    }

    // `(params) => ...` and `async (params) => ...` require lookahead; try
    // and roll back on failure.
    let is_async = self.is_contextual("async")
      && self.nth(1).typ == TT::ParenthesisOpen
      && !self.nth(1).preceded_by_line_terminator;
    if self.tt() != TT::ParenthesisOpen && !is_async {
      return Ok(None);
    }
    let checkpoint = self.checkpoint();
    if is_async {
      self.advance();
    }
    let params = match self.parse_params() {
      Ok(params) => params,
      Err(_) => {
        self.restore(checkpoint);
        return Ok(None);
      }
    };
    if self.tt() != TT::EqualsChevronRight || self.peek().preceded_by_line_terminator {
      self.restore(checkpoint);
      return Ok(None);
    }
    self.advance();
    let arrow = self.parse_arrow_body(start, params, is_async, no_in)?;
    Ok(Some(arrow))
  }

  fn parse_arrow_with_single_param(
    &mut self,
    start: Loc,
    is_async: bool,
    no_in: bool,
  ) -> SyntaxResult<Node<Expr>> {
    let name_tok = self.advance();
    let name = self.str_of(&name_tok).to_string();
    let param = Node::new(
      name_tok.loc,
      crate::ast::func::Param {
        pattern: Node::new(
          name_tok.loc,
          crate::ast::pat::Pat::Id(Node::new(name_tok.loc, crate::ast::pat::IdPat { name })),
        ),
        default: None,
        rest: false,
      },
    );
    self.require(TT::EqualsChevronRight)?;
    self.parse_arrow_body(start, vec![param], is_async, no_in)
  }

  fn parse_arrow_body(
    &mut self,
    start: Loc,
    params: Vec<Node<crate::ast::func::Param>>,
    is_async: bool,
    no_in: bool,
  ) -> SyntaxResult<Node<Expr>> {
    let body = if self.tt() == TT::BraceOpen {
      let block = self.parse_block()?;
      FuncBody::Block(block.stx.body)
    } else {
      FuncBody::Expr(self.parse_assign(no_in)?)
    };
    let loc = start + self.prev_loc();
    let func = Func {
      name: None,
      params,
      body,
      is_async,
      is_arrow: true,
    };
    Ok(Node::new(
      loc,
      Expr::Func(Node::new(
        loc,
        FuncExpr {
          func: std::rc::Rc::new(Node::new(loc, func)),
        },
      )),
    ))
  }
}
