use super::{is_name_like, Parser};
use crate::ast::expr::{ArrElem, Expr, ObjMember};
use crate::ast::pat::*;
use crate::ast::Node;
use crate::error::{SyntaxError, SyntaxErrorType, SyntaxResult};
use crate::lex::decode_string_body;
use crate::num;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub(crate) fn parse_pat(&mut self) -> SyntaxResult<Node<Pat>> {
    match self.tt() {
      TT::Id => {
        let tok = self.advance();
        let name = self.str_of(&tok).to_string();
        Ok(Node::new(tok.loc, Pat::Id(Node::new(tok.loc, IdPat { name }))))
      }
      TT::BracketOpen => self.parse_arr_pat(),
      TT::BraceOpen => self.parse_obj_pat(),
      _ => Err(self.error_here(SyntaxErrorType::ExpectedSyntax("binding pattern"))),
    }
  }

  fn parse_arr_pat(&mut self) -> SyntaxResult<Node<Pat>> {
    let start = self.require(TT::BracketOpen)?.loc;
    let mut elements = Vec::new();
    let mut rest = None;
    loop {
      match self.tt() {
        TT::BracketClose => break,
        TT::Comma => {
          self.advance();
          elements.push(None);
          continue;
        }
        TT::DotDotDot => {
          self.advance();
          rest = Some(self.parse_pat()?);
          if self.tt() != TT::BracketClose {
            return Err(self.error_here(SyntaxErrorType::RestElementNotLast));
          }
          break;
        }
        _ => {}
      }
      let target = self.parse_pat()?;
      let default = match self.eat(TT::Equals) {
        Some(_) => Some(self.parse_assign(false)?),
        None => None,
      };
      elements.push(Some(ArrPatElem { target, default }));
      if self.eat(TT::Comma).is_none() {
        break;
      }
    }
    let end = self.require(TT::BracketClose)?.loc;
    let loc = start + end;
    Ok(Node::new(loc, Pat::Arr(Node::new(loc, ArrPat { elements, rest }))))
  }

  fn parse_obj_pat(&mut self) -> SyntaxResult<Node<Pat>> {
    let start = self.require(TT::BraceOpen)?.loc;
    let mut properties = Vec::new();
    let mut rest = None;
    loop {
      match self.tt() {
        TT::BraceClose => break,
        TT::DotDotDot => {
          self.advance();
          rest = Some(self.parse_pat()?);
          if self.tt() != TT::BraceClose {
            return Err(self.error_here(SyntaxErrorType::RestElementNotLast));
          }
          break;
        }
        _ => {}
      }
      let prop_start = self.peek().loc;
      let key = self.parse_prop_key()?;
      let target = match self.eat(TT::Colon) {
        Some(_) => self.parse_pat()?,
        None => {
          // Shorthand: the key doubles as the bound name.
          let PropKey::Direct(name) = &key else {
            return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("pattern after computed key")));
          };
          let loc = prop_start;
          Node::new(loc, Pat::Id(Node::new(loc, IdPat { name: name.clone() })))
        }
      };
      let default = match self.eat(TT::Equals) {
        Some(_) => Some(self.parse_assign(false)?),
        None => None,
      };
      let loc = prop_start + self.prev_loc();
      properties.push(Node::new(loc, ObjPatProp {
        key,
        target,
        default,
      }));
      if self.eat(TT::Comma).is_none() {
        break;
      }
    }
    let end = self.require(TT::BraceClose)?.loc;
    let loc = start + end;
    Ok(Node::new(
      loc,
      Pat::Obj(Node::new(loc, ObjPat { properties, rest })),
    ))
  }

  /// A property name: identifier, keyword, string, number, or `[expr]`.
  pub(crate) fn parse_prop_key(&mut self) -> SyntaxResult<PropKey> {
    match self.tt() {
      TT::BracketOpen => {
        self.advance();
        let expr = self.parse_assign(false)?;
        self.require(TT::BracketClose)?;
        Ok(PropKey::Computed(expr))
      }
      TT::Str => {
        let tok = self.advance();
        let value = decode_string_body(self.str_body_of(&tok), tok.loc)?;
        Ok(PropKey::Direct(value))
      }
      TT::Num => {
        let tok = self.advance();
        let raw = self.str_of(&tok);
        let value = num::parse_numeric_literal(raw)
          .ok_or_else(|| SyntaxError::new(SyntaxErrorType::MalformedLiteralNumber, tok.loc))?;
        Ok(PropKey::Direct(num::format_f64(value)))
      }
      typ if is_name_like(typ) => {
        let tok = self.advance();
        Ok(PropKey::Direct(self.str_of(&tok).to_string()))
      }
      _ => Err(self.error_here(SyntaxErrorType::ExpectedSyntax("property name"))),
    }
  }

  /// Reinterpret an already-parsed expression as a binding pattern.
  ///
  /// Array and object literals are the cover grammar for destructuring
  /// assignment targets; member expressions become store-through targets.
  pub(crate) fn expr_to_pat(expr: Node<Expr>) -> SyntaxResult<Node<Pat>> {
    let loc = expr.loc;
    if matches!(&*expr.stx, Expr::Member(_) | Expr::ComputedMember(_)) {
      return Ok(Node::new(loc, Pat::Target(expr)));
    }
    match *expr.stx {
      Expr::Id(id) => {
        let name = id.stx.name.clone();
        Ok(Node::new(loc, Pat::Id(Node::new(id.loc, IdPat { name }))))
      }
      Expr::Arr(arr) => {
        let mut elements = Vec::new();
        let mut rest = None;
        let total = arr.stx.elements.len();
        for (i, elem) in arr.stx.elements.into_iter().enumerate() {
          let Some(ArrElem { spread, value }) = elem else {
            elements.push(None);
            continue;
          };
          if spread {
            if i + 1 != total {
              return Err(SyntaxError::new(SyntaxErrorType::RestElementNotLast, value.loc));
            }
            rest = Some(Self::expr_to_pat(value)?);
            continue;
          }
          elements.push(Some(Self::expr_elem_to_pat_elem(value)?));
        }
        Ok(Node::new(
          loc,
          Pat::Arr(Node::new(arr.loc, ArrPat { elements, rest })),
        ))
      }
      Expr::Obj(obj) => {
        let mut properties = Vec::new();
        let mut rest = None;
        let total = obj.stx.members.len();
        for (i, member) in obj.stx.members.into_iter().enumerate() {
          let member_loc = member.loc;
          match *member.stx {
            ObjMember::Spread { value } => {
              if i + 1 != total {
                return Err(SyntaxError::new(SyntaxErrorType::RestElementNotLast, value.loc));
              }
              rest = Some(Self::expr_to_pat(value)?);
            }
            ObjMember::Shorthand { name } => {
              properties.push(Node::new(member_loc, ObjPatProp {
                key: PropKey::Direct(name.clone()),
                target: Node::new(member_loc, Pat::Id(Node::new(member_loc, IdPat { name }))),
                default: None,
              }));
            }
            ObjMember::Prop { key, value } => {
              let elem = Self::expr_elem_to_pat_elem(value)?;
              properties.push(Node::new(member_loc, ObjPatProp {
                key,
                target: elem.target,
                default: elem.default,
              }));
            }
          }
        }
        Ok(Node::new(
          loc,
          Pat::Obj(Node::new(obj.loc, ObjPat { properties, rest })),
        ))
      }
      _ => Err(SyntaxError::new(SyntaxErrorType::InvalidAssignmentTarget, loc)),
    }
  }

  /// Convert an element expression, peeling a `target = default` assignment
  /// into a pattern element with a default.
  fn expr_elem_to_pat_elem(value: Node<Expr>) -> SyntaxResult<ArrPatElem> {
    match *value.stx {
      Expr::Assign(assign) if assign.stx.operator.is_none() => Ok(ArrPatElem {
        target: assign.stx.target,
        default: Some(assign.stx.value),
      }),
      other => {
        let target = Self::expr_to_pat(Node {
          loc: value.loc,
          stx: Box::new(other),
        })?;
        Ok(ArrPatElem {
          target,
          default: None,
        })
      }
    }
  }
}
