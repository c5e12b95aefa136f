use super::Parser;
use crate::ast::stmt::*;
use crate::ast::Node;
use crate::error::{SyntaxErrorType, SyntaxResult};
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    match self.tt() {
      TT::BraceOpen => {
        let block = self.parse_block()?;
        let loc = block.loc;
        Ok(Node::new(loc, Stmt::Block(block)))
      }
      TT::Semicolon => {
        let tok = self.advance();
        Ok(Node::new(tok.loc, Stmt::Empty(Node::new(tok.loc, EmptyStmt {}))))
      }
      TT::KeywordLet | TT::KeywordConst => {
        let decl = self.parse_var_decl()?;
        self.semicolon()?;
        let loc = decl.loc;
        Ok(Node::new(loc, Stmt::VarDecl(decl)))
      }
      TT::KeywordFunction => self.parse_func_decl(false),
      TT::Id
        if self.is_contextual("async")
          && self.nth(1).typ == TT::KeywordFunction
          && !self.nth(1).preceded_by_line_terminator =>
      {
        self.advance();
        self.parse_func_decl(true)
      }
      TT::KeywordClass => self.parse_class_decl(),
      TT::KeywordIf => self.parse_if(),
      TT::KeywordWhile => self.parse_while(),
      TT::KeywordFor => self.parse_for(),
      TT::KeywordSwitch => self.parse_switch(),
      TT::KeywordTry => self.parse_try(),
      TT::KeywordThrow => self.parse_throw(),
      TT::KeywordReturn => self.parse_return(),
      TT::KeywordBreak => self.parse_break_or_continue(true),
      TT::KeywordContinue => self.parse_break_or_continue(false),
      TT::KeywordImport | TT::KeywordExport => {
        Err(self.error_here(SyntaxErrorType::ModulesUnsupported))
      }
      TT::Id if self.nth(1).typ == TT::Colon => {
        let start = self.peek().loc;
        let name_tok = self.advance();
        let name = self.str_of(&name_tok).to_string();
        self.advance();
        let statement = self.parse_stmt()?;
        let loc = start + self.prev_loc();
        Ok(Node::new(
          loc,
          Stmt::Label(Node::new(loc, LabelStmt { name, statement })),
        ))
      }
      _ => {
        let start = self.peek().loc;
        let expr = self.parse_expr_seq(false)?;
        self.semicolon()?;
        let loc = start + self.prev_loc();
        Ok(Node::new(loc, Stmt::Expr(Node::new(loc, ExprStmt { expr }))))
      }
    }
  }

  pub(crate) fn parse_block(&mut self) -> SyntaxResult<Node<BlockStmt>> {
    let start = self.require(TT::BraceOpen)?.loc;
    let mut body = Vec::new();
    while self.tt() != TT::BraceClose {
      if self.tt() == TT::Eof {
        return Err(self.error_here(SyntaxErrorType::UnexpectedEnd));
      }
      body.push(self.parse_stmt()?);
    }
    let end = self.require(TT::BraceClose)?.loc;
    Ok(Node::new(start + end, BlockStmt { body }))
  }

  pub(crate) fn parse_var_decl(&mut self) -> SyntaxResult<Node<VarDecl>> {
    let start = self.peek().loc;
    let mode = match self.advance().typ {
      TT::KeywordConst => VarDeclMode::Const,
      _ => VarDeclMode::Let,
    };
    let mut declarators = Vec::new();
    loop {
      let pattern = self.parse_pat()?;
      let initializer = match self.eat(TT::Equals) {
        Some(_) => Some(self.parse_assign(false)?),
        None => None,
      };
      declarators.push(VarDeclarator {
        pattern,
        initializer,
      });
      if self.eat(TT::Comma).is_none() {
        break;
      }
    }
    let loc = start + self.prev_loc();
    Ok(Node::new(loc, VarDecl { mode, declarators }))
  }

  fn parse_func_decl(&mut self, is_async: bool) -> SyntaxResult<Node<Stmt>> {
    let start = self.peek().loc;
    self.require(TT::KeywordFunction)?;
    let func = self.parse_func_tail(true, is_async)?;
    let name = func.stx.name.clone().unwrap_or_default();
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Stmt::FuncDecl(Node::new(loc, FuncDeclStmt { name, func })),
    ))
  }

  fn parse_class_decl(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.peek().loc;
    let def = self.parse_class_def(true)?;
    let name = def.stx.name.clone().unwrap_or_default();
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Stmt::ClassDecl(Node::new(loc, ClassDeclStmt { name, def })),
    ))
  }

  fn parse_if(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordIf)?.loc;
    self.require(TT::ParenthesisOpen)?;
    let test = self.parse_expr_seq(false)?;
    self.require(TT::ParenthesisClose)?;
    let consequent = self.parse_stmt()?;
    let alternate = match self.eat(TT::KeywordElse) {
      Some(_) => Some(self.parse_stmt()?),
      None => None,
    };
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Stmt::If(Node::new(
        loc,
        IfStmt {
          test,
          consequent,
          alternate,
        },
      )),
    ))
  }

  fn parse_while(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordWhile)?.loc;
    self.require(TT::ParenthesisOpen)?;
    let condition = self.parse_expr_seq(false)?;
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Stmt::While(Node::new(loc, WhileStmt { condition, body })),
    ))
  }

  fn parse_for(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordFor)?.loc;
    self.require(TT::ParenthesisOpen)?;

    if matches!(self.tt(), TT::KeywordLet | TT::KeywordConst) {
      let mode_tok = self.advance().typ;
      let mode = if mode_tok == TT::KeywordConst {
        VarDeclMode::Const
      } else {
        VarDeclMode::Let
      };
      let pattern = self.parse_pat()?;

      if self.eat(TT::KeywordIn).is_some() {
        return self.parse_for_each_tail(start, Some(mode), pattern, true);
      }
      if self.is_contextual("of") {
        self.advance();
        return self.parse_for_each_tail(start, Some(mode), pattern, false);
      }

      // Triple form: finish the first declarator, then any further ones.
      let decl_start = pattern.loc;
      let initializer = match self.eat(TT::Equals) {
        Some(_) => Some(self.parse_assign(true)?),
        None => None,
      };
      let mut declarators = vec![VarDeclarator {
        pattern,
        initializer,
      }];
      while self.eat(TT::Comma).is_some() {
        let pattern = self.parse_pat()?;
        let initializer = match self.eat(TT::Equals) {
          Some(_) => Some(self.parse_assign(true)?),
          None => None,
        };
        declarators.push(VarDeclarator {
          pattern,
          initializer,
        });
      }
      let decl_loc = decl_start + self.prev_loc();
      let init = ForInit::Decl(Node::new(decl_loc, VarDecl { mode, declarators }));
      return self.parse_for_triple_tail(start, init);
    }

    if self.tt() == TT::Semicolon {
      return self.parse_for_triple_tail(start, ForInit::None);
    }

    let head = self.parse_expr_seq(true)?;
    if self.eat(TT::KeywordIn).is_some() {
      let pattern = Self::expr_to_pat(head)?;
      return self.parse_for_each_tail(start, None, pattern, true);
    }
    if self.is_contextual("of") {
      self.advance();
      let pattern = Self::expr_to_pat(head)?;
      return self.parse_for_each_tail(start, None, pattern, false);
    }
    self.parse_for_triple_tail(start, ForInit::Expr(head))
  }

  fn parse_for_each_tail(
    &mut self,
    start: crate::loc::Loc,
    decl_mode: Option<VarDeclMode>,
    pattern: Node<crate::ast::pat::Pat>,
    is_in: bool,
  ) -> SyntaxResult<Node<Stmt>> {
    let subject = self.parse_expr_seq(false)?;
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    let loc = start + self.prev_loc();
    let stmt = Node::new(
      loc,
      ForEachStmt {
        decl_mode,
        pattern,
        subject,
        body,
      },
    );
    Ok(Node::new(
      loc,
      if is_in {
        Stmt::ForIn(stmt)
      } else {
        Stmt::ForOf(stmt)
      },
    ))
  }

  fn parse_for_triple_tail(
    &mut self,
    start: crate::loc::Loc,
    init: ForInit,
  ) -> SyntaxResult<Node<Stmt>> {
    self.require(TT::Semicolon)?;
    let condition = if self.tt() == TT::Semicolon {
      None
    } else {
      Some(self.parse_expr_seq(false)?)
    };
    self.require(TT::Semicolon)?;
    let update = if self.tt() == TT::ParenthesisClose {
      None
    } else {
      Some(self.parse_expr_seq(false)?)
    };
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Stmt::For(Node::new(
        loc,
        ForStmt {
          init,
          condition,
          update,
          body,
        },
      )),
    ))
  }

  fn parse_switch(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordSwitch)?.loc;
    self.require(TT::ParenthesisOpen)?;
    let discriminant = self.parse_expr_seq(false)?;
    self.require(TT::ParenthesisClose)?;
    self.require(TT::BraceOpen)?;

    let mut branches = Vec::new();
    while self.tt() != TT::BraceClose {
      let branch_start = self.peek().loc;
      let case = match self.tt() {
        TT::KeywordCase => {
          self.advance();
          let test = self.parse_expr_seq(false)?;
          self.require(TT::Colon)?;
          Some(test)
        }
        TT::KeywordDefault => {
          self.advance();
          self.require(TT::Colon)?;
          None
        }
        _ => {
          return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("switch case")));
        }
      };
      let mut body = Vec::new();
      while !matches!(
        self.tt(),
        TT::KeywordCase | TT::KeywordDefault | TT::BraceClose
      ) {
        if self.tt() == TT::Eof {
          return Err(self.error_here(SyntaxErrorType::UnexpectedEnd));
        }
        body.push(self.parse_stmt()?);
      }
      let branch_loc = branch_start + self.prev_loc();
      branches.push(Node::new(branch_loc, SwitchBranch { case, body }));
    }
    self.require(TT::BraceClose)?;
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Stmt::Switch(Node::new(
        loc,
        SwitchStmt {
          discriminant,
          branches,
        },
      )),
    ))
  }

  fn parse_try(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordTry)?.loc;
    let wrapped = self.parse_block()?;
    let catch = match self.eat(TT::KeywordCatch) {
      Some(catch_tok) => {
        let parameter = match self.eat(TT::ParenthesisOpen) {
          Some(_) => {
            let pat = self.parse_pat()?;
            self.require(TT::ParenthesisClose)?;
            Some(pat)
          }
          None => None,
        };
        let body = self.parse_block()?;
        let loc = catch_tok.loc + self.prev_loc();
        Some(Node::new(
          loc,
          CatchClause {
            parameter,
            body: body.stx.body,
          },
        ))
      }
      None => None,
    };
    let finally = match self.eat(TT::KeywordFinally) {
      Some(_) => Some(self.parse_block()?),
      None => None,
    };
    if catch.is_none() && finally.is_none() {
      return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("catch or finally clause")));
    }
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Stmt::Try(Node::new(
        loc,
        TryStmt {
          wrapped,
          catch,
          finally,
        },
      )),
    ))
  }

  fn parse_throw(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordThrow)?.loc;
    if self.peek().preceded_by_line_terminator {
      return Err(self.error_here(SyntaxErrorType::ExpectedSyntax("value after throw")));
    }
    let value = self.parse_expr_seq(false)?;
    self.semicolon()?;
    let loc = start + self.prev_loc();
    Ok(Node::new(loc, Stmt::Throw(Node::new(loc, ThrowStmt { value }))))
  }

  fn parse_return(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordReturn)?.loc;
    let value = if matches!(self.tt(), TT::Semicolon | TT::BraceClose | TT::Eof)
      || self.peek().preceded_by_line_terminator
    {
      None
    } else {
      Some(self.parse_expr_seq(false)?)
    };
    self.semicolon()?;
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      Stmt::Return(Node::new(loc, ReturnStmt { value })),
    ))
  }

  fn parse_break_or_continue(&mut self, is_break: bool) -> SyntaxResult<Node<Stmt>> {
    let start = self.advance().loc;
    let label = if self.tt() == TT::Id && !self.peek().preceded_by_line_terminator {
      let tok = self.advance();
      Some(self.str_of(&tok).to_string())
    } else {
      None
    };
    self.semicolon()?;
    let loc = start + self.prev_loc();
    Ok(Node::new(
      loc,
      if is_break {
        Stmt::Break(Node::new(loc, BreakStmt { label }))
      } else {
        Stmt::Continue(Node::new(loc, ContinueStmt { label }))
      },
    ))
  }
}
