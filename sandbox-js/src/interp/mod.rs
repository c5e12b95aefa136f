pub(crate) mod call;
pub(crate) mod expr;

use crate::class::ClassRef;
use crate::completion::{Completion, Thrown};
use crate::destructure::BindMode;
use crate::env::Env;
use crate::object_ops::{enumerable_keys, iterable_values};
use crate::value::Value;
use futures::future::LocalBoxFuture;
use syntax_js::ast::stmt::*;
use syntax_js::ast::Node;

pub(crate) type ExprResult = Result<Value, Thrown>;
pub(crate) type StmtResult = Result<Completion, Thrown>;

/// The tree-walking evaluator. Stateless: everything an evaluation needs is
/// threaded through parameters, so re-entrant and nested evaluations cannot
/// interfere.
pub(crate) struct Interp;

/// Per-call context: the defining class of the running method, used to
/// resolve `super`. Saved and restored implicitly by parameter passing.
#[derive(Clone, Default)]
pub(crate) struct Frame {
  pub home: Option<ClassRef>,
}

impl Interp {
  pub(crate) fn eval_stmt<'a>(
    &'a self,
    env: &'a Env,
    frame: &'a Frame,
    stmt: &'a Node<Stmt>,
  ) -> LocalBoxFuture<'a, StmtResult> {
    Box::pin(async move {
      match &*stmt.stx {
        Stmt::Empty(_) => Ok(Completion::empty()),
        Stmt::Expr(node) => {
          let value = self.eval_expr(env, frame, &node.stx.expr).await?;
          Ok(Completion::normal(value))
        }
        Stmt::VarDecl(node) => {
          self.eval_var_decl(env, frame, &node.stx).await?;
          Ok(Completion::empty())
        }
        Stmt::FuncDecl(node) => {
          let f = self.create_function(env, frame, &node.stx.func);
          env.define(&node.stx.name, Value::Function(f));
          Ok(Completion::empty())
        }
        Stmt::ClassDecl(node) => {
          let class = self.eval_class_def(env, frame, &node.stx.def).await?;
          env.define(&node.stx.name, Value::Class(class));
          Ok(Completion::empty())
        }
        Stmt::Block(node) => self.eval_block(env, frame, &node.stx.body).await,
        Stmt::If(node) => self.eval_if(env, frame, &node.stx).await,
        Stmt::While(node) => self.eval_while(env, frame, &node.stx, &[]).await,
        Stmt::For(node) => self.eval_for(env, frame, &node.stx, &[]).await,
        Stmt::ForIn(node) => self.eval_for_each(env, frame, &node.stx, true, &[]).await,
        Stmt::ForOf(node) => self.eval_for_each(env, frame, &node.stx, false, &[]).await,
        Stmt::Switch(node) => self.eval_switch(env, frame, &node.stx).await,
        Stmt::Try(node) => self.eval_try(env, frame, &node.stx).await,
        Stmt::Throw(node) => {
          let value = self.eval_expr(env, frame, &node.stx.value).await?;
          Err(Thrown::new(value))
        }
        Stmt::Return(node) => {
          let value = match &node.stx.value {
            Some(expr) => self.eval_expr(env, frame, expr).await?,
            None => Value::Undefined,
          };
          Ok(Completion::Return(value))
        }
        Stmt::Break(node) => Ok(Completion::Break(node.stx.label.clone(), None)),
        Stmt::Continue(node) => Ok(Completion::Continue(node.stx.label.clone(), None)),
        Stmt::Label(node) => self.eval_label(env, frame, &node.stx).await,
      }
    })
  }

  pub(crate) async fn eval_stmt_list(
    &self,
    env: &Env,
    frame: &Frame,
    stmts: &[Node<Stmt>],
  ) -> StmtResult {
    let mut last: Option<Value> = None;
    for stmt in stmts {
      let completion = self.eval_stmt(env, frame, stmt).await?.update_empty(last.clone());
      match completion {
        Completion::Normal(value) => {
          if let Some(value) = value {
            last = Some(value);
          }
        }
        abrupt => return Ok(abrupt),
      }
    }
    Ok(Completion::Normal(last))
  }

  /// Run a statement list in a fresh child scope, releasing it on every exit
  /// path.
  pub(crate) async fn eval_block(
    &self,
    env: &Env,
    frame: &Frame,
    stmts: &[Node<Stmt>],
  ) -> StmtResult {
    let block_env = Env::child(env);
    let result = self.eval_stmt_list(&block_env, frame, stmts).await;
    block_env.release();
    result
  }

  pub(crate) async fn eval_var_decl(
    &self,
    env: &Env,
    frame: &Frame,
    decl: &VarDecl,
  ) -> Result<(), Thrown> {
    for declarator in &decl.declarators {
      let value = match &declarator.initializer {
        Some(init) => self.eval_expr(env, frame, init).await?,
        None => Value::Undefined,
      };
      self
        .bind_pattern(env, frame, &declarator.pattern, value, BindMode::Define)
        .await?;
    }
    Ok(())
  }

  async fn eval_if(&self, env: &Env, frame: &Frame, stmt: &IfStmt) -> StmtResult {
    let test = self.eval_expr(env, frame, &stmt.test).await?;
    if test.is_truthy() {
      self.eval_stmt(env, frame, &stmt.consequent).await
    } else if let Some(alternate) = &stmt.alternate {
      self.eval_stmt(env, frame, alternate).await
    } else {
      Ok(Completion::empty())
    }
  }

  async fn eval_while(
    &self,
    env: &Env,
    frame: &Frame,
    stmt: &WhileStmt,
    active_labels: &[&str],
  ) -> StmtResult {
    loop {
      let test = self.eval_expr(env, frame, &stmt.condition).await?;
      if !test.is_truthy() {
        break;
      }
      match self.eval_stmt(env, frame, &stmt.body).await? {
        Completion::Normal(_) => {}
        Completion::Continue(None, _) => {}
        Completion::Continue(Some(ref l), _) if active_labels.contains(&l.as_str()) => {}
        Completion::Break(None, v) => return Ok(Completion::Normal(v)),
        Completion::Break(Some(ref l), _) if active_labels.contains(&l.as_str()) => {
          break;
        }
        other => return Ok(other),
      }
    }
    Ok(Completion::empty())
  }

  async fn eval_for(
    &self,
    env: &Env,
    frame: &Frame,
    stmt: &ForStmt,
    active_labels: &[&str],
  ) -> StmtResult {
    // The head gets its own scope so `let` bindings do not leak.
    let head_env = Env::child(env);
    let result = self
      .eval_for_inner(&head_env, frame, stmt, active_labels)
      .await;
    head_env.release();
    result
  }

  async fn eval_for_inner(
    &self,
    head_env: &Env,
    frame: &Frame,
    stmt: &ForStmt,
    active_labels: &[&str],
  ) -> StmtResult {
    match &stmt.init {
      ForInit::None => {}
      ForInit::Expr(expr) => {
        self.eval_expr(head_env, frame, expr).await?;
      }
      ForInit::Decl(decl) => {
        self.eval_var_decl(head_env, frame, &decl.stx).await?;
      }
    }

    loop {
      if let Some(condition) = &stmt.condition {
        let test = self.eval_expr(head_env, frame, condition).await?;
        if !test.is_truthy() {
          break;
        }
      }

      match self.eval_stmt(head_env, frame, &stmt.body).await? {
        Completion::Normal(_) => {}
        Completion::Continue(None, _) => {}
        Completion::Continue(Some(ref l), _) if active_labels.contains(&l.as_str()) => {}
        Completion::Break(None, v) => return Ok(Completion::Normal(v)),
        Completion::Break(Some(ref l), _) if active_labels.contains(&l.as_str()) => {
          break;
        }
        other => return Ok(other),
      }

      if let Some(update) = &stmt.update {
        self.eval_expr(head_env, frame, update).await?;
      }
    }
    Ok(Completion::empty())
  }

  async fn eval_for_each(
    &self,
    env: &Env,
    frame: &Frame,
    stmt: &ForEachStmt,
    is_in: bool,
    active_labels: &[&str],
  ) -> StmtResult {
    let subject = self.eval_expr(env, frame, &stmt.subject).await?;
    let items: Vec<Value> = if is_in {
      enumerable_keys(&subject)
        .into_iter()
        .map(Value::str)
        .collect()
    } else {
      iterable_values(&subject, "iteration")?
    };

    for item in items {
      // One scope per iteration: closures created in the body capture that
      // iteration's binding.
      let iter_env = Env::child(env);
      let mode = match stmt.decl_mode {
        Some(_) => BindMode::Define,
        None => BindMode::Assign,
      };
      let bound = self
        .bind_pattern(&iter_env, frame, &stmt.pattern, item, mode)
        .await;
      if let Err(thrown) = bound {
        iter_env.release();
        return Err(thrown);
      }
      let completion = self.eval_stmt(&iter_env, frame, &stmt.body).await;
      iter_env.release();
      match completion? {
        Completion::Normal(_) => {}
        Completion::Continue(None, _) => {}
        Completion::Continue(Some(ref l), _) if active_labels.contains(&l.as_str()) => {}
        Completion::Break(None, v) => return Ok(Completion::Normal(v)),
        Completion::Break(Some(ref l), _) if active_labels.contains(&l.as_str()) => {
          break;
        }
        other => return Ok(other),
      }
    }
    Ok(Completion::empty())
  }

  async fn eval_switch(&self, env: &Env, frame: &Frame, stmt: &SwitchStmt) -> StmtResult {
    let discriminant = self.eval_expr(env, frame, &stmt.discriminant).await?;

    // `switch` shares one scope across all case bodies.
    let switch_env = Env::child(env);
    let result = self
      .eval_switch_branches(&switch_env, frame, stmt, discriminant)
      .await;
    switch_env.release();

    Ok(match result? {
      Completion::Break(None, value) => Completion::Normal(value),
      other => other,
    })
  }

  async fn eval_switch_branches(
    &self,
    switch_env: &Env,
    frame: &Frame,
    stmt: &SwitchStmt,
    discriminant: Value,
  ) -> StmtResult {
    // Select the first strictly-equal case, falling back to `default`.
    let mut default_idx: Option<usize> = None;
    let mut start_idx: Option<usize> = None;
    for (i, branch) in stmt.branches.iter().enumerate() {
      match &branch.stx.case {
        None => {
          if default_idx.is_none() {
            default_idx = Some(i);
          }
        }
        Some(test) => {
          let case_value = self.eval_expr(switch_env, frame, test).await?;
          if crate::value::strict_equals(&discriminant, &case_value) {
            start_idx = Some(i);
            break;
          }
        }
      }
    }
    let Some(start_idx) = start_idx.or(default_idx) else {
      return Ok(Completion::empty());
    };

    // Fallthrough: execute every body from the selected clause until a break
    // or other abrupt completion.
    let mut last: Option<Value> = None;
    for branch in stmt.branches.iter().skip(start_idx) {
      for stmt in &branch.stx.body {
        let completion = self
          .eval_stmt(switch_env, frame, stmt)
          .await?
          .update_empty(last.clone());
        match completion {
          Completion::Normal(value) => {
            if let Some(value) = value {
              last = Some(value);
            }
          }
          abrupt => return Ok(abrupt),
        }
      }
    }
    Ok(Completion::Normal(last))
  }

  async fn eval_try(&self, env: &Env, frame: &Frame, stmt: &TryStmt) -> StmtResult {
    let mut result = self.eval_block(env, frame, &stmt.wrapped.stx.body).await;

    result = match result {
      Err(thrown) => match &stmt.catch {
        Some(catch) => self.eval_catch(env, frame, &catch.stx, thrown.value).await,
        None => Err(thrown),
      },
      ok => ok,
    };

    if let Some(finally) = &stmt.finally {
      // An abrupt signal from the finaliser supersedes whatever the try and
      // handler produced.
      let finally_result = self.eval_block(env, frame, &finally.stx.body).await?;
      if finally_result.is_abrupt() {
        return Ok(finally_result);
      }
      result = result.map(|completion| completion.update_empty(finally_result.value()));
    }

    result
  }

  async fn eval_catch(
    &self,
    env: &Env,
    frame: &Frame,
    catch: &CatchClause,
    thrown: Value,
  ) -> StmtResult {
    let catch_env = Env::child(env);
    let bound = match &catch.parameter {
      Some(parameter) => {
        self
          .bind_pattern(&catch_env, frame, parameter, thrown, BindMode::Define)
          .await
      }
      None => Ok(()),
    };
    let result = match bound {
      Ok(()) => self.eval_stmt_list(&catch_env, frame, &catch.body).await,
      Err(thrown) => Err(thrown),
    };
    catch_env.release();
    result
  }

  async fn eval_label(&self, env: &Env, frame: &Frame, stmt: &LabelStmt) -> StmtResult {
    // A statement may carry a chain of labels (`outer: inner: for ...`);
    // every label on the chain targets the same statement.
    let mut labels: Vec<&str> = vec![stmt.name.as_str()];
    let mut target = &stmt.statement;
    while let Stmt::Label(inner) = &*target.stx {
      labels.push(inner.stx.name.as_str());
      target = &inner.stx.statement;
    }

    // Labelled loops receive the whole label set so `continue <label>`
    // resumes them through any of their labels.
    let completion = match &*target.stx {
      Stmt::While(inner) => self.eval_while(env, frame, &inner.stx, &labels).await?,
      Stmt::For(inner) => self.eval_for(env, frame, &inner.stx, &labels).await?,
      Stmt::ForIn(inner) => {
        self
          .eval_for_each(env, frame, &inner.stx, true, &labels)
          .await?
      }
      Stmt::ForOf(inner) => {
        self
          .eval_for_each(env, frame, &inner.stx, false, &labels)
          .await?
      }
      _ => self.eval_stmt(env, frame, target).await?,
    };

    match completion {
      Completion::Break(Some(target), value) => {
        if labels.contains(&target.as_str()) {
          Ok(Completion::Normal(value))
        } else {
          Ok(Completion::Break(Some(target), value))
        }
      }
      Completion::Continue(Some(target), value) => {
        if labels.contains(&target.as_str()) {
          Err(Thrown::type_error(format!(
            "cannot continue to non-loop label '{target}'"
          )))
        } else {
          Ok(Completion::Continue(Some(target), value))
        }
      }
      other => Ok(other),
    }
  }
}
