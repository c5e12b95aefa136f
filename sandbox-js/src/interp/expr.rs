use super::{ExprResult, Frame, Interp};
use crate::completion::Thrown;
use crate::destructure::BindMode;
use crate::env::Env;
use crate::object_ops::{delete_property, get_property, iterable_values, set_property};
use crate::ops::binary_op;
use crate::value::{
  to_display_string, to_number, to_property_key, ArrayRef, ObjectRef, Value,
};
use futures::future::LocalBoxFuture;
use syntax_js::ast::expr::*;
use syntax_js::ast::op::{LogicalOp, UnaryOp, UpdateOp};
use syntax_js::ast::pat::{Pat, PropKey};
use syntax_js::ast::Node;

impl Interp {
  pub(crate) fn eval_expr<'a>(
    &'a self,
    env: &'a Env,
    frame: &'a Frame,
    expr: &'a Node<Expr>,
  ) -> LocalBoxFuture<'a, ExprResult> {
    Box::pin(async move {
      match &*expr.stx {
        Expr::LitNum(node) => Ok(Value::Number(node.stx.value)),
        Expr::LitStr(node) => Ok(Value::str(node.stx.value.as_str())),
        Expr::LitBool(node) => Ok(Value::Bool(node.stx.value)),
        Expr::LitNull(_) => Ok(Value::Null),
        Expr::LitUndefined(_) => Ok(Value::Undefined),
        Expr::Id(node) => self.eval_id(env, &node.stx.name),
        Expr::This(_) => Ok(env.lookup("this").unwrap_or(Value::Undefined)),
        Expr::Template(node) => self.eval_template(env, frame, &node.stx).await,
        Expr::Seq(node) => {
          let mut last = Value::Undefined;
          for expr in &node.stx.expressions {
            last = self.eval_expr(env, frame, expr).await?;
          }
          Ok(last)
        }
        Expr::Cond(node) => {
          let test = self.eval_expr(env, frame, &node.stx.test).await?;
          if test.is_truthy() {
            self.eval_expr(env, frame, &node.stx.consequent).await
          } else {
            self.eval_expr(env, frame, &node.stx.alternate).await
          }
        }
        Expr::Logical(node) => self.eval_logical(env, frame, &node.stx).await,
        Expr::Binary(node) => {
          let left = self.eval_expr(env, frame, &node.stx.left).await?;
          let right = self.eval_expr(env, frame, &node.stx.right).await?;
          binary_op(node.stx.operator, &left, &right)
        }
        Expr::Unary(node) => self.eval_unary(env, frame, &node.stx).await,
        Expr::Update(node) => self.eval_update(env, frame, &node.stx).await,
        Expr::Member(node) => {
          let object = self.eval_expr(env, frame, &node.stx.object).await?;
          if node.stx.optional && object.is_nullish() {
            return Ok(Value::Undefined);
          }
          get_property(&object, &node.stx.property)
        }
        Expr::ComputedMember(node) => {
          let object = self.eval_expr(env, frame, &node.stx.object).await?;
          if node.stx.optional && object.is_nullish() {
            return Ok(Value::Undefined);
          }
          let index = self.eval_expr(env, frame, &node.stx.index).await?;
          get_property(&object, &to_property_key(&index))
        }
        Expr::Chain(node) => Ok(
          self
            .eval_chain(env, frame, &node.stx.expr)
            .await?
            .unwrap_or(Value::Undefined),
        ),
        Expr::Call(node) => self.eval_call(env, frame, &node.stx).await,
        Expr::New(node) => self.eval_new(env, frame, &node.stx).await,
        Expr::Assign(node) => self.eval_assign(env, frame, &node.stx).await,
        Expr::Arr(node) => self.eval_arr_literal(env, frame, &node.stx).await,
        Expr::Obj(node) => self.eval_obj_literal(env, frame, &node.stx).await,
        Expr::Func(node) => Ok(Value::Function(self.create_function(env, frame, &node.stx.func))),
        Expr::Class(node) => {
          let class = self.eval_class_def(env, frame, &node.stx.def).await?;
          Ok(Value::Class(class))
        }
        Expr::Await(node) => {
          let value = self.eval_expr(env, frame, &node.stx.argument).await?;
          match value {
            // Suspend until the promise settles; a rejection propagates as a
            // throw.
            Value::Promise(promise) => promise.join().await,
            other => Ok(other),
          }
        }
        Expr::SuperCall(node) => self.eval_super_call(env, frame, &node.stx).await,
        Expr::SuperMember(node) => self.resolve_super_member(frame, &node.stx.property),
      }
    })
  }

  fn eval_id(&self, env: &Env, name: &str) -> ExprResult {
    env
      .lookup(name)
      .ok_or_else(|| Thrown::reference_error(format!("{name} is not defined")))
  }

  async fn eval_template(&self, env: &Env, frame: &Frame, tpl: &TemplateExpr) -> ExprResult {
    let mut out = String::new();
    for part in &tpl.parts {
      match part {
        TemplatePart::Str(chunk) => out.push_str(chunk),
        TemplatePart::Expr(expr) => {
          let value = self.eval_expr(env, frame, expr).await?;
          out.push_str(&to_display_string(&value));
        }
      }
    }
    Ok(Value::String(out.into()))
  }

  async fn eval_logical(&self, env: &Env, frame: &Frame, node: &LogicalExpr) -> ExprResult {
    let left = self.eval_expr(env, frame, &node.left).await?;
    let take_right = match node.operator {
      LogicalOp::And => left.is_truthy(),
      LogicalOp::Or => !left.is_truthy(),
      LogicalOp::Nullish => left.is_nullish(),
    };
    if take_right {
      self.eval_expr(env, frame, &node.right).await
    } else {
      Ok(left)
    }
  }

  async fn eval_unary(&self, env: &Env, frame: &Frame, node: &UnaryExpr) -> ExprResult {
    // `typeof` tolerates unbound identifiers.
    if node.operator == UnaryOp::Typeof {
      if let Expr::Id(id) = &*node.argument.stx {
        return Ok(match env.lookup(&id.stx.name) {
          Some(value) => Value::str(value.type_of()),
          None => Value::str("undefined"),
        });
      }
    }
    if node.operator == UnaryOp::Delete {
      return self.eval_delete(env, frame, &node.argument).await;
    }

    let value = self.eval_expr(env, frame, &node.argument).await?;
    Ok(match node.operator {
      UnaryOp::Neg => Value::Number(-to_number(&value)),
      UnaryOp::Pos => Value::Number(to_number(&value)),
      UnaryOp::Not => Value::Bool(!value.is_truthy()),
      UnaryOp::BitNot => Value::Number(!crate::value::to_int32(&value) as f64),
      UnaryOp::Typeof => Value::str(value.type_of()),
      UnaryOp::Void => Value::Undefined,
      UnaryOp::Delete => unreachable!("handled above"),
    })
  }

  async fn eval_delete(&self, env: &Env, frame: &Frame, target: &Node<Expr>) -> ExprResult {
    match &*target.stx {
      Expr::Member(m) => {
        let object = self.eval_expr(env, frame, &m.stx.object).await?;
        Ok(Value::Bool(delete_property(&object, &m.stx.property)))
      }
      Expr::ComputedMember(m) => {
        let object = self.eval_expr(env, frame, &m.stx.object).await?;
        let index = self.eval_expr(env, frame, &m.stx.index).await?;
        Ok(Value::Bool(delete_property(&object, &to_property_key(&index))))
      }
      // Deleting a binding is refused, like `delete x` in the parent
      // language's strict contexts.
      Expr::Id(_) => Ok(Value::Bool(false)),
      _ => {
        self.eval_expr(env, frame, target).await?;
        Ok(Value::Bool(true))
      }
    }
  }

  async fn eval_update(&self, env: &Env, frame: &Frame, node: &UpdateExpr) -> ExprResult {
    let delta = match node.operator {
      UpdateOp::Increment => 1.0,
      UpdateOp::Decrement => -1.0,
    };
    let (old, write): (f64, _) = match &*node.argument.stx {
      Expr::Id(id) => {
        let name = id.stx.name.clone();
        let current = env
          .lookup(&name)
          .ok_or_else(|| Thrown::reference_error(format!("{name} is not defined")))?;
        let old = to_number(&current);
        let env = env.clone();
        (
          old,
          Box::new(move |value: Value| {
            env.assign(&name, value);
            Ok(())
          }) as Box<dyn FnOnce(Value) -> Result<(), Thrown>>,
        )
      }
      Expr::Member(m) => {
        let object = self.eval_expr(env, frame, &m.stx.object).await?;
        let key = m.stx.property.clone();
        let old = to_number(&get_property(&object, &key)?);
        (
          old,
          Box::new(move |value: Value| set_property(&object, &key, value))
            as Box<dyn FnOnce(Value) -> Result<(), Thrown>>,
        )
      }
      Expr::ComputedMember(m) => {
        let object = self.eval_expr(env, frame, &m.stx.object).await?;
        let index = self.eval_expr(env, frame, &m.stx.index).await?;
        let key = to_property_key(&index);
        let old = to_number(&get_property(&object, &key)?);
        (
          old,
          Box::new(move |value: Value| set_property(&object, &key, value))
            as Box<dyn FnOnce(Value) -> Result<(), Thrown>>,
        )
      }
      _ => {
        return Err(Thrown::type_error(
          "invalid increment/decrement target",
        ))
      }
    };

    let new = old + delta;
    write(Value::Number(new))?;
    Ok(Value::Number(if node.prefix { new } else { old }))
  }

  async fn eval_assign(&self, env: &Env, frame: &Frame, node: &AssignExpr) -> ExprResult {
    let Some(op) = node.operator else {
      let value = self.eval_expr(env, frame, &node.value).await?;
      self
        .bind_pattern(env, frame, &node.target, value.clone(), BindMode::Assign)
        .await?;
      return Ok(value);
    };

    // Compound assignment: read-modify-write on a simple target.
    match &*node.target.stx {
      Pat::Id(id) => {
        let name = &id.stx.name;
        let current = env
          .lookup(name)
          .ok_or_else(|| Thrown::reference_error(format!("{name} is not defined")))?;
        let rhs = self.eval_expr(env, frame, &node.value).await?;
        let value = binary_op(op, &current, &rhs)?;
        env.assign(name, value.clone());
        Ok(value)
      }
      Pat::Target(target) => match &*target.stx {
        Expr::Member(m) => {
          let object = self.eval_expr(env, frame, &m.stx.object).await?;
          let current = get_property(&object, &m.stx.property)?;
          let rhs = self.eval_expr(env, frame, &node.value).await?;
          let value = binary_op(op, &current, &rhs)?;
          set_property(&object, &m.stx.property, value.clone())?;
          Ok(value)
        }
        Expr::ComputedMember(m) => {
          let object = self.eval_expr(env, frame, &m.stx.object).await?;
          let index = self.eval_expr(env, frame, &m.stx.index).await?;
          let key = to_property_key(&index);
          let current = get_property(&object, &key)?;
          let rhs = self.eval_expr(env, frame, &node.value).await?;
          let value = binary_op(op, &current, &rhs)?;
          set_property(&object, &key, value.clone())?;
          Ok(value)
        }
        _ => Err(Thrown::type_error("invalid compound assignment target")),
      },
      _ => Err(Thrown::type_error("invalid compound assignment target")),
    }
  }

  async fn eval_arr_literal(&self, env: &Env, frame: &Frame, node: &ArrExpr) -> ExprResult {
    let mut elements = Vec::with_capacity(node.elements.len());
    for element in &node.elements {
      let Some(element) = element else {
        elements.push(Value::Undefined);
        continue;
      };
      let value = self.eval_expr(env, frame, &element.value).await?;
      if element.spread {
        elements.extend(iterable_values(&value, "spread")?);
      } else {
        elements.push(value);
      }
    }
    Ok(Value::Array(ArrayRef::new(elements)))
  }

  async fn eval_obj_literal(&self, env: &Env, frame: &Frame, node: &ObjExpr) -> ExprResult {
    let object = ObjectRef::new();
    for member in &node.members {
      match &*member.stx {
        ObjMember::Prop { key, value } => {
          let key = self.resolve_prop_key(env, frame, key).await?;
          let value = self.eval_expr(env, frame, value).await?;
          object.set(key, value);
        }
        ObjMember::Shorthand { name } => {
          let value = self.eval_id(env, name)?;
          object.set(name.clone(), value);
        }
        ObjMember::Spread { value } => {
          let value = self.eval_expr(env, frame, value).await?;
          // Later keys overwrite earlier ones; a key keeps its first
          // insertion position. Nullish spreads are no-ops.
          match value {
            Value::Object(src) => {
              for (k, v) in src.entries() {
                object.set(k, v);
              }
            }
            Value::Array(src) => {
              for (i, v) in src.snapshot().into_iter().enumerate() {
                object.set(i.to_string(), v);
              }
            }
            Value::Undefined | Value::Null => {}
            _ => {}
          }
        }
      }
    }
    Ok(Value::Object(object))
  }

  pub(crate) async fn resolve_prop_key(
    &self,
    env: &Env,
    frame: &Frame,
    key: &PropKey,
  ) -> Result<String, Thrown> {
    match key {
      PropKey::Direct(name) => Ok(name.clone()),
      PropKey::Computed(expr) => {
        let value = self.eval_expr(env, frame, expr).await?;
        Ok(to_property_key(&value))
      }
    }
  }

  async fn eval_call(&self, env: &Env, frame: &Frame, call: &CallExpr) -> ExprResult {
    let (callee, receiver) = match &*call.callee.stx {
      Expr::Member(m) if !m.stx.optional => {
        let object = self.eval_expr(env, frame, &m.stx.object).await?;
        let callee = get_property(&object, &m.stx.property)?;
        (callee, Some(object))
      }
      Expr::ComputedMember(m) if !m.stx.optional => {
        let object = self.eval_expr(env, frame, &m.stx.object).await?;
        let index = self.eval_expr(env, frame, &m.stx.index).await?;
        let callee = get_property(&object, &to_property_key(&index))?;
        (callee, Some(object))
      }
      Expr::SuperMember(sm) => {
        let method = self.resolve_super_member(frame, &sm.stx.property)?;
        let receiver = env.lookup("this").unwrap_or(Value::Undefined);
        (method, Some(receiver))
      }
      _ => {
        let callee = self.eval_expr(env, frame, &call.callee).await?;
        (callee, None)
      }
    };
    let args = self.eval_args(env, frame, &call.arguments).await?;
    self.call_value(callee, receiver, args).await
  }

  /// Structural walk of an optional chain. `None` means some optional link
  /// hit a nullish receiver and the whole chain short-circuits.
  pub(crate) fn eval_chain<'a>(
    &'a self,
    env: &'a Env,
    frame: &'a Frame,
    expr: &'a Node<Expr>,
  ) -> LocalBoxFuture<'a, Result<Option<Value>, Thrown>> {
    Box::pin(async move {
      match &*expr.stx {
        Expr::Member(m) => {
          let Some(object) = self.eval_chain(env, frame, &m.stx.object).await? else {
            return Ok(None);
          };
          if m.stx.optional && object.is_nullish() {
            return Ok(None);
          }
          Ok(Some(get_property(&object, &m.stx.property)?))
        }
        Expr::ComputedMember(m) => {
          let Some(object) = self.eval_chain(env, frame, &m.stx.object).await? else {
            return Ok(None);
          };
          if m.stx.optional && object.is_nullish() {
            return Ok(None);
          }
          let index = self.eval_expr(env, frame, &m.stx.index).await?;
          Ok(Some(get_property(&object, &to_property_key(&index))?))
        }
        Expr::Call(c) => {
          let (callee, receiver) = match &*c.stx.callee.stx {
            Expr::Member(m) => {
              let Some(object) = self.eval_chain(env, frame, &m.stx.object).await? else {
                return Ok(None);
              };
              if m.stx.optional && object.is_nullish() {
                return Ok(None);
              }
              (get_property(&object, &m.stx.property)?, Some(object))
            }
            Expr::ComputedMember(m) => {
              let Some(object) = self.eval_chain(env, frame, &m.stx.object).await? else {
                return Ok(None);
              };
              if m.stx.optional && object.is_nullish() {
                return Ok(None);
              }
              let index = self.eval_expr(env, frame, &m.stx.index).await?;
              (
                get_property(&object, &to_property_key(&index))?,
                Some(object),
              )
            }
            _ => {
              let Some(callee) = self.eval_chain(env, frame, &c.stx.callee).await? else {
                return Ok(None);
              };
              (callee, None)
            }
          };
          if c.stx.optional && callee.is_nullish() {
            return Ok(None);
          }
          let args = self.eval_args(env, frame, &c.stx.arguments).await?;
          Ok(Some(self.call_value(callee, receiver, args).await?))
        }
        _ => Ok(Some(self.eval_expr(env, frame, expr).await?)),
      }
    })
  }
}
