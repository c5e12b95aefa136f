use super::{ExprResult, Frame, Interp};
use crate::class::{ClassRef, MethodTable};
use crate::completion::{Completion, Thrown};
use crate::destructure::BindMode;
use crate::env::Env;
use crate::function::{FnValue, UserFnRef};
use crate::object_ops::iterable_values;
use crate::promise::JsPromise;
use crate::value::{to_display_string, ArrayRef, ObjectRef, Value};
use futures::future::LocalBoxFuture;
use std::rc::Rc;
use syntax_js::ast::class::{ClassDef, MethodKind};
use syntax_js::ast::expr::{CallArg, NewExpr, SuperCallExpr};
use syntax_js::ast::func::{Func, FuncBody};
use syntax_js::ast::Node;

impl Interp {
  /// Build a function value capturing the current environment. Arrows also
  /// capture the enclosing class context so `super` keeps working inside
  /// them.
  pub(crate) fn create_function(&self, env: &Env, frame: &Frame, def: &Rc<Node<Func>>) -> FnValue {
    let home = if def.stx.is_arrow {
      frame.home.clone()
    } else {
      None
    };
    FnValue::User(UserFnRef::create(def.clone(), env, home))
  }

  pub(crate) async fn eval_args(
    &self,
    env: &Env,
    frame: &Frame,
    args: &[Node<CallArg>],
  ) -> Result<Vec<Value>, Thrown> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args {
      let value = self.eval_expr(env, frame, &arg.stx.value).await?;
      if arg.stx.spread {
        out.extend(iterable_values(&value, "spread")?);
      } else {
        out.push(value);
      }
    }
    Ok(out)
  }

  pub(crate) async fn call_value(
    &self,
    callee: Value,
    receiver: Option<Value>,
    args: Vec<Value>,
  ) -> ExprResult {
    match callee {
      Value::Function(f) => self.call_function(f, receiver, args).await,
      Value::Class(class) => Err(Thrown::type_error(format!(
        "class constructor {} must be invoked with 'new'",
        class.name()
      ))),
      other => Err(Thrown::type_error(format!(
        "{} is not a function",
        to_display_string(&other)
      ))),
    }
  }

  pub(crate) fn call_function<'a>(
    &'a self,
    callee: FnValue,
    receiver: Option<Value>,
    args: Vec<Value>,
  ) -> LocalBoxFuture<'a, ExprResult> {
    Box::pin(async move {
      match callee {
        FnValue::Native(f) => f.call(&args),
        FnValue::User(f) => self.call_user(f, receiver, args).await,
      }
    })
  }

  async fn call_user(&self, f: UserFnRef, receiver: Option<Value>, args: Vec<Value>) -> ExprResult {
    if !f.is_alive() {
      return Err(Thrown::type_error("call of a destroyed function"));
    }
    let Some(captured) = f.captured_env() else {
      return Err(Thrown::type_error("call of a destroyed function"));
    };

    let def = f.def().clone();
    let activation = Env::child(&captured);
    let frame = Frame { home: f.home() };
    let result = self
      .run_activation(&activation, &frame, &def, &f, receiver, args)
      .await;
    activation.release();

    if f.is_async() {
      // The wrapper flattens a promise-valued body result and always hands
      // the caller a promise.
      let settled = match result {
        Ok(Value::Promise(p)) => p.join().await,
        other => other,
      };
      Ok(Value::Promise(JsPromise::settled(settled)))
    } else {
      result
    }
  }

  async fn run_activation(
    &self,
    activation: &Env,
    frame: &Frame,
    def: &Rc<Node<Func>>,
    f: &UserFnRef,
    receiver: Option<Value>,
    args: Vec<Value>,
  ) -> ExprResult {
    for (index, param) in def.stx.params.iter().enumerate() {
      if param.stx.default.is_some() {
        return Err(Thrown::unsupported("default parameter values"));
      }
      let value = if param.stx.rest {
        let rest = args.get(index..).map(|s| s.to_vec()).unwrap_or_default();
        Value::Array(ArrayRef::new(rest))
      } else {
        // Missing arguments bind undefined; surplus ones are only visible
        // through a rest parameter.
        args.get(index).cloned().unwrap_or(Value::Undefined)
      };
      self
        .bind_pattern(activation, frame, &param.stx.pattern, value, BindMode::Define)
        .await?;
    }

    if !f.is_arrow() {
      if let Some(receiver) = receiver {
        activation.define("this", receiver);
      }
    }

    match &def.stx.body {
      FuncBody::Expr(expr) => self.eval_expr(activation, frame, expr).await,
      FuncBody::Block(stmts) => match self.eval_stmt_list(activation, frame, stmts).await? {
        Completion::Return(value) => Ok(value),
        Completion::Normal(_) => Ok(Value::Undefined),
        Completion::Break(..) | Completion::Continue(..) => Err(Thrown::type_error(
          "'break' or 'continue' crossed a function boundary",
        )),
      },
    }
  }

  pub(crate) async fn eval_new(&self, env: &Env, frame: &Frame, node: &NewExpr) -> ExprResult {
    let callee = self.eval_expr(env, frame, &node.callee).await?;
    let args = self.eval_args(env, frame, &node.arguments).await?;
    match callee {
      Value::Class(class) => self.construct_class(class, args).await,
      Value::Function(FnValue::User(f)) => {
        // Constructing a plain function: fresh receiver, explicit object
        // return wins.
        let receiver = Value::Object(ObjectRef::new());
        let result = self
          .call_function(FnValue::User(f), Some(receiver.clone()), args)
          .await?;
        Ok(if matches!(result, Value::Object(_)) {
          result
        } else {
          receiver
        })
      }
      Value::Function(FnValue::Native(f)) => f.call(&args),
      other => Err(Thrown::type_error(format!(
        "{} is not a constructor",
        to_display_string(&other)
      ))),
    }
  }

  pub(crate) async fn construct_class(&self, class: ClassRef, args: Vec<Value>) -> ExprResult {
    let object = ObjectRef::with_proto(class.clone());
    let receiver = Value::Object(object);
    if let Some(ctor) = class.find_constructor() {
      let result = self
        .call_function(FnValue::User(ctor), Some(receiver.clone()), args)
        .await?;
      if matches!(result, Value::Object(_)) {
        return Ok(result);
      }
    }
    Ok(receiver)
  }

  pub(crate) async fn eval_super_call(
    &self,
    env: &Env,
    frame: &Frame,
    node: &SuperCallExpr,
  ) -> ExprResult {
    let Some(home) = &frame.home else {
      return Err(Thrown::type_error("'super' used outside of a method"));
    };
    let Some(superclass) = home.superclass() else {
      return Err(Thrown::type_error(format!(
        "'super' in class {} which has no superclass",
        home.name()
      )));
    };
    let receiver = env.lookup("this").unwrap_or(Value::Undefined);
    let args = self.eval_args(env, frame, &node.arguments).await?;
    if let Some(ctor) = superclass.find_constructor() {
      self
        .call_function(FnValue::User(ctor), Some(receiver), args)
        .await?;
    }
    Ok(Value::Undefined)
  }

  /// `super.m`: resolved on the *defining* class's superclass, so overrides
  /// further down the hierarchy cannot re-route it.
  pub(crate) fn resolve_super_member(&self, frame: &Frame, name: &str) -> ExprResult {
    let Some(home) = &frame.home else {
      return Err(Thrown::type_error("'super' used outside of a method"));
    };
    let Some(superclass) = home.superclass() else {
      return Err(Thrown::type_error(format!(
        "'super' in class {} which has no superclass",
        home.name()
      )));
    };
    Ok(
      superclass
        .find_method(name)
        .map(|m| Value::Function(FnValue::User(m)))
        .unwrap_or(Value::Undefined),
    )
  }

  pub(crate) async fn eval_class_def(
    &self,
    env: &Env,
    frame: &Frame,
    def: &Node<ClassDef>,
  ) -> Result<ClassRef, Thrown> {
    let superclass = match &def.stx.extends {
      Some(expr) => match self.eval_expr(env, frame, expr).await? {
        Value::Class(class) => Some(class),
        other => {
          return Err(Thrown::type_error(format!(
            "superclass is not a class: {}",
            to_display_string(&other)
          )))
        }
      },
      None => None,
    };

    let mut constructor: Option<UserFnRef> = None;
    let mut methods = MethodTable::default();
    let mut statics = MethodTable::default();
    for member in &def.stx.members {
      if matches!(member.stx.kind, MethodKind::Get | MethodKind::Set) {
        return Err(Thrown::unsupported("getter/setter methods"));
      }
      let key = self.resolve_prop_key(env, frame, &member.stx.key).await?;
      let f = UserFnRef::create(member.stx.func.clone(), env, None);
      f.set_name(key.as_str());
      if member.stx.kind == MethodKind::Constructor {
        constructor = Some(f);
      } else if member.stx.is_static {
        statics.insert(key, f);
      } else {
        methods.insert(key, f);
      }
    }

    let name = def
      .stx
      .name
      .clone()
      .unwrap_or_else(|| "anonymous".to_string());
    Ok(ClassRef::new(name, superclass, constructor, methods, statics))
  }
}
