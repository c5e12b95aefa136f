use crate::completion::Thrown;
use crate::env::Env;
use crate::interp::{Frame, Interp};
use crate::object_ops::{get_property, iterable_values, set_property};
use crate::value::{to_display_string, to_property_key, ArrayRef, ObjectRef, Value};
use ahash::HashSet;
use futures::future::LocalBoxFuture;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::pat::{ArrPat, ObjPat, Pat, PropKey};
use syntax_js::ast::Node;

/// Where bound names land: fresh bindings in the target environment, or
/// assignments to existing bindings / member targets.
#[derive(Clone, Copy, Debug)]
pub(crate) enum BindMode {
  Define,
  Assign,
}

impl Interp {
  /// The single recursive binder shared by variable declarations,
  /// destructuring assignment, function parameters, and for-each heads.
  pub(crate) fn bind_pattern<'a>(
    &'a self,
    env: &'a Env,
    frame: &'a Frame,
    pat: &'a Node<Pat>,
    value: Value,
    mode: BindMode,
  ) -> LocalBoxFuture<'a, Result<(), Thrown>> {
    Box::pin(async move {
      match &*pat.stx {
        Pat::Id(id) => self.bind_identifier(env, &id.stx.name, value, mode),
        Pat::Obj(obj) => self.bind_object_pattern(env, frame, &obj.stx, value, mode).await,
        Pat::Arr(arr) => self.bind_array_pattern(env, frame, &arr.stx, value, mode).await,
        Pat::Target(target) => match mode {
          BindMode::Assign => self.assign_to_target(env, frame, target, value).await,
          BindMode::Define => Err(Thrown::type_error(
            "member expressions cannot appear in a binding pattern",
          )),
        },
      }
    })
  }

  fn bind_identifier(
    &self,
    env: &Env,
    name: &str,
    value: Value,
    mode: BindMode,
  ) -> Result<(), Thrown> {
    match mode {
      BindMode::Define => {
        env.define(name, value);
        Ok(())
      }
      BindMode::Assign => {
        // Assignment never creates a binding: an unbound target faults.
        if env.assign(name, value) {
          Ok(())
        } else {
          Err(Thrown::reference_error(format!("{name} is not defined")))
        }
      }
    }
  }

  async fn bind_object_pattern(
    &self,
    env: &Env,
    frame: &Frame,
    pat: &ObjPat,
    value: Value,
    mode: BindMode,
  ) -> Result<(), Thrown> {
    if value.is_nullish() {
      return Err(Thrown::type_error(format!(
        "cannot destructure {}",
        to_display_string(&value)
      )));
    }

    let mut taken = HashSet::default();
    for prop in &pat.properties {
      if prop.stx.default.is_some() {
        return Err(Thrown::unsupported("default values in destructuring patterns"));
      }
      let key = match &prop.stx.key {
        PropKey::Direct(name) => name.clone(),
        PropKey::Computed(expr) => {
          let value = self.eval_expr(env, frame, expr).await?;
          to_property_key(&value)
        }
      };
      let item = get_property(&value, &key)?;
      taken.insert(key);
      self.bind_pattern(env, frame, &prop.stx.target, item, mode).await?;
    }

    let Some(rest_pat) = &pat.rest else {
      return Ok(());
    };
    // Rest captures a shallow copy with the named keys removed.
    let rest = ObjectRef::new();
    if let Value::Object(source) = &value {
      for (key, item) in source.entries() {
        if !taken.contains(&key) {
          rest.set(key, item);
        }
      }
    }
    self
      .bind_pattern(env, frame, rest_pat, Value::Object(rest), mode)
      .await
  }

  async fn bind_array_pattern(
    &self,
    env: &Env,
    frame: &Frame,
    pat: &ArrPat,
    value: Value,
    mode: BindMode,
  ) -> Result<(), Thrown> {
    let items = iterable_values(&value, "destructuring")?;

    let mut index = 0usize;
    for element in &pat.elements {
      let Some(element) = element else {
        // A hole skips one source element.
        index += 1;
        continue;
      };
      if element.default.is_some() {
        return Err(Thrown::unsupported("default values in destructuring patterns"));
      }
      let item = items.get(index).cloned().unwrap_or(Value::Undefined);
      self.bind_pattern(env, frame, &element.target, item, mode).await?;
      index += 1;
    }

    let Some(rest_pat) = &pat.rest else {
      return Ok(());
    };
    let rest = items.get(index..).map(|s| s.to_vec()).unwrap_or_default();
    self
      .bind_pattern(env, frame, rest_pat, Value::Array(ArrayRef::new(rest)), mode)
      .await
  }

  async fn assign_to_target(
    &self,
    env: &Env,
    frame: &Frame,
    target: &Node<Expr>,
    value: Value,
  ) -> Result<(), Thrown> {
    match &*target.stx {
      Expr::Member(m) => {
        let object = self.eval_expr(env, frame, &m.stx.object).await?;
        set_property(&object, &m.stx.property, value)
      }
      Expr::ComputedMember(m) => {
        let object = self.eval_expr(env, frame, &m.stx.object).await?;
        let index = self.eval_expr(env, frame, &m.stx.index).await?;
        set_property(&object, &to_property_key(&index), value)
      }
      _ => Err(Thrown::type_error("invalid assignment target")),
    }
  }
}
