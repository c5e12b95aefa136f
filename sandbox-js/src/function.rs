use crate::class::ClassRef;
use crate::completion::Thrown;
use crate::env::Env;
use crate::tracker;
use crate::value::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use syntax_js::ast::func::Func;
use syntax_js::ast::Node;

/// A callable value: a user-defined function or a host callable injected
/// through the globals table.
#[derive(Clone)]
pub enum FnValue {
  User(UserFnRef),
  Native(NativeFnRef),
}

impl FnValue {
  pub fn name(&self) -> String {
    match self {
      FnValue::User(f) => f.name(),
      FnValue::Native(f) => f.0.name.clone(),
    }
  }

  pub fn ptr_eq(&self, other: &FnValue) -> bool {
    match (self, other) {
      (FnValue::User(a), FnValue::User(b)) => a.ptr_eq(b),
      (FnValue::Native(a), FnValue::Native(b)) => Rc::ptr_eq(&a.0, &b.0),
      _ => false,
    }
  }
}

pub struct UserFn {
  pub(crate) def: Rc<Node<Func>>,
  /// Released exactly once, when the function is destroyed.
  captured: RefCell<Option<Env>>,
  /// The defining class of a method; `super` resolves through this, not
  /// through the receiver's runtime prototype.
  home: RefCell<Option<ClassRef>>,
  alive: Cell<bool>,
  name: RefCell<String>,
}

#[derive(Clone)]
pub struct UserFnRef(Rc<UserFn>);

impl UserFnRef {
  /// Create a function value capturing `env`. The capture takes a reference
  /// on the environment, and the environment tracks the function for
  /// teardown.
  pub(crate) fn create(def: Rc<Node<Func>>, env: &Env, home: Option<ClassRef>) -> UserFnRef {
    tracker::fn_created();
    env.add_ref();
    let name = def.stx.name.clone().unwrap_or_default();
    let f = UserFnRef(Rc::new(UserFn {
      def,
      captured: RefCell::new(Some(env.clone())),
      home: RefCell::new(home),
      alive: Cell::new(true),
      name: RefCell::new(name),
    }));
    env.track_function(&f);
    f
  }

  /// Destroy at most once: drop the class link and release the captured
  /// environment.
  pub fn destroy(&self) {
    if !self.0.alive.replace(false) {
      return;
    }
    tracker::fn_destroyed();
    self.0.home.take();
    if let Some(env) = self.0.captured.take() {
      env.release();
    }
  }

  pub fn is_alive(&self) -> bool {
    self.0.alive.get()
  }

  pub fn captured_env(&self) -> Option<Env> {
    self.0.captured.borrow().clone()
  }

  pub(crate) fn home(&self) -> Option<ClassRef> {
    self.0.home.borrow().clone()
  }

  pub(crate) fn set_home(&self, class: ClassRef) {
    *self.0.home.borrow_mut() = Some(class);
  }

  pub fn def(&self) -> &Rc<Node<Func>> {
    &self.0.def
  }

  pub fn is_async(&self) -> bool {
    self.0.def.stx.is_async
  }

  pub fn is_arrow(&self) -> bool {
    self.0.def.stx.is_arrow
  }

  pub fn name(&self) -> String {
    self.0.name.borrow().clone()
  }

  pub(crate) fn set_name(&self, name: impl Into<String>) {
    let name = name.into();
    if !name.is_empty() {
      *self.0.name.borrow_mut() = name;
    }
  }

  pub fn ptr_eq(&self, other: &UserFnRef) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

type NativeImpl = Box<dyn Fn(&[Value]) -> Result<Value, Thrown>>;

pub struct NativeFn {
  pub name: String,
  f: NativeImpl,
}

/// A host callable. Not tracked by the memory tracker: its lifetime belongs
/// to the caller.
#[derive(Clone)]
pub struct NativeFnRef(pub(crate) Rc<NativeFn>);

impl NativeFnRef {
  pub fn new(
    name: impl Into<String>,
    f: impl Fn(&[Value]) -> Result<Value, Thrown> + 'static,
  ) -> NativeFnRef {
    NativeFnRef(Rc::new(NativeFn {
      name: name.into(),
      f: Box::new(f),
    }))
  }

  pub fn call(&self, args: &[Value]) -> Result<Value, Thrown> {
    (self.0.f)(args)
  }

  pub fn name(&self) -> &str {
    &self.0.name
  }
}

/// Convenience constructor for a host function value.
pub fn native_fn(
  name: impl Into<String>,
  f: impl Fn(&[Value]) -> Result<Value, Thrown> + 'static,
) -> Value {
  Value::Function(FnValue::Native(NativeFnRef::new(name, f)))
}
