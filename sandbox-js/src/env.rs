use crate::function::{FnValue, UserFnRef};
use crate::tracker;
use crate::value::Value;
use ahash::RandomState;
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Bindings = IndexMap<String, Value, RandomState>;

/// One lexical scope: a name table chained to its parent.
///
/// Lifetimes are managed with an explicit logical reference count layered over
/// the `Rc` allocation handle:
/// - the creating frame owns one reference and pairs creation with a
///   [`Env::release`] on every exit path;
/// - every user function holds one reference on its captured environment;
/// - a child environment holds one reference on its parent.
///
/// Teardown on release-to-zero destroys the functions created in this scope,
/// clears bindings (destroying functions held in slots), cascades into any
/// surviving children, and finally releases the parent link. The cascade is
/// what collects cycles formed by a function stored in the environment it
/// captured.
#[derive(Clone)]
pub struct Env {
  cell: Rc<EnvCell>,
}

pub(crate) struct EnvCell {
  refs: Cell<usize>,
  alive: Cell<bool>,
  parent: RefCell<Option<Env>>,
  bindings: RefCell<Bindings>,
  /// Functions whose captured environment is this one; destroyed at teardown
  /// if still alive by then.
  created_fns: RefCell<Vec<UserFnRef>>,
  /// Weak back-references used only by the teardown cascade.
  children: RefCell<Vec<Weak<EnvCell>>>,
}

impl Env {
  pub fn root() -> Env {
    tracker::env_created();
    Env {
      cell: Rc::new(EnvCell {
        refs: Cell::new(1),
        alive: Cell::new(true),
        parent: RefCell::new(None),
        bindings: RefCell::new(Bindings::default()),
        created_fns: RefCell::new(Vec::new()),
        children: RefCell::new(Vec::new()),
      }),
    }
  }

  pub fn child(parent: &Env) -> Env {
    tracker::env_created();
    parent.add_ref();
    let env = Env {
      cell: Rc::new(EnvCell {
        refs: Cell::new(1),
        alive: Cell::new(true),
        parent: RefCell::new(Some(parent.clone())),
        bindings: RefCell::new(Bindings::default()),
        created_fns: RefCell::new(Vec::new()),
        children: RefCell::new(Vec::new()),
      }),
    };
    parent
      .cell
      .children
      .borrow_mut()
      .push(Rc::downgrade(&env.cell));
    env
  }

  pub fn is_alive(&self) -> bool {
    self.cell.alive.get()
  }

  pub fn ptr_eq(&self, other: &Env) -> bool {
    Rc::ptr_eq(&self.cell, &other.cell)
  }

  /// Set a fresh binding in this environment. An overwritten binding that
  /// held a user function destroys the outgoing function.
  pub fn define(&self, name: &str, value: Value) {
    let outgoing = self
      .cell
      .bindings
      .borrow_mut()
      .insert(name.to_string(), value.clone());
    destroy_outgoing(outgoing, &value);
  }

  /// Overwrite the nearest existing binding in the chain. Returns `false`
  /// when the name is unbound anywhere; the caller raises the reference
  /// fault.
  pub fn assign(&self, name: &str, value: Value) -> bool {
    let mut current = Some(self.clone());
    while let Some(env) = current {
      let mut bindings = env.cell.bindings.borrow_mut();
      if let Some(slot) = bindings.get_mut(name) {
        let outgoing = std::mem::replace(slot, value.clone());
        drop(bindings);
        destroy_outgoing(Some(outgoing), &value);
        return true;
      }
      drop(bindings);
      current = env.cell.parent.borrow().clone();
    }
    false
  }

  pub fn lookup(&self, name: &str) -> Option<Value> {
    let mut current = Some(self.clone());
    while let Some(env) = current {
      if let Some(value) = env.cell.bindings.borrow().get(name) {
        return Some(value.clone());
      }
      current = env.cell.parent.borrow().clone();
    }
    None
  }

  pub fn has(&self, name: &str) -> bool {
    self.lookup(name).is_some()
  }

  /// The bindings of this environment alone, in definition order.
  pub fn local_entries(&self) -> Vec<(String, Value)> {
    self
      .cell
      .bindings
      .borrow()
      .iter()
      .map(|(k, v)| (k.clone(), v.clone()))
      .collect()
  }

  pub fn add_ref(&self) {
    self.cell.refs.set(self.cell.refs.get() + 1);
  }

  pub fn release(&self) {
    if !self.cell.alive.get() {
      return;
    }
    let refs = self.cell.refs.get();
    debug_assert!(refs > 0, "environment released more often than acquired");
    let refs = refs.saturating_sub(1);
    self.cell.refs.set(refs);
    if refs == 0 {
      self.teardown();
    }
  }

  /// Forced teardown regardless of the remaining count; the root environment
  /// ends with this so the cascade reaches scopes kept alive only by cycles.
  pub fn shutdown(&self) {
    if self.cell.alive.get() {
      self.teardown();
    }
  }

  pub(crate) fn track_function(&self, f: &UserFnRef) {
    self.cell.created_fns.borrow_mut().push(f.clone());
  }

  fn teardown(&self) {
    if !self.cell.alive.replace(false) {
      return;
    }
    tracker::env_destroyed();

    // Functions created here are destroyed first; this breaks the cycle of a
    // closure captured by its own defining scope.
    let created = self.cell.created_fns.take();
    for f in created {
      f.destroy();
    }

    let bindings = std::mem::take(&mut *self.cell.bindings.borrow_mut());
    for (_, value) in bindings {
      if let Value::Function(FnValue::User(f)) = value {
        f.destroy();
      }
    }

    let children = self.cell.children.take();
    for weak in children {
      if let Some(cell) = weak.upgrade() {
        let child = Env { cell };
        if child.is_alive() {
          child.teardown();
        }
      }
    }

    if let Some(parent) = self.cell.parent.take() {
      parent.release();
    }
  }
}

/// Destroy a function displaced from a binding slot, unless the incoming
/// value is that same function.
fn destroy_outgoing(outgoing: Option<Value>, incoming: &Value) {
  let Some(Value::Function(FnValue::User(old))) = outgoing else {
    return;
  };
  if let Value::Function(FnValue::User(new)) = incoming {
    if old.ptr_eq(new) {
      return;
    }
  }
  old.destroy();
}
