use crate::function::native_fn;
use crate::value::{inspect, ObjectRef, Value};
use ahash::RandomState;
use indexmap::IndexMap;
use itertools::Itertools;

/// The caller-owned table of names visible to a program.
///
/// The evaluator adds nothing: every name a program can see comes from here.
/// On successful completion, top-level definitions are mirrored back so the
/// caller can observe them.
#[derive(Default)]
pub struct Globals {
  values: IndexMap<String, Value, RandomState>,
}

impl Globals {
  pub fn new() -> Globals {
    Globals::default()
  }

  pub fn define(&mut self, name: impl Into<String>, value: Value) {
    self.values.insert(name.into(), value);
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.values.get(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.values.iter()
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Opt-in convenience seeding: a `console` object with `log` and `error`
  /// writing to the process streams. The core never injects this on its own.
  pub fn seed_console(&mut self) {
    let console = ObjectRef::new();
    console.set(
      "log",
      native_fn("log", |args| {
        println!("{}", render_console_args(args));
        Ok(Value::Undefined)
      }),
    );
    console.set(
      "error",
      native_fn("error", |args| {
        eprintln!("{}", render_console_args(args));
        Ok(Value::Undefined)
      }),
    );
    self.define("console", Value::Object(console));
  }
}

fn render_console_args(args: &[Value]) -> String {
  args
    .iter()
    .map(|v| match v {
      Value::String(s) => s.to_string(),
      other => inspect(other),
    })
    .join(" ")
}
