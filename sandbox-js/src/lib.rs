//! A sandboxed tree-walking evaluator for a C-family scripting subset.
//!
//! Untrusted source runs against a caller-controlled globals table: no
//! implicit host APIs, no ambient I/O, no dynamic code facility. Evaluation
//! is cooperative — the entry points are `async` and suspend only on host
//! promises injected through the globals.
//!
//! ```
//! use sandbox_js::{evaluate, Globals, Value};
//!
//! let mut globals = Globals::new();
//! let result = futures::executor::block_on(evaluate(
//!   &mut globals,
//!   "function f(n) { if (n <= 1) return 1; return n * f(n - 1); } f(5)",
//! ))
//! .unwrap();
//! assert_eq!(result, Value::Number(120.0));
//! ```

mod class;
mod completion;
mod destructure;
mod diag;
mod env;
mod error;
mod function;
mod globals;
mod interp;
mod object_ops;
mod ops;
mod promise;
pub mod tracker;
mod value;

pub use class::ClassRef;
pub use completion::{Completion, Thrown};
pub use env::Env;
pub use error::{ErrorKind, EvalError};
pub use function::{native_fn, FnValue, NativeFnRef, UserFnRef};
pub use globals::Globals;
pub use promise::{JsPromise, PromiseResult};
pub use tracker::MemStats;
pub use value::{
  inspect, loose_equals, strict_equals, to_display_string, to_number, ArrayRef, ErrorRef, HostRef,
  ObjectRef, Value,
};

use interp::{Frame, Interp};
use syntax_js::SourceText;

/// A persistent evaluation session: one root environment that survives
/// across [`Sandbox::eval`] calls, as an interactive driver needs.
///
/// Dropping the sandbox releases the root environment, cascading releases
/// through children and contained functions.
pub struct Sandbox {
  root: Env,
}

impl Sandbox {
  pub fn new() -> Sandbox {
    Sandbox { root: Env::root() }
  }

  /// A session whose root environment is seeded from the caller's globals.
  pub fn with_globals(globals: &Globals) -> Sandbox {
    let sandbox = Sandbox::new();
    for (name, value) in globals.iter() {
      sandbox.root.define(name, value.clone());
    }
    sandbox
  }

  pub fn define(&self, name: &str, value: Value) {
    self.root.define(name, value);
  }

  /// Parse and evaluate a script in this session's root environment.
  ///
  /// The returned value is the final statement's value; a top-level promise
  /// result is joined first. Faults come back as [`EvalError`] with source
  /// coordinates attached by the diagnostic formatter.
  pub async fn eval(&self, source: &str) -> Result<Value, EvalError> {
    let text = SourceText::new("<eval>", source);
    let program = match syntax_js::parse(source) {
      Ok(program) => program,
      Err(error) => return Err(diag::format_syntax_error(&text, &error)),
    };

    let interp = Interp;
    let frame = Frame::default();
    let mut last: Option<Value> = None;

    for stmt in &program.stx.body {
      match interp.eval_stmt(&self.root, &frame, stmt).await {
        Err(thrown) => return Err(diag::format_thrown(&text, stmt.loc, &thrown)),
        Ok(completion) => match completion.update_empty(last.clone()) {
          Completion::Normal(value) => {
            if let Some(value) = value {
              last = Some(value);
            }
          }
          Completion::Return(value) => {
            // Tolerated at the top level; the script's result.
            last = Some(value);
            break;
          }
          Completion::Break(..) => {
            return Err(diag::fault_at(
              &text,
              stmt.loc,
              ErrorKind::Type,
              "'break' outside of a loop or switch".to_string(),
            ));
          }
          Completion::Continue(..) => {
            return Err(diag::fault_at(
              &text,
              stmt.loc,
              ErrorKind::Type,
              "'continue' outside of a loop".to_string(),
            ));
          }
        },
      }
    }

    match last.unwrap_or(Value::Undefined) {
      Value::Promise(promise) => match promise.join().await {
        Ok(value) => Ok(value),
        Err(thrown) => Err(diag::format_thrown(&text, program.loc, &thrown)),
      },
      value => Ok(value),
    }
  }

  /// Copy every root binding into the caller's globals table.
  pub fn mirror_into(&self, globals: &mut Globals) {
    for (name, value) in self.root.local_entries() {
      globals.define(name, value);
    }
  }
}

impl Default for Sandbox {
  fn default() -> Self {
    Sandbox::new()
  }
}

impl Drop for Sandbox {
  fn drop(&mut self) {
    self.root.shutdown();
  }
}

/// One-shot entry point: seed a root environment from `globals`, run
/// `source`, mirror top-level definitions back, and tear the environment
/// down.
pub async fn evaluate(globals: &mut Globals, source: &str) -> Result<Value, EvalError> {
  let sandbox = Sandbox::with_globals(globals);
  let result = sandbox.eval(source).await?;
  sandbox.mirror_into(globals);
  Ok(result)
}
