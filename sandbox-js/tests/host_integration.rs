use sandbox_js::{
  evaluate, native_fn, ErrorKind, Globals, HostRef, ObjectRef, Thrown, Value,
};
use std::cell::RefCell;
use std::rc::Rc;

fn eval_with(globals: &mut Globals, source: &str) -> Result<Value, sandbox_js::EvalError> {
  futures::executor::block_on(evaluate(globals, source))
}

#[test]
fn host_functions_are_callable() {
  let mut globals = Globals::new();
  globals.define(
    "double",
    native_fn("double", |args| {
      Ok(Value::Number(
        sandbox_js::to_number(args.first().unwrap_or(&Value::Undefined)) * 2.0,
      ))
    }),
  );
  assert_eq!(
    eval_with(&mut globals, "double(4) + double(1)").unwrap(),
    Value::Number(10.0)
  );
}

#[test]
fn host_functions_observe_program_values() {
  let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
  let sink = seen.clone();

  let mut globals = Globals::new();
  globals.define(
    "emit",
    native_fn("emit", move |args| {
      for arg in args {
        sink.borrow_mut().push(sandbox_js::to_display_string(arg));
      }
      Ok(Value::Undefined)
    }),
  );
  eval_with(&mut globals, "for (const v of [1, 'two', null]) { emit(v); }").unwrap();
  assert_eq!(seen.borrow().as_slice(), ["1", "two", "null"]);
}

#[test]
fn host_objects_round_trip_through_the_program() {
  let mut globals = Globals::new();
  let config = ObjectRef::new();
  config.set("limit", Value::Number(3.0));
  globals.define("config", Value::Object(config.clone()));

  eval_with(&mut globals, "config.limit = config.limit + 1; config.seen = true;").unwrap();
  assert_eq!(config.get_own("limit"), Some(Value::Number(4.0)));
  assert_eq!(config.get_own("seen"), Some(Value::Bool(true)));
}

#[test]
fn opaque_host_values_pass_through_untouched() {
  struct Token(#[allow(dead_code)] u64);

  let mut globals = Globals::new();
  globals.define("token", Value::Host(HostRef::new(Token(7))));
  let result = eval_with(&mut globals, "let copy = token; copy").unwrap();
  let Value::Host(host) = result else {
    panic!("expected host value");
  };
  assert!(host.downcast::<Token>().is_some());
}

#[test]
fn host_faults_are_catchable_in_program() {
  let mut globals = Globals::new();
  globals.define(
    "explode",
    native_fn("explode", |_| Err(Thrown::type_error("host refused"))),
  );
  assert_eq!(
    eval_with(
      &mut globals,
      "let r; try { explode(); } catch (e) { r = e.message; } r"
    )
    .unwrap(),
    Value::str("host refused")
  );
}

#[test]
fn faulting_host_value_can_model_cancellation() {
  // There is no first-class cancel: a host injects a value that faults when
  // touched.
  let mut globals = Globals::new();
  globals.define(
    "cancelled",
    native_fn("cancelled", |_| Err(Thrown::type_error("operation cancelled"))),
  );
  let err = eval_with(&mut globals, "let x = 1; cancelled(); x = 2;").unwrap_err();
  assert_eq!(err.kind, ErrorKind::Type);
  assert!(err.message.contains("cancelled"));
}

#[test]
fn seeded_console_is_plain_host_state() {
  let mut globals = Globals::new();
  globals.seed_console();
  // `console` is an ordinary object holding host callables.
  assert_eq!(
    eval_with(&mut globals, "typeof console.log").unwrap(),
    Value::str("function")
  );
}

#[test]
fn mirrored_globals_reflect_reassignment_of_seeded_names() {
  let mut globals = Globals::new();
  globals.define("n", Value::Number(1.0));
  eval_with(&mut globals, "n = n + 1;").unwrap();
  assert_eq!(globals.get("n"), Some(&Value::Number(2.0)));
}
