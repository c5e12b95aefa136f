use futures::FutureExt;
use sandbox_js::{evaluate, native_fn, ErrorKind, Globals, JsPromise, Thrown, Value};

fn eval(source: &str) -> Value {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap()
}

fn eval_with(globals: &mut Globals, source: &str) -> Result<Value, sandbox_js::EvalError> {
  futures::executor::block_on(evaluate(globals, source))
}

/// Globals with a `isPromise` probe and host-promise producers.
fn async_globals() -> Globals {
  let mut globals = Globals::new();
  globals.define(
    "isPromise",
    native_fn("isPromise", |args| {
      Ok(Value::Bool(matches!(args.first(), Some(Value::Promise(_)))))
    }),
  );
  globals.define(
    "hostValue",
    native_fn("hostValue", |args| {
      let value = args.first().cloned().unwrap_or(Value::Undefined);
      Ok(Value::Promise(JsPromise::from_future(
        async move { Ok(value) }.boxed_local(),
      )))
    }),
  );
  globals.define(
    "hostFailure",
    native_fn("hostFailure", |_args| {
      Ok(Value::Promise(JsPromise::from_future(
        async move { Err(Thrown::new(Value::str("host failed"))) }.boxed_local(),
      )))
    }),
  );
  globals
}

#[test]
fn async_function_resolves_to_its_return_value() {
  assert_eq!(eval("async function g() { return 42; } g()"), Value::Number(42.0));
}

#[test]
fn async_function_always_returns_a_promise() {
  let mut globals = async_globals();
  assert_eq!(
    eval_with(&mut globals, "async function g() { return 1; } isPromise(g())").unwrap(),
    Value::Bool(true)
  );
  assert_eq!(
    eval_with(&mut globals, "async function g() {} isPromise(g())").unwrap(),
    Value::Bool(true)
  );
}

#[test]
fn awaiting_a_non_promise_yields_the_value_unchanged() {
  assert_eq!(eval("async function g() { return await 5; } g()"), Value::Number(5.0));
  assert_eq!(eval("await 'direct'"), Value::str("direct"));
}

#[test]
fn await_joins_host_promises() {
  let mut globals = async_globals();
  assert_eq!(
    eval_with(&mut globals, "await hostValue(7) + 1").unwrap(),
    Value::Number(8.0)
  );
}

#[test]
fn async_functions_compose() {
  let mut globals = async_globals();
  assert_eq!(
    eval_with(
      &mut globals,
      "async function a() { return await hostValue(2); } \
       async function b() { return (await a()) * 10; } \
       await b()"
    )
    .unwrap(),
    Value::Number(20.0)
  );
}

#[test]
fn a_promise_settles_once_and_caches_its_result() {
  let mut globals = async_globals();
  assert_eq!(
    eval_with(
      &mut globals,
      "let p = hostValue(3); (await p) + (await p)"
    )
    .unwrap(),
    Value::Number(6.0)
  );
}

#[test]
fn rejected_host_promise_throws_at_await() {
  let mut globals = async_globals();
  assert_eq!(
    eval_with(
      &mut globals,
      "let r; try { await hostFailure(); r = 'no'; } catch (e) { r = e; } r"
    )
    .unwrap(),
    Value::str("host failed")
  );
}

#[test]
fn uncaught_rejection_rejects_the_evaluation() {
  let mut globals = async_globals();
  let err = eval_with(&mut globals, "await hostFailure()").unwrap_err();
  assert_eq!(err.kind, ErrorKind::Type);
  assert!(err.message.contains("host failed"));
}

#[test]
fn throw_inside_async_function_rejects_its_promise() {
  assert_eq!(
    eval(
      "async function g() { throw 'inner'; } \
       let r; try { await g(); } catch (e) { r = e; } r"
    ),
    Value::str("inner")
  );
}

#[test]
fn async_arrows_and_methods() {
  assert_eq!(eval("let f = async x => x * 2; await f(21)"), Value::Number(42.0));
  assert_eq!(
    eval("let o = {async m() { return 'method'; }}; await o.m()"),
    Value::str("method")
  );
}

#[test]
fn await_composes_with_expressions() {
  let mut globals = async_globals();
  assert_eq!(
    eval_with(
      &mut globals,
      "let xs = [await hostValue(1), await hostValue(2)]; xs[0] + xs[1]"
    )
    .unwrap(),
    Value::Number(3.0)
  );
}
