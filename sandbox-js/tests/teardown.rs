use sandbox_js::{evaluate, tracker, Globals, Sandbox, Value};
use std::sync::Mutex;

// The tracker counters are process-wide; tests in this binary serialize on
// one lock so concurrent test threads cannot disturb each other's counts.
static LOCK: Mutex<()> = Mutex::new(());

fn assert_clean_run(source: &str) {
  let _guard = LOCK.lock().unwrap();
  tracker::reset();
  let mut globals = Globals::new();
  let _ = futures::executor::block_on(evaluate(&mut globals, source));
  let stats = tracker::snapshot();
  assert_eq!(stats.env_count, 0, "leaked environments after: {source}");
  assert_eq!(stats.fn_count, 0, "leaked functions after: {source}");
}

#[test]
fn plain_script_tears_down() {
  assert_clean_run("let x = 1; { let y = 2; } x");
  assert_clean_run("let x = 0; for (let i = 0; i < 3; i++) { x += i; } x");
}

#[test]
fn function_declarations_tear_down() {
  assert_clean_run("function f() { return 1; } f()");
}

#[test]
fn escaped_closures_tear_down() {
  assert_clean_run(
    "function make() { let c = 0; return function() { return ++c; }; } \
     let g = make(); g(); g();",
  );
}

#[test]
fn discarded_closures_tear_down() {
  // The closure value is never stored anywhere; its defining scope still
  // collects it.
  assert_clean_run("function make() { return () => 1; } make(); make();");
}

#[test]
fn self_capturing_function_cycle_is_collected() {
  assert_clean_run("let f = function() { return f; }; f()");
  assert_clean_run("{ function inner() { return inner; } inner(); }");
}

#[test]
fn mutually_recursive_closures_are_collected() {
  assert_clean_run(
    "function even(n) { return n === 0 ? true : odd(n - 1); } \
     function odd(n) { return n === 0 ? false : even(n - 1); } \
     even(8)",
  );
}

#[test]
fn classes_and_methods_tear_down() {
  assert_clean_run(
    "class A { constructor() { this.v = 1; } m() { return this.v; } } \
     class B extends A { m() { return super.m() + 1; } } \
     new B().m()",
  );
}

#[test]
fn faulting_runs_tear_down() {
  assert_clean_run("function f() { return missing; } f()");
  assert_clean_run("let [a] = 42;");
  assert_clean_run("function outer() { { let x = 1; null.y; } } outer()");
}

#[test]
fn overwriting_a_function_binding_destroys_the_old_function() {
  let _guard = LOCK.lock().unwrap();
  tracker::reset();
  let mut globals = Globals::new();
  futures::executor::block_on(evaluate(
    &mut globals,
    "let f = function() { return 1; }; f = function() { return 2; }; f()",
  ))
  .unwrap();
  assert_eq!(tracker::snapshot().fn_count, 0);
}

#[test]
fn session_teardown_happens_on_drop() {
  let _guard = LOCK.lock().unwrap();
  tracker::reset();
  {
    let sandbox = Sandbox::new();
    let result = futures::executor::block_on(
      sandbox.eval("function keep() { return 9; } keep()"),
    )
    .unwrap();
    assert_eq!(result, Value::Number(9.0));
    // Still live while the session is open.
    assert!(tracker::snapshot().env_count >= 1);
  }
  let stats = tracker::snapshot();
  assert_eq!(stats.env_count, 0);
  assert_eq!(stats.fn_count, 0);
}

#[test]
fn session_state_survives_between_eval_calls() {
  let _guard = LOCK.lock().unwrap();
  tracker::reset();
  {
    let sandbox = Sandbox::new();
    futures::executor::block_on(sandbox.eval("let n = 1; function bump() { return ++n; }"))
      .unwrap();
    let result = futures::executor::block_on(sandbox.eval("bump(); bump()")).unwrap();
    assert_eq!(result, Value::Number(3.0));
  }
  assert_eq!(tracker::snapshot().env_count, 0);
}
