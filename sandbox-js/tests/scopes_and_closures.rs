use sandbox_js::{evaluate, ErrorKind, Globals, Value};

fn eval(source: &str) -> Value {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap()
}

fn eval_err(source: &str) -> sandbox_js::EvalError {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap_err()
}

#[test]
fn block_scope_shadows_and_unwinds() {
  assert_eq!(eval("let x = 0; { let x = 1; } x"), Value::Number(0.0));
}

#[test]
fn block_binding_is_invisible_outside() {
  let err = eval_err("{ let hidden = 1; } hidden");
  assert_eq!(err.kind, ErrorKind::Reference);
  assert!(err.message.contains("hidden"));
}

#[test]
fn inner_assignment_writes_outer_binding() {
  assert_eq!(eval("let x = 1; { x = 2; } x"), Value::Number(2.0));
}

#[test]
fn assignment_to_unbound_name_faults() {
  let err = eval_err("neverDeclared = 1");
  assert_eq!(err.kind, ErrorKind::Reference);
}

#[test]
fn closure_counter_retains_state() {
  assert_eq!(
    eval("function make() { let c = 0; return function() { return ++c; }; } let g = make(); g(); g(); g()"),
    Value::Number(3.0)
  );
}

#[test]
fn closures_capture_their_defining_environment() {
  // Two closures from separate calls must not share state.
  assert_eq!(
    eval(
      "function make() { let c = 0; return function() { return ++c; }; } \
       let a = make(); let b = make(); a(); a(); b()"
    ),
    Value::Number(1.0)
  );
}

#[test]
fn capture_is_lexical_not_dynamic() {
  assert_eq!(
    eval(
      "let x = 'outer'; \
       function read() { return x; } \
       function shadowed() { let x = 'inner'; return read(); } \
       shadowed()"
    ),
    Value::str("outer")
  );
}

#[test]
fn closure_captures_parameter() {
  assert_eq!(
    eval("function make(x) { return () => x; } make(7)()"),
    Value::Number(7.0)
  );
}

#[test]
fn sibling_closures_share_one_environment() {
  assert_eq!(
    eval(
      "function make() { let n = 0; return [() => { n = n + 1; }, () => n]; } \
       let pair = make(); pair[0](); pair[0](); pair[1]()"
    ),
    Value::Number(2.0)
  );
}

#[test]
fn for_each_iterations_get_fresh_bindings() {
  assert_eq!(
    eval(
      "let fns = []; \
       for (const v of [1, 2, 3]) { fns = [...fns, () => v]; } \
       fns[0]() + fns[1]() + fns[2]()"
    ),
    Value::Number(6.0)
  );
}

#[test]
fn top_level_definitions_mirror_back_into_globals() {
  let mut globals = Globals::new();
  futures::executor::block_on(evaluate(&mut globals, "let a = 1; let b = a + 1;")).unwrap();
  assert_eq!(globals.get("a"), Some(&Value::Number(1.0)));
  assert_eq!(globals.get("b"), Some(&Value::Number(2.0)));
}

#[test]
fn globals_are_visible_but_nothing_is_implicit() {
  let mut globals = Globals::new();
  globals.define("seeded", Value::Number(5.0));
  let result =
    futures::executor::block_on(evaluate(&mut globals, "seeded * 2")).unwrap();
  assert_eq!(result, Value::Number(10.0));

  // Nothing beyond the caller's names exists, not even a console.
  let err = eval_err("console.log(1)");
  assert_eq!(err.kind, ErrorKind::Reference);
}
