use sandbox_js::{evaluate, ErrorKind, Globals, Value};

fn eval(source: &str) -> Value {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap()
}

fn eval_err(source: &str) -> sandbox_js::EvalError {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap_err()
}

fn as_array(value: &Value) -> Vec<Value> {
  let Value::Array(a) = value else {
    panic!("expected array, got {value:?}");
  };
  a.snapshot()
}

#[test]
fn object_pattern_with_rest() {
  let result = eval("const {a, b, ...r} = {a: 1, b: 2, c: 3, d: 4}; [a, b, r]");
  let parts = as_array(&result);
  assert_eq!(parts[0], Value::Number(1.0));
  assert_eq!(parts[1], Value::Number(2.0));
  let Value::Object(rest) = &parts[2] else {
    panic!("expected object rest");
  };
  assert_eq!(rest.keys(), ["c", "d"]);
  assert_eq!(rest.get_own("c"), Some(Value::Number(3.0)));
  assert_eq!(rest.get_own("d"), Some(Value::Number(4.0)));
}

#[test]
fn array_pattern_with_holes_and_rest() {
  let result = eval("let [first, , third, ...rest] = [1, 2, 3, 4, 5]; [first, third, rest]");
  let parts = as_array(&result);
  assert_eq!(parts[0], Value::Number(1.0));
  assert_eq!(parts[1], Value::Number(3.0));
  assert_eq!(
    as_array(&parts[2]),
    vec![Value::Number(4.0), Value::Number(5.0)]
  );
}

#[test]
fn missing_components_bind_undefined() {
  assert_eq!(eval("let [a, b] = [1]; b"), Value::Undefined);
  assert_eq!(eval("let {x} = {}; x"), Value::Undefined);
}

#[test]
fn nested_patterns() {
  assert_eq!(
    eval("let {a: {b: [x, y]}} = {a: {b: [10, 20]}}; x + y"),
    Value::Number(30.0)
  );
}

#[test]
fn renamed_keys_bind_the_target_name() {
  assert_eq!(eval("let {a: renamed} = {a: 9}; renamed"), Value::Number(9.0));
}

#[test]
fn computed_keys_in_patterns() {
  assert_eq!(
    eval("let k = 'key'; let {[k]: v} = {key: 'found'}; v"),
    Value::str("found")
  );
}

#[test]
fn destructuring_assignment_targets_existing_bindings() {
  assert_eq!(
    eval("let a = 0; let b = 0; [a, b] = [1, 2]; a + b"),
    Value::Number(3.0)
  );
  assert_eq!(
    eval("let a; let b; ({a, b} = {a: 'x', b: 'y'}); a + b"),
    Value::str("xy")
  );
}

#[test]
fn destructuring_assignment_through_members() {
  assert_eq!(
    eval("let o = {}; [o.x, o.y] = [1, 2]; o.x + o.y"),
    Value::Number(3.0)
  );
}

#[test]
fn string_destructures_as_iterable() {
  assert_eq!(eval("let [a, b] = 'hi'; a + b"), Value::str("hi"));
}

#[test]
fn parameters_destructure() {
  assert_eq!(
    eval("function dist({x, y}) { return x * x + y * y; } dist({x: 3, y: 4})"),
    Value::Number(25.0)
  );
  assert_eq!(
    eval("function pick([, second]) { return second; } pick(['a', 'b'])"),
    Value::str("b")
  );
}

#[test]
fn destructuring_nullish_faults() {
  let err = eval_err("let {a} = null;");
  assert_eq!(err.kind, ErrorKind::Type);
  let err = eval_err("let {a} = undefined;");
  assert_eq!(err.kind, ErrorKind::Type);
}

#[test]
fn array_pattern_requires_iterable() {
  let err = eval_err("let [a] = 42;");
  assert_eq!(err.kind, ErrorKind::Type);
  assert!(err.message.contains("non-iterable"));
}

#[test]
fn pattern_defaults_are_unsupported() {
  let err = eval_err("let {a = 1} = {};");
  assert_eq!(err.kind, ErrorKind::Unsupported);
  let err = eval_err("let [a = 1] = [];");
  assert_eq!(err.kind, ErrorKind::Unsupported);
}

#[test]
fn rest_captures_exactly_the_remainder() {
  let result = eval("let {x, ...rest} = {x: 1}; rest");
  let Value::Object(rest) = result else {
    panic!("expected object");
  };
  assert!(rest.is_empty());
}
