use sandbox_js::{evaluate, ErrorKind, Globals, Value};

fn eval(source: &str) -> Value {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap()
}

fn eval_err(source: &str) -> sandbox_js::EvalError {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap_err()
}

#[test]
fn object_keys_preserve_insertion_order() {
  let Value::Object(o) = eval("({z: 1, a: 2, m: 3})") else {
    panic!("expected object");
  };
  assert_eq!(o.keys(), ["z", "a", "m"]);
}

#[test]
fn overwriting_a_key_keeps_its_position() {
  let Value::Object(o) = eval("let o = {a: 1, b: 2}; o.a = 10; o") else {
    panic!("expected object");
  };
  assert_eq!(o.keys(), ["a", "b"]);
  assert_eq!(o.get_own("a"), Some(Value::Number(10.0)));
}

#[test]
fn spread_merges_with_later_keys_winning() {
  let Value::Object(o) = eval("({a: 1, ...{a: 2, b: 3}, c: 4})") else {
    panic!("expected object");
  };
  assert_eq!(o.keys(), ["a", "b", "c"]);
  assert_eq!(o.get_own("a"), Some(Value::Number(2.0)));
}

#[test]
fn literal_elements_evaluate_left_to_right() {
  assert_eq!(
    eval("let log = ''; let tap = v => { log += v; return v; }; [tap('a'), tap('b'), tap('c')]; log"),
    Value::str("abc")
  );
  assert_eq!(
    eval("let log = ''; let tap = v => { log += v; return v; }; ({x: tap('1'), y: tap('2')}); log"),
    Value::str("12")
  );
}

#[test]
fn shorthand_and_computed_keys() {
  assert_eq!(eval("let a = 5; ({a}).a"), Value::Number(5.0));
  assert_eq!(eval("let k = 'key'; ({[k]: 1}).key"), Value::Number(1.0));
  assert_eq!(eval("({[1 + 1]: 'two'})['2']"), Value::str("two"));
}

#[test]
fn array_spread_expands_in_place() {
  let Value::Array(a) = eval("[0, ...[1, 2], 3]") else {
    panic!("expected array");
  };
  assert_eq!(
    a.snapshot(),
    vec![
      Value::Number(0.0),
      Value::Number(1.0),
      Value::Number(2.0),
      Value::Number(3.0)
    ]
  );
}

#[test]
fn array_holes_are_undefined() {
  let Value::Array(a) = eval("[1, , 3]") else {
    panic!("expected array");
  };
  assert_eq!(a.get(1), Some(Value::Undefined));
  assert_eq!(a.len(), 3);
}

#[test]
fn spreading_a_string_yields_characters() {
  let Value::Array(a) = eval("[...'ab']") else {
    panic!("expected array");
  };
  assert_eq!(a.snapshot(), vec![Value::str("a"), Value::str("b")]);
}

#[test]
fn spread_of_non_iterable_faults() {
  let err = eval_err("[...42]");
  assert_eq!(err.kind, ErrorKind::Type);
  assert!(err.message.contains("spread"));
  assert!(err.message.contains("non-iterable"));
}

#[test]
fn writing_past_the_end_fills_holes() {
  assert_eq!(eval("let a = [1]; a[3] = 4; a.length"), Value::Number(4.0));
  assert_eq!(eval("let a = [1]; a[3] = 4; a[2]"), Value::Undefined);
}

#[test]
fn delete_removes_object_keys() {
  let Value::Object(o) = eval("let o = {a: 1, b: 2}; delete o.a; o") else {
    panic!("expected object");
  };
  assert_eq!(o.keys(), ["b"]);
}

#[test]
fn property_access_on_nullish_faults() {
  let err = eval_err("null.x");
  assert_eq!(err.kind, ErrorKind::Type);
  let err = eval_err("undefined.x");
  assert_eq!(err.kind, ErrorKind::Type);
  assert!(err.message.contains("'x'"));
}

#[test]
fn nested_structures() {
  assert_eq!(
    eval("let data = {rows: [{cells: [1, 2]}, {cells: [3]}]}; data.rows[0].cells[1]"),
    Value::Number(2.0)
  );
}
