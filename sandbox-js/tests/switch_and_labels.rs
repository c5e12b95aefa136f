use sandbox_js::{evaluate, Globals, Value};

fn eval(source: &str) -> Value {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap()
}

#[test]
fn switch_fallthrough_produces_value() {
  assert_eq!(
    eval("switch (2) { case 1: case 2: case 3: 'hit'; break; default: 'miss'; }"),
    Value::str("hit")
  );
}

#[test]
fn switch_falls_through_without_break() {
  assert_eq!(
    eval("let log = ''; switch (2) { case 1: log += 'a'; case 2: log += 'b'; case 3: log += 'c'; } log"),
    Value::str("bc")
  );
}

#[test]
fn switch_matching_is_strict() {
  assert_eq!(
    eval("switch ('2') { case 2: 'number'; break; case '2': 'string'; break; } "),
    Value::str("string")
  );
}

#[test]
fn switch_default_runs_when_nothing_matches() {
  assert_eq!(
    eval("switch (9) { case 1: 'one'; break; default: 'other'; }"),
    Value::str("other")
  );
}

#[test]
fn earlier_default_is_not_retried_after_match() {
  assert_eq!(
    eval("let log = ''; switch (2) { default: log += 'd'; case 2: log += 'm'; } log"),
    Value::str("m")
  );
}

#[test]
fn earlier_default_falls_through_when_unmatched() {
  assert_eq!(
    eval("let log = ''; switch (9) { default: log += 'd'; case 2: log += 'm'; } log"),
    Value::str("dm")
  );
}

#[test]
fn switch_scope_is_shared_across_cases() {
  assert_eq!(
    eval("switch (1) { case 1: let v = 'set'; case 2: v; }"),
    Value::str("set")
  );
}

#[test]
fn labelled_break_exits_outer_loop() {
  assert_eq!(
    eval(
      "let n = 0; \
       outer: while (true) { while (true) { n = 1; break outer; } } n"
    ),
    Value::Number(1.0)
  );
}

#[test]
fn labelled_continue_targets_outer_loop() {
  assert_eq!(
    eval(
      "let n = 0; \
       outer: for (let i = 0; i < 3; i++) { \
         for (let j = 0; j < 3; j++) { n++; continue outer; } \
       } n"
    ),
    Value::Number(3.0)
  );
}

#[test]
fn labelled_break_on_block() {
  assert_eq!(
    eval("let r = 'a'; stop: { r = 'b'; break stop; r = 'c'; } r"),
    Value::str("b")
  );
}

#[test]
fn chained_labels_all_target_the_loop() {
  // Both labels of `outer: inner: for ...` name the same loop; continue and
  // break through either must work.
  assert_eq!(
    eval(
      "let n = 0; \
       outer: inner: for (let i = 0; i < 3; i++) { n++; continue outer; } n"
    ),
    Value::Number(3.0)
  );
  assert_eq!(
    eval(
      "let n = 0; \
       outer: inner: for (let i = 0; i < 3; i++) { n++; continue inner; } n"
    ),
    Value::Number(3.0)
  );
  assert_eq!(
    eval(
      "let n = 0; \
       outer: inner: while (true) { n++; break outer; } n"
    ),
    Value::Number(1.0)
  );
}

#[test]
fn chained_label_on_nested_loops_still_targets_the_outer_one() {
  assert_eq!(
    eval(
      "let n = 0; \
       a: b: for (let i = 0; i < 3; i++) { \
         for (let j = 0; j < 3; j++) { n++; continue a; } \
       } n"
    ),
    Value::Number(3.0)
  );
}

#[test]
fn break_inside_switch_inside_loop_only_exits_switch() {
  assert_eq!(
    eval(
      "let n = 0; \
       for (let i = 0; i < 3; i++) { switch (i) { case 0: case 1: case 2: break; } n++; } n"
    ),
    Value::Number(3.0)
  );
}
