use sandbox_js::{evaluate, Globals, Value};

fn eval(source: &str) -> Value {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap()
}

#[test]
fn if_else_branches() {
  assert_eq!(eval("let r; if (1 < 2) { r = 'a'; } else { r = 'b'; } r"), Value::str("a"));
  assert_eq!(eval("let r = 'none'; if (false) r = 'set'; r"), Value::str("none"));
}

#[test]
fn while_loop_terminates() {
  assert_eq!(
    eval("let n = 0; while (n < 10) { n = n + 3; } n"),
    Value::Number(12.0)
  );
}

#[test]
fn for_loop_with_continue() {
  assert_eq!(
    eval("let s = 0; for (let i = 1; i <= 5; i++) { if (i === 3) continue; s += i; } s"),
    Value::Number(12.0)
  );
}

#[test]
fn for_loop_break() {
  assert_eq!(
    eval("let s = 0; for (let i = 0; ; i++) { if (i === 4) break; s += i; } s"),
    Value::Number(6.0)
  );
}

#[test]
fn for_head_binding_does_not_leak() {
  let err = futures::executor::block_on(evaluate(
    &mut Globals::new(),
    "for (let i = 0; i < 1; i++) {} i",
  ))
  .unwrap_err();
  assert_eq!(err.kind, sandbox_js::ErrorKind::Reference);
}

#[test]
fn for_of_iterates_arrays_and_strings() {
  assert_eq!(
    eval("let s = 0; for (const n of [1, 2, 3]) { s += n; } s"),
    Value::Number(6.0)
  );
  assert_eq!(
    eval("let out = ''; for (const c of 'abc') { out = c + out; } out"),
    Value::str("cba")
  );
}

#[test]
fn for_in_iterates_keys_in_insertion_order() {
  assert_eq!(
    eval("let out = ''; for (const k in {b: 1, a: 2, c: 3}) { out += k; } out"),
    Value::str("bac")
  );
  assert_eq!(
    eval("let out = ''; for (const i in ['x', 'y']) { out += i; } out"),
    Value::str("01")
  );
}

#[test]
fn for_each_head_may_assign_existing_binding() {
  assert_eq!(
    eval("let v = 0; let s = 0; for (v of [1, 2]) { s += v; } s + v"),
    Value::Number(5.0)
  );
}

#[test]
fn return_unwinds_nested_blocks() {
  assert_eq!(
    eval(
      "function f() { { { if (true) { return 'deep'; } } } return 'never'; } f()"
    ),
    Value::str("deep")
  );
}

#[test]
fn return_unwinds_out_of_loops() {
  assert_eq!(
    eval("function f() { for (let i = 0; i < 10; i++) { if (i === 2) return i; } } f()"),
    Value::Number(2.0)
  );
}

#[test]
fn throw_and_catch() {
  assert_eq!(
    eval("let r; try { throw 'boom'; r = 'no'; } catch (e) { r = e; } r"),
    Value::str("boom")
  );
}

#[test]
fn catch_parameter_is_optional_and_scoped() {
  assert_eq!(eval("let r = 0; try { throw 1; } catch { r = 2; } r"), Value::Number(2.0));
  let err = futures::executor::block_on(evaluate(
    &mut Globals::new(),
    "try { throw 1; } catch (e) {} e",
  ))
  .unwrap_err();
  assert_eq!(err.kind, sandbox_js::ErrorKind::Reference);
}

#[test]
fn finally_always_runs() {
  assert_eq!(
    eval("let log = ''; try { log += 't'; } finally { log += 'f'; } log"),
    Value::str("tf")
  );
  assert_eq!(
    eval(
      "let log = ''; \
       try { try { throw 'x'; } finally { log += 'f'; } } catch (e) { log += 'c'; } log"
    ),
    Value::str("fc")
  );
}

#[test]
fn finally_signal_supersedes_pending_signal() {
  assert_eq!(
    eval("function f() { try { return 'try'; } finally { return 'finally'; } } f()"),
    Value::str("finally")
  );
  assert_eq!(
    eval(
      "function f() { try { throw 'x'; } finally { return 'recovered'; } } f()"
    ),
    Value::str("recovered")
  );
}

#[test]
fn rethrow_from_catch_propagates() {
  assert_eq!(
    eval(
      "let r; \
       try { try { throw 'inner'; } catch (e) { throw e + '!'; } } catch (e) { r = e; } r"
    ),
    Value::str("inner!")
  );
}

#[test]
fn nested_loops_with_plain_break() {
  assert_eq!(
    eval(
      "let hits = 0; \
       for (let i = 0; i < 3; i++) { \
         for (let j = 0; j < 3; j++) { if (j === 1) break; hits++; } \
       } hits"
    ),
    Value::Number(3.0)
  );
}
