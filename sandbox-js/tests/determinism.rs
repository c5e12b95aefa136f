use proptest::prelude::*;
use sandbox_js::{evaluate, inspect, Globals};

// Generate small well-formed programs without `await`, `throw`, or host
// calls, then check that two runs under fresh globals agree on both the
// result and the final globals.

fn leaf() -> impl Strategy<Value = String> {
  prop_oneof![
    (0i32..100).prop_map(|n| n.to_string()),
    Just("a".to_string()),
    Just("b".to_string()),
    Just("c".to_string()),
  ]
}

fn expr() -> impl Strategy<Value = String> {
  leaf().prop_recursive(3, 24, 3, |inner| {
    prop_oneof![
      (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("({l} + {r})")),
      (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("({l} * {r})")),
      (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("({l} - {r})")),
      (inner.clone(), inner.clone(), inner.clone())
        .prop_map(|(t, c, a)| format!("({t} < {c} ? {c} : {a})")),
      (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("[{l}, {r}].length")),
      inner.clone().prop_map(|e| format!("((x) => x + 1)({e})")),
    ]
  })
}

fn program() -> impl Strategy<Value = String> {
  (expr(), expr(), expr()).prop_map(|(a, b, c)| {
    // `a`/`b`/`c` leaves are always bound: the generated expressions only
    // ever reassign them.
    format!(
      "let a = 1; let b = 2; let c = 3; \
       a = {a}; b = {b}; c = {c}; \
       let total = 0; \
       for (let i = 0; i < 3; i++) {{ total += a + i; }} \
       total + b + c"
    )
  })
}

fn run(source: &str) -> (String, Vec<(String, String)>) {
  let mut globals = Globals::new();
  let result = futures::executor::block_on(evaluate(&mut globals, source)).unwrap();
  let snapshot = globals
    .iter()
    .map(|(name, value)| (name.clone(), inspect(value)))
    .collect();
  (inspect(&result), snapshot)
}

proptest! {
  #[test]
  fn repeated_runs_agree(source in program()) {
    let first = run(&source);
    let second = run(&source);
    prop_assert_eq!(first, second);
  }
}
