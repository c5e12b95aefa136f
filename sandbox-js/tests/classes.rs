use sandbox_js::{evaluate, ErrorKind, Globals, Value};

fn eval(source: &str) -> Value {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap()
}

fn eval_err(source: &str) -> sandbox_js::EvalError {
  futures::executor::block_on(evaluate(&mut Globals::new(), source)).unwrap_err()
}

#[test]
fn constructor_initializes_instances() {
  assert_eq!(
    eval("class Point { constructor(x, y) { this.x = x; this.y = y; } } new Point(3, 4).x"),
    Value::Number(3.0)
  );
}

#[test]
fn instance_methods_resolve_through_the_prototype() {
  assert_eq!(
    eval(
      "class Point { \
         constructor(x, y) { this.x = x; this.y = y; } \
         norm() { return this.x * this.x + this.y * this.y; } \
       } \
       new Point(3, 4).norm()"
    ),
    Value::Number(25.0)
  );
}

#[test]
fn super_method_dispatch() {
  assert_eq!(
    eval(
      "class A { m() { return 1; } } \
       class B extends A { m() { return super.m() + 1; } } \
       new B().m()"
    ),
    Value::Number(2.0)
  );
}

#[test]
fn inherited_methods_are_found_up_the_chain() {
  assert_eq!(
    eval("class A { hello() { return 'hi'; } } class B extends A {} new B().hello()"),
    Value::str("hi")
  );
}

#[test]
fn super_constructor_chaining() {
  assert_eq!(
    eval(
      "class Animal { constructor(name) { this.name = name; } } \
       class Dog extends Animal { constructor() { super('rex'); this.kind = 'dog'; } } \
       let d = new Dog(); d.name + ':' + d.kind"
    ),
    Value::str("rex:dog")
  );
}

#[test]
fn implicit_constructor_forwards_arguments() {
  assert_eq!(
    eval(
      "class A { constructor(v) { this.v = v; } } \
       class B extends A {} \
       new B(7).v"
    ),
    Value::Number(7.0)
  );
}

#[test]
fn static_methods_live_on_the_class() {
  assert_eq!(
    eval("class MathLike { static twice(n) { return n * 2; } } MathLike.twice(21)"),
    Value::Number(42.0)
  );
  assert_eq!(
    eval("class A { static s() { return 1; } } class B extends A {} B.s()"),
    Value::Number(1.0)
  );
}

#[test]
fn methods_may_mutate_instance_state() {
  assert_eq!(
    eval(
      "class Counter { \
         constructor() { this.n = 0; } \
         bump() { this.n++; return this.n; } \
       } \
       let c = new Counter(); c.bump(); c.bump(); c.bump()"
    ),
    Value::Number(3.0)
  );
}

#[test]
fn super_resolution_uses_the_defining_class() {
  // C overrides m, but B's body still sees A's m through super.
  assert_eq!(
    eval(
      "class A { m() { return 'A'; } } \
       class B extends A { m() { return super.m() + 'B'; } } \
       class C extends B { m() { return super.m() + 'C'; } } \
       new C().m()"
    ),
    Value::str("ABC")
  );
}

#[test]
fn class_expressions_are_values() {
  assert_eq!(
    eval("let K = class { who() { return 'expr'; } }; new K().who()"),
    Value::str("expr")
  );
}

#[test]
fn explicit_object_return_overrides_the_receiver() {
  assert_eq!(
    eval("class A { constructor() { return {forced: true}; } } new A().forced"),
    Value::Bool(true)
  );
}

#[test]
fn class_without_new_faults() {
  let err = eval_err("class A {} A()");
  assert_eq!(err.kind, ErrorKind::Type);
}

#[test]
fn extending_a_non_class_faults() {
  let err = eval_err("class A extends 42 {}");
  assert_eq!(err.kind, ErrorKind::Type);
}

#[test]
fn super_without_superclass_faults() {
  let err = eval_err("class A { m() { return super.m(); } } new A().m()");
  assert_eq!(err.kind, ErrorKind::Type);
}

#[test]
fn getters_and_setters_are_unsupported() {
  let err = eval_err("class A { get x() { return 1; } }");
  assert_eq!(err.kind, ErrorKind::Unsupported);
}

#[test]
fn computed_method_keys() {
  assert_eq!(
    eval("let k = 'dyn'; class A { [k]() { return 'computed'; } } new A().dyn()"),
    Value::str("computed")
  );
}

#[test]
fn methods_are_not_enumerable() {
  assert_eq!(
    eval(
      "class A { constructor() { this.own = 1; } m() {} } \
       let keys = ''; for (const k in new A()) { keys += k; } keys"
    ),
    Value::str("own")
  );
}
