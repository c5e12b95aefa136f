use super::parse;
use crate::ast::expr::{Expr, TemplatePart};
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;

#[test]
fn parses_statement_kinds() {
  let program = parse(
    r#"
      let x = 1;
      const { a, b = 2, ...rest } = x;
      function f(a, ...xs) { return a; }
      class A extends B { constructor() { super(); } m() {} static s() {} }
      for (let i = 0; i < 3; i++) { continue; }
      for (const k in x) {}
      for (const v of [1, 2]) {}
      outer: while (true) { break outer; }
      switch (x) { case 1: break; default: }
      try { throw 1; } catch (e) {} finally {}
    "#,
  )
  .unwrap();
  assert_eq!(program.stx.body.len(), 10);
}

#[test]
fn parses_expression_kinds() {
  let program = parse(
    "a?.b?.(c)?.[d]; x ?? y || z; a ** b ** c; (x, y); cond ? a : b; \
     [1, , ...xs]; ({ a, b: 2, [k]: 3, ...r, m() { return 1; } }); \
     x => x + 1; async (a, b) => { return a; }; new A(1).m(); \
     typeof x; void 0; delete a.b; ++i; i--; `a${b}c`;",
  )
  .unwrap();
  assert_eq!(program.stx.body.len(), 16);
}

#[test]
fn arrow_versus_parenthesized() {
  let program = parse("(a + 1) * 2; (a, b) => a;").unwrap();
  let Stmt::Expr(first) = &*program.stx.body[0].stx else {
    panic!("expected expression statement");
  };
  assert!(matches!(&*first.stx.expr.stx, Expr::Binary(_)));
  let Stmt::Expr(second) = &*program.stx.body[1].stx else {
    panic!("expected expression statement");
  };
  assert!(matches!(&*second.stx.expr.stx, Expr::Func(_)));
}

#[test]
fn optional_chain_is_wrapped() {
  let program = parse("a?.b.c").unwrap();
  let Stmt::Expr(stmt) = &*program.stx.body[0].stx else {
    panic!("expected expression statement");
  };
  assert!(matches!(&*stmt.stx.expr.stx, Expr::Chain(_)));
}

#[test]
fn template_parts_are_interleaved() {
  let program = parse("`x = ${x}!`").unwrap();
  let Stmt::Expr(stmt) = &*program.stx.body[0].stx else {
    panic!("expected expression statement");
  };
  let Expr::Template(tpl) = &*stmt.stx.expr.stx else {
    panic!("expected template");
  };
  assert!(matches!(
    tpl.stx.parts.as_slice(),
    [
      TemplatePart::Str(_),
      TemplatePart::Expr(_),
      TemplatePart::Str(_)
    ]
  ));
}

#[test]
fn asi_allows_newline_termination() {
  let program = parse("let x = 1\nx = 2\nx").unwrap();
  assert_eq!(program.stx.body.len(), 3);
}

#[test]
fn rejects_modules() {
  let err = parse("import x from 'y';").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ModulesUnsupported);
}

#[test]
fn rejects_generators_and_tagged_templates() {
  assert!(matches!(
    parse("function* g() {}").unwrap_err().typ,
    SyntaxErrorType::UnsupportedSyntax(_)
  ));
  assert!(matches!(
    parse("tag`x`").unwrap_err().typ,
    SyntaxErrorType::UnsupportedSyntax(_)
  ));
}

#[test]
fn rest_must_be_last() {
  assert_eq!(
    parse("let [...a, b] = c;").unwrap_err().typ,
    SyntaxErrorType::RestElementNotLast
  );
}

#[test]
fn locations_are_byte_ranges() {
  let program = parse("let abc = 1;").unwrap();
  let stmt = &program.stx.body[0];
  assert_eq!(stmt.loc.0, 0);
  assert!(stmt.loc.1 >= 11);
}
