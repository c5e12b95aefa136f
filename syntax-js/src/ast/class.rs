use super::expr::Expr;
use super::func::Func;
use super::pat::PropKey;
use super::Node;
use std::rc::Rc;

#[derive(Debug)]
pub struct ClassDef {
  pub name: Option<String>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug)]
pub struct ClassMember {
  pub kind: MethodKind,
  pub is_static: bool,
  pub key: PropKey,
  pub func: Rc<Node<Func>>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MethodKind {
  Constructor,
  Method,
  /// Parsed but rejected at evaluation time.
  Get,
  /// Parsed but rejected at evaluation time.
  Set,
}
