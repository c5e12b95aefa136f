use super::expr::Expr;
use super::pat::Pat;
use super::stmt::Stmt;
use super::Node;

/// A function definition shared by declarations, expressions, arrows, and
/// class methods.
///
/// Wrapped in `Rc` at each referencing node so runtime function values can
/// share the definition without cloning the tree.
#[derive(Debug)]
pub struct Func {
  pub name: Option<String>,
  pub params: Vec<Node<Param>>,
  pub body: FuncBody,
  pub is_async: bool,
  /// Arrow functions do not bind `this` on call.
  pub is_arrow: bool,
}

#[derive(Debug)]
pub struct Param {
  pub pattern: Node<Pat>,
  /// Parsed but not evaluated; calls reject parameter defaults.
  pub default: Option<Node<Expr>>,
  pub rest: bool,
}

#[derive(Debug)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  /// Concise arrow body: `x => x + 1`.
  Expr(Node<Expr>),
}
