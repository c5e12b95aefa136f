use super::class::ClassDef;
use super::expr::Expr;
use super::func::Func;
use super::pat::Pat;
use super::Node;
use std::rc::Rc;

#[derive(Debug)]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Break(Node<BreakStmt>),
  ClassDecl(Node<ClassDeclStmt>),
  Continue(Node<ContinueStmt>),
  Empty(Node<EmptyStmt>),
  Expr(Node<ExprStmt>),
  For(Node<ForStmt>),
  ForIn(Node<ForEachStmt>),
  ForOf(Node<ForEachStmt>),
  FuncDecl(Node<FuncDeclStmt>),
  If(Node<IfStmt>),
  Label(Node<LabelStmt>),
  Return(Node<ReturnStmt>),
  Switch(Node<SwitchStmt>),
  Throw(Node<ThrowStmt>),
  Try(Node<TryStmt>),
  VarDecl(Node<VarDecl>),
  While(Node<WhileStmt>),
}

#[derive(Debug)]
pub struct BlockStmt {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug)]
pub struct EmptyStmt {}

#[derive(Debug)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

#[derive(Debug)]
pub struct VarDecl {
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VarDeclMode {
  Let,
  Const,
}

#[derive(Debug)]
pub struct VarDeclarator {
  pub pattern: Node<Pat>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Debug)]
pub struct FuncDeclStmt {
  /// Redundantly stores the declared name (also present on the definition)
  /// so binding does not need to inspect the shared definition.
  pub name: String,
  pub func: Rc<Node<Func>>,
}

#[derive(Debug)]
pub struct ClassDeclStmt {
  pub name: String,
  pub def: Node<ClassDef>,
}

#[derive(Debug)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Debug)]
pub struct BreakStmt {
  pub label: Option<String>,
}

#[derive(Debug)]
pub struct ContinueStmt {
  pub label: Option<String>,
}

#[derive(Debug)]
pub struct ThrowStmt {
  pub value: Node<Expr>,
}

#[derive(Debug)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Node<Stmt>,
  pub alternate: Option<Node<Stmt>>,
}

#[derive(Debug)]
pub struct WhileStmt {
  pub condition: Node<Expr>,
  pub body: Node<Stmt>,
}

#[derive(Debug)]
pub struct ForStmt {
  pub init: ForInit,
  pub condition: Option<Node<Expr>>,
  pub update: Option<Node<Expr>>,
  pub body: Node<Stmt>,
}

#[derive(Debug)]
pub enum ForInit {
  None,
  Expr(Node<Expr>),
  Decl(Node<VarDecl>),
}

/// Head and body shared by `for...in` and `for...of`.
#[derive(Debug)]
pub struct ForEachStmt {
  /// `Some` when the head declares its binding (`for (let x of ...)`);
  /// `None` when it assigns to an existing target (`for (x of ...)`).
  pub decl_mode: Option<VarDeclMode>,
  pub pattern: Node<Pat>,
  pub subject: Node<Expr>,
  pub body: Node<Stmt>,
}

#[derive(Debug)]
pub struct SwitchStmt {
  pub discriminant: Node<Expr>,
  pub branches: Vec<Node<SwitchBranch>>,
}

#[derive(Debug)]
pub struct SwitchBranch {
  /// `None` marks the `default` clause.
  pub case: Option<Node<Expr>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug)]
pub struct TryStmt {
  pub wrapped: Node<BlockStmt>,
  pub catch: Option<Node<CatchClause>>,
  pub finally: Option<Node<BlockStmt>>,
}

#[derive(Debug)]
pub struct CatchClause {
  pub parameter: Option<Node<Pat>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug)]
pub struct LabelStmt {
  pub name: String,
  pub statement: Node<Stmt>,
}
