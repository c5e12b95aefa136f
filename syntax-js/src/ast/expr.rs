use super::class::ClassDef;
use super::func::Func;
use super::op::{BinaryOp, CompoundOp, LogicalOp, UnaryOp, UpdateOp};
use super::pat::{Pat, PropKey};
use super::Node;
use std::rc::Rc;

#[derive(Debug)]
pub enum Expr {
  Arr(Node<ArrExpr>),
  Assign(Node<AssignExpr>),
  Await(Node<AwaitExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  /// Wraps the outermost expression of an optional chain; a nullish receiver
  /// anywhere in the chain short-circuits the whole wrapped expression to
  /// `undefined`.
  Chain(Node<ChainExpr>),
  Class(Node<ClassExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitStr(Node<LitStrExpr>),
  LitUndefined(Node<LitUndefinedExpr>),
  Logical(Node<LogicalExpr>),
  Member(Node<MemberExpr>),
  New(Node<NewExpr>),
  Obj(Node<ObjExpr>),
  Seq(Node<SeqExpr>),
  SuperCall(Node<SuperCallExpr>),
  SuperMember(Node<SuperMemberExpr>),
  Template(Node<TemplateExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  Update(Node<UpdateExpr>),
}

#[derive(Debug)]
pub struct LitBoolExpr {
  pub value: bool,
}

#[derive(Debug)]
pub struct LitNullExpr {}

#[derive(Debug)]
pub struct LitUndefinedExpr {}

#[derive(Debug)]
pub struct LitNumExpr {
  pub value: f64,
}

#[derive(Debug)]
pub struct LitStrExpr {
  pub value: String,
}

#[derive(Debug)]
pub struct IdExpr {
  pub name: String,
}

#[derive(Debug)]
pub struct ThisExpr {}

#[derive(Debug)]
pub struct BinaryExpr {
  pub operator: BinaryOp,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug)]
pub struct LogicalExpr {
  pub operator: LogicalOp,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug)]
pub struct UnaryExpr {
  pub operator: UnaryOp,
  pub argument: Node<Expr>,
}

#[derive(Debug)]
pub struct UpdateExpr {
  pub operator: UpdateOp,
  pub prefix: bool,
  pub argument: Node<Expr>,
}

#[derive(Debug)]
pub struct MemberExpr {
  pub optional: bool,
  pub object: Node<Expr>,
  pub property: String,
}

#[derive(Debug)]
pub struct ComputedMemberExpr {
  pub optional: bool,
  pub object: Node<Expr>,
  pub index: Node<Expr>,
}

#[derive(Debug)]
pub struct ChainExpr {
  pub expr: Node<Expr>,
}

#[derive(Debug)]
pub struct CallExpr {
  pub optional: bool,
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug)]
pub struct CallArg {
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug)]
pub struct NewExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug)]
pub struct AssignExpr {
  /// `None` for plain `=`; the binary operator of a compound assignment
  /// otherwise.
  pub operator: Option<CompoundOp>,
  pub target: Node<Pat>,
  pub value: Node<Expr>,
}

#[derive(Debug)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug)]
pub struct SeqExpr {
  pub expressions: Vec<Node<Expr>>,
}

#[derive(Debug)]
pub struct ArrExpr {
  /// `None` entries are holes and evaluate to `undefined`.
  pub elements: Vec<Option<ArrElem>>,
}

#[derive(Debug)]
pub struct ArrElem {
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug)]
pub struct ObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug)]
pub enum ObjMember {
  Prop {
    key: PropKey,
    value: Node<Expr>,
  },
  /// `{ a }` — key `a`, value loaded from the binding `a`.
  Shorthand {
    name: String,
  },
  Spread {
    value: Node<Expr>,
  },
}

#[derive(Debug)]
pub struct FuncExpr {
  pub func: Rc<Node<Func>>,
}

#[derive(Debug)]
pub struct ClassExpr {
  pub def: Node<ClassDef>,
}

#[derive(Debug)]
pub struct TemplateExpr {
  pub parts: Vec<TemplatePart>,
}

#[derive(Debug)]
pub enum TemplatePart {
  Str(String),
  Expr(Node<Expr>),
}

#[derive(Debug)]
pub struct AwaitExpr {
  pub argument: Node<Expr>,
}

#[derive(Debug)]
pub struct SuperCallExpr {
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug)]
pub struct SuperMemberExpr {
  pub property: String,
}

impl Expr {
  /// The source range of the underlying node.
  pub fn loc(&self) -> crate::loc::Loc {
    match self {
      Expr::Arr(n) => n.loc,
      Expr::Assign(n) => n.loc,
      Expr::Await(n) => n.loc,
      Expr::Binary(n) => n.loc,
      Expr::Call(n) => n.loc,
      Expr::Chain(n) => n.loc,
      Expr::Class(n) => n.loc,
      Expr::ComputedMember(n) => n.loc,
      Expr::Cond(n) => n.loc,
      Expr::Func(n) => n.loc,
      Expr::Id(n) => n.loc,
      Expr::LitBool(n) => n.loc,
      Expr::LitNull(n) => n.loc,
      Expr::LitNum(n) => n.loc,
      Expr::LitStr(n) => n.loc,
      Expr::LitUndefined(n) => n.loc,
      Expr::Logical(n) => n.loc,
      Expr::Member(n) => n.loc,
      Expr::New(n) => n.loc,
      Expr::Obj(n) => n.loc,
      Expr::Seq(n) => n.loc,
      Expr::SuperCall(n) => n.loc,
      Expr::SuperMember(n) => n.loc,
      Expr::Template(n) => n.loc,
      Expr::This(n) => n.loc,
      Expr::Unary(n) => n.loc,
      Expr::Update(n) => n.loc,
    }
  }
}
