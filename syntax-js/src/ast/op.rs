/// Binary operators, excluding the short-circuiting logical family.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Rem,
  Exp,
  LooseEq,
  LooseNeq,
  StrictEq,
  StrictNeq,
  Lt,
  LtEq,
  Gt,
  GtEq,
  BitAnd,
  BitOr,
  BitXor,
  Shl,
  Shr,
  ShrUnsigned,
  In,
  Instanceof,
}

/// Short-circuiting operators; the right operand is evaluated only on demand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LogicalOp {
  And,
  Or,
  Nullish,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnaryOp {
  Neg,
  Pos,
  Not,
  BitNot,
  Typeof,
  Void,
  Delete,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UpdateOp {
  Increment,
  Decrement,
}

/// The operator half of a compound assignment (`x op= y`); plain `=` is
/// represented as `None` on the assignment node.
pub type CompoundOp = BinaryOp;
