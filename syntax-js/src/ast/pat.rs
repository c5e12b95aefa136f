use super::expr::Expr;
use super::Node;

/// A destructurable binding target.
///
/// `Target` only appears in assignment position (e.g. `[o.x] = a`): it carries
/// a member expression to be stored through rather than a name to bind.
#[derive(Debug)]
pub enum Pat {
  Id(Node<IdPat>),
  Arr(Node<ArrPat>),
  Obj(Node<ObjPat>),
  Target(Node<Expr>),
}

#[derive(Debug)]
pub struct IdPat {
  pub name: String,
}

#[derive(Debug)]
pub struct ArrPat {
  /// `None` entries are elisions: they skip one source element.
  pub elements: Vec<Option<ArrPatElem>>,
  pub rest: Option<Node<Pat>>,
}

#[derive(Debug)]
pub struct ArrPatElem {
  pub target: Node<Pat>,
  /// Parsed but not evaluated; the binder rejects defaults.
  pub default: Option<Node<Expr>>,
}

#[derive(Debug)]
pub struct ObjPat {
  pub properties: Vec<Node<ObjPatProp>>,
  pub rest: Option<Node<Pat>>,
}

#[derive(Debug)]
pub struct ObjPatProp {
  pub key: PropKey,
  pub target: Node<Pat>,
  /// Parsed but not evaluated; the binder rejects defaults.
  pub default: Option<Node<Expr>>,
}

/// A property key in object literals, patterns, and class members.
#[derive(Debug)]
pub enum PropKey {
  /// Identifier, string, or numeric keys, already rendered to their string
  /// form.
  Direct(String),
  Computed(Node<Expr>),
}
