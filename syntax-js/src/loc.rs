use crate::error::{SyntaxError, SyntaxErrorType};
use std::cmp::{max, min};
use std::ops::{Add, AddAssign};

/// A half-open UTF-8 byte range within the source text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub u32, pub u32);

impl Loc {
  pub const EMPTY: Loc = Loc(0, 0);

  pub fn new(start: u32, end: u32) -> Loc {
    Loc(start, end)
  }

  pub fn len(&self) -> u32 {
    self.1.saturating_sub(self.0)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn error(self, typ: SyntaxErrorType) -> SyntaxError {
    SyntaxError::new(typ, self)
  }

  /// The smallest range covering both `self` and `other`.
  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Loc) -> Loc {
    Loc(min(self.0, rhs.0), max(self.1, rhs.1))
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Loc) {
    self.extend(rhs);
  }
}
