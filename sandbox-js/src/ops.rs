use crate::completion::Thrown;
use crate::object_ops::has_property;
use crate::value::{
  loose_equals, strict_equals, to_display_string, to_int32, to_number, to_primitive, to_uint32,
  Value,
};
use syntax_js::ast::op::BinaryOp;

/// Apply a (non-short-circuiting) binary operator to evaluated operands.
pub(crate) fn binary_op(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, Thrown> {
  Ok(match op {
    BinaryOp::Add => add_operator(left, right),
    BinaryOp::Sub => Value::Number(to_number(left) - to_number(right)),
    BinaryOp::Mul => Value::Number(to_number(left) * to_number(right)),
    BinaryOp::Div => Value::Number(to_number(left) / to_number(right)),
    BinaryOp::Rem => Value::Number(to_number(left) % to_number(right)),
    BinaryOp::Exp => Value::Number(to_number(left).powf(to_number(right))),

    BinaryOp::StrictEq => Value::Bool(strict_equals(left, right)),
    BinaryOp::StrictNeq => Value::Bool(!strict_equals(left, right)),
    BinaryOp::LooseEq => Value::Bool(loose_equals(left, right)),
    BinaryOp::LooseNeq => Value::Bool(!loose_equals(left, right)),

    BinaryOp::Lt => compare(left, right, |o| o == std::cmp::Ordering::Less),
    BinaryOp::Gt => compare(left, right, |o| o == std::cmp::Ordering::Greater),
    BinaryOp::LtEq => compare(left, right, |o| o != std::cmp::Ordering::Greater),
    BinaryOp::GtEq => compare(left, right, |o| o != std::cmp::Ordering::Less),

    BinaryOp::BitAnd => Value::Number((to_int32(left) & to_int32(right)) as f64),
    BinaryOp::BitOr => Value::Number((to_int32(left) | to_int32(right)) as f64),
    BinaryOp::BitXor => Value::Number((to_int32(left) ^ to_int32(right)) as f64),
    BinaryOp::Shl => Value::Number((to_int32(left) << (to_uint32(right) & 31)) as f64),
    BinaryOp::Shr => Value::Number((to_int32(left) >> (to_uint32(right) & 31)) as f64),
    BinaryOp::ShrUnsigned => {
      Value::Number((to_uint32(left) >> (to_uint32(right) & 31)) as f64)
    }

    BinaryOp::In => {
      let key = crate::value::to_property_key(left);
      Value::Bool(has_property(right, &key)?)
    }
    BinaryOp::Instanceof => instanceof(left, right)?,
  })
}

/// `+`: string concatenation when either primitive operand is a string,
/// numeric addition otherwise.
fn add_operator(left: &Value, right: &Value) -> Value {
  let lp = to_primitive(left);
  let rp = to_primitive(right);
  if matches!(lp, Value::String(_)) || matches!(rp, Value::String(_)) {
    let mut s = to_display_string(&lp);
    s.push_str(&to_display_string(&rp));
    Value::String(s.into())
  } else {
    Value::Number(to_number(&lp) + to_number(&rp))
  }
}

/// Relational comparison: lexicographic for two strings, numeric otherwise.
/// Any NaN operand compares false.
fn compare(left: &Value, right: &Value, accept: impl Fn(std::cmp::Ordering) -> bool) -> Value {
  if let (Value::String(a), Value::String(b)) = (left, right) {
    return Value::Bool(accept(a.cmp(b)));
  }
  let (a, b) = (to_number(left), to_number(right));
  match a.partial_cmp(&b) {
    Some(ordering) => Value::Bool(accept(ordering)),
    None => Value::Bool(false),
  }
}

fn instanceof(left: &Value, right: &Value) -> Result<Value, Thrown> {
  match right {
    Value::Class(class) => match left {
      Value::Object(obj) => Ok(Value::Bool(class.has_instance(obj))),
      _ => Ok(Value::Bool(false)),
    },
    // Plain functions carry no prototype identity in this model.
    Value::Function(_) => Ok(Value::Bool(false)),
    other => Err(Thrown::type_error(format!(
      "right-hand side of 'instanceof' is not callable: {}",
      to_display_string(other)
    ))),
  }
}
