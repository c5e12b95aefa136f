use crate::class::ClassRef;
use crate::error::ErrorKind;
use crate::function::FnValue;
use crate::promise::JsPromise;
use ahash::RandomState;
use indexmap::IndexMap;
use itertools::Itertools;
use std::any::Any;
use std::cell::{Ref, RefCell};
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

pub type JsString = Rc<str>;

/// Property table preserving first-insertion key order.
pub type PropMap = IndexMap<String, Value, RandomState>;

/// A runtime value.
///
/// Containers are cheap reference-counted handles; cloning a `Value` never
/// deep-copies.
#[derive(Clone)]
pub enum Value {
  Undefined,
  Null,
  Bool(bool),
  Number(f64),
  String(JsString),
  Array(ArrayRef),
  Object(ObjectRef),
  Function(FnValue),
  Class(ClassRef),
  Error(ErrorRef),
  Promise(JsPromise),
  /// Caller-supplied opaque state; the evaluator only moves it around.
  Host(HostRef),
}

impl Value {
  pub fn str(s: impl Into<JsString>) -> Value {
    Value::String(s.into())
  }

  pub fn type_of(&self) -> &'static str {
    match self {
      Value::Undefined => "undefined",
      Value::Null => "object",
      Value::Bool(_) => "boolean",
      Value::Number(_) => "number",
      Value::String(_) => "string",
      Value::Array(_) => "object",
      Value::Object(_) => "object",
      Value::Function(_) => "function",
      Value::Class(_) => "function",
      Value::Error(_) => "object",
      Value::Promise(_) => "object",
      Value::Host(_) => "object",
    }
  }

  pub fn is_nullish(&self) -> bool {
    matches!(self, Value::Undefined | Value::Null)
  }

  pub fn is_truthy(&self) -> bool {
    match self {
      Value::Undefined | Value::Null => false,
      Value::Bool(b) => *b,
      Value::Number(n) => *n != 0.0 && !n.is_nan(),
      Value::String(s) => !s.is_empty(),
      _ => true,
    }
  }
}

#[derive(Clone)]
pub struct ArrayRef(Rc<RefCell<Vec<Value>>>);

impl ArrayRef {
  pub fn new(elements: Vec<Value>) -> ArrayRef {
    ArrayRef(Rc::new(RefCell::new(elements)))
  }

  pub fn elements(&self) -> Ref<'_, Vec<Value>> {
    self.0.borrow()
  }

  /// A snapshot of the current elements; iteration works on this copy so the
  /// loop body may freely mutate the array.
  pub fn snapshot(&self) -> Vec<Value> {
    self.0.borrow().clone()
  }

  pub fn len(&self) -> usize {
    self.0.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.borrow().is_empty()
  }

  pub fn get(&self, index: usize) -> Option<Value> {
    self.0.borrow().get(index).cloned()
  }

  /// Store at `index`, filling any gap with `undefined` holes.
  pub fn set(&self, index: usize, value: Value) {
    let mut elements = self.0.borrow_mut();
    if index >= elements.len() {
      elements.resize(index + 1, Value::Undefined);
    }
    elements[index] = value;
  }

  pub fn set_len(&self, len: usize) {
    self.0.borrow_mut().resize(len, Value::Undefined);
  }

  pub fn push(&self, value: Value) {
    self.0.borrow_mut().push(value);
  }

  pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

struct ObjectData {
  properties: RefCell<PropMap>,
  /// Prototype link: class instances point at their class's method tables.
  proto: RefCell<Option<ClassRef>>,
}

#[derive(Clone)]
pub struct ObjectRef(Rc<ObjectData>);

impl ObjectRef {
  pub fn new() -> ObjectRef {
    ObjectRef(Rc::new(ObjectData {
      properties: RefCell::new(PropMap::default()),
      proto: RefCell::new(None),
    }))
  }

  pub fn with_proto(class: ClassRef) -> ObjectRef {
    let obj = ObjectRef::new();
    *obj.0.proto.borrow_mut() = Some(class);
    obj
  }

  pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> ObjectRef {
    let obj = ObjectRef::new();
    {
      let mut props = obj.0.properties.borrow_mut();
      for (key, value) in entries {
        props.insert(key, value);
      }
    }
    obj
  }

  pub fn proto(&self) -> Option<ClassRef> {
    self.0.proto.borrow().clone()
  }

  pub fn get_own(&self, key: &str) -> Option<Value> {
    self.0.properties.borrow().get(key).cloned()
  }

  pub fn has_own(&self, key: &str) -> bool {
    self.0.properties.borrow().contains_key(key)
  }

  /// Insert or overwrite; an overwritten key keeps its original position.
  pub fn set(&self, key: impl Into<String>, value: Value) {
    self.0.properties.borrow_mut().insert(key.into(), value);
  }

  pub fn delete(&self, key: &str) -> bool {
    self.0.properties.borrow_mut().shift_remove(key).is_some()
  }

  pub fn keys(&self) -> Vec<String> {
    self.0.properties.borrow().keys().cloned().collect()
  }

  pub fn entries(&self) -> Vec<(String, Value)> {
    self
      .0
      .properties
      .borrow()
      .iter()
      .map(|(k, v)| (k.clone(), v.clone()))
      .collect()
  }

  pub fn len(&self) -> usize {
    self.0.properties.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.properties.borrow().is_empty()
  }

  pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl Default for ObjectRef {
  fn default() -> Self {
    ObjectRef::new()
  }
}

pub struct ErrorData {
  pub kind: ErrorKind,
  pub message: String,
}

#[derive(Clone)]
pub struct ErrorRef(Rc<ErrorData>);

impl ErrorRef {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> ErrorRef {
    ErrorRef(Rc::new(ErrorData {
      kind,
      message: message.into(),
    }))
  }

  pub fn kind(&self) -> ErrorKind {
    self.0.kind
  }

  pub fn message(&self) -> &str {
    &self.0.message
  }

  pub fn ptr_eq(&self, other: &ErrorRef) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

/// Opaque host state injected through the globals table.
#[derive(Clone)]
pub struct HostRef(Rc<dyn Any>);

impl HostRef {
  pub fn new(value: impl Any) -> HostRef {
    HostRef(Rc::new(value))
  }

  pub fn downcast<T: Any>(&self) -> Option<&T> {
    self.0.downcast_ref::<T>()
  }

  pub fn ptr_eq(&self, other: &HostRef) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl PartialEq for Value {
  fn eq(&self, other: &Value) -> bool {
    strict_equals(self, other)
  }
}

impl Debug for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&inspect(self))
  }
}

/// Strict equality (`===`).
pub fn strict_equals(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Undefined, Value::Undefined) => true,
    (Value::Null, Value::Null) => true,
    (Value::Bool(x), Value::Bool(y)) => x == y,
    (Value::Number(x), Value::Number(y)) => x == y,
    (Value::String(x), Value::String(y)) => x == y,
    (Value::Array(x), Value::Array(y)) => x.ptr_eq(y),
    (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
    (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
    (Value::Class(x), Value::Class(y)) => x.ptr_eq(y),
    (Value::Error(x), Value::Error(y)) => x.ptr_eq(y),
    (Value::Promise(x), Value::Promise(y)) => x.ptr_eq(y),
    (Value::Host(x), Value::Host(y)) => x.ptr_eq(y),
    _ => false,
  }
}

/// Loose equality (`==`): same-type comparisons fall back to strict equality,
/// mixed primitives convert numerically, objects convert via `to_primitive`.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
  use Value::*;
  match (a, b) {
    (Undefined | Null, Undefined | Null) => true,
    (Bool(_), Bool(_))
    | (Number(_), Number(_))
    | (String(_), String(_))
    | (Array(_), Array(_))
    | (Object(_), Object(_))
    | (Function(_), Function(_))
    | (Class(_), Class(_))
    | (Error(_), Error(_))
    | (Promise(_), Promise(_))
    | (Host(_), Host(_)) => strict_equals(a, b),

    (Number(_), String(_)) | (String(_), Number(_)) | (Bool(_), _) | (_, Bool(_)) => {
      let (x, y) = (to_number(a), to_number(b));
      x == y
    }

    (Array(_) | Object(_), Number(_) | String(_)) => loose_equals(&to_primitive(a), b),
    (Number(_) | String(_), Array(_) | Object(_)) => loose_equals(a, &to_primitive(b)),

    _ => false,
  }
}

/// `ToPrimitive` for the supported types; containers stringify.
pub fn to_primitive(value: &Value) -> Value {
  match value {
    Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Class(_)
    | Value::Error(_) | Value::Promise(_) | Value::Host(_) => {
      Value::String(to_display_string(value).into())
    }
    other => other.clone(),
  }
}

/// `ToNumber`. Never faults: values without a numeric interpretation produce
/// `NaN`.
pub fn to_number(value: &Value) -> f64 {
  match value {
    Value::Undefined => f64::NAN,
    Value::Null => 0.0,
    Value::Bool(b) => {
      if *b {
        1.0
      } else {
        0.0
      }
    }
    Value::Number(n) => *n,
    Value::String(s) => string_to_number(s),
    other => {
      let prim = to_primitive(other);
      if let Value::String(s) = &prim {
        string_to_number(s)
      } else {
        to_number(&prim)
      }
    }
  }
}

fn string_to_number(raw: &str) -> f64 {
  let trimmed = raw.trim_matches(is_language_whitespace);
  if trimmed.is_empty() {
    return 0.0;
  }

  match trimmed {
    "Infinity" | "+Infinity" => return f64::INFINITY,
    "-Infinity" => return f64::NEG_INFINITY,
    _ => {}
  }

  // Guard against Rust accepting "inf"/"infinity" case-insensitively.
  let rest = trimmed
    .strip_prefix('+')
    .or_else(|| trimmed.strip_prefix('-'))
    .unwrap_or(trimmed);
  if rest.eq_ignore_ascii_case("inf") || rest.eq_ignore_ascii_case("infinity") {
    return f64::NAN;
  }

  if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
    return syntax_js::num::parse_radix(hex, 16).unwrap_or(f64::NAN);
  }
  if let Some(bin) = trimmed.strip_prefix("0b").or_else(|| trimmed.strip_prefix("0B")) {
    return syntax_js::num::parse_radix(bin, 2).unwrap_or(f64::NAN);
  }
  if let Some(oct) = trimmed.strip_prefix("0o").or_else(|| trimmed.strip_prefix("0O")) {
    return syntax_js::num::parse_radix(oct, 8).unwrap_or(f64::NAN);
  }

  trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn is_language_whitespace(c: char) -> bool {
  matches!(
    c,
    '\u{0009}'
      | '\u{000A}'
      | '\u{000B}'
      | '\u{000C}'
      | '\u{000D}'
      | '\u{0020}'
      | '\u{00A0}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200A}'
      | '\u{2028}'
      | '\u{2029}'
      | '\u{202F}'
      | '\u{205F}'
      | '\u{3000}'
      | '\u{FEFF}'
  )
}

/// `ToInt32` (modulo 2^32, signed).
pub fn to_int32(value: &Value) -> i32 {
  let n = to_number(value);
  if !n.is_finite() || n == 0.0 {
    return 0;
  }
  let n = n.trunc();
  (n as i64 as u64 & 0xffff_ffff) as u32 as i32
}

/// `ToUint32`.
pub fn to_uint32(value: &Value) -> u32 {
  to_int32(value) as u32
}

/// String coercion, as used by template literals and the `+` operator.
pub fn to_display_string(value: &Value) -> String {
  match value {
    Value::Undefined => "undefined".to_string(),
    Value::Null => "null".to_string(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => syntax_js::num::format_f64(*n),
    Value::String(s) => s.to_string(),
    Value::Array(a) => {
      let elements = a.snapshot();
      elements
        .iter()
        .map(|v| {
          if v.is_nullish() {
            String::new()
          } else {
            to_display_string(v)
          }
        })
        .join(",")
    }
    Value::Object(_) => "[object Object]".to_string(),
    Value::Function(f) => {
      let name = f.name();
      if name.is_empty() {
        "function () { ... }".to_string()
      } else {
        format!("function {name}() {{ ... }}")
      }
    }
    Value::Class(c) => format!("class {}", c.name()),
    Value::Error(e) => {
      if e.message().is_empty() {
        e.kind().name().to_string()
      } else {
        format!("{}: {}", e.kind(), e.message())
      }
    }
    Value::Promise(_) => "[object Promise]".to_string(),
    Value::Host(_) => "[object Host]".to_string(),
  }
}

/// Convert an arbitrary value to an object property key.
pub fn to_property_key(value: &Value) -> String {
  to_display_string(value)
}

/// Developer-facing rendering used by `Debug`, the REPL, and `console.log`:
/// strings are quoted, containers print their contents.
pub fn inspect(value: &Value) -> String {
  inspect_depth(value, 0)
}

fn inspect_depth(value: &Value, depth: usize) -> String {
  match value {
    Value::String(s) => format!("'{s}'"),
    Value::Array(a) => {
      if depth > 3 {
        return "[...]".to_string();
      }
      let elements = a.snapshot();
      if elements.is_empty() {
        return "[]".to_string();
      }
      format!(
        "[{}]",
        elements
          .iter()
          .map(|v| inspect_depth(v, depth + 1))
          .join(", ")
      )
    }
    Value::Object(o) => {
      if depth > 3 {
        return "{...}".to_string();
      }
      let entries = o.entries();
      if entries.is_empty() {
        return "{}".to_string();
      }
      format!(
        "{{ {} }}",
        entries
          .iter()
          .map(|(k, v)| format!("{k}: {}", inspect_depth(v, depth + 1)))
          .join(", ")
      )
    }
    other => to_display_string(other),
  }
}
