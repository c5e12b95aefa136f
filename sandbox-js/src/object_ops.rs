use crate::completion::Thrown;
use crate::function::FnValue;
use crate::value::{to_display_string, Value};

/// Generic property read used by member access and the pattern binder.
///
/// Missing properties read as `undefined`; only nullish receivers fault.
pub(crate) fn get_property(object: &Value, key: &str) -> Result<Value, Thrown> {
  match object {
    Value::Undefined | Value::Null => Err(Thrown::type_error(format!(
      "cannot read property '{key}' of {}",
      to_display_string(object)
    ))),
    Value::Object(o) => {
      if let Some(value) = o.get_own(key) {
        return Ok(value);
      }
      // Class instances resolve methods through the prototype chain.
      if let Some(class) = o.proto() {
        if let Some(method) = class.find_method(key) {
          return Ok(Value::Function(FnValue::User(method)));
        }
      }
      Ok(Value::Undefined)
    }
    Value::Array(a) => {
      if key == "length" {
        return Ok(Value::Number(a.len() as f64));
      }
      match key.parse::<usize>() {
        Ok(index) => Ok(a.get(index).unwrap_or(Value::Undefined)),
        Err(_) => Ok(Value::Undefined),
      }
    }
    Value::String(s) => {
      if key == "length" {
        return Ok(Value::Number(s.chars().count() as f64));
      }
      match key.parse::<usize>() {
        Ok(index) => Ok(
          s.chars()
            .nth(index)
            .map(|c| Value::str(c.to_string()))
            .unwrap_or(Value::Undefined),
        ),
        Err(_) => Ok(Value::Undefined),
      }
    }
    Value::Class(c) => {
      if key == "name" {
        return Ok(Value::str(c.name()));
      }
      Ok(
        c.find_static(key)
          .map(|f| Value::Function(FnValue::User(f)))
          .unwrap_or(Value::Undefined),
      )
    }
    Value::Function(f) => {
      if key == "name" {
        return Ok(Value::str(f.name()));
      }
      Ok(Value::Undefined)
    }
    Value::Error(e) => match key {
      "name" => Ok(Value::str(e.kind().name())),
      "message" => Ok(Value::str(e.message())),
      _ => Ok(Value::Undefined),
    },
    _ => Ok(Value::Undefined),
  }
}

pub(crate) fn set_property(object: &Value, key: &str, value: Value) -> Result<(), Thrown> {
  match object {
    Value::Object(o) => {
      o.set(key, value);
      Ok(())
    }
    Value::Array(a) => {
      if key == "length" {
        let len = crate::value::to_number(&value);
        if len.is_finite() && len >= 0.0 && len.fract() == 0.0 {
          a.set_len(len as usize);
          return Ok(());
        }
        return Err(Thrown::type_error("invalid array length"));
      }
      match key.parse::<usize>() {
        Ok(index) => {
          a.set(index, value);
          Ok(())
        }
        // Arrays carry no named properties beyond `length`.
        Err(_) => Ok(()),
      }
    }
    other => Err(Thrown::type_error(format!(
      "cannot set property '{key}' on {}",
      to_display_string(other)
    ))),
  }
}

pub(crate) fn delete_property(object: &Value, key: &str) -> bool {
  match object {
    Value::Object(o) => o.delete(key),
    Value::Array(a) => match key.parse::<usize>() {
      Ok(index) if index < a.len() => {
        a.set(index, Value::Undefined);
        true
      }
      _ => false,
    },
    _ => false,
  }
}

/// `in` operator support.
pub(crate) fn has_property(object: &Value, key: &str) -> Result<bool, Thrown> {
  match object {
    Value::Object(o) => {
      if o.has_own(key) {
        return Ok(true);
      }
      Ok(
        o.proto()
          .map(|class| class.find_method(key).is_some())
          .unwrap_or(false),
      )
    }
    Value::Array(a) => {
      if key == "length" {
        return Ok(true);
      }
      Ok(key.parse::<usize>().map(|i| i < a.len()).unwrap_or(false))
    }
    Value::Class(c) => Ok(c.find_static(key).is_some()),
    other => Err(Thrown::type_error(format!(
      "cannot use 'in' on {}",
      to_display_string(other)
    ))),
  }
}

/// Enumerable keys for `for...in`: own keys in insertion order. Class methods
/// are not enumerable, so instances contribute only their own properties.
pub(crate) fn enumerable_keys(object: &Value) -> Vec<String> {
  match object {
    Value::Object(o) => o.keys(),
    Value::Array(a) => (0..a.len()).map(|i| i.to_string()).collect(),
    Value::String(s) => (0..s.chars().count()).map(|i| i.to_string()).collect(),
    _ => Vec::new(),
  }
}

/// The values an iterable yields, snapshotted; used by spread, `for...of`,
/// and array destructuring. `action` names the construct for the fault
/// message.
pub(crate) fn iterable_values(value: &Value, action: &str) -> Result<Vec<Value>, Thrown> {
  match value {
    Value::Array(a) => Ok(a.snapshot()),
    Value::String(s) => Ok(s.chars().map(|c| Value::str(c.to_string())).collect()),
    other => Err(Thrown::type_error(format!(
      "{action} of non-iterable value: {}",
      to_display_string(other)
    ))),
  }
}
