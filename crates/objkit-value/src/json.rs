//! Conversion between [`Value`] and `serde_json::Value`.

use std::collections::HashSet;

use serde_json::{Map, Number};
use thiserror::Error;

use crate::array::Array;
use crate::object::Object;
use crate::value::Value;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToJsonError {
    #[error("cannot serialize a bigint")]
    BigInt,
    #[error("cannot serialize a cyclic structure")]
    Cyclic,
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from(&json)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::from(s.as_str()),
            serde_json::Value::Array(items) => {
                Value::Array(items.iter().map(Value::from).collect::<Array>())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.as_str(), Value::from(v)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl Value {
    /// Export to JSON.
    ///
    /// Undefined, functions and symbols are omitted from objects and become
    /// `null` inside arrays; non-finite numbers become `null`; dates become
    /// RFC 3339 strings; regexps and errors export their enumerable
    /// properties only. Bigints and cycles are errors.
    ///
    /// # Example
    ///
    /// ```
    /// use objkit_value::Value;
    /// use serde_json::json;
    ///
    /// let value = Value::from(json!({"a": [1, null, "x"]}));
    /// assert_eq!(value.to_json().unwrap(), json!({"a": [1, null, "x"]}));
    /// ```
    pub fn to_json(&self) -> Result<serde_json::Value, ToJsonError> {
        let mut stack = HashSet::new();
        to_json_inner(self, &mut stack).map(|v| v.unwrap_or(serde_json::Value::Null))
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n == n.trunc() && n.abs() < 9_007_199_254_740_992.0 {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// `None` marks a value that is skipped in objects.
fn to_json_inner(
    value: &Value,
    stack: &mut HashSet<usize>,
) -> Result<Option<serde_json::Value>, ToJsonError> {
    let json = match value {
        Value::Undefined | Value::Function(_) | Value::Symbol(_) => return Ok(None),
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::BigInt(_) => return Err(ToJsonError::BigInt),
        Value::Boxed(boxed) => return to_json_inner(&boxed.value_of(), stack),
        Value::Date(d) => match d.to_datetime() {
            Some(at) => serde_json::Value::String(at.to_rfc3339()),
            None => serde_json::Value::Null,
        },
        Value::RegExp(_) => serde_json::Value::Object(Map::new()),
        Value::Error(err) => {
            if !stack.insert(err.id()) {
                return Err(ToJsonError::Cyclic);
            }
            let mut map = Map::new();
            for key in err.keys() {
                let (Some(name), Some(item)) = (key.as_str(), err.get(&key)) else {
                    continue;
                };
                if let Some(json) = to_json_inner(&item, stack)? {
                    map.insert(name.to_string(), json);
                }
            }
            stack.remove(&err.id());
            serde_json::Value::Object(map)
        }
        Value::Array(arr) => {
            if !stack.insert(arr.id()) {
                return Err(ToJsonError::Cyclic);
            }
            let mut items = Vec::with_capacity(arr.len());
            for item in arr.to_vec() {
                items.push(to_json_inner(&item, stack)?.unwrap_or(serde_json::Value::Null));
            }
            stack.remove(&arr.id());
            serde_json::Value::Array(items)
        }
        Value::Object(obj) => {
            if !stack.insert(obj.id()) {
                return Err(ToJsonError::Cyclic);
            }
            let mut map = Map::new();
            for (key, item) in obj.entries() {
                let Some(name) = key.as_str() else {
                    continue;
                };
                if let Some(json) = to_json_inner(&item, stack)? {
                    map.insert(name.to_string(), json);
                }
            }
            stack.remove(&obj.id());
            serde_json::Value::Object(map)
        }
    };
    Ok(Some(json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, ErrorValue, Function, PropertyKey, Symbol};
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_order() {
        let value = Value::from(json!({"z": 1, "a": {"b": [true, null]}}));
        let obj = value.as_object().unwrap();
        assert_eq!(obj.keys(), vec![PropertyKey::from("z"), PropertyKey::from("a")]);
        let inner = obj.get(&"a".into()).unwrap();
        let arr = inner.as_object().unwrap().get(&"b".into()).unwrap();
        assert_eq!(arr.as_array().unwrap().to_vec(), vec![Value::Bool(true), Value::Null]);
    }

    #[test]
    fn test_to_json_skips_and_nulls() {
        let obj = Object::new();
        obj.set("u", Value::Undefined);
        obj.set("f", Function::new("f", |_, _| Value::Undefined));
        obj.set(Symbol::new(None), 1);
        obj.set("n", f64::NAN);
        let arr: Array = vec![Value::Undefined, Value::from(Symbol::new(None)), Value::from(2)]
            .into_iter()
            .collect();
        obj.set("arr", arr);
        obj.set("when", Date::from_millis(0.0));

        assert_eq!(
            Value::from(obj).to_json().unwrap(),
            json!({"n": null, "arr": [null, null, 2], "when": "1970-01-01T00:00:00+00:00"})
        );
    }

    #[test]
    fn test_to_json_errors() {
        assert_eq!(Value::BigInt(1).to_json(), Err(ToJsonError::BigInt));

        let obj = Object::new();
        obj.set("self", &obj);
        assert_eq!(Value::from(&obj).to_json(), Err(ToJsonError::Cyclic));
        // Break the cycle so the allocation is released.
        obj.remove(&"self".into());
    }

    #[test]
    fn test_error_cycles_are_reported() {
        let err = ErrorValue::new("Error", "boom");
        err.set("self", err.clone());
        assert_eq!(Value::from(err.clone()).to_json(), Err(ToJsonError::Cyclic));

        // A cycle running through an object property of the error.
        let holder = Object::new();
        holder.set("cause", err.clone());
        err.set("self", &holder);
        assert_eq!(Value::from(&holder).to_json(), Err(ToJsonError::Cyclic));
        err.set("self", Value::Null);
    }

    #[test]
    fn test_error_properties_export() {
        let err = ErrorValue::new("Error", "boom");
        err.set("code", 7);
        let obj = Object::new();
        obj.set("a", err.clone());
        obj.set("b", err);
        assert_eq!(Value::from(obj).to_json().unwrap(), json!({"a": {"code": 7}, "b": {"code": 7}}));
    }

    #[test]
    fn test_shared_subtree_is_not_a_cycle() {
        let shared = Value::from(json!({"k": 1}));
        let obj = Object::new();
        obj.set("a", shared.clone());
        obj.set("b", shared);
        assert_eq!(Value::from(obj).to_json().unwrap(), json!({"a": {"k": 1}, "b": {"k": 1}}));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(Value::from(3.0).to_json().unwrap(), json!(3));
        assert_eq!(Value::from(2.5).to_json().unwrap(), json!(2.5));
        assert_eq!(Value::Number(f64::INFINITY).to_json().unwrap(), json!(null));
    }
}
