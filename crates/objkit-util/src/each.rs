//! Walking arrays, array-likes and keyed objects.

use std::fmt;
use std::ops::ControlFlow;

use objkit_value::{number_key, number_to_string, PropertyKey, Value};

/// Position handed to an [`each`] callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Index(usize),
    Property(PropertyKey),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Property(key) => write!(f, "{key}"),
        }
    }
}

/// Result of an [`each`] callback. Only an explicit stop halts the walk.
pub trait WalkControl {
    fn keep_walking(self) -> bool;
}

impl WalkControl for () {
    fn keep_walking(self) -> bool {
        true
    }
}

/// `false` stops, `true` continues.
impl WalkControl for bool {
    fn keep_walking(self) -> bool {
        self
    }
}

impl<B, C> WalkControl for ControlFlow<B, C> {
    fn keep_walking(self) -> bool {
        self.is_continue()
    }
}

/// Numeric `length` of an array-like value, if it has one.
fn length_of(value: &Value) -> Option<f64> {
    value.get_own(&PropertyKey::from("length"))?.as_number()
}

/// Check whether `value` is walked by index.
///
/// Arrays always are. Other values qualify when they own a numeric
/// `length` that is `0`, or positive with the last index present.
/// Functions never qualify.
///
/// # Example
///
/// ```
/// use objkit_util::is_array_like;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// assert!(is_array_like(&Value::from(json!([1, 2]))));
/// assert!(is_array_like(&Value::from(json!({"length": 2, "1": "b"}))));
/// assert!(!is_array_like(&Value::from(json!({"length": 2}))));
/// assert!(is_array_like(&Value::from(json!({"length": 0}))));
/// ```
pub fn is_array_like(value: &Value) -> bool {
    match value {
        Value::Function(_) => false,
        Value::Array(_) => true,
        // Strings own a `length`, but only objects are walked as array-likes.
        Value::Object(_) | Value::Error(_) => match length_of(value) {
            Some(len) if len == 0.0 => true,
            Some(len) if len > 0.0 => value.has_own(&number_key(len - 1.0)),
            _ => false,
        },
        _ => false,
    }
}

/// Walk `value`, calling `callback(item, key)` for every element.
///
/// Array-likes are walked by index from `0` while the index is below the
/// current `length`; everything else is walked over its own enumerable keys
/// (string keys first, then symbols). Keys removed during the walk are
/// skipped. The walk stops as soon as the callback returns `false` or
/// `ControlFlow::Break`. Returns `value` itself.
///
/// # Example
///
/// ```
/// use objkit_util::each;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let mut seen = Vec::new();
/// each(&Value::from(json!({"a": 1, "b": 2})), |item, key| {
///     seen.push((key.to_string(), item.clone()));
///     false
/// });
/// assert_eq!(seen, vec![("a".to_string(), Value::from(1))]);
/// ```
pub fn each<F, R>(value: &Value, mut callback: F) -> Value
where
    F: FnMut(&Value, Key) -> R,
    R: WalkControl,
{
    if is_array_like(value) {
        let mut index = 0usize;
        loop {
            let len = match value {
                Value::Array(arr) => arr.len() as f64,
                _ => length_of(value).unwrap_or(0.0),
            };
            if index as f64 >= len {
                break;
            }
            let item = match value {
                Value::Array(arr) => arr.get(index).unwrap_or_default(),
                _ => value
                    .get_own(&PropertyKey::from(number_to_string(index as f64)))
                    .unwrap_or_default(),
            };
            if !callback(&item, Key::Index(index)).keep_walking() {
                break;
            }
            index += 1;
        }
        return value.clone();
    }

    for key in value.own_keys() {
        let Some(item) = value.get_own(&key) else {
            continue;
        };
        if !callback(&item, Key::Property(key)).keep_walking() {
            break;
        }
    }
    value.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use objkit_value::{Array, Function, Object, Symbol};
    use serde_json::json;

    #[test]
    fn test_each_array_in_order() {
        let value = Value::from(json!(["a", "b", "c"]));
        let mut seen = Vec::new();
        each(&value, |item, key| seen.push((key, item.clone())));
        assert_eq!(
            seen,
            vec![
                (Key::Index(0), Value::from("a")),
                (Key::Index(1), Value::from("b")),
                (Key::Index(2), Value::from("c")),
            ]
        );
    }

    #[test]
    fn test_each_returns_container() {
        let value = Value::from(json!({"a": 1}));
        let returned = each(&value, |_, _| ());
        assert!(returned.same_reference(&value));
    }

    #[test]
    fn test_each_stops_on_false_only() {
        let value = Value::from(json!([1, 2, 3, 4]));
        let mut count = 0;
        each(&value, |item, _| {
            count += 1;
            item.as_number() != Some(2.0)
        });
        assert_eq!(count, 2);

        let mut count = 0;
        each(&value, |_, _| {
            count += 1;
            true
        });
        assert_eq!(count, 4);
    }

    #[test]
    fn test_each_control_flow() {
        let value = Value::from(json!({"a": 1, "b": 2, "c": 3}));
        let mut keys = Vec::new();
        each(&value, |_, key| {
            keys.push(key.to_string());
            if keys.len() == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_each_array_like_object() {
        let value = Value::from(json!({"0": "x", "1": "y", "length": 2}));
        let mut seen = Vec::new();
        each(&value, |item, key| seen.push((key, item.clone())));
        assert_eq!(
            seen,
            vec![(Key::Index(0), Value::from("x")), (Key::Index(1), Value::from("y"))]
        );
    }

    #[test]
    fn test_each_array_like_with_hole_yields_undefined() {
        let value = Value::from(json!({"1": "y", "length": 2}));
        let mut seen = Vec::new();
        each(&value, |item, _| seen.push(item.clone()));
        assert_eq!(seen, vec![Value::Undefined, Value::from("y")]);
    }

    #[test]
    fn test_length_without_last_index_is_keyed() {
        let value = Value::from(json!({"length": 3, "a": 1}));
        assert!(!is_array_like(&value));
        let mut keys = Vec::new();
        each(&value, |_, key| keys.push(key.to_string()));
        assert_eq!(keys, vec!["length", "a"]);
    }

    #[test]
    fn test_function_is_not_array_like() {
        let f = Value::from(Function::new("f", |_, _| Value::Undefined));
        assert!(!is_array_like(&f));
        let mut count = 0;
        each(&f, |_, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_each_symbol_keys_last() {
        let sym = Symbol::new(Some("s"));
        let obj = Object::new();
        obj.set(sym.clone(), 1);
        obj.set("a", 2);
        let mut keys = Vec::new();
        each(&Value::from(obj), |_, key| keys.push(key));
        assert_eq!(
            keys,
            vec![Key::Property("a".into()), Key::Property(PropertyKey::from(sym))]
        );
    }

    #[test]
    fn test_each_sees_growth_of_array() {
        let arr = Array::from_vec(vec![Value::from(1)]);
        let value = Value::from(arr.clone());
        let mut seen = 0;
        each(&value, |_, _| {
            seen += 1;
            if arr.len() < 3 {
                arr.push(0);
            }
        });
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_each_skips_removed_keys() {
        let obj = Object::new();
        obj.set("a", 1);
        obj.set("b", 2);
        let value = Value::from(&obj);
        let mut keys = Vec::new();
        each(&value, |_, key| {
            obj.remove(&"b".into());
            keys.push(key.to_string());
        });
        assert_eq!(keys, vec!["a"]);
    }

    #[test]
    fn test_each_primitive_visits_nothing() {
        let mut count = 0;
        each(&Value::from(5), |_, _| count += 1);
        each(&Value::Null, |_, _| count += 1);
        assert_eq!(count, 0);
    }
}
