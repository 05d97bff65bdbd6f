use objkit_value::{PropertyKey, Value};

/// Check if a value has an own property with the given key.
///
/// This is the Rust equivalent of `Object.prototype.hasOwnProperty.call(obj, key)`.
///
/// # Examples
///
/// ```
/// use objkit_util::is_own_property;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let obj = Value::from(json!({"foo": null}));
/// assert!(is_own_property(&obj, "foo"));
/// assert!(!is_own_property(&obj, "bar"));
/// assert!(is_own_property(&Value::from(json!([1])), "length"));
/// ```
pub fn is_own_property(value: &Value, key: impl Into<PropertyKey>) -> bool {
    value.has_own(&key.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use objkit_value::{Object, Symbol};
    use serde_json::json;

    #[test]
    fn test_is_own_property_object() {
        let obj = Value::from(json!({"foo": "bar", "baz": 42}));
        assert!(is_own_property(&obj, "foo"));
        assert!(is_own_property(&obj, "baz"));
        assert!(!is_own_property(&obj, "qux"));
    }

    #[test]
    fn test_is_own_property_symbol() {
        let sym = Symbol::new(None);
        let obj = Object::new();
        obj.set(sym.clone(), 1);
        assert!(is_own_property(&Value::from(&obj), sym));
        assert!(!is_own_property(&Value::from(obj), Symbol::new(None)));
    }

    #[test]
    fn test_is_own_property_array_indices() {
        let arr = Value::from(json!([1, 2, 3]));
        assert!(is_own_property(&arr, "0"));
        assert!(is_own_property(&arr, 2usize));
        assert!(!is_own_property(&arr, "3"));
    }

    #[test]
    fn test_is_own_property_primitives() {
        assert!(!is_own_property(&Value::Null, "foo"));
        assert!(!is_own_property(&Value::from(42), "foo"));
        assert!(is_own_property(&Value::from("string"), "length"));
    }
}
