//! Own-property model shared by the walker, clone engine and path lookup.

use crate::key::PropertyKey;
use crate::value::{number_to_string, Value};

/// Parse `key` as a canonical array index (`"0"`, `"17"`, never `"01"`).
pub fn canonical_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return None;
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    key.parse().ok()
}

impl Value {
    /// Read an own property.
    ///
    /// Objects and errors expose their property maps (errors also own a
    /// non-enumerable `message`); arrays and strings own their indices and
    /// `length`; regexps own `lastIndex`; functions own `name`.
    ///
    /// # Example
    ///
    /// ```
    /// use objkit_value::{Array, Value};
    ///
    /// let arr: Array = vec![10, 20].into_iter().collect();
    /// let value = Value::from(arr);
    /// assert_eq!(value.get_own(&"1".into()), Some(Value::from(20)));
    /// assert_eq!(value.get_own(&"length".into()), Some(Value::from(2)));
    /// assert_eq!(value.get_own(&"01".into()), None);
    /// ```
    pub fn get_own(&self, key: &PropertyKey) -> Option<Value> {
        match self {
            Value::Object(obj) => obj.get(key),
            Value::Error(err) => match key.as_str() {
                Some("message") => Some(Value::from(err.message())),
                _ => err.get(key),
            },
            Value::Array(arr) => {
                let name = key.as_str()?;
                if name == "length" {
                    return Some(Value::Number(arr.len() as f64));
                }
                arr.get(canonical_index(name)?)
            }
            Value::String(s) => {
                let name = key.as_str()?;
                if name == "length" {
                    return Some(Value::Number(s.chars().count() as f64));
                }
                s.chars()
                    .nth(canonical_index(name)?)
                    .map(|c| Value::from(c.to_string()))
            }
            Value::RegExp(re) => match key.as_str() {
                Some("lastIndex") => Some(Value::Number(re.last_index() as f64)),
                _ => None,
            },
            Value::Function(func) => match key.as_str() {
                Some("name") => Some(Value::from(func.name())),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn has_own(&self, key: &PropertyKey) -> bool {
        match self {
            Value::Object(obj) => obj.contains_key(key),
            _ => self.get_own(key).is_some(),
        }
    }

    /// Own enumerable keys: string keys in order, then symbol keys.
    /// Arrays and strings enumerate their indices.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        match self {
            Value::Object(obj) => obj.keys(),
            Value::Error(err) => {
                let keys = err.keys();
                let strings = keys.iter().filter(|k| !k.is_symbol());
                let symbols = keys.iter().filter(|k| k.is_symbol());
                strings.chain(symbols).cloned().collect()
            }
            Value::Array(arr) => (0..arr.len()).map(PropertyKey::from).collect(),
            Value::String(s) => (0..s.chars().count()).map(PropertyKey::from).collect(),
            _ => Vec::new(),
        }
    }
}

/// Key for the numeric property `n`, as the runtime would stringify it.
pub fn number_key(n: f64) -> PropertyKey {
    PropertyKey::from(number_to_string(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorValue, Function, Object, RegExp, Symbol};

    #[test]
    fn test_canonical_index() {
        assert_eq!(canonical_index("0"), Some(0));
        assert_eq!(canonical_index("42"), Some(42));
        assert_eq!(canonical_index("01"), None);
        assert_eq!(canonical_index("-1"), None);
        assert_eq!(canonical_index("1.5"), None);
        assert_eq!(canonical_index(""), None);
    }

    #[test]
    fn test_object_own_properties() {
        let sym = Symbol::new(None);
        let obj = Object::new();
        obj.set(sym.clone(), 1);
        obj.set("a", Value::Null);
        let value = Value::from(obj);

        assert!(value.has_own(&"a".into()));
        assert_eq!(value.get_own(&"a".into()), Some(Value::Null));
        assert!(value.has_own(&PropertyKey::from(&sym)));
        assert_eq!(value.own_keys(), vec![PropertyKey::from("a"), PropertyKey::from(sym)]);
    }

    #[test]
    fn test_string_own_properties() {
        let value = Value::from("héllo");
        assert_eq!(value.get_own(&"1".into()), Some(Value::from("é")));
        assert_eq!(value.get_own(&"length".into()), Some(Value::from(5)));
        assert_eq!(value.get_own(&"9".into()), None);
        assert_eq!(value.own_keys().len(), 5);
    }

    #[test]
    fn test_error_message_is_own_but_not_enumerable() {
        let err = ErrorValue::new("Error", "boom");
        err.set("code", 7);
        let value = Value::from(err);
        assert_eq!(value.get_own(&"message".into()), Some(Value::from("boom")));
        assert_eq!(value.own_keys(), vec![PropertyKey::from("code")]);
    }

    #[test]
    fn test_misc_builtins() {
        let re = Value::from(RegExp::new("a", "g").unwrap());
        assert_eq!(re.get_own(&"lastIndex".into()), Some(Value::from(0)));

        let f = Value::from(Function::new("go", |_, _| Value::Undefined));
        assert_eq!(f.get_own(&"name".into()), Some(Value::from("go")));
        assert!(f.own_keys().is_empty());

        assert!(!Value::from(1).has_own(&"length".into()));
        assert!(!Value::Null.has_own(&"a".into()));
    }

    #[test]
    fn test_number_key() {
        assert_eq!(number_key(2.0), PropertyKey::from("2"));
        assert_eq!(number_key(0.5), PropertyKey::from("0.5"));
    }
}
