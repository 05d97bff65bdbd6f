use std::collections::HashSet;

use objkit_value::{BoxedPrimitive, Value};

/// Performs a structural equality check between two values.
///
/// Arrays and objects compare element by element (object key order is
/// ignored, class tags must match); dates compare by time, regexps by source
/// and flags, errors by name, message and properties. Functions and symbols
/// compare by identity, primitives by value (`NaN` equals `NaN`). Cyclic
/// inputs are handled by assuming equality for pairs already under
/// comparison.
///
/// # Examples
///
/// ```
/// use objkit_util::deep_equal;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let a = Value::from(json!({"foo": [1, 2, 3]}));
/// let b = Value::from(json!({"foo": [1, 2, 3]}));
/// let c = Value::from(json!({"foo": [1, 2, 4]}));
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    equal(a, b, &mut HashSet::new())
}

fn equal(a: &Value, b: &Value, pending: &mut HashSet<(usize, usize)>) -> bool {
    if a.same_reference(b) {
        return true;
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Value::Date(x), Value::Date(y)) => {
            x.time() == y.time() || (!x.is_valid() && !y.is_valid())
        }
        (Value::RegExp(x), Value::RegExp(y)) => x.source() == y.source() && x.flags() == y.flags(),
        (Value::Boxed(x), Value::Boxed(y)) => match (x.primitive(), y.primitive()) {
            (BoxedPrimitive::BigInt(m), BoxedPrimitive::BigInt(n)) => m == n,
            (BoxedPrimitive::Symbol(m), BoxedPrimitive::Symbol(n)) => m == n,
            _ => false,
        },
        (Value::Error(x), Value::Error(y)) => {
            if x.name() != y.name() || x.message() != y.message() {
                return false;
            }
            if !pending.insert((x.id(), y.id())) {
                return true;
            }
            let result = same_entries(a, b, pending);
            pending.remove(&(x.id(), y.id()));
            result
        }
        (Value::Array(x), Value::Array(y)) => {
            if x.len() != y.len() {
                return false;
            }
            if !pending.insert((x.id(), y.id())) {
                return true;
            }
            let result = x
                .to_vec()
                .iter()
                .zip(y.to_vec().iter())
                .all(|(p, q)| equal(p, q, pending));
            pending.remove(&(x.id(), y.id()));
            result
        }
        (Value::Object(x), Value::Object(y)) => {
            let same_class = match (x.class(), y.class()) {
                (None, None) => true,
                (Some(p), Some(q)) => p.ptr_eq(&q),
                _ => false,
            };
            if !same_class {
                return false;
            }
            if !pending.insert((x.id(), y.id())) {
                return true;
            }
            let result = same_entries(a, b, pending);
            pending.remove(&(x.id(), y.id()));
            result
        }
        _ => a == b,
    }
}

fn same_entries(a: &Value, b: &Value, pending: &mut HashSet<(usize, usize)>) -> bool {
    let keys = a.own_keys();
    if keys.len() != b.own_keys().len() {
        return false;
    }
    keys.iter().all(|key| match (a.get_own(key), b.get_own(key)) {
        (Some(p), Some(q)) => equal(&p, &q, pending),
        _ => false,
    })
}
