//! Dotted/bracket path lookup.
//!
//! Resolves expressions such as `a.b.c[0].d` against nested objects and
//! arrays, falling back to a default as soon as a step is missing.
//!
//! # Example
//!
//! ```
//! use objkit_path::{get_path_value, parse_path};
//! use objkit_value::Value;
//! use serde_json::json;
//!
//! assert_eq!(parse_path("a.b.c[0].d"), vec!["a", "b", "c", "0", "d"]);
//!
//! let doc = Value::from(json!({"a": {"b": {"c": [{"d": 123}]}}}));
//! assert_eq!(get_path_value(&doc, "a.b.c[0].d", Value::Null), Value::from(123));
//! assert_eq!(get_path_value(&doc, "a.x", Value::from("X")), Value::from("X"));
//! ```

use objkit_value::{PropertyKey, Value};

/// Split a path expression on `.`, `[` and `]`, dropping empty segments.
///
/// Segments are plain strings; `c[0]` and `c.0` are the same path.
pub fn parse_path(expr: &str) -> Vec<String> {
    expr.split(['.', '[', ']'])
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Walk `path` from `root` through own properties.
///
/// Returns `None` as soon as a step is not an own property or holds `null`
/// or `undefined`. An empty path yields `root`.
pub fn resolve(root: &Value, path: &[String]) -> Option<Value> {
    let mut current = root.clone();
    for segment in path {
        let next = current.get_own(&PropertyKey::from(segment.as_str()))?;
        if next.is_nullish() {
            return None;
        }
        current = next;
    }
    Some(current)
}

/// Look up `path` in `root`, returning `fallback` when it cannot be
/// resolved.
///
/// `root` must be a non-null value of runtime type `object` (arrays,
/// objects, dates, regexps, errors, boxed primitives); anything else returns
/// `fallback` straight away.
pub fn get_path_value(root: &Value, path: &str, fallback: Value) -> Value {
    if root.is_null() || root.type_of() != "object" {
        return fallback;
    }
    let segments = parse_path(path);
    match resolve(root, &segments) {
        Some(value) => value,
        None => {
            tracing::trace!(path, "path lookup fell back to default");
            fallback
        }
    }
}

/// [`get_path_value`] with an empty string as the fallback.
pub fn get_path_value_or_empty(root: &Value, path: &str) -> Value {
    get_path_value(root, path, Value::from(""))
}

/// [`get_path_value`] for a dynamically typed path: anything other than a
/// string returns `fallback`.
pub fn get_path_value_dyn(root: &Value, path: &Value, fallback: Value) -> Value {
    match path {
        Value::String(expr) => get_path_value(root, expr, fallback),
        _ => fallback,
    }
}
