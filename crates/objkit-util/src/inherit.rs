use objkit_value::Object;

/// Build an object layering `child` over `parent`.
///
/// The result is a new plain object holding the parent's own entries, then
/// the child's own entries on top. Entries are taken by reference at
/// construction time; later changes to `parent` are not reflected.
///
/// # Example
///
/// ```
/// use objkit_util::inherit;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let base = Value::from(json!({"wait": 100, "leading": true}));
/// let patch = Value::from(json!({"wait": 250}));
/// let merged = inherit(base.as_object().unwrap(), patch.as_object());
/// assert_eq!(
///     Value::from(merged).to_json().unwrap(),
///     json!({"wait": 250, "leading": true})
/// );
/// ```
pub fn inherit(parent: &Object, child: Option<&Object>) -> Object {
    let layered = Object::new();
    for (key, value) in parent.entries() {
        layered.set(key, value);
    }
    if let Some(child) = child {
        for (key, value) in child.entries() {
            layered.set(key, value);
        }
    }
    layered
}
