use objkit_value::{
    Array, Boxed, BoxedPrimitive, Date, ErrorValue, Function, Object, PropertyKey, Value,
};

use super::CloneError;

/// An empty container of the same kind as `value`: a new array, a new
/// plain object, or a fresh instance of the object's class.
pub(super) fn empty_like(value: &Value) -> Result<Option<Value>, CloneError> {
    let empty = match value {
        Value::Array(_) => Value::Array(Array::new()),
        Value::Object(obj) => match obj.class() {
            Some(class) => Value::Object(class.construct()?),
            None => Value::Object(Object::new()),
        },
        _ => return Ok(None),
    };
    Ok(Some(empty))
}

/// Store `item` under `key` in a container built by [`empty_like`].
pub(super) fn put(container: &Value, key: PropertyKey, item: Value) {
    match container {
        Value::Array(arr) => {
            if let Some(index) = key.as_str().and_then(objkit_value::canonical_index) {
                arr.set(index, item);
            }
        }
        Value::Object(obj) => {
            obj.set(key, item);
        }
        _ => {}
    }
}

/// Copy one level of `value`.
///
/// - arrays and objects: a new container holding the same own entries
///   (symbol keys included) by reference; class instances are rebuilt with
///   their class initializer, which may fail;
/// - dates and regexps: a new instance with the same time or pattern;
/// - errors: a new error with the same name and message, other properties
///   dropped;
/// - functions: a new function forwarding receiver and arguments;
/// - symbols and bigints: a boxed wrapper (already boxed values are
///   returned as they are);
/// - anything else: returned unchanged.
///
/// # Example
///
/// ```
/// use objkit_util::shallow_clone;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let original = Value::from(json!({"inner": {"x": 1}}));
/// let copy = shallow_clone(&original).unwrap();
/// assert!(!copy.same_reference(&original));
///
/// let inner = |v: &Value| v.as_object().unwrap().get(&"inner".into()).unwrap();
/// assert!(inner(&copy).same_reference(&inner(&original)));
/// ```
pub fn shallow_clone(value: &Value) -> Result<Value, CloneError> {
    let copy = match value {
        Value::Symbol(sym) => Value::Boxed(Boxed::new(BoxedPrimitive::Symbol(sym.clone()))),
        Value::BigInt(n) => Value::Boxed(Boxed::new(BoxedPrimitive::BigInt(*n))),
        Value::Date(date) => Value::Date(Date::from_millis(date.time())),
        Value::RegExp(re) => Value::RegExp(re.copy()),
        Value::Error(err) => Value::Error(ErrorValue::new(&err.name(), &err.message())),
        Value::Function(func) => {
            let target = func.clone();
            Value::Function(Function::new(func.name(), move |this, args| {
                target.call(this, args)
            }))
        }
        Value::Array(_) | Value::Object(_) => {
            let Some(copy) = empty_like(value)? else {
                return Ok(value.clone());
            };
            for key in value.own_keys() {
                if let Some(item) = value.get_own(&key) {
                    put(&copy, key, item);
                }
            }
            copy
        }
        _ => value.clone(),
    };
    Ok(copy)
}
