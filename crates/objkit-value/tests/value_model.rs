use objkit_value::{
    is_plain_object, to_type, Array, Boxed, BoxedPrimitive, Class, Date, ErrorValue, Function,
    Kind, Object, PropertyKey, RegExp, Symbol, Value,
};
use serde_json::json;

#[test]
fn test_classification_is_total() {
    let cases: Vec<(Value, &str)> = vec![
        (Value::Bool(true), "boolean"),
        (Value::from(1), "number"),
        (Value::from("s"), "string"),
        (Value::from(Function::new("f", |_, _| Value::Undefined)), "function"),
        (Value::from(Array::new()), "array"),
        (Value::from(Date::from_millis(0.0)), "date"),
        (Value::from(RegExp::new("x", "").unwrap()), "regexp"),
        (Value::from(Object::new()), "object"),
        (Value::from(ErrorValue::new("Error", "")), "error"),
        (Value::from(Symbol::new(None)), "symbol"),
        (Value::BigInt(1), "bigint"),
        (Value::from(Boxed::new(BoxedPrimitive::BigInt(1))), "bigint"),
        (Value::Null, "null"),
        (Value::Undefined, "undefined"),
    ];
    for (value, tag) in cases {
        assert_eq!(to_type(&value), tag, "{value:?}");
        assert_eq!(value.kind().as_str(), tag);
    }
}

#[test]
fn test_json_objects_are_plain() {
    let value = Value::from(json!({"nested": {"deep": true}}));
    assert!(is_plain_object(&value));
    let nested = value.get_own(&PropertyKey::from("nested")).unwrap();
    assert!(is_plain_object(&nested));
    assert_eq!(nested.kind(), Kind::Object);
}

#[test]
fn test_class_instances_round_trip_through_json() {
    let class = Class::new("Point", |this| {
        this.set("x", 1);
        this.set("y", 2);
        Ok(())
    });
    let point = Value::from(class.construct().unwrap());
    assert!(!is_plain_object(&point));
    assert_eq!(point.to_json().unwrap(), json!({"x": 1, "y": 2}));
}

#[test]
fn test_containers_share_on_clone_of_handle() {
    let value = Value::from(json!({"a": []}));
    let alias = value.clone();
    alias.as_object().unwrap().set("b", 1);
    assert!(value.same_reference(&alias));
    assert_eq!(value.to_json().unwrap(), json!({"a": [], "b": 1}));
}
