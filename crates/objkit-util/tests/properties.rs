use objkit_util::{deep_clone, deep_equal, each, merge, shallow_clone, MergeError};
use objkit_value::{Object, PropertyKey, Value};
use proptest::prelude::*;
use serde_json::json;

fn arb_leaf() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(serde_json::Value::String),
    ]
}

fn arb_flat_object() -> impl Strategy<Value = serde_json::Value> {
    prop::collection::btree_map("[a-z]{1,6}", arb_leaf(), 1..8)
        .prop_map(|map| serde_json::Value::Object(map.into_iter().collect()))
}

fn arb_primitive() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>()
            .prop_filter("NaN is not equal to itself", |n| !n.is_nan())
            .prop_map(Value::Number),
        ".{0,12}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn clone_of_primitive_is_identical(value in arb_primitive()) {
        prop_assert_eq!(shallow_clone(&value).unwrap(), value.clone());
        prop_assert_eq!(deep_clone(&value).unwrap(), value);
    }

    #[test]
    fn deep_clone_of_flat_object_is_detached(json in arb_flat_object()) {
        let original = Value::from(json.clone());
        let copy = deep_clone(&original).unwrap();
        prop_assert!(deep_equal(&original, &copy));
        prop_assert!(!copy.same_reference(&original));

        let copy_obj = copy.as_object().unwrap();
        let first = copy_obj.keys()[0].clone();
        copy_obj.set(first, "mutated-leaf-value");
        prop_assert_eq!(original.to_json().unwrap(), json);
    }
}

#[test]
fn test_self_reference_aliases_original() {
    let o = Object::new();
    o.set("self", &o);
    let copy = deep_clone(&Value::from(&o)).unwrap();
    let link = copy.get_own(&PropertyKey::from("self")).unwrap();
    assert!(link.same_reference(&Value::from(&o)));
    o.remove(&"self".into());
}

#[test]
fn test_merge_examples() {
    let target = Value::from(json!({"a": 1}));
    let source = Value::from(json!({"a": {"b": 2}}));
    let merged = merge(target.as_object().unwrap(), source.as_object().unwrap()).unwrap();
    assert_eq!(Value::from(merged).to_json().unwrap(), json!({"a": {"b": 2}}));

    let target = Value::from(json!({"a": {"b": 2}}));
    let source = Value::from(json!({"a": 5}));
    assert!(matches!(
        merge(target.as_object().unwrap(), source.as_object().unwrap()),
        Err(MergeError::TypeMismatch { ref key, .. }) if key == "a"
    ));

    let target = Value::from(json!({"a": {"b": 1}}));
    let source = Value::from(json!({"a": {"c": 2}}));
    let merged = merge(target.as_object().unwrap(), source.as_object().unwrap()).unwrap();
    assert_eq!(Value::from(merged).to_json().unwrap(), json!({"a": {"b": 1, "c": 2}}));
}

#[test]
fn test_walker_stops_after_first_entry() {
    let mut visited = 0;
    each(&Value::from(json!({"a": 1, "b": 2})), |_, _| {
        visited += 1;
        false
    });
    assert_eq!(visited, 1);
}
