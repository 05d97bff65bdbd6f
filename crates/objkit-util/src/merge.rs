//! Recursive merge of keyed objects.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use objkit_value::{Object, PropertyKey, Value};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The target holds an object where the source holds something else.
    #[error("`{path}` in source must be an object")]
    TypeMismatch { key: String, path: String },
}

fn join_path(parents: &[String], key: &PropertyKey) -> String {
    let mut path = parents.join(".");
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(&key.to_string());
    path
}

/// Fold `source` into `target` and return `target`.
///
/// For each key of `source`:
/// - both sides objects: merge recursively into the target's object;
/// - target object, source anything else: [`MergeError::TypeMismatch`];
/// - otherwise the source value replaces the target value by reference.
///
/// The whole merge is rehearsed before `target` is touched, including the
/// writes earlier keys make into subtrees shared between several target
/// keys, so a failed merge leaves `target` unchanged. Values copied by
/// reference stay shared between source and target.
///
/// # Example
///
/// ```
/// use objkit_util::merge;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let target = Value::from(json!({"a": {"b": 1}}));
/// let source = Value::from(json!({"a": {"c": 2}}));
/// let merged = merge(target.as_object().unwrap(), source.as_object().unwrap()).unwrap();
/// assert_eq!(Value::from(merged).to_json().unwrap(), json!({"a": {"b": 1, "c": 2}}));
/// ```
pub fn merge(target: &Object, source: &Object) -> Result<Object, MergeError> {
    let mut rehearsal = Rehearsal::default();
    rehearsal.validate(target, source, &mut Vec::new())?;
    apply(target, source, &mut HashSet::new());
    Ok(target.clone())
}

/// Dry run of [`apply`]: writes go to an overlay keyed by object identity
/// instead of the objects themselves, and reads see the overlay first.
#[derive(Default)]
struct Rehearsal {
    writes: HashMap<usize, IndexMap<PropertyKey, Value>>,
    seen: HashSet<(usize, usize)>,
}

impl Rehearsal {
    fn get(&self, obj: &Object, key: &PropertyKey) -> Option<Value> {
        match self.writes.get(&obj.id()).and_then(|w| w.get(key)) {
            Some(value) => Some(value.clone()),
            None => obj.get(key),
        }
    }

    /// [`Object::entries`] as it will read once the overlay is applied.
    fn entries(&self, obj: &Object) -> Vec<(PropertyKey, Value)> {
        let Some(writes) = self.writes.get(&obj.id()) else {
            return obj.entries();
        };
        let mut keys = obj.keys();
        keys.extend(writes.keys().filter(|k| !obj.contains_key(k)).cloned());
        keys.sort_by_key(PropertyKey::is_symbol);
        keys.into_iter()
            .filter_map(|key| self.get(obj, &key).map(|v| (key, v)))
            .collect()
    }

    fn set(&mut self, obj: &Object, key: PropertyKey, value: Value) {
        self.writes.entry(obj.id()).or_default().insert(key, value);
    }

    /// Pairs already entered are skipped, so cyclic inputs terminate.
    fn validate(
        &mut self,
        target: &Object,
        source: &Object,
        parents: &mut Vec<String>,
    ) -> Result<(), MergeError> {
        if target.ptr_eq(source) || !self.seen.insert((target.id(), source.id())) {
            return Ok(());
        }
        for (key, incoming) in self.entries(source) {
            match (self.get(target, &key), incoming) {
                (Some(Value::Object(existing)), Value::Object(incoming)) => {
                    parents.push(key.to_string());
                    self.validate(&existing, &incoming, parents)?;
                    parents.pop();
                }
                (Some(Value::Object(_)), _) => {
                    let path = join_path(parents, &key);
                    tracing::debug!(%path, "merge rejected: source value is not an object");
                    return Err(MergeError::TypeMismatch {
                        key: key.to_string(),
                        path,
                    });
                }
                (_, incoming) => self.set(target, key, incoming),
            }
        }
        Ok(())
    }
}

fn apply(target: &Object, source: &Object, seen: &mut HashSet<(usize, usize)>) {
    if target.ptr_eq(source) || !seen.insert((target.id(), source.id())) {
        return;
    }
    for (key, incoming) in source.entries() {
        match (target.get(&key), incoming) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                apply(&existing, &incoming, seen);
            }
            (_, incoming) => {
                target.set(key, incoming);
            }
        }
    }
}
