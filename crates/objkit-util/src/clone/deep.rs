use std::collections::{HashMap, HashSet};

use objkit_value::Value;

use super::shallow::{empty_like, put};
use super::{shallow_clone, CloneError};

/// Containers already entered during one deep clone.
#[derive(Debug, Default)]
pub struct VisitedSet(HashSet<usize>);

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, value: &Value) -> bool {
        value.container_id().is_some_and(|id| self.0.contains(&id))
    }

    /// Record `value`; returns `false` if it was already present or is not
    /// a container.
    pub fn insert(&mut self, value: &Value) -> bool {
        match value.container_id() {
            Some(id) => self.0.insert(id),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Copy `value` and, recursively, every array and object under it.
///
/// Non-container values go through [`shallow_clone`]. A container that was
/// already entered earlier in the same call is **not** copied again: the
/// original reference is placed in the result. For `o.self = o` this means
/// `deep_clone(o).self` is `o` itself, and a container reachable twice is
/// copied at its first occurrence and shared with the source at the second.
/// Use [`deep_clone_preserving_cycles`] to keep such links inside the copy.
///
/// # Example
///
/// ```
/// use objkit_util::deep_clone;
/// use objkit_value::{Object, Value};
///
/// let node = Object::new();
/// node.set("self", &node);
/// let copy = deep_clone(&Value::from(&node)).unwrap();
/// let link = copy.as_object().unwrap().get(&"self".into()).unwrap();
/// assert!(link.same_reference(&Value::from(&node)));
/// # node.remove(&"self".into());
/// ```
pub fn deep_clone(value: &Value) -> Result<Value, CloneError> {
    deep_clone_with(value, &mut VisitedSet::new())
}

/// [`deep_clone`] with a caller-provided visited set, shared across the
/// whole recursion.
pub fn deep_clone_with(value: &Value, visited: &mut VisitedSet) -> Result<Value, CloneError> {
    if !value.is_container() {
        return shallow_clone(value);
    }
    if !visited.insert(value) {
        tracing::trace!(kind = %value.kind(), "deep clone reached a visited container");
        return Ok(value.clone());
    }
    let Some(copy) = empty_like(value)? else {
        return Ok(value.clone());
    };
    for key in value.own_keys() {
        if let Some(item) = value.get_own(&key) {
            put(&copy, key, deep_clone_with(&item, visited)?);
        }
    }
    Ok(copy)
}

/// Copy `value` keeping its reference graph: each container is copied once
/// and every link to it, cycles included, points at the copy.
///
/// # Example
///
/// ```
/// use objkit_util::deep_clone_preserving_cycles;
/// use objkit_value::{Object, Value};
///
/// let node = Object::new();
/// node.set("self", &node);
/// let copy = deep_clone_preserving_cycles(&Value::from(&node)).unwrap();
/// let link = copy.as_object().unwrap().get(&"self".into()).unwrap();
/// assert!(link.same_reference(&copy));
/// # node.remove(&"self".into());
/// # copy.as_object().unwrap().remove(&"self".into());
/// ```
pub fn deep_clone_preserving_cycles(value: &Value) -> Result<Value, CloneError> {
    clone_graph(value, &mut HashMap::new())
}

fn clone_graph(value: &Value, copies: &mut HashMap<usize, Value>) -> Result<Value, CloneError> {
    let Some(id) = value.container_id() else {
        return shallow_clone(value);
    };
    if let Some(copy) = copies.get(&id) {
        return Ok(copy.clone());
    }
    let Some(copy) = empty_like(value)? else {
        return Ok(value.clone());
    };
    // Registered before the children so back-links resolve to the copy.
    copies.insert(id, copy.clone());
    for key in value.own_keys() {
        if let Some(item) = value.get_own(&key) {
            put(&copy, key, clone_graph(&item, copies)?);
        }
    }
    Ok(copy)
}
