//! Keyed mappings and the optional class tag used to re-create them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::key::PropertyKey;
use crate::value::Value;

/// Raised when a class initializer refuses to build an instance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot construct `{class}`: {reason}")]
pub struct ConstructError {
    pub class: String,
    pub reason: String,
}

type Initializer = dyn Fn(&Object) -> Result<(), String>;

struct ClassData {
    name: String,
    init: Box<Initializer>,
}

/// Constructor tag carried by non-plain objects.
///
/// A class owns a zero-argument initializer which runs against a freshly
/// allocated instance, the way `new Ctor()` runs a constructor body.
///
/// # Example
///
/// ```
/// use objkit_value::{Class, Value};
///
/// let point = Class::new("Point", |this| {
///     this.set("x", Value::from(0));
///     Ok(())
/// });
/// let p = point.construct().unwrap();
/// assert_eq!(p.get(&"x".into()), Some(Value::from(0)));
/// assert_eq!(p.class().unwrap().name(), "Point");
/// ```
#[derive(Clone)]
pub struct Class(Rc<ClassData>);

impl Class {
    pub fn new<F>(name: &str, init: F) -> Self
    where
        F: Fn(&Object) -> Result<(), String> + 'static,
    {
        Class(Rc::new(ClassData {
            name: name.to_string(),
            init: Box::new(init),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Allocate an instance tagged with this class and run the initializer.
    pub fn construct(&self) -> Result<Object, ConstructError> {
        let instance = Object::with_class(self.clone());
        (self.0.init)(&instance).map_err(|reason| ConstructError {
            class: self.0.name.clone(),
            reason,
        })?;
        Ok(instance)
    }

    pub fn ptr_eq(&self, other: &Class) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.0.name)
    }
}

#[derive(Default)]
struct ObjectData {
    properties: IndexMap<PropertyKey, Value>,
    class: Option<Class>,
}

/// A shared, mutable keyed mapping. Cloning an `Object` clones the handle,
/// not the properties.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(class: Class) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            properties: IndexMap::new(),
            class: Some(class),
        })))
    }

    pub fn class(&self) -> Option<Class> {
        self.0.borrow().class.clone()
    }

    pub fn is_plain(&self) -> bool {
        self.0.borrow().class.is_none()
    }

    pub fn get(&self, key: &PropertyKey) -> Option<Value> {
        self.0.borrow().properties.get(key).cloned()
    }

    pub fn contains_key(&self, key: &PropertyKey) -> bool {
        self.0.borrow().properties.contains_key(key)
    }

    /// Insert or overwrite a property, returning the previous value.
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().properties.insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &PropertyKey) -> Option<Value> {
        self.0.borrow_mut().properties.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().properties.is_empty()
    }

    /// Own keys: string keys in insertion order, then symbol keys.
    pub fn keys(&self) -> Vec<PropertyKey> {
        let data = self.0.borrow();
        let strings = data.properties.keys().filter(|k| !k.is_symbol());
        let symbols = data.properties.keys().filter(|k| k.is_symbol());
        strings.chain(symbols).cloned().collect()
    }

    /// Snapshot of own entries in [`Object::keys`] order.
    pub fn entries(&self) -> Vec<(PropertyKey, Value)> {
        let data = self.0.borrow();
        self.keys()
            .into_iter()
            .filter_map(|key| data.properties.get(&key).cloned().map(|v| (key, v)))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared allocation, stable while any handle is alive.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<PropertyKey>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let object = Object::new();
        for (key, value) in iter {
            object.set(key, value);
        }
        object
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shallow on purpose: objects may be cyclic.
        let data = self.0.borrow();
        let mut map = f.debug_map();
        for key in data.properties.keys() {
            map.entry(key, &format_args!("…"));
        }
        map.finish()
    }
}
