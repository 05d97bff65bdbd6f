//! Built-in reference kinds: functions, dates, regular expressions, errors
//! and boxed primitives.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::key::{PropertyKey, Symbol};
use crate::value::Value;

type NativeFn = dyn Fn(&Value, &[Value]) -> Value;

struct FunctionData {
    name: String,
    call: Box<NativeFn>,
}

/// A callable value. The closure receives the receiver (`this`) and the
/// argument list.
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    pub fn new<F>(name: &str, call: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Value + 'static,
    {
        Function(Rc::new(FunctionData {
            name: name.to_string(),
            call: Box::new(call),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn call(&self, this: &Value, args: &[Value]) -> Value {
        (self.0.call)(this, args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.0.name)
    }
}

/// A mutable point in time, stored as milliseconds since the Unix epoch.
/// `NaN` marks an invalid date.
#[derive(Clone)]
pub struct Date(Rc<Cell<f64>>);

impl Date {
    pub fn from_millis(millis: f64) -> Self {
        Date(Rc::new(Cell::new(millis)))
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self::from_millis(at.timestamp_millis() as f64)
    }

    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn time(&self) -> f64 {
        self.0.get()
    }

    pub fn set_time(&self, millis: f64) {
        self.0.set(millis);
    }

    pub fn is_valid(&self) -> bool {
        self.time().is_finite()
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if !self.is_valid() {
            return None;
        }
        DateTime::from_timestamp_millis(self.time() as i64)
    }

    pub fn ptr_eq(&self, other: &Date) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(at) => write!(f, "Date({})", at.to_rfc3339()),
            None => f.write_str("Date(Invalid)"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegExpError {
    #[error("invalid regular expression flag `{0}`")]
    InvalidFlag(char),
    #[error("duplicate regular expression flag `{0}`")]
    DuplicateFlag(char),
    #[error("invalid regular expression: {0}")]
    InvalidPattern(String),
}

struct RegExpData {
    source: String,
    flags: String,
    regex: Regex,
    last_index: Cell<usize>,
}

/// A compiled regular expression with its source text and flags.
#[derive(Clone)]
pub struct RegExp(Rc<RegExpData>);

impl RegExp {
    /// Compile `source` with the given flag letters (`dgimsuy`).
    ///
    /// # Example
    ///
    /// ```
    /// use objkit_value::RegExp;
    ///
    /// let re = RegExp::new("^ab+c$", "i").unwrap();
    /// assert!(re.is_match("ABBC"));
    /// assert!(RegExp::new("a", "q").is_err());
    /// ```
    pub fn new(source: &str, flags: &str) -> Result<Self, RegExpError> {
        let mut builder = RegexBuilder::new(source);
        let mut seen = String::new();
        for flag in flags.chars() {
            if seen.contains(flag) {
                return Err(RegExpError::DuplicateFlag(flag));
            }
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'd' | 'g' | 'u' | 'y' => {}
                other => return Err(RegExpError::InvalidFlag(other)),
            }
            seen.push(flag);
        }
        let regex = builder
            .build()
            .map_err(|e| RegExpError::InvalidPattern(e.to_string()))?;
        Ok(RegExp(Rc::new(RegExpData {
            source: source.to_string(),
            flags: flags.to_string(),
            regex,
            last_index: Cell::new(0),
        })))
    }

    /// A new instance with the same pattern and flags, `lastIndex` reset.
    pub fn copy(&self) -> Self {
        RegExp(Rc::new(RegExpData {
            source: self.0.source.clone(),
            flags: self.0.flags.clone(),
            regex: self.0.regex.clone(),
            last_index: Cell::new(0),
        }))
    }

    pub fn source(&self) -> &str {
        &self.0.source
    }

    pub fn flags(&self) -> &str {
        &self.0.flags
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.regex.is_match(haystack)
    }

    pub fn last_index(&self) -> usize {
        self.0.last_index.get()
    }

    pub fn set_last_index(&self, index: usize) {
        self.0.last_index.set(index);
    }

    pub fn ptr_eq(&self, other: &RegExp) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.0.source, self.0.flags)
    }
}

struct ErrorData {
    name: String,
    message: String,
    properties: IndexMap<PropertyKey, Value>,
}

/// An error object: a name (its constructor, e.g. `TypeError`), a message
/// and any extra enumerable properties attached to it.
#[derive(Clone)]
pub struct ErrorValue(Rc<RefCell<ErrorData>>);

impl ErrorValue {
    pub fn new(name: &str, message: &str) -> Self {
        ErrorValue(Rc::new(RefCell::new(ErrorData {
            name: name.to_string(),
            message: message.to_string(),
            properties: IndexMap::new(),
        })))
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn message(&self) -> String {
        self.0.borrow().message.clone()
    }

    pub fn get(&self, key: &PropertyKey) -> Option<Value> {
        self.0.borrow().properties.get(key).cloned()
    }

    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().properties.insert(key.into(), value.into())
    }

    pub fn keys(&self) -> Vec<PropertyKey> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    pub fn ptr_eq(&self, other: &ErrorValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        write!(f, "{}({:?})", data.name, data.message)
    }
}

/// Primitive held by a [`Boxed`] wrapper object.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxedPrimitive {
    Symbol(Symbol),
    BigInt(i128),
}

/// Object wrapper around a symbol or bigint (the result of `Object(x)`).
#[derive(Clone)]
pub struct Boxed(Rc<BoxedPrimitive>);

impl Boxed {
    pub fn new(primitive: BoxedPrimitive) -> Self {
        Boxed(Rc::new(primitive))
    }

    pub fn primitive(&self) -> &BoxedPrimitive {
        &self.0
    }

    /// The wrapped primitive as a value.
    pub fn value_of(&self) -> Value {
        match &*self.0 {
            BoxedPrimitive::Symbol(sym) => Value::Symbol(sym.clone()),
            BoxedPrimitive::BigInt(n) => Value::BigInt(*n),
        }
    }

    pub fn ptr_eq(&self, other: &Boxed) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Boxed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Boxed({:?})", self.0)
    }
}
