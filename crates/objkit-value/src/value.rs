use std::fmt;
use std::rc::Rc;

use crate::array::Array;
use crate::builtins::{Boxed, BoxedPrimitive, Date, ErrorValue, Function, RegExp};
use crate::key::Symbol;
use crate::object::Object;

/// A dynamic value.
///
/// Primitives (`Undefined` through `Symbol`) are compared by value. All
/// other variants are shared handles compared by identity, so `==` has
/// strict-equality semantics: two distinct objects with the same contents
/// are not equal. Use `objkit_util::deep_equal` for structural comparison.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    BigInt(i128),
    Symbol(Symbol),
    Function(Function),
    Array(Array),
    Object(Object),
    Date(Date),
    RegExp(RegExp),
    Error(ErrorValue),
    Boxed(Boxed),
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `true` for `null` and `undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// `true` for array and object containers.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Identity of an array or object container; `None` for anything else.
    pub fn container_id(&self) -> Option<usize> {
        match self {
            Value::Array(a) => Some(a.id()),
            Value::Object(o) => Some(o.id()),
            _ => None,
        }
    }

    /// `true` when both values are the same reference. Primitives never are.
    pub fn same_reference(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Symbol(a), Value::Symbol(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Date(a), Value::Date(b)) => a.ptr_eq(b),
            (Value::RegExp(a), Value::RegExp(b)) => a.ptr_eq(b),
            (Value::Error(a), Value::Error(b)) => a.ptr_eq(b),
            (Value::Boxed(a), Value::Boxed(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            _ => self.same_reference(other),
        }
    }
}

/// Render a number the way the runtime stringifies it: shortest digits,
/// integral values without a fractional part, exponent notation below
/// `1e-6` and from `1e21` up, `NaN` and `Infinity` spelled out.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = n.abs();
    if n != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((digits, power)) if !power.starts_with('-') => format!("{digits}e+{power}"),
            _ => exp,
        };
    }
    if n == n.trunc() {
        // -0 prints as 0
        return format!("{}", n as i128);
    }
    format!("{n}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&number_to_string(*n)),
            Value::String(s) => f.write_str(s),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Symbol(sym) => write!(f, "{sym}"),
            Value::Function(func) => write!(f, "function {}() {{ [native code] }}", func.name()),
            Value::Array(arr) => {
                let items = arr.to_vec();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    // Nested containers print their tag to stay finite on cycles.
                    match item {
                        Value::Null | Value::Undefined => {}
                        Value::Array(_) | Value::Object(_) => f.write_str("[object]")?,
                        other => write!(f, "{other}")?,
                    }
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Date(d) => match d.to_datetime() {
                Some(at) => write!(f, "{}", at.to_rfc3339()),
                None => f.write_str("Invalid Date"),
            },
            Value::RegExp(re) => write!(f, "/{}/{}", re.source(), re.flags()),
            Value::Error(err) => {
                let message = err.message();
                if message.is_empty() {
                    f.write_str(&err.name())
                } else {
                    write!(f, "{}: {}", err.name(), message)
                }
            }
            Value::Boxed(boxed) => write!(f, "{}", boxed.value_of()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::BigInt(n) => write!(f, "BigInt({n})"),
            Value::Symbol(sym) => write!(f, "{sym:?}"),
            Value::Function(func) => write!(f, "{func:?}"),
            Value::Array(arr) => write!(f, "{arr:?}"),
            Value::Object(obj) => write!(f, "Object({obj:?})"),
            Value::Date(d) => write!(f, "{d:?}"),
            Value::RegExp(re) => write!(f, "RegExp({re:?})"),
            Value::Error(err) => write!(f, "Error({err:?})"),
            Value::Boxed(boxed) => write!(f, "{boxed:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<&Object> for Value {
    fn from(o: &Object) -> Self {
        Value::Object(o.clone())
    }
}

impl From<Date> for Value {
    fn from(d: Date) -> Self {
        Value::Date(d)
    }
}

impl From<RegExp> for Value {
    fn from(re: RegExp) -> Self {
        Value::RegExp(re)
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::Error(err)
    }
}

impl From<Boxed> for Value {
    fn from(boxed: Boxed) -> Self {
        Value::Boxed(boxed)
    }
}

impl From<BoxedPrimitive> for Value {
    fn from(primitive: BoxedPrimitive) -> Self {
        Value::Boxed(Boxed::new(primitive))
    }
}
