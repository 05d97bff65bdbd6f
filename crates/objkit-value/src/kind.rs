//! Type classification.

use std::borrow::Cow;
use std::fmt;

use crate::builtins::BoxedPrimitive;
use crate::value::Value;

/// The closed set of semantic kinds a [`Value`] classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Boolean,
    Number,
    String,
    Function,
    Array,
    Date,
    RegExp,
    Object,
    Error,
    Symbol,
    BigInt,
    Null,
    Undefined,
}

impl Kind {
    /// Lowercase tag, e.g. `"regexp"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Function => "function",
            Kind::Array => "array",
            Kind::Date => "date",
            Kind::RegExp => "regexp",
            Kind::Object => "object",
            Kind::Error => "error",
            Kind::Symbol => "symbol",
            Kind::BigInt => "bigint",
            Kind::Null => "null",
            Kind::Undefined => "undefined",
        }
    }

    /// Kinds whose copies are built key by key.
    pub fn is_container(self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Classify this value.
    ///
    /// Boxed wrappers classify as the primitive they hold, and class
    /// instances classify as `Object`.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::BigInt(_) => Kind::BigInt,
            Value::Symbol(_) => Kind::Symbol,
            Value::Function(_) => Kind::Function,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Date(_) => Kind::Date,
            Value::RegExp(_) => Kind::RegExp,
            Value::Error(_) => Kind::Error,
            Value::Boxed(boxed) => match boxed.primitive() {
                BoxedPrimitive::Symbol(_) => Kind::Symbol,
                BoxedPrimitive::BigInt(_) => Kind::BigInt,
            },
        }
    }

    /// The runtime `typeof` tag: `"object"` for null and for every
    /// non-callable reference.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::BigInt(_) => "bigint",
            Value::Symbol(_) => "symbol",
            Value::Function(_) => "function",
            Value::Null
            | Value::Array(_)
            | Value::Object(_)
            | Value::Date(_)
            | Value::RegExp(_)
            | Value::Error(_)
            | Value::Boxed(_) => "object",
        }
    }
}

/// Return the lowercase type tag of `value`.
///
/// `null` and `undefined` do not go through the kind table: they return
/// their own string rendering. The outputs coincide with the tags, but the
/// branch is kept separate.
///
/// # Example
///
/// ```
/// use objkit_value::{to_type, Value};
///
/// assert_eq!(to_type(&Value::from(1)), "number");
/// assert_eq!(to_type(&Value::Null), "null");
/// ```
pub fn to_type(value: &Value) -> Cow<'static, str> {
    if value.is_nullish() {
        return Cow::Owned(value.to_string());
    }
    Cow::Borrowed(value.kind().as_str())
}

pub fn is_function(value: &Value) -> bool {
    matches!(value, Value::Function(_))
}

/// `true` for objects created without a class.
pub fn is_plain_object(value: &Value) -> bool {
    match value {
        Value::Object(obj) => obj.is_plain(),
        _ => false,
    }
}
