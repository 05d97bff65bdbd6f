//! objkit-value - dynamic value model
//!
//! A tagged-union [`Value`] with shared, identity-compared containers, an
//! own-property model, type classification and a JSON bridge. The other
//! objkit crates operate on these values.
//!
//! # Example
//!
//! ```
//! use objkit_value::{to_type, Kind, Value};
//! use serde_json::json;
//!
//! let value = Value::from(json!({"a": [1, 2]}));
//! assert_eq!(value.kind(), Kind::Object);
//! assert_eq!(to_type(&value), "object");
//! ```

pub mod array;
pub mod builtins;
pub mod json;
pub mod key;
pub mod kind;
pub mod object;
pub mod property;
pub mod value;

pub use array::Array;
pub use builtins::{Boxed, BoxedPrimitive, Date, ErrorValue, Function, RegExp, RegExpError};
pub use json::ToJsonError;
pub use key::{PropertyKey, Symbol};
pub use kind::{is_function, is_plain_object, to_type, Kind};
pub use object::{Class, ConstructError, Object};
pub use property::{canonical_index, number_key};
pub use value::{number_to_string, Value};
