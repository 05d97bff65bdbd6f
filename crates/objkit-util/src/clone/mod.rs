//! Shallow and deep copies of values.
//!
//! Containers (arrays and objects) are copied key by key; dates, regexps,
//! errors and functions get fresh instances; symbols and bigints are boxed;
//! other primitives are returned as-is.

mod deep;
mod shallow;

pub use deep::{deep_clone, deep_clone_preserving_cycles, deep_clone_with, VisitedSet};
pub use shallow::shallow_clone;

use objkit_value::ConstructError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CloneError {
    /// A class instance could not be re-created with its initializer.
    #[error(transparent)]
    Construct(#[from] ConstructError),
}
