//! objkit-util - utilities over objkit values
//!
//! Walking, merging, cloning and comparing [`objkit_value::Value`] trees,
//! plus timestamp formatting and throttle/debounce wrappers.

pub mod clone;
pub mod config;
pub mod deep_equal;
pub mod each;
pub mod format_time;
pub mod has_own_property;
pub mod inherit;
pub mod merge;
pub mod timing;

// Re-exports for convenience
pub use clone::{deep_clone, deep_clone_preserving_cycles, deep_clone_with, shallow_clone, CloneError, VisitedSet};
pub use config::{options_from_layers, ConfigError, DebounceOptions, ThrottleOptions};
pub use deep_equal::deep_equal;
pub use each::{each, is_array_like, Key, WalkControl};
pub use format_time::{format_time, format_time_in};
pub use has_own_property::is_own_property;
pub use inherit::inherit;
pub use merge::{merge, MergeError};
pub use timing::{Debounce, Throttle, Timer};
