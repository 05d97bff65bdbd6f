//! Options for the timing wrappers.

use std::time::Duration;

use objkit_value::{Object, ToJsonError, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inherit::inherit;

const DEFAULT_WAIT_MS: u64 = 2000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("options are not representable as JSON: {0}")]
    Json(#[from] ToJsonError),
    #[error("invalid options: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Options for [`crate::Throttle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThrottleOptions {
    pub wait_ms: u64,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            wait_ms: DEFAULT_WAIT_MS,
        }
    }
}

impl ThrottleOptions {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

/// Options for [`crate::Debounce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DebounceOptions {
    pub wait_ms: u64,
    /// Run on the leading edge of a burst instead of the trailing edge.
    pub immediate: bool,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            wait_ms: DEFAULT_WAIT_MS,
            immediate: true,
        }
    }
}

impl DebounceOptions {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

/// Deserialize options from a base object with an override layer on top.
///
/// Missing fields take their defaults.
///
/// # Example
///
/// ```
/// use objkit_util::{options_from_layers, DebounceOptions};
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let base = Value::from(json!({"waitMs": 500, "immediate": false}));
/// let overrides = Value::from(json!({"waitMs": 50}));
/// let options: DebounceOptions =
///     options_from_layers(base.as_object().unwrap(), overrides.as_object()).unwrap();
/// assert_eq!(options, DebounceOptions { wait_ms: 50, immediate: false });
/// ```
pub fn options_from_layers<T>(base: &Object, overrides: Option<&Object>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let layered = Value::from(inherit(base, overrides));
    Ok(serde_json::from_value(layered.to_json()?)?)
}
