use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Keys whose long press auto-repeats the short press instead of sending a hold action.
const REPEATING_KEYS: [&str; 7] = [
    "up",
    "down",
    "left",
    "right",
    "volume_up",
    "volume_down",
    "delete",
];

/// Keys that use the selection haptic for every press.
const DIRECTIONAL_KEYS: [&str; 4] = ["up", "down", "left", "right"];

/// Name of the remote key a [`Button`](super::Button) stands for.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ButtonKey(String);

impl ButtonKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_directional(&self) -> bool {
        DIRECTIONAL_KEYS.contains(&self.0.as_str())
    }

    pub fn repeats_on_hold(&self) -> bool {
        REPEATING_KEYS.contains(&self.0.as_str())
    }
}

impl From<&str> for ButtonKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ButtonKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ButtonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
