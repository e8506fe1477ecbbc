use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::input::Contact;

/// Errors raised while loading or running a replay script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay script {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid replay script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("event {index} at {at} ms comes before the previous event at {previous} ms")]
    OutOfOrder { index: usize, at: u64, previous: u64 },

    #[error("event {index} refers to unknown button '{button}'")]
    UnknownButton { index: usize, button: String },
}

/// Timestamped input events, read from TOML:
///
/// ```toml
/// [[events]]
/// at = 0
/// kind = "press"
/// contacts = [[100, 100]]
///
/// [[events]]
/// at = 120
/// kind = "release"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ReplayError> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptEvent {
    /// Milliseconds since the start of the replay
    pub at: u64,
    #[serde(flatten)]
    pub input: ScriptInput,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptInput {
    /// Contacts currently down, as `[x, y]` pairs
    Press { contacts: Vec<[f64; 2]> },
    Move { contacts: Vec<[f64; 2]> },
    /// A contact lifted; `remaining` are still down
    Release {
        #[serde(default)]
        remaining: usize,
    },
    Cancel,
    Leave,
    Enter,
    /// Lets time pass so due timers fire
    Tick,
    /// Changes a template variable
    Set { name: String, value: Value },
    ButtonPress { button: String },
    ButtonRelease { button: String },
    ButtonClick { button: String },
}

pub(super) fn contacts(points: &[[f64; 2]]) -> Vec<Contact> {
    points.iter().copied().map(Contact::from).collect()
}
