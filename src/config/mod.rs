//! Configuration file support for gesturepad.
//!
//! This module loads the remote surface layout from
//! `~/.config/gesturepad/config.toml`: the touchpad's default and
//! per-direction action bags, one bag per button key, and the template
//! variables visible to action expressions.
//!
//! If no config file exists, every gesture resolves to `"none"`.

pub mod types;

pub use types::TouchpadConfig;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::{
    ActionDescriptor, ActionSlot, ActionsBag, SlotKind, VariableRenderer, duration_from_millis,
    variable_reference,
};
use crate::input::Direction;

/// Main configuration structure.
///
/// # Example TOML
/// ```toml
/// [variables]
/// speed = 150
///
/// [touchpad.actions.tap_action]
/// action = "select"
///
/// [touchpad.actions.hold_action]
/// action = "repeat"
/// repeat_delay = "{{ speed }}"
///
/// [touchpad.directions.up.tap_action]
/// action = "up"
///
/// [buttons.volume_up.tap_action]
/// action = "volume_up"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Template variables, referenced from descriptors as `{{ name }}`
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,

    /// Touchpad region
    #[serde(default)]
    pub touchpad: TouchpadConfig,

    /// Button key name to its action bag
    #[serde(default)]
    pub buttons: BTreeMap<String, ActionsBag>,
}

impl Config {
    /// Drops or resets entries the gesture machines could never use.
    ///
    /// - Unknown slot names are removed from every bag.
    /// - Momentary slots are removed from direction bags, which are only
    ///   consulted after a swipe.
    /// - Button bags keep `tap_action` and `hold_action` only.
    /// - Literal durations that are negative or not numeric are reset so the
    ///   default applies. Template expressions are left alone; they are
    ///   checked again every time they are rendered.
    pub fn validate_and_clamp(&mut self) {
        retain_known_slots(&mut self.touchpad.actions, "touchpad", |_| true);
        for direction in Direction::ALL {
            let scope = format!("touchpad direction {}", direction);
            retain_known_slots(
                self.touchpad.directions.get_mut(direction),
                &scope,
                |slot| !slot.kind.is_momentary(),
            );
        }
        for (key, bag) in &mut self.buttons {
            let scope = format!("button {}", key);
            retain_known_slots(bag, &scope, |slot| {
                !slot.multi && matches!(slot.kind, SlotKind::Tap | SlotKind::Hold)
            });
        }

        let variables = &self.variables;
        let mut bags: Vec<(String, &mut ActionsBag)> = Vec::new();
        bags.push(("touchpad".to_string(), &mut self.touchpad.actions));
        let directions = &mut self.touchpad.directions;
        for (direction, bag) in [
            (Direction::Up, &mut directions.up),
            (Direction::Down, &mut directions.down),
            (Direction::Left, &mut directions.left),
            (Direction::Right, &mut directions.right),
        ] {
            bags.push((format!("touchpad direction {}", direction), bag));
        }
        for (key, bag) in &mut self.buttons {
            bags.push((format!("button {}", key), bag));
        }

        for (scope, bag) in bags {
            for (slot, descriptor) in bag.entries_mut() {
                check_descriptor(&scope, slot, descriptor, variables);
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/gesturepad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("gesturepad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads the user configuration, or returns defaults if there is none.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates a configuration file that must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses TOML text and runs [`Config::validate_and_clamp`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Template renderer seeded with this configuration's variables.
    pub fn renderer(&self) -> VariableRenderer {
        VariableRenderer::new(self.variables.clone())
    }

    /// Human-readable overview, one line per configured surface.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!(
            "touchpad: {}",
            describe_bag(&self.touchpad.actions)
        ));
        for direction in Direction::ALL {
            let bag = self.touchpad.directions.get(direction);
            if !bag.is_empty() {
                lines.push(format!("touchpad {}: {}", direction, describe_bag(bag)));
            }
        }
        for (key, bag) in &self.buttons {
            lines.push(format!("button {}: {}", key, describe_bag(bag)));
        }
        if !self.variables.is_empty() {
            let names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
            lines.push(format!("variables: {}", names.join(", ")));
        }
        lines
    }
}

fn describe_bag(bag: &ActionsBag) -> String {
    if bag.is_empty() {
        return "no actions".to_string();
    }
    bag.entries()
        .map(|(slot, descriptor)| match &descriptor.action {
            Some(Value::String(action)) => format!("{}={}", slot, action),
            Some(action) => format!("{}={}", slot, action),
            None => format!("{}=none", slot),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn retain_known_slots(bag: &mut ActionsBag, scope: &str, allowed: impl Fn(ActionSlot) -> bool) {
    bag.retain(|name| match ActionSlot::parse(name) {
        Some(slot) if allowed(slot) => true,
        Some(_) => {
            warn!("{}: {} is never used here, ignoring it", scope, name);
            false
        }
        None => {
            warn!("{}: unknown action slot '{}', ignoring it", scope, name);
            false
        }
    });
}

fn check_descriptor(
    scope: &str,
    slot: &str,
    descriptor: &mut ActionDescriptor,
    variables: &BTreeMap<String, Value>,
) {
    if let Some(Value::String(text)) = &descriptor.action {
        warn_unknown_variable(scope, slot, text, variables);
    }

    for (field, value) in [
        ("hold_time", &mut descriptor.hold_time),
        ("repeat_delay", &mut descriptor.repeat_delay),
        ("double_tap_window", &mut descriptor.double_tap_window),
    ] {
        let Some(expr) = value.as_ref() else {
            continue;
        };
        if let Value::String(text) = expr {
            if text.contains("{{") {
                warn_unknown_variable(scope, slot, text, variables);
                continue;
            }
        }
        if duration_from_millis(expr).is_none() {
            warn!(
                "{}: invalid {}.{} {}, falling back to the default",
                scope, slot, field, expr
            );
            *value = None;
        }
    }
}

fn warn_unknown_variable(
    scope: &str,
    slot: &str,
    text: &str,
    variables: &BTreeMap<String, Value>,
) {
    if let Some(name) = variable_reference(text) {
        if !variables.contains_key(name) {
            warn!(
                "{}: {} refers to variable '{}' which has no initial value",
                scope, slot, name
            );
        }
    }
}

#[cfg(test)]
mod tests;
