//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::actions::{ActionsBag, DirectionActions};

/// Touchpad region settings.
///
/// `actions` is the default bag used for taps, holds, double taps and
/// momentary presses. Once a swipe locks a direction, that direction's bag
/// in `directions` takes over for the rest of the gesture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TouchpadConfig {
    /// Slot name (e.g. `tap_action`, `multi_hold_action`) to action descriptor
    #[serde(default)]
    pub actions: ActionsBag,

    /// Per-direction bags consulted after a swipe
    #[serde(default)]
    pub directions: DirectionActions,
}

impl TouchpadConfig {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
            && self.directions.up.is_empty()
            && self.directions.down.is_empty()
            && self.directions.left.is_empty()
            && self.directions.right.is_empty()
    }
}
