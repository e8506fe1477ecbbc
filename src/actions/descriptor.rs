//! Action slots, descriptors and the per-surface action bags.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::Direction;

/// Resolved action value that disables a slot.
pub const ACTION_NONE: &str = "none";

/// Resolved hold action value that turns a hold into auto-repeat of the tap action.
pub const ACTION_REPEAT: &str = "repeat";

/// Hold confirmation delay used when a hold slot has no `hold_time`.
pub const DEFAULT_HOLD_TIME: Duration = Duration::from_millis(500);

/// Auto-repeat interval used when a hold slot has no `repeat_delay`.
pub const DEFAULT_REPEAT_DELAY: Duration = Duration::from_millis(100);

/// Double-tap arbitration window used when a double-tap slot has no `double_tap_window`.
pub const DEFAULT_DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(200);

const MULTI_PREFIX: &str = "multi_";

/// Gesture a slot is bound to, without the contact-count prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Tap,
    Hold,
    DoubleTap,
    MomentaryStart,
    MomentaryEnd,
}

impl SlotKind {
    pub const ALL: [SlotKind; 5] = [
        SlotKind::Tap,
        SlotKind::Hold,
        SlotKind::DoubleTap,
        SlotKind::MomentaryStart,
        SlotKind::MomentaryEnd,
    ];

    pub fn base_name(self) -> &'static str {
        match self {
            SlotKind::Tap => "tap_action",
            SlotKind::Hold => "hold_action",
            SlotKind::DoubleTap => "double_tap_action",
            SlotKind::MomentaryStart => "momentary_start_action",
            SlotKind::MomentaryEnd => "momentary_end_action",
        }
    }

    pub fn is_momentary(self) -> bool {
        matches!(self, SlotKind::MomentaryStart | SlotKind::MomentaryEnd)
    }
}

/// A named entry of an [`ActionsBag`], e.g. `tap_action` or `multi_hold_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionSlot {
    pub kind: SlotKind,
    pub multi: bool,
}

impl ActionSlot {
    pub const fn single(kind: SlotKind) -> Self {
        Self { kind, multi: false }
    }

    pub const fn multi(kind: SlotKind) -> Self {
        Self { kind, multi: true }
    }

    /// Picks the `multi_` variant when more than one contact takes part.
    pub const fn for_contacts(kind: SlotKind, contacts: usize) -> Self {
        Self {
            kind,
            multi: contacts > 1,
        }
    }

    pub fn name(&self) -> String {
        if self.multi {
            format!("{MULTI_PREFIX}{}", self.kind.base_name())
        } else {
            self.kind.base_name().to_string()
        }
    }

    /// Parses a slot name as written in configuration.
    pub fn parse(name: &str) -> Option<Self> {
        let (multi, base) = match name.strip_prefix(MULTI_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, name),
        };
        SlotKind::ALL
            .into_iter()
            .find(|kind| kind.base_name() == base)
            .map(|kind| Self { kind, multi })
    }
}

impl fmt::Display for ActionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multi {
            f.write_str(MULTI_PREFIX)?;
        }
        f.write_str(self.kind.base_name())
    }
}

/// One configured action.
///
/// Every field may hold a literal or a template expression; expressions are
/// rendered at the moment the value is needed, never ahead of time.
/// Unrecognised keys are kept in `data` and travel with the dispatch request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActionDescriptor {
    /// Action identifier, or `"none"` / `"repeat"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,

    /// Milliseconds before a press counts as a hold (default 500)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_time: Option<Value>,

    /// Milliseconds between auto-repeat ticks (default 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_delay: Option<Value>,

    /// Milliseconds a second tap may take to arrive (default 200)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_window: Option<Value>,

    /// Parameters forwarded untouched to the action sink
    #[serde(flatten)]
    pub data: BTreeMap<String, Value>,
}

impl ActionDescriptor {
    pub fn new(action: impl Into<Value>) -> Self {
        Self {
            action: Some(action.into()),
            ..Self::default()
        }
    }

    pub fn with_hold_time(mut self, value: impl Into<Value>) -> Self {
        self.hold_time = Some(value.into());
        self
    }

    pub fn with_repeat_delay(mut self, value: impl Into<Value>) -> Self {
        self.repeat_delay = Some(value.into());
        self
    }

    pub fn with_double_tap_window(mut self, value: impl Into<Value>) -> Self {
        self.double_tap_window = Some(value.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Mapping from slot name to descriptor for one surface.
///
/// Keys stay plain strings so configuration round-trips untouched; lookups go
/// through [`ActionSlot`]. A missing slot behaves like `"none"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ActionsBag(BTreeMap<String, ActionDescriptor>);

impl ActionsBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, slot: ActionSlot, descriptor: ActionDescriptor) -> Self {
        self.insert(slot, descriptor);
        self
    }

    pub fn insert(&mut self, slot: ActionSlot, descriptor: ActionDescriptor) {
        self.0.insert(slot.name(), descriptor);
    }

    pub fn get(&self, slot: ActionSlot) -> Option<&ActionDescriptor> {
        self.0.get(&slot.name())
    }

    pub fn contains(&self, slot: ActionSlot) -> bool {
        self.0.contains_key(&slot.name())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ActionDescriptor)> {
        self.0.iter().map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = (&str, &mut ActionDescriptor)> {
        self.0
            .iter_mut()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|name, _| keep(name));
    }
}

/// Per-direction action bags consulted once a swipe is recognised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DirectionActions {
    #[serde(default)]
    pub up: ActionsBag,
    #[serde(default)]
    pub down: ActionsBag,
    #[serde(default)]
    pub left: ActionsBag,
    #[serde(default)]
    pub right: ActionsBag,
}

impl DirectionActions {
    pub fn get(&self, direction: Direction) -> &ActionsBag {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut ActionsBag {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    pub fn with(mut self, direction: Direction, bag: ActionsBag) -> Self {
        *self.get_mut(direction) = bag;
        self
    }
}
