//! Generic input event types shared by the gesture machines.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One active touch point, or the mouse pointer.
///
/// Backends map their native touch and pointer events to contacts so both
/// streams are handled uniformly once reduced to a centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Horizontal position in surface coordinates
    pub x: f64,
    /// Vertical position in surface coordinates (grows downwards)
    pub y: f64,
}

impl Contact {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Contact {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Contact {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Swipe direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the host should do with the input event after a machine handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Let default handling (e.g. a synthesized click) run
    Continue,
    /// Swallow the event; the gesture already produced its action
    Stop,
}

impl Propagation {
    pub fn is_stopped(self) -> bool {
        self == Propagation::Stop
    }
}
