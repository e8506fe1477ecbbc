//! Single-region remote key: short press, long press, and hold auto-repeat.

mod core;
mod key;
#[cfg(test)]
mod tests;

pub use self::core::{Button, ButtonPhase, LONG_PRESS, REPEAT_INTERVAL};
pub use self::key::ButtonKey;
