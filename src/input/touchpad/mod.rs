//! Multi-touch touchpad gesture recognizer.
//!
//! One [`Touchpad`] watches one region. It tracks the centroid of all active
//! contacts and disambiguates taps, multi-finger taps, double taps,
//! four-direction swipes, holds with optional auto-repeat, and momentary
//! press/release pairs, dispatching exactly one resolution per physical
//! gesture (a swipe may later add its direction's hold).

mod core;
mod pointer;
mod timers;

pub use self::core::{GesturePhase, MIN_REPEAT_DELAY, SWIPE_THRESHOLD, Touchpad};
