//! Gesture recognition for remote-control surfaces.
//!
//! A [`Touchpad`](input::Touchpad) turns multi-touch input into taps, double
//! taps, swipes, holds, hold-repeats and momentary presses; a
//! [`Button`](input::Button) handles a single key's press, long press and
//! repeat. Both resolve gestures into configured actions through an
//! [`ActionResolver`](actions::ActionResolver), which renders templates and
//! forwards the result to host-provided sinks.
//!
//! The configuration types are exported so external tools can share
//! validation and serialization with the `gesturepad` binary.

pub mod actions;
pub mod config;
pub mod input;
pub mod replay;
pub mod util;

pub use config::Config;
