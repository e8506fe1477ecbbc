//! Gesture state machines.
//!
//! Hosts translate their native touch and pointer events into the generic
//! [`events`] types and feed them, together with the current instant, into a
//! [`Touchpad`] or [`Button`]. Both machines report resolved gestures through
//! an [`ActionResolver`](crate::actions::ActionResolver).

pub mod button;
pub mod events;
pub mod touchpad;

pub use button::{Button, ButtonKey, ButtonPhase};
pub use events::{Contact, Direction, Propagation};
pub use touchpad::{GesturePhase, Touchpad};
