//! Action configuration, evaluation and dispatch.
//!
//! The gesture machines decide *which* slot fires; this module turns a slot
//! into a dispatched request. Descriptors are evaluated lazily through a
//! [`TemplateRenderer`], results of `"none"` are dropped, and everything else
//! goes to the [`ActionSink`]. Haptic notifications travel alongside through
//! the [`HapticSink`].

mod descriptor;
mod resolver;
mod sinks;
mod template;

pub use descriptor::{
    ACTION_NONE, ACTION_REPEAT, ActionDescriptor, ActionSlot, ActionsBag,
    DEFAULT_DOUBLE_TAP_WINDOW, DEFAULT_HOLD_TIME, DEFAULT_REPEAT_DELAY, DirectionActions, SlotKind,
};
pub use resolver::ActionResolver;
pub use sinks::{
    ActionRequest, ActionSink, FeedbackEvent, HapticKind, HapticSink, NullSink, Output,
    PressFeedback, RecordingSink,
};
pub use template::{TemplateRenderer, VariableRenderer, Variables, Verbatim, variable_reference};

pub(crate) use resolver::duration_from_millis;
