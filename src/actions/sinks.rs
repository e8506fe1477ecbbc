//! Collaborator seams: action dispatch, haptic notification and press feedback.
//!
//! All sinks are fire-and-forget. The gesture machines never observe a
//! return value from them and never fail because of them.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use super::ActionDescriptor;

/// Haptic feedback vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticKind {
    Light,
    Medium,
    Selection,
    Success,
}

/// A resolved action handed to the [`ActionSink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRequest {
    /// Slot the action came from, e.g. `multi_tap_action`
    pub slot: String,
    /// Rendered action identifier
    pub action: String,
    /// Descriptor as configured, carrying the parameter bag
    pub descriptor: ActionDescriptor,
}

/// Consumer executing resolved actions.
pub trait ActionSink {
    fn dispatch(&mut self, request: ActionRequest);
}

impl<F> ActionSink for F
where
    F: FnMut(ActionRequest),
{
    fn dispatch(&mut self, request: ActionRequest) {
        self(request)
    }
}

/// Consumer of haptic notifications.
pub trait HapticSink {
    fn fire(&mut self, kind: HapticKind);
}

impl<F> HapticSink for F
where
    F: FnMut(HapticKind),
{
    fn fire(&mut self, kind: HapticKind) {
        self(kind)
    }
}

/// Visual press/hover feedback (the ripple) owned by a touch surface.
///
/// Every `start_press` is matched by an `end_press`, cancellation included.
pub trait PressFeedback {
    fn start_press(&mut self) {}
    fn end_press(&mut self) {}
    fn start_hover(&mut self) {}
    fn end_hover(&mut self) {}
}

/// Feedback notification, as recorded by [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackEvent {
    StartPress,
    EndPress,
    StartHover,
    EndHover,
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ActionSink for NullSink {
    fn dispatch(&mut self, _request: ActionRequest) {}
}

impl HapticSink for NullSink {
    fn fire(&mut self, _kind: HapticKind) {}
}

impl PressFeedback for NullSink {}

/// Everything a surface emitted, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Output {
    Action(ActionRequest),
    Haptic { kind: HapticKind },
    Feedback { event: FeedbackEvent },
}

/// Shared in-memory recorder usable as every kind of sink at once.
///
/// Clones share the same log, so one handle can be given to a machine while
/// another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    outputs: Rc<RefCell<Vec<Output>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> Vec<Output> {
        self.outputs.borrow().clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<Output> {
        std::mem::take(&mut *self.outputs.borrow_mut())
    }

    pub fn clear(&self) {
        self.outputs.borrow_mut().clear();
    }

    pub fn actions(&self) -> Vec<ActionRequest> {
        self.outputs
            .borrow()
            .iter()
            .filter_map(|output| match output {
                Output::Action(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    /// Dispatched action identifiers, in order.
    pub fn action_names(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .map(|request| request.action)
            .collect()
    }

    pub fn haptics(&self) -> Vec<HapticKind> {
        self.outputs
            .borrow()
            .iter()
            .filter_map(|output| match output {
                Output::Haptic { kind } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    pub fn feedback(&self) -> Vec<FeedbackEvent> {
        self.outputs
            .borrow()
            .iter()
            .filter_map(|output| match output {
                Output::Feedback { event } => Some(*event),
                _ => None,
            })
            .collect()
    }

    fn push(&self, output: Output) {
        self.outputs.borrow_mut().push(output);
    }
}

impl ActionSink for RecordingSink {
    fn dispatch(&mut self, request: ActionRequest) {
        self.push(Output::Action(request));
    }
}

impl HapticSink for RecordingSink {
    fn fire(&mut self, kind: HapticKind) {
        self.push(Output::Haptic { kind });
    }
}

impl PressFeedback for RecordingSink {
    fn start_press(&mut self) {
        self.push(Output::Feedback {
            event: FeedbackEvent::StartPress,
        });
    }

    fn end_press(&mut self) {
        self.push(Output::Feedback {
            event: FeedbackEvent::EndPress,
        });
    }

    fn start_hover(&mut self) {
        self.push(Output::Feedback {
            event: FeedbackEvent::StartHover,
        });
    }

    fn end_hover(&mut self) {
        self.push(Output::Feedback {
            event: FeedbackEvent::EndHover,
        });
    }
}
