use std::time::Duration;

use log::{debug, trace, warn};
use serde_json::Value;

use super::{
    ACTION_NONE, ActionDescriptor, ActionRequest, ActionSink, ActionSlot, ActionsBag,
    DEFAULT_DOUBLE_TAP_WINDOW, DEFAULT_HOLD_TIME, DEFAULT_REPEAT_DELAY, HapticKind, HapticSink,
    TemplateRenderer,
};

/// Evaluation and dispatch service shared by the touchpad and button machines.
///
/// Owns the three outward collaborators. It never arms timers and never
/// interprets raw input; it renders, filters `"none"`, and forwards.
pub struct ActionResolver {
    renderer: Box<dyn TemplateRenderer>,
    sink: Box<dyn ActionSink>,
    haptics: Box<dyn HapticSink>,
}

impl ActionResolver {
    pub fn new(
        renderer: impl TemplateRenderer + 'static,
        sink: impl ActionSink + 'static,
        haptics: impl HapticSink + 'static,
    ) -> Self {
        Self {
            renderer: Box::new(renderer),
            sink: Box::new(sink),
            haptics: Box::new(haptics),
        }
    }

    /// Uses one sink value (cloned) for both dispatches and haptics.
    pub fn with_sink<S>(renderer: impl TemplateRenderer + 'static, sink: S) -> Self
    where
        S: ActionSink + HapticSink + Clone + 'static,
    {
        Self::new(renderer, sink.clone(), sink)
    }

    pub fn render_template(&self, expr: &Value) -> Value {
        self.renderer.render(expr)
    }

    /// Renders a descriptor's action; absent descriptors and fields resolve to `"none"`.
    pub fn resolve_action(&self, descriptor: Option<&ActionDescriptor>) -> String {
        let Some(expr) = descriptor.and_then(|d| d.action.as_ref()) else {
            return ACTION_NONE.to_string();
        };
        match self.render_template(expr) {
            Value::Null => ACTION_NONE.to_string(),
            Value::String(text) => text,
            other => other.to_string(),
        }
    }

    /// True when the slot is configured and does not resolve to `"none"`.
    pub fn is_active(&self, bag: &ActionsBag, slot: ActionSlot) -> bool {
        bag.get(slot)
            .is_some_and(|descriptor| self.resolve_action(Some(descriptor)) != ACTION_NONE)
    }

    pub fn resolves_to(&self, bag: &ActionsBag, slot: ActionSlot, sentinel: &str) -> bool {
        bag.get(slot)
            .is_some_and(|descriptor| self.resolve_action(Some(descriptor)) == sentinel)
    }

    pub fn hold_time(&self, bag: &ActionsBag, slot: ActionSlot) -> Duration {
        let expr = bag.get(slot).and_then(|d| d.hold_time.as_ref());
        self.duration(expr, DEFAULT_HOLD_TIME)
    }

    pub fn repeat_delay(&self, bag: &ActionsBag, slot: ActionSlot) -> Duration {
        let expr = bag.get(slot).and_then(|d| d.repeat_delay.as_ref());
        self.duration(expr, DEFAULT_REPEAT_DELAY)
    }

    pub fn double_tap_window(&self, bag: &ActionsBag, slot: ActionSlot) -> Duration {
        let expr = bag.get(slot).and_then(|d| d.double_tap_window.as_ref());
        self.duration(expr, DEFAULT_DOUBLE_TAP_WINDOW)
    }

    /// Renders a millisecond duration, falling back to `default` when absent or unusable.
    pub fn duration(&self, expr: Option<&Value>, default: Duration) -> Duration {
        let Some(expr) = expr else {
            return default;
        };
        let rendered = self.render_template(expr);
        match duration_from_millis(&rendered) {
            Some(duration) => duration,
            None => {
                if !rendered.is_null() {
                    warn!(
                        "Invalid duration {}, using {} ms",
                        rendered,
                        default.as_millis()
                    );
                }
                default
            }
        }
    }

    /// Resolves a slot from `bag` and dispatches it unless it is `"none"`.
    ///
    /// Returns whether a request reached the sink. `"repeat"` is forwarded
    /// like any other identifier; interval scheduling belongs to the caller.
    pub fn send_action(&mut self, bag: &ActionsBag, slot: ActionSlot) -> bool {
        match bag.get(slot) {
            Some(descriptor) => self.send_descriptor(&slot.name(), descriptor),
            None => {
                trace!("No {} configured", slot);
                false
            }
        }
    }

    pub fn send_descriptor(&mut self, slot: &str, descriptor: &ActionDescriptor) -> bool {
        let action = self.resolve_action(Some(descriptor));
        if action == ACTION_NONE {
            trace!("{} resolved to none", slot);
            return false;
        }
        debug!("Dispatching {} ({})", action, slot);
        self.sink.dispatch(ActionRequest {
            slot: slot.to_string(),
            action,
            descriptor: descriptor.clone(),
        });
        true
    }

    pub fn fire_haptic(&mut self, kind: HapticKind) {
        self.haptics.fire(kind);
    }

    /// Shared end-of-cycle hook; machines call it after resetting their own state.
    pub fn end_action(&mut self) {
        trace!("Action cycle finished");
    }
}

pub(crate) fn duration_from_millis(value: &Value) -> Option<Duration> {
    let millis = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (millis.is_finite() && millis >= 0.0).then(|| Duration::from_millis(millis.round() as u64))
}
