use std::time::{Duration, Instant};

use log::{debug, trace};

use super::ButtonKey;
use crate::actions::{ActionResolver, ActionSlot, ActionsBag, HapticKind, SlotKind};
use crate::input::Propagation;

/// Time a press must last before it counts as a long press. Not configurable.
pub const LONG_PRESS: Duration = Duration::from_millis(500);

/// Auto-repeat interval of a long press on a repeating key.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(100);

/// Externally visible button phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPhase {
    Idle,
    /// Down, long press not confirmed yet
    Pressed,
    /// Long press confirmed and its hold action sent
    LongPressed,
    /// Long press confirmed on a repeating key
    Repeating,
}

impl ButtonPhase {
    pub fn name(self) -> &'static str {
        match self {
            ButtonPhase::Idle => "idle",
            ButtonPhase::Pressed => "pressed",
            ButtonPhase::LongPressed => "long_pressed",
            ButtonPhase::Repeating => "repeating",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Pressed { deadline: Instant },
    LongPressed,
    Repeating { next: Instant },
}

/// Single-region press/hold/repeat machine for one remote key.
///
/// The host forwards touch start and end as [`Button::on_press`] and
/// [`Button::on_release`], and the platform click as [`Button::on_click`].
/// A release after a confirmed long press returns [`Propagation::Stop`] so the
/// host suppresses the click that would otherwise follow.
pub struct Button {
    key: ButtonKey,
    actions: ActionsBag,
    resolver: ActionResolver,
    phase: Phase,
}

impl Button {
    pub fn new(key: impl Into<ButtonKey>, actions: ActionsBag, resolver: ActionResolver) -> Self {
        Self {
            key: key.into(),
            actions,
            resolver,
            phase: Phase::Idle,
        }
    }

    pub fn key(&self) -> &ButtonKey {
        &self.key
    }

    pub fn actions(&self) -> &ActionsBag {
        &self.actions
    }

    pub fn phase(&self) -> ButtonPhase {
        match self.phase {
            Phase::Idle => ButtonPhase::Idle,
            Phase::Pressed { .. } => ButtonPhase::Pressed,
            Phase::LongPressed => ButtonPhase::LongPressed,
            Phase::Repeating { .. } => ButtonPhase::Repeating,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Pressed { deadline } => Some(deadline),
            Phase::Repeating { next } => Some(next),
            Phase::Idle | Phase::LongPressed => None,
        }
    }

    /// Live timers: the long-press timer and then its repeat, never both.
    pub fn armed_timers(&self) -> usize {
        usize::from(self.next_deadline().is_some())
    }

    /// Touch start. Any timer left by an earlier press is dropped first.
    pub fn on_press(&mut self, now: Instant) {
        self.advance(now);
        if !matches!(self.phase, Phase::Idle) {
            debug!("{}: press while {}, restarting", self.key, self.phase().name());
        }
        self.phase = Phase::Pressed {
            deadline: now + LONG_PRESS,
        };
    }

    /// Touch end. Clears both timers.
    pub fn on_release(&mut self, now: Instant) -> Propagation {
        self.advance(now);
        let confirmed = matches!(self.phase, Phase::LongPressed | Phase::Repeating { .. });
        self.reset();
        if confirmed {
            Propagation::Stop
        } else {
            Propagation::Continue
        }
    }

    /// The platform click that follows an unsuppressed release.
    pub fn on_click(&mut self, now: Instant) {
        self.advance(now);
        self.click(false);
    }

    pub fn advance(&mut self, now: Instant) {
        while let Some(deadline) = self.next_deadline() {
            if deadline > now {
                break;
            }
            self.fire(deadline);
        }
    }

    /// Drops every timer without dispatching.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.resolver.end_action();
    }

    fn fire(&mut self, at: Instant) {
        match self.phase {
            Phase::Pressed { .. } if self.key.repeats_on_hold() => {
                debug!("{}: long press, repeating", self.key);
                self.phase = Phase::Repeating {
                    next: at + REPEAT_INTERVAL,
                };
            }
            Phase::Pressed { .. } => {
                debug!("{}: long press", self.key);
                self.phase = Phase::LongPressed;
                self.click(true);
            }
            Phase::Repeating { next } => {
                trace!("{}: repeat tick", self.key);
                self.click(false);
                self.phase = Phase::Repeating {
                    next: next + REPEAT_INTERVAL,
                };
            }
            Phase::Idle | Phase::LongPressed => {}
        }
    }

    fn click(&mut self, long_press: bool) {
        let haptic = if self.key.is_directional() {
            HapticKind::Selection
        } else if long_press {
            HapticKind::Medium
        } else {
            HapticKind::Light
        };
        self.resolver.fire_haptic(haptic);

        let kind = if long_press {
            SlotKind::Hold
        } else {
            SlotKind::Tap
        };
        self.resolver
            .send_action(&self.actions, ActionSlot::single(kind));
    }
}
