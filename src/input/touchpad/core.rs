//! Touchpad gesture phases and the machine that owns them.

use std::time::{Duration, Instant};

use log::debug;

use crate::actions::{
    ActionResolver, ActionSlot, ActionsBag, DirectionActions, HapticKind, NullSink, PressFeedback,
    SlotKind,
};
use crate::input::Direction;
use crate::util::Point;

/// Dominant-axis lead (in surface units) before movement counts as a swipe.
pub const SWIPE_THRESHOLD: f64 = 2.0;

/// Shortest auto-repeat interval honoured; smaller configured delays are raised to it.
pub const MIN_REPEAT_DELAY: Duration = Duration::from_millis(1);

/// Externally visible gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No contact and nothing pending
    Idle,
    /// A tap was released; waiting for a possible second tap
    AwaitingSecondTap,
    /// Contact down, no movement or hold decided yet
    Pressed,
    /// Contact down and a swipe direction is locked
    Swiping(Direction),
    /// Hold confirmed with a one-shot hold action
    Holding,
    /// Hold confirmed and auto-repeating the tap action
    Repeating,
    /// Momentary press between its start and end actions
    Momentary,
    /// Gesture resolved; waiting for the remaining contacts to lift
    Lifting,
}

impl GesturePhase {
    /// Stable lowercase name, used in logs and replay output.
    pub fn name(self) -> &'static str {
        match self {
            GesturePhase::Idle => "idle",
            GesturePhase::AwaitingSecondTap => "awaiting_second_tap",
            GesturePhase::Pressed => "pressed",
            GesturePhase::Swiping(Direction::Up) => "swiping_up",
            GesturePhase::Swiping(Direction::Down) => "swiping_down",
            GesturePhase::Swiping(Direction::Left) => "swiping_left",
            GesturePhase::Swiping(Direction::Right) => "swiping_right",
            GesturePhase::Holding => "holding",
            GesturePhase::Repeating => "repeating",
            GesturePhase::Momentary => "momentary",
            GesturePhase::Lifting => "lifting",
        }
    }
}

/// Internal gesture state. Timers live inside the variants as deadlines, so
/// replacing the phase is what cancels them.
#[derive(Debug, Clone, Copy)]
pub(super) enum Phase {
    Idle,
    TapWindow(TapWindow),
    Pressed(Press),
    Momentary(Momentary),
    Lifting,
}

/// First tap of a possible double tap.
#[derive(Debug, Clone, Copy)]
pub(super) struct TapWindow {
    /// Contacts that took part in the first tap; the second must match
    pub contacts: usize,
    pub deadline: Instant,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Press {
    pub origin: Point,
    pub contacts: usize,
    /// Set once movement crossed the swipe threshold
    pub direction: Option<Direction>,
    pub hold: Hold,
    /// A released first tap whose window is suspended while this press is down
    pub pending_tap: Option<TapWindow>,
}

#[derive(Debug, Clone, Copy)]
pub(super) enum Hold {
    Armed { deadline: Instant },
    Confirmed,
    Repeating { next: Instant, every: Duration },
}

impl Hold {
    pub fn deadline(&self) -> Option<Instant> {
        match self {
            Hold::Armed { deadline } => Some(*deadline),
            Hold::Repeating { next, .. } => Some(*next),
            Hold::Confirmed => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        !matches!(self, Hold::Armed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Momentary {
    pub started_at: Instant,
    pub contacts: usize,
}

impl Phase {
    pub fn deadline(&self) -> Option<Instant> {
        match self {
            Phase::TapWindow(window) => Some(window.deadline),
            Phase::Pressed(press) => press.hold.deadline(),
            Phase::Idle | Phase::Momentary(_) | Phase::Lifting => None,
        }
    }
}

/// Multi-touch gesture recognizer for one touchpad region.
///
/// Feeds on press/move/release/cancel/leave events and on the passage of
/// time ([`Touchpad::advance`]), and resolves each physical gesture into
/// tap, double tap, swipe, hold, hold-repeat or momentary actions.
///
/// The machine never reads a clock. Every call carries `now`, and pending
/// timers are plain deadlines: the host wakes the machine at
/// [`Touchpad::next_deadline`] and every input handler fires overdue timers
/// before looking at its event.
pub struct Touchpad {
    pub(super) actions: ActionsBag,
    pub(super) directions: DirectionActions,
    pub(super) resolver: ActionResolver,
    pub(super) feedback: Box<dyn PressFeedback>,
    pub(super) phase: Phase,
}

impl Touchpad {
    pub fn new(actions: ActionsBag, directions: DirectionActions, resolver: ActionResolver) -> Self {
        Self {
            actions,
            directions,
            resolver,
            feedback: Box::new(NullSink),
            phase: Phase::Idle,
        }
    }

    /// Attaches the visual press/hover feedback handle.
    pub fn with_feedback(mut self, feedback: impl PressFeedback + 'static) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    pub fn actions(&self) -> &ActionsBag {
        &self.actions
    }

    pub fn directions(&self) -> &DirectionActions {
        &self.directions
    }

    pub fn phase(&self) -> GesturePhase {
        match self.phase {
            Phase::Idle => GesturePhase::Idle,
            Phase::TapWindow(_) => GesturePhase::AwaitingSecondTap,
            Phase::Momentary(_) => GesturePhase::Momentary,
            Phase::Lifting => GesturePhase::Lifting,
            Phase::Pressed(press) => match (press.hold, press.direction) {
                (Hold::Repeating { .. }, _) => GesturePhase::Repeating,
                (Hold::Confirmed, _) => GesturePhase::Holding,
                (Hold::Armed { .. }, Some(direction)) => GesturePhase::Swiping(direction),
                (Hold::Armed { .. }, None) => GesturePhase::Pressed,
            },
        }
    }

    pub fn phase_name(&self) -> &'static str {
        self.phase().name()
    }

    /// Instant at which the host must call [`Touchpad::advance`] next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.phase.deadline()
    }

    /// Number of live timers. Never more than one: the hold timer and its
    /// repeat share a slot, and a tap window is suspended while a press is down.
    pub fn armed_timers(&self) -> usize {
        usize::from(self.phase.deadline().is_some())
    }

    /// Drops the session and every pending timer without dispatching anything.
    ///
    /// Idempotent: a second call leaves the same idle state.
    pub fn reset(&mut self) {
        self.end_action();
    }

    pub(super) fn end_action(&mut self) {
        if !matches!(self.phase, Phase::Idle) {
            debug!("Touchpad session ended from {:?}", self.phase());
        }
        self.phase = Phase::Idle;
        self.resolver.end_action();
    }

    /// Dispatches `slot` from the default bag, or from the direction's bag once a swipe locked one.
    pub(super) fn send(&mut self, direction: Option<Direction>, slot: ActionSlot) -> bool {
        let Self {
            actions,
            directions,
            resolver,
            ..
        } = self;
        let bag = match direction {
            Some(direction) => directions.get(direction),
            None => &*actions,
        };
        resolver.send_action(bag, slot)
    }

    pub(super) fn bag(&self, direction: Option<Direction>) -> &ActionsBag {
        match direction {
            Some(direction) => self.directions.get(direction),
            None => &self.actions,
        }
    }

    pub(super) fn send_tap(&mut self, contacts: usize) {
        self.resolver.fire_haptic(HapticKind::Light);
        self.send(None, ActionSlot::for_contacts(SlotKind::Tap, contacts));
    }

    pub(super) fn hold_time(&self, direction: Option<Direction>, contacts: usize) -> Duration {
        let slot = ActionSlot::for_contacts(SlotKind::Hold, contacts);
        self.resolver.hold_time(self.bag(direction), slot)
    }

    /// Dispatches a suspended first tap before the press turns into something else.
    pub(super) fn flush_pending_tap(&mut self, press: Press) -> Press {
        if let Some(window) = press.pending_tap {
            debug!("Flushing pending tap before {:?}", self.phase());
            self.send_tap(window.contacts);
        }
        Press {
            pending_tap: None,
            ..press
        }
    }
}
