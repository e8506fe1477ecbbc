use std::time::Instant;

use log::debug;

use super::core::{Hold, Momentary, Phase, Press, SWIPE_THRESHOLD, TapWindow, Touchpad};
use crate::actions::{ActionSlot, HapticKind, SlotKind};
use crate::input::{Contact, Propagation};
use crate::util::{Point, centroid, swipe_direction};

impl Touchpad {
    /// Processes a press carrying every contact currently down.
    ///
    /// # Behavior
    /// - Idle (or awaiting a second tap): starts a gesture. A configured
    ///   momentary start dispatches immediately; a lone momentary end just
    ///   waits for release; otherwise the hold timer is armed.
    /// - Gesture already down: another finger landed. The origin moves to
    ///   the new centroid and the contact count is updated; timers stay as
    ///   they are.
    /// - A press without contacts is ignored.
    pub fn on_press(&mut self, contacts: &[Contact], now: Instant) {
        self.advance(now);
        let Some(origin) = centroid(contacts) else {
            debug!("Ignoring press without contacts");
            return;
        };
        let count = contacts.len();
        if !self.is_down() {
            self.feedback.start_press();
        }

        match self.phase {
            Phase::Idle | Phase::Lifting => self.begin(origin, count, None, now),
            Phase::TapWindow(window) => self.begin(origin, count, Some(window), now),
            Phase::Pressed(press) => {
                self.phase = Phase::Pressed(Press {
                    origin,
                    contacts: count,
                    ..press
                });
            }
            Phase::Momentary(momentary) => {
                self.phase = Phase::Momentary(Momentary {
                    contacts: count,
                    ..momentary
                });
            }
        }
    }

    fn begin(&mut self, origin: Point, contacts: usize, pending: Option<TapWindow>, now: Instant) {
        let start = ActionSlot::single(SlotKind::MomentaryStart);
        let end = ActionSlot::single(SlotKind::MomentaryEnd);

        if self.resolver.is_active(&self.actions, start) {
            self.flush_window(pending);
            debug!("Momentary press started");
            self.resolver.fire_haptic(HapticKind::Light);
            self.send(None, start);
            self.phase = Phase::Momentary(Momentary {
                started_at: now,
                contacts,
            });
        } else if self.resolver.is_active(&self.actions, end) {
            self.flush_window(pending);
            debug!("Momentary press started (end action only)");
            self.resolver.fire_haptic(HapticKind::Light);
            self.phase = Phase::Momentary(Momentary {
                started_at: now,
                contacts,
            });
        } else {
            let deadline = now + self.hold_time(None, contacts);
            debug!("Press with {} contact(s)", contacts);
            self.phase = Phase::Pressed(Press {
                origin,
                contacts,
                direction: None,
                hold: Hold::Armed { deadline },
                pending_tap: pending,
            });
        }
    }

    fn flush_window(&mut self, window: Option<TapWindow>) {
        if let Some(window) = window {
            self.send_tap(window.contacts);
        }
    }

    /// Processes movement of the current contact set.
    ///
    /// The first time one axis leads the other by more than
    /// [`SWIPE_THRESHOLD`], the direction locks: its tap action fires once and
    /// a pending hold timer restarts with the direction's hold time. Later
    /// moves may update the direction silently but never dispatch again.
    /// Moves outside a plain press (idle, momentary, lifting) are ignored.
    pub fn on_move(&mut self, contacts: &[Contact], now: Instant) {
        self.advance(now);
        let Phase::Pressed(press) = self.phase else {
            return;
        };
        let Some(current) = centroid(contacts) else {
            return;
        };
        let mut press = Press {
            contacts: contacts.len(),
            ..press
        };

        let Some(direction) = swipe_direction(press.origin, current, SWIPE_THRESHOLD) else {
            self.phase = Phase::Pressed(press);
            return;
        };

        if let Some(locked) = press.direction {
            if locked != direction {
                debug!("Swipe drifted {} -> {} after lock", locked, direction);
            }
            press.direction = Some(direction);
            self.phase = Phase::Pressed(press);
            return;
        }

        press = self.flush_pending_tap(press);
        press.direction = Some(direction);
        debug!("Swipe {} with {} contact(s)", direction, press.contacts);
        self.resolver.fire_haptic(HapticKind::Light);
        self.send(
            Some(direction),
            ActionSlot::for_contacts(SlotKind::Tap, press.contacts),
        );

        if let Hold::Armed { .. } = press.hold {
            press.hold = Hold::Armed {
                deadline: now + self.hold_time(Some(direction), press.contacts),
            };
        }
        self.phase = Phase::Pressed(press);
    }

    /// Processes a contact lifting; `remaining` is how many are still down.
    ///
    /// Press feedback ends on the lift that takes the surface out of a press:
    /// the last contact, or the first lift of a momentary press.
    ///
    /// Returns [`Propagation::Stop`] when the gesture already resolved as a
    /// swipe or hold, so the host swallows the default click.
    pub fn on_release(&mut self, remaining: usize, now: Instant) -> Propagation {
        self.advance(now);
        let leaving = remaining == 0 || matches!(self.phase, Phase::Momentary(_));
        if self.is_down() && leaving {
            self.feedback.end_press();
        }

        match self.phase {
            Phase::Momentary(momentary) => {
                let end = ActionSlot::single(SlotKind::MomentaryEnd);
                if self.resolver.is_active(&self.actions, end) {
                    self.resolver.fire_haptic(HapticKind::Selection);
                    self.send(None, end);
                }
                debug!(
                    "Momentary press with {} contact(s) lasted {} ms",
                    momentary.contacts,
                    now.saturating_duration_since(momentary.started_at)
                        .as_millis()
                );
                self.end_action();
                Propagation::Continue
            }
            Phase::Pressed(press) if press.direction.is_some() || press.hold.is_confirmed() => {
                self.end_action();
                if remaining > 0 {
                    self.phase = Phase::Lifting;
                }
                Propagation::Stop
            }
            Phase::Pressed(press) => {
                if remaining == 0 {
                    self.click(press, now);
                }
                Propagation::Continue
            }
            Phase::Lifting => {
                if remaining == 0 {
                    self.end_action();
                }
                Propagation::Stop
            }
            Phase::Idle | Phase::TapWindow(_) => Propagation::Continue,
        }
    }

    /// The platform cancelled the touch sequence.
    pub fn on_cancel(&mut self, now: Instant) {
        self.advance(now);
        if self.is_down() {
            self.feedback.end_press();
        }
        self.end_action();
    }

    /// The pointer left the region. A press still down is ended first so the
    /// feedback handle always sees a matching `end_press`.
    pub fn on_leave(&mut self, now: Instant) {
        self.advance(now);
        if self.is_down() {
            self.feedback.end_press();
        }
        self.feedback.end_hover();
        self.end_action();
    }

    fn is_down(&self) -> bool {
        matches!(
            self.phase,
            Phase::Pressed(_) | Phase::Momentary(_) | Phase::Lifting
        )
    }

    /// The pointer entered the region.
    pub fn on_enter(&mut self) {
        self.feedback.start_hover();
    }
}
