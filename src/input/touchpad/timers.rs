use std::time::Instant;

use log::{debug, trace};

use super::core::{Hold, MIN_REPEAT_DELAY, Phase, Press, TapWindow, Touchpad};
use crate::actions::{ACTION_REPEAT, ActionSlot, HapticKind, SlotKind};

impl Touchpad {
    /// Fires every timer due at or before `now`, oldest first.
    ///
    /// Each timer observes its own deadline as the current instant, so a
    /// host that wakes late still gets evenly spaced repeat ticks.
    pub fn advance(&mut self, now: Instant) {
        while let Some(deadline) = self.next_deadline() {
            if deadline > now {
                break;
            }
            self.fire(deadline);
        }
    }

    fn fire(&mut self, at: Instant) {
        match self.phase {
            Phase::TapWindow(window) => {
                trace!("Double-tap window elapsed");
                self.send_tap(window.contacts);
                self.end_action();
            }
            Phase::Pressed(press) => match press.hold {
                Hold::Armed { .. } => self.confirm_hold(press, at),
                Hold::Repeating { next, every } => {
                    trace!("Repeat tick");
                    self.resolver.fire_haptic(HapticKind::Selection);
                    self.send(
                        press.direction,
                        ActionSlot::for_contacts(SlotKind::Tap, press.contacts),
                    );
                    self.phase = Phase::Pressed(Press {
                        hold: Hold::Repeating {
                            next: next + every,
                            every,
                        },
                        ..press
                    });
                }
                Hold::Confirmed => {}
            },
            Phase::Idle | Phase::Momentary(_) | Phase::Lifting => {}
        }
    }

    fn confirm_hold(&mut self, press: Press, at: Instant) {
        let press = self.flush_pending_tap(press);
        let bag = self.bag(press.direction);

        // A multi gesture repeats per its own hold slot when one is configured.
        let multi_hold = ActionSlot::multi(SlotKind::Hold);
        let repeat_slot = if press.contacts > 1 && bag.contains(multi_hold) {
            multi_hold
        } else {
            ActionSlot::single(SlotKind::Hold)
        };

        if self.resolver.resolves_to(bag, repeat_slot, ACTION_REPEAT) {
            let every = self
                .resolver
                .repeat_delay(bag, repeat_slot)
                .max(MIN_REPEAT_DELAY);
            debug!("Hold confirmed, repeating every {} ms", every.as_millis());
            self.phase = Phase::Pressed(Press {
                hold: Hold::Repeating {
                    next: at + every,
                    every,
                },
                ..press
            });
        } else {
            debug!("Hold confirmed");
            self.resolver.fire_haptic(HapticKind::Medium);
            self.send(
                press.direction,
                ActionSlot::for_contacts(SlotKind::Hold, press.contacts),
            );
            self.phase = Phase::Pressed(Press {
                hold: Hold::Confirmed,
                ..press
            });
        }
    }

    /// Tap / double-tap arbitration for a release that neither moved nor held.
    pub(super) fn click(&mut self, press: Press, now: Instant) {
        let contacts = press.contacts;

        if !self.double_tap_configured() {
            self.send_tap(contacts);
            self.end_action();
            return;
        }

        let open_window = match press.pending_tap {
            Some(window) if now <= window.deadline && window.contacts == contacts => Some(window),
            Some(window) => {
                debug!("Previous tap does not pair with this one, flushing it");
                self.send_tap(window.contacts);
                None
            }
            None => None,
        };

        if open_window.is_some() {
            debug!("Double tap with {} contact(s)", contacts);
            self.resolver.fire_haptic(HapticKind::Success);
            self.send(None, ActionSlot::for_contacts(SlotKind::DoubleTap, contacts));
            self.end_action();
            return;
        }

        let slot = ActionSlot::for_contacts(SlotKind::DoubleTap, contacts);
        let deadline = now + self.resolver.double_tap_window(&self.actions, slot);
        trace!("Opened double-tap window for {} contact(s)", contacts);
        self.phase = Phase::TapWindow(TapWindow { contacts, deadline });
    }

    fn double_tap_configured(&self) -> bool {
        self.resolver
            .is_active(&self.actions, ActionSlot::single(SlotKind::DoubleTap))
            || self
                .resolver
                .is_active(&self.actions, ActionSlot::multi(SlotKind::DoubleTap))
    }
}
