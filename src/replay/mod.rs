//! Scripted replay of touchpad and button input on a virtual clock.
//!
//! A [`Replay`] wires one [`Touchpad`] and one [`Button`] per configured key
//! to a shared [`RecordingSink`], then feeds script events in timestamp
//! order. Timers that fall due between two events fire at their own
//! deadlines, so every recorded output carries the millisecond at which a
//! live host would have seen it. Timers still pending after the last event
//! never fire; end a script with a `tick` to flush them.

mod script;
#[cfg(test)]
mod tests;

pub use script::{ReplayError, Script, ScriptEvent, ScriptInput};

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::debug;
use serde::Serialize;

use crate::actions::{ActionResolver, Output, RecordingSink, VariableRenderer};
use crate::config::Config;
use crate::input::{Button, Touchpad};

/// One recorded output and when it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutput {
    /// Milliseconds since the start of the replay
    pub at_ms: u64,
    #[serde(flatten)]
    pub output: Output,
}

pub struct Replay {
    touchpad: Touchpad,
    buttons: BTreeMap<String, Button>,
    sink: RecordingSink,
    renderer: VariableRenderer,
    start: Instant,
}

impl Replay {
    pub fn from_config(config: &Config) -> Self {
        let sink = RecordingSink::new();
        let renderer = config.renderer();
        let resolver = || ActionResolver::with_sink(renderer.clone(), sink.clone());

        let touchpad = Touchpad::new(
            config.touchpad.actions.clone(),
            config.touchpad.directions.clone(),
            resolver(),
        )
        .with_feedback(sink.clone());

        let buttons = config
            .buttons
            .iter()
            .map(|(key, actions)| {
                let button = Button::new(key.as_str(), actions.clone(), resolver());
                (key.clone(), button)
            })
            .collect();

        Self {
            touchpad,
            buttons,
            sink,
            renderer,
            start: Instant::now(),
        }
    }

    pub fn touchpad(&self) -> &Touchpad {
        &self.touchpad
    }

    /// Runs every event and returns the outputs in the order they happened.
    ///
    /// # Errors
    /// Fails on the first event whose timestamp goes backwards or which names
    /// a button that is not configured. Outputs up to that point are lost.
    pub fn run(&mut self, script: &Script) -> Result<Vec<ReplayOutput>, ReplayError> {
        let mut outputs = Vec::new();
        let mut previous = 0;

        for (index, event) in script.events.iter().enumerate() {
            if event.at < previous {
                return Err(ReplayError::OutOfOrder {
                    index,
                    at: event.at,
                    previous,
                });
            }
            let now = self.instant(event.at);
            self.fire_due(now, &mut outputs);
            self.apply(index, &event.input, now)?;
            self.collect(event.at, &mut outputs);
            previous = event.at;
        }

        Ok(outputs)
    }

    fn instant(&self, at_ms: u64) -> Instant {
        self.start + Duration::from_millis(at_ms)
    }

    fn offset(&self, instant: Instant) -> u64 {
        let millis = instant.saturating_duration_since(self.start).as_millis();
        u64::try_from(millis).unwrap_or(u64::MAX)
    }

    /// Fires due timers one deadline at a time, earliest machine first.
    fn fire_due(&mut self, now: Instant, outputs: &mut Vec<ReplayOutput>) {
        loop {
            let touchpad = self.touchpad.next_deadline().filter(|d| *d <= now);
            let button = self
                .buttons
                .iter()
                .filter_map(|(key, button)| Some((button.next_deadline()?, key)))
                .filter(|(deadline, _)| *deadline <= now)
                .min()
                .map(|(deadline, key)| (deadline, key.clone()));

            let deadline = match (touchpad, button) {
                (Some(pad), Some((key_deadline, key))) if key_deadline < pad => {
                    self.advance_button(&key, key_deadline);
                    key_deadline
                }
                (Some(pad), _) => {
                    self.touchpad.advance(pad);
                    pad
                }
                (None, Some((key_deadline, key))) => {
                    self.advance_button(&key, key_deadline);
                    key_deadline
                }
                (None, None) => break,
            };
            let at_ms = self.offset(deadline);
            self.collect(at_ms, outputs);
        }
    }

    fn advance_button(&mut self, key: &str, deadline: Instant) {
        if let Some(button) = self.buttons.get_mut(key) {
            button.advance(deadline);
        }
    }

    fn apply(&mut self, index: usize, input: &ScriptInput, now: Instant) -> Result<(), ReplayError> {
        match input {
            ScriptInput::Press { contacts } => {
                self.touchpad.on_press(&script::contacts(contacts), now)
            }
            ScriptInput::Move { contacts } => {
                self.touchpad.on_move(&script::contacts(contacts), now)
            }
            ScriptInput::Release { remaining } => {
                let propagation = self.touchpad.on_release(*remaining, now);
                debug!("Release handled, propagation {:?}", propagation);
            }
            ScriptInput::Cancel => self.touchpad.on_cancel(now),
            ScriptInput::Leave => self.touchpad.on_leave(now),
            ScriptInput::Enter => self.touchpad.on_enter(),
            ScriptInput::Tick => {
                self.touchpad.advance(now);
                for button in self.buttons.values_mut() {
                    button.advance(now);
                }
            }
            ScriptInput::Set { name, value } => self.renderer.set(name.as_str(), value.clone()),
            ScriptInput::ButtonPress { button } => self.button(index, button)?.on_press(now),
            ScriptInput::ButtonRelease { button } => {
                let propagation = self.button(index, button)?.on_release(now);
                debug!("Button {} released, propagation {:?}", button, propagation);
            }
            ScriptInput::ButtonClick { button } => self.button(index, button)?.on_click(now),
        }
        Ok(())
    }

    fn button(&mut self, index: usize, key: &str) -> Result<&mut Button, ReplayError> {
        self.buttons
            .get_mut(key)
            .ok_or_else(|| ReplayError::UnknownButton {
                index,
                button: key.to_string(),
            })
    }

    fn collect(&self, at_ms: u64, outputs: &mut Vec<ReplayOutput>) {
        outputs.extend(
            self.sink
                .take()
                .into_iter()
                .map(|output| ReplayOutput { at_ms, output }),
        );
    }
}
