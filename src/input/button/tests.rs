use super::*;
use crate::actions::{
    ActionDescriptor, ActionResolver, ActionSlot, ActionsBag, HapticKind, RecordingSink, SlotKind,
    Verbatim,
};
use crate::input::Propagation;
use std::time::{Duration, Instant};

fn button(key: &str) -> (Button, RecordingSink, Instant) {
    let actions = ActionsBag::new()
        .with(
            ActionSlot::single(SlotKind::Tap),
            ActionDescriptor::new(format!("{key}_tap")),
        )
        .with(
            ActionSlot::single(SlotKind::Hold),
            ActionDescriptor::new(format!("{key}_hold")),
        );
    let sink = RecordingSink::new();
    let resolver = ActionResolver::with_sink(Verbatim, sink.clone());
    (Button::new(key, actions, resolver), sink, Instant::now())
}

fn ms(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

#[test]
fn key_classification() {
    assert!(ButtonKey::from("up").is_directional());
    assert!(ButtonKey::from("up").repeats_on_hold());
    assert!(ButtonKey::from("volume_down").repeats_on_hold());
    assert!(!ButtonKey::from("volume_down").is_directional());
    assert!(ButtonKey::from("delete").repeats_on_hold());
    assert!(!ButtonKey::from("power").repeats_on_hold());
    assert!(!ButtonKey::from("power").is_directional());
}

#[test]
fn short_press_lets_the_click_send_tap() {
    let (mut button, sink, t0) = button("power");

    button.on_press(t0);
    assert_eq!(button.armed_timers(), 1);
    assert_eq!(button.on_release(ms(t0, 200)), Propagation::Continue);
    assert_eq!(button.armed_timers(), 0);
    button.on_click(ms(t0, 201));

    assert_eq!(sink.action_names(), vec!["power_tap"]);
    assert_eq!(sink.haptics(), vec![HapticKind::Light]);
}

#[test]
fn long_press_on_plain_key_sends_hold_once() {
    let (mut button, sink, t0) = button("power");

    button.on_press(t0);
    button.advance(ms(t0, 499));
    assert!(sink.action_names().is_empty());
    button.advance(ms(t0, 500));
    assert_eq!(button.phase(), ButtonPhase::LongPressed);
    button.advance(ms(t0, 3_000));

    assert_eq!(button.on_release(ms(t0, 3_000)), Propagation::Stop);
    assert_eq!(sink.action_names(), vec!["power_hold"]);
    assert_eq!(sink.haptics(), vec![HapticKind::Medium]);
    assert_eq!(button.phase(), ButtonPhase::Idle);
}

#[test]
fn long_press_on_repeating_key_repeats_tap() {
    let (mut button, sink, t0) = button("volume_up");

    button.on_press(t0);
    button.advance(ms(t0, 550));
    assert_eq!(button.phase(), ButtonPhase::Repeating);
    assert!(sink.action_names().is_empty());

    button.advance(ms(t0, 830));
    assert_eq!(
        sink.action_names(),
        vec!["volume_up_tap", "volume_up_tap", "volume_up_tap"]
    );
    assert_eq!(button.on_release(ms(t0, 850)), Propagation::Stop);

    button.advance(ms(t0, 2_000));
    assert_eq!(sink.action_names().len(), 3);
    assert_eq!(button.armed_timers(), 0);
}

#[test]
fn directional_keys_use_selection_haptic() {
    let (mut button, sink, t0) = button("left");

    button.on_click(t0);
    button.on_press(ms(t0, 100));
    button.advance(ms(t0, 700));
    button.on_release(ms(t0, 710));

    assert_eq!(
        sink.haptics(),
        vec![HapticKind::Selection, HapticKind::Selection]
    );
}

#[test]
fn new_press_drops_the_previous_timer() {
    let (mut button, sink, t0) = button("power");

    button.on_press(t0);
    button.on_press(ms(t0, 300));
    assert_eq!(button.armed_timers(), 1);
    assert_eq!(button.next_deadline(), Some(ms(t0, 800)));
    button.advance(ms(t0, 700));

    assert!(sink.action_names().is_empty());
}

#[test]
fn unconfigured_hold_sends_nothing_but_still_swallows_click() {
    let sink = RecordingSink::new();
    let resolver = ActionResolver::with_sink(Verbatim, sink.clone());
    let actions = ActionsBag::new().with(
        ActionSlot::single(SlotKind::Tap),
        ActionDescriptor::new("home"),
    );
    let mut button = Button::new("home", actions, resolver);
    let t0 = Instant::now();

    button.on_press(t0);
    button.advance(ms(t0, 600));

    assert_eq!(button.on_release(ms(t0, 600)), Propagation::Stop);
    assert!(sink.action_names().is_empty());
}
