use super::*;
use crate::actions::{FeedbackEvent, HapticKind};

const CONFIG: &str = r#"
[variables]
mode = "select"

[touchpad.actions.tap_action]
action = "{{ mode }}"
[touchpad.actions.double_tap_action]
action = "back"
[touchpad.actions.hold_action]
action = "repeat"

[buttons.power.tap_action]
action = "power"
[buttons.power.hold_action]
action = "power_off"
"#;

fn replay(script: &str) -> Result<Vec<ReplayOutput>, ReplayError> {
    let config = Config::from_toml_str(CONFIG).unwrap();
    let script = Script::from_toml_str(script)?;
    Replay::from_config(&config).run(&script)
}

fn actions(outputs: &[ReplayOutput]) -> Vec<(u64, String)> {
    outputs
        .iter()
        .filter_map(|entry| match &entry.output {
            Output::Action(request) => Some((entry.at_ms, request.action.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn lone_tap_lands_at_window_deadline() {
    let outputs = replay(
        r#"
[[events]]
at = 0
kind = "press"
contacts = [[10, 10]]

[[events]]
at = 80
kind = "release"

[[events]]
at = 1000
kind = "tick"
"#,
    )
    .unwrap();

    assert_eq!(actions(&outputs), vec![(280, "select".to_string())]);
    assert!(outputs.iter().any(|entry| entry.at_ms == 0
        && entry.output
            == Output::Feedback {
                event: FeedbackEvent::StartPress
            }));
}

#[test]
fn repeat_ticks_are_stamped_with_their_deadlines() {
    let outputs = replay(
        r#"
[[events]]
at = 0
kind = "press"
contacts = [[10, 10]]

[[events]]
at = 830
kind = "release"
"#,
    )
    .unwrap();

    assert_eq!(
        actions(&outputs),
        vec![
            (600, "select".to_string()),
            (700, "select".to_string()),
            (800, "select".to_string()),
        ]
    );
}

#[test]
fn set_changes_the_rendered_action() {
    let outputs = replay(
        r#"
[[events]]
at = 0
kind = "set"
name = "mode"
value = "play"

[[events]]
at = 10
kind = "press"
contacts = [[10, 10]]

[[events]]
at = 50
kind = "release"

[[events]]
at = 1000
kind = "tick"
"#,
    )
    .unwrap();

    assert_eq!(actions(&outputs), vec![(250, "play".to_string())]);
}

#[test]
fn matching_second_tap_is_a_double_tap() {
    let outputs = replay(
        r#"
[[events]]
at = 0
kind = "press"
contacts = [[10, 10]]

[[events]]
at = 50
kind = "release"

[[events]]
at = 100
kind = "press"
contacts = [[10, 10]]

[[events]]
at = 150
kind = "release"

[[events]]
at = 1000
kind = "tick"
"#,
    )
    .unwrap();

    assert_eq!(actions(&outputs), vec![(150, "back".to_string())]);
}

#[test]
fn button_long_press_and_click() {
    let outputs = replay(
        r#"
[[events]]
at = 0
kind = "button_press"
button = "power"

[[events]]
at = 700
kind = "button_release"
button = "power"

[[events]]
at = 1000
kind = "button_press"
button = "power"

[[events]]
at = 1100
kind = "button_release"
button = "power"

[[events]]
at = 1101
kind = "button_click"
button = "power"
"#,
    )
    .unwrap();

    assert_eq!(
        actions(&outputs),
        vec![(500, "power_off".to_string()), (1101, "power".to_string())]
    );
    let haptics: Vec<HapticKind> = outputs
        .iter()
        .filter_map(|entry| match entry.output {
            Output::Haptic { kind } => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(haptics, vec![HapticKind::Medium, HapticKind::Light]);
}

#[test]
fn backwards_timestamps_are_rejected() {
    let err = replay(
        r#"
[[events]]
at = 100
kind = "tick"

[[events]]
at = 50
kind = "tick"
"#,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ReplayError::OutOfOrder {
            index: 1,
            at: 50,
            previous: 100
        }
    ));
}

#[test]
fn unknown_button_is_rejected() {
    let err = replay(
        r#"
[[events]]
at = 0
kind = "button_press"
button = "mute"
"#,
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "event 0 refers to unknown button 'mute'");
}

#[test]
fn unknown_event_kind_is_a_parse_error() {
    let err = Script::from_toml_str(
        r#"
[[events]]
at = 0
kind = "wiggle"
"#,
    )
    .unwrap_err();

    assert!(matches!(err, ReplayError::Parse(_)));
}

#[test]
fn outputs_serialize_as_flat_json() {
    let outputs = replay(
        r#"
[[events]]
at = 0
kind = "button_click"
button = "power"
"#,
    )
    .unwrap();

    let line = serde_json::to_value(&outputs[1]).unwrap();
    assert_eq!(line["at_ms"], 0);
    assert_eq!(line["type"], "action");
    assert_eq!(line["action"], "power");
    assert_eq!(line["slot"], "tap_action");
}
