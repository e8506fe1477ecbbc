use super::*;
use crate::actions::{ActionSlot, SlotKind, TemplateRenderer};
use serde_json::json;
use std::time::Duration;

const SAMPLE: &str = r#"
[variables]
speed = 150
mode = "select"

[touchpad.actions.tap_action]
action = "{{ mode }}"

[touchpad.actions.hold_action]
action = "repeat"
repeat_delay = "{{ speed }}"

[touchpad.actions.multi_tap_action]
action = "back"
entity = "media_player.tv"

[touchpad.directions.up.tap_action]
action = "up"

[touchpad.directions.left.tap_action]
action = "left"
hold_time = 300

[buttons.volume_up.tap_action]
action = "volume_up"

[buttons.power.hold_action]
action = "power_off"
"#;

#[test]
fn parses_full_layout() {
    let config = Config::from_toml_str(SAMPLE).unwrap();

    assert_eq!(config.variables.get("speed"), Some(&json!(150)));
    assert_eq!(config.touchpad.actions.len(), 3);
    let multi = config
        .touchpad
        .actions
        .get(ActionSlot::multi(SlotKind::Tap))
        .unwrap();
    assert_eq!(multi.data.get("entity"), Some(&json!("media_player.tv")));
    assert!(
        config
            .touchpad
            .directions
            .get(Direction::Up)
            .contains(ActionSlot::single(SlotKind::Tap))
    );
    assert_eq!(
        config
            .touchpad
            .directions
            .left
            .get(ActionSlot::single(SlotKind::Tap))
            .and_then(|d| d.hold_time.clone()),
        Some(json!(300))
    );
    assert_eq!(config.buttons.len(), 2);
}

#[test]
fn empty_file_yields_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
    assert!(config.touchpad.is_empty());
}

#[test]
fn unknown_slots_are_dropped() {
    let config = Config::from_toml_str(
        r#"
[touchpad.actions.tap_action]
action = "select"
[touchpad.actions.triple_tap_action]
action = "oops"
"#,
    )
    .unwrap();

    assert_eq!(config.touchpad.actions.len(), 1);
}

#[test]
fn momentary_slots_are_dropped_from_direction_bags() {
    let config = Config::from_toml_str(
        r#"
[touchpad.directions.down.tap_action]
action = "down"
[touchpad.directions.down.momentary_start_action]
action = "talk"
"#,
    )
    .unwrap();

    let down = config.touchpad.directions.get(Direction::Down);
    assert_eq!(down.len(), 1);
    assert!(!down.contains(ActionSlot::single(SlotKind::MomentaryStart)));
}

#[test]
fn button_bags_keep_tap_and_hold_only() {
    let config = Config::from_toml_str(
        r#"
[buttons.home.tap_action]
action = "home"
[buttons.home.hold_action]
action = "menu"
[buttons.home.double_tap_action]
action = "never"
[buttons.home.multi_tap_action]
action = "never"
"#,
    )
    .unwrap();

    assert_eq!(config.buttons["home"].len(), 2);
}

#[test]
fn invalid_literal_durations_are_reset() {
    let config = Config::from_toml_str(
        r#"
[touchpad.actions.hold_action]
action = "repeat"
hold_time = -5
repeat_delay = "fast"
double_tap_window = "{{ window }}"
"#,
    )
    .unwrap();

    let hold = config
        .touchpad
        .actions
        .get(ActionSlot::single(SlotKind::Hold))
        .unwrap();
    assert_eq!(hold.hold_time, None);
    assert_eq!(hold.repeat_delay, None);
    assert_eq!(hold.double_tap_window, Some(json!("{{ window }}")));
}

#[test]
fn numeric_string_durations_survive_validation() {
    let config = Config::from_toml_str(
        r#"
[touchpad.actions.hold_action]
action = "menu"
hold_time = "750"
"#,
    )
    .unwrap();

    let hold = config
        .touchpad
        .actions
        .get(ActionSlot::single(SlotKind::Hold))
        .unwrap();
    assert_eq!(hold.hold_time, Some(json!("750")));
}

#[test]
fn renderer_sees_config_variables() {
    let config = Config::from_toml_str(SAMPLE).unwrap();
    let renderer = config.renderer();

    assert_eq!(renderer.render(&json!("{{ speed }}")), json!(150));
    assert_eq!(renderer.render(&json!("{{ mode }}")), json!("select"));
}

#[test]
fn invalid_toml_is_an_error() {
    let err = Config::from_toml_str("[touchpad.actions").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn load_from_reads_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, SAMPLE).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.buttons.len(), 2);
}

#[test]
fn load_from_missing_file_fails_with_path() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("missing.toml");

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("missing.toml"));
}

#[test]
fn summary_lists_surfaces() {
    let config = Config::from_toml_str(SAMPLE).unwrap();
    let summary = config.summary();

    assert!(summary[0].starts_with("touchpad: "));
    assert!(summary.iter().any(|line| line == "touchpad up: tap_action=up"));
    assert!(
        summary
            .iter()
            .any(|line| line == "button power: hold_action=power_off")
    );
    assert_eq!(summary.last().unwrap(), "variables: mode, speed");
}

#[test]
fn schema_describes_top_level_sections() {
    let schema = serde_json::to_value(Config::json_schema()).unwrap();
    let properties = schema.get("properties").unwrap();

    for key in ["variables", "touchpad", "buttons"] {
        assert!(properties.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn hold_time_from_config_drives_resolver() {
    let config = Config::from_toml_str(SAMPLE).unwrap();
    let resolver = crate::actions::ActionResolver::with_sink(
        config.renderer(),
        crate::actions::RecordingSink::new(),
    );

    assert_eq!(
        resolver.repeat_delay(
            &config.touchpad.actions,
            ActionSlot::single(SlotKind::Hold)
        ),
        Duration::from_millis(150)
    );
}
