use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gesturepad_cmd() -> Command {
    Command::cargo_bin("gesturepad").expect("binary exists")
}

const CONFIG: &str = r#"
[touchpad.actions.tap_action]
action = "select"

[touchpad.directions.left.tap_action]
action = "rewind"

[buttons.power.tap_action]
action = "power"
"#;

const SCRIPT: &str = r#"
[[events]]
at = 0
kind = "press"
contacts = [[100, 100]]

[[events]]
at = 40
kind = "move"
contacts = [[80, 100]]

[[events]]
at = 90
kind = "release"

[[events]]
at = 200
kind = "press"
contacts = [[100, 100]]

[[events]]
at = 260
kind = "release"
"#;

fn write_config_home(temp: &TempDir) {
    let dir = temp.path().join("gesturepad");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), CONFIG).unwrap();
}

#[test]
fn gesturepad_help_prints_usage() {
    gesturepad_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Touchpad and button gesture recognizer",
        ));
}

#[test]
fn no_flags_prints_usage() {
    let temp = TempDir::new().unwrap();
    gesturepad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("gesturepad --replay SCRIPT"));
}

#[test]
fn replay_prints_json_lines_from_user_config() {
    let temp = TempDir::new().unwrap();
    write_config_home(&temp);
    let script = temp.path().join("script.toml");
    std::fs::write(&script, SCRIPT).unwrap();

    gesturepad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--replay")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""at_ms":40,"type":"action","slot":"tap_action","action":"rewind""#,
        ))
        .stdout(predicate::str::contains(
            r#""at_ms":260,"type":"action","slot":"tap_action","action":"select""#,
        ));
}

#[test]
fn replay_with_explicit_config_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    std::fs::write(&config, CONFIG).unwrap();
    let script = temp.path().join("script.toml");
    std::fs::write(
        &script,
        r#"
[[events]]
at = 5
kind = "button_click"
button = "power"
"#,
    )
    .unwrap();

    gesturepad_cmd()
        .env("XDG_CONFIG_HOME", temp.path().join("empty"))
        .arg("--config")
        .arg(&config)
        .arg("--replay")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""action":"power""#));
}

#[test]
fn replay_missing_script_fails() {
    let temp = TempDir::new().unwrap();
    gesturepad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["--replay", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read replay script"));
}

#[test]
fn replay_unknown_button_fails() {
    let temp = TempDir::new().unwrap();
    write_config_home(&temp);
    let script = temp.path().join("script.toml");
    std::fs::write(
        &script,
        r#"
[[events]]
at = 0
kind = "button_press"
button = "mute"
"#,
    )
    .unwrap();

    gesturepad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown button 'mute'"));
}

#[test]
fn check_config_summarises_user_config() {
    let temp = TempDir::new().unwrap();
    write_config_home(&temp);

    gesturepad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("touchpad left: tap_action=rewind"))
        .stdout(predicate::str::contains("button power: tap_action=power"))
        .stdout(predicate::str::contains("Configuration OK"));
}

#[test]
fn check_config_without_file_uses_defaults() {
    let temp = TempDir::new().unwrap();

    gesturepad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("touchpad: no actions"));
}

#[test]
fn check_config_rejects_invalid_toml() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("broken.toml");
    std::fs::write(&config, "[touchpad.actions").unwrap();

    gesturepad_cmd()
        .arg("--check-config")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn schema_dump_is_json() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"touchpad\""));
}
