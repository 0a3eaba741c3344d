//! Integration tests for the hydro binary.
//!
//! These tests drive the chat console end to end in offline mode:
//! - Profile setup with the fallback temperature
//! - Logging flows and the progress report
//! - Several users in one transcript
//! - Config file handling

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create an isolated config directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary with no user config or API key leaking in
fn cli(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hydro"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("WEATHER_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

const SETUP: &str = "/set_profile\n70\n175\n25\nм\n30\nMoscow\n";

#[test]
fn test_cli_help() {
    let dir = setup_test_dir();
    cli(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Water, calorie and workout tracking assistant",
        ));
}

#[test]
fn test_start_shows_menu() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["--offline", "chat"])
        .write_stdin("/start\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Привет"))
        .stdout(predicate::str::contains("[ 💧 Записать воду ]"));
}

#[test]
fn test_profile_setup_uses_fallback_temperature() {
    let dir = setup_test_dir();
    cli(&dir)
        .arg("--offline")
        .write_stdin(SETUP)
        .assert()
        .success()
        .stdout(predicate::str::contains("Шаг 6/6"))
        .stdout(predicate::str::contains("Проверяю актуальную погоду в Moscow"))
        .stdout(predicate::str::contains("20.0°C ⚠️ (по умолчанию)"))
        .stdout(predicate::str::contains("💧 Вода: 2600 мл"))
        .stdout(predicate::str::contains("🔥 Калории: 1823 ккал"));
}

#[test]
fn test_logging_flows_and_progress() {
    let dir = setup_test_dir();
    let input = format!(
        "{}/log_water 300\n/log_water\n250\n/log_food банан\n150\n/log_workout бег 30\n/check_progress\n",
        SETUP
    );

    cli(&dir)
        .arg("--offline")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Выпито: 300/2600 мл"))
        .stdout(predicate::str::contains("Выпито: 550/2600 мл\nОсталось: 2050 мл"))
        .stdout(predicate::str::contains("Банан — 150 г"))
        .stdout(predicate::str::contains("Бег — 30 мин"))
        .stdout(predicate::str::contains("💧 Выпей ещё: 200 мл"))
        // Workout raised the water goal by 200
        .stdout(predicate::str::contains("Выпито: 550/2800 мл"));
}

#[test]
fn test_logging_without_profile_is_rejected() {
    let dir = setup_test_dir();
    cli(&dir)
        .arg("--offline")
        .write_stdin("/log_water 300\n/check_progress\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Сначала настрой профиль").count(2));
}

#[test]
fn test_users_in_one_transcript_are_independent() {
    let dir = setup_test_dir();
    let input = format!(
        "{}/log_water 500\n@2 /log_water 500\n@2 /set_profile\n@1 /check_progress\n",
        SETUP
    );

    cli(&dir)
        .arg("--offline")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Сначала настрой профиль"))
        .stdout(predicate::str::contains("Настроим профиль"))
        .stdout(predicate::str::contains("Выпито: 500/2600 мл"));
}

#[test]
fn test_unknown_food_suggestions() {
    let dir = setup_test_dir();
    let input = format!("{}/log_food бананы\n", SETUP);

    cli(&dir)
        .arg("--offline")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Не нашёл 'бананы'"))
        .stdout(predicate::str::contains("• банан"));
}

#[test]
fn test_init_config_and_custom_fallback() {
    let dir = setup_test_dir();
    let config_path = dir.path().join("hydro.toml");

    cli(&dir)
        .arg("init-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(config_path.exists());

    // Second run refuses to overwrite
    cli(&dir)
        .arg("init-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let contents = fs::read_to_string(&config_path).expect("Failed to read config");
    let contents = contents.replace(
        "fallback_temperature_c = 20.0",
        "fallback_temperature_c = 30.0",
    );
    fs::write(&config_path, contents).expect("Failed to write config");

    // 30 °C fallback: 2100 + 500 + 750
    cli(&dir)
        .arg("--offline")
        .arg("--config")
        .arg(&config_path)
        .write_stdin(SETUP)
        .assert()
        .success()
        .stdout(predicate::str::contains("💧 Вода: 3350 мл"))
        .stdout(predicate::str::contains("Жарко"));
}

#[test]
fn test_init_config_default_path_is_loaded_by_chat() {
    let dir = setup_test_dir();
    let default_path = dir.path().join("hydro").join("config.toml");

    cli(&dir)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(default_path.exists());

    let contents = fs::read_to_string(&default_path).expect("Failed to read config");
    assert!(contents.contains("fallback_temperature_c = 20.0"));
    fs::write(
        &default_path,
        contents.replace("fallback_temperature_c = 20.0", "fallback_temperature_c = 26.0"),
    )
    .expect("Failed to write config");

    // Picked up without --config: 2100 + 500 + 550
    cli(&dir)
        .arg("--offline")
        .write_stdin(SETUP)
        .assert()
        .success()
        .stdout(predicate::str::contains("💧 Вода: 3150 мл"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = setup_test_dir();
    let config_path = dir.path().join("bad.toml");
    fs::write(&config_path, "[weather]\ntimeout_secs = 0\n").expect("Failed to write config");

    cli(&dir)
        .arg("--offline")
        .arg("--config")
        .arg(&config_path)
        .write_stdin("/start\n")
        .assert()
        .failure();
}

#[test]
fn test_catalog_lists_tables() {
    let dir = setup_test_dir();
    cli(&dir)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("банан"))
        .stdout(predicate::str::contains("плавание"));
}
