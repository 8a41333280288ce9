//! Corruption recovery tests for mealplan.
//!
//! These tests verify the system can handle:
//! - Corrupted profile files
//! - Corrupted progress log lines
//! - Malformed config files

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mealplan"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .arg("--data-dir")
        .arg(temp_dir.path().join("data"));
    cmd
}

#[test]
fn test_corrupted_profile_falls_back_to_defaults() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("profile.json"), "{ invalid json }}}}").unwrap();

    // Defaults are 60 kg / 165 cm / 25 y / Female / Maintain
    cli(&temp_dir)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("1499 kcal/day"));
}

#[test]
fn test_corrupted_profile_does_not_block_logging() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("profile.json"), "not json at all").unwrap();

    cli(&temp_dir)
        .args(["log", "--date", "2024-01-01", "--weight", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI 25.7"));
}

#[test]
fn test_corrupted_wal_lines_are_skipped() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();

    let wal_path = data_dir.join("progress.wal");
    fs::write(
        &wal_path,
        "{ invalid json }\n{\"date\":\"2024-01-05\",\"weight_kg\":68.0,\"bmi\":25.0}\n",
    )
    .unwrap();

    cli(&temp_dir)
        .args(["history", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-05"));

    // Appending after a bad line still works and keeps prior entries
    cli(&temp_dir)
        .args(["log", "--date", "2024-01-06", "--weight", "67.5", "--height", "165"])
        .assert()
        .success();

    let content = fs::read_to_string(&wal_path).unwrap();
    assert!(content.contains("2024-01-06"));
    assert!(content.contains("{ invalid json }"));
}

#[test]
fn test_malformed_config_is_an_error() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "[defaults\nweight_kg = ").unwrap();

    cli(&temp_dir)
        .arg("--config")
        .arg(&config_path)
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Toml"));
}
