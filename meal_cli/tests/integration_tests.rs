//! Integration tests for the mealplan binary.
//!
//! These tests verify end-to-end behavior including:
//! - Plan rendering for the reference profile
//! - Condition rules surfacing in the meal table
//! - Weigh-in logging, history and CSV export
//! - Input validation at the command-line boundary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI bound to a temp data dir, with config lookups isolated from the host
fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mealplan"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(temp_dir.path().join("data"));
    cmd
}

fn reference_plan(cmd: &mut Command) -> &mut Command {
    cmd.arg("plan")
        .args(["--weight", "60", "--height", "165", "--age", "25"])
        .args(["--gender", "female", "--goal", "maintain"])
}

fn data_path(temp_dir: &TempDir, name: &str) -> std::path::PathBuf {
    temp_dir.path().join("data").join(name)
}

fn log_weight(temp_dir: &TempDir, date: &str, weight: &str) {
    cli(temp_dir)
        .args(["log", "--date", date, "--weight", weight, "--height", "165"])
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personalized meal plan and progress tracker",
        ));
}

#[test]
fn test_plan_reference_profile() {
    let temp_dir = setup_test_dir();

    reference_plan(&mut cli(&temp_dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI: 22.0 (Normal weight)"))
        .stdout(predicate::str::contains("1499 kcal/day"))
        .stdout(predicate::str::contains("375"))
        .stdout(predicate::str::contains("525"))
        .stdout(predicate::str::contains("450"))
        .stdout(predicate::str::contains("Greek yogurt with nuts and honey"));
}

#[test]
fn test_plan_saves_profile_unless_disabled() {
    let temp_dir = setup_test_dir();

    reference_plan(&mut cli(&temp_dir)).arg("--no-save").assert().success();
    assert!(!data_path(&temp_dir, "profile.json").exists());

    reference_plan(&mut cli(&temp_dir)).assert().success();
    assert!(data_path(&temp_dir, "profile.json").exists());
}

#[test]
fn test_plan_with_diabetes_and_gluten() {
    let temp_dir = setup_test_dir();

    reference_plan(&mut cli(&temp_dir))
        .args(["--condition", "diabetes", "--condition", "gluten-intolerance"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Boiled egg, Apple slices with peanut butter, Vegetable sticks with hummus",
        ))
        .stdout(predicate::str::contains("bread").not())
        .stdout(predicate::str::contains("roti").not())
        .stdout(predicate::str::contains("Mixed nuts").not());
}

#[test]
fn test_plan_json_output() {
    let temp_dir = setup_test_dir();

    let output = cli(&temp_dir)
        .arg("plan")
        .args(["--weight", "60", "--height", "165", "--age", "25"])
        .args(["--gender", "female", "--goal", "gain", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let target = value["metrics"]["calorie_target"].as_f64().unwrap();
    assert!((target - 1899.1).abs() < 1e-6);
    assert_eq!(value["metrics"]["bmi_category"], "normal");
    assert_eq!(value["meal_plan"]["rows"].as_array().unwrap().len(), 4);
}

#[test]
fn test_plan_rejects_out_of_domain_height() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["plan", "--height", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("height"));
}

#[test]
fn test_unknown_condition_is_ignored() {
    let temp_dir = setup_test_dir();

    reference_plan(&mut cli(&temp_dir))
        .args(["--condition", "gout"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown condition"))
        .stdout(predicate::str::contains("Mixed nuts"));
}

#[test]
fn test_log_uses_saved_profile_height() {
    let temp_dir = setup_test_dir();

    reference_plan(&mut cli(&temp_dir)).assert().success();

    cli(&temp_dir)
        .args(["log", "--date", "2024-01-01", "--weight", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry added"))
        .stdout(predicate::str::contains("BMI 25.7"));

    assert!(data_path(&temp_dir, "progress.wal").exists());
}

#[test]
fn test_log_rejects_bad_date() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["log", "--date", "01/02/2024", "--weight", "70"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_log_rejects_out_of_domain_weight() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .args(["log", "--date", "2024-01-01", "--weight", "250"])
        .assert()
        .failure();

    assert!(!data_path(&temp_dir, "progress.wal").exists());
}

#[test]
fn test_empty_history_shows_no_data() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No progress entries yet"));
}

#[test]
fn test_history_keeps_insertion_order() {
    let temp_dir = setup_test_dir();

    log_weight(&temp_dir, "2024-02-01", "71");
    log_weight(&temp_dir, "2024-01-01", "72");
    log_weight(&temp_dir, "2024-03-01", "70");

    let output = cli(&temp_dir)
        .args(["history", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let dates: Vec<_> = value["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2024-02-01", "2024-01-01", "2024-03-01"]);
    assert_eq!(value["series"]["weight"].as_array().unwrap().len(), 3);
    assert_eq!(value["series"]["bmi"].as_array().unwrap().len(), 3);
}

#[test]
fn test_history_table() {
    let temp_dir = setup_test_dir();

    log_weight(&temp_dir, "2024-01-01", "70");
    log_weight(&temp_dir, "2024-01-08", "69.4");

    cli(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your Progress History"))
        .stdout(predicate::str::contains("2024-01-08"))
        .stdout(predicate::str::contains("25.7"));
}

#[test]
fn test_export_creates_csv() {
    let temp_dir = setup_test_dir();
    let csv_path = temp_dir.path().join("out").join("progress.csv");

    log_weight(&temp_dir, "2024-01-01", "70");
    log_weight(&temp_dir, "2024-01-02", "69.8");

    cli(&temp_dir)
        .arg("export")
        .arg("--out")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 entries"));

    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv_content.starts_with("date,weight_kg,bmi"));
    assert!(csv_content.contains("2024-01-01,70.0,25.7"));
}

#[test]
fn test_config_meal_override() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("custom.toml");
    write_config(
        &config_path,
        "[meals]\nsnacks = [\"Carrot sticks\", \"Rice cakes\"]\n",
    );

    reference_plan(&mut cli(&temp_dir))
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Carrot sticks, Rice cakes"));
}

#[test]
fn test_invalid_config_catalog_fails() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("custom.toml");
    write_config(&config_path, "[meals]\nlunch = []\n");

    reference_plan(&mut cli(&temp_dir))
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lunch has no suggestions"));
}

fn write_config(path: &Path, contents: &str) {
    fs::write(path, contents).expect("Failed to write config");
}
