use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sheet_file(temp_dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = temp_dir.path().join("budget.tally");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_cli_run_prints_table() {
    let temp_dir = TempDir::new().unwrap();
    let file = sheet_file(
        &temp_dir,
        "# Rent split\n$rent = 1200\n$utilities = 180\n$rent + $utilities\n$3 / 3\n",
    );

    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("run").arg(&file);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Rent split"))
        .stdout(predicate::str::contains("1380"))
        .stdout(predicate::str::contains("60"));
}

#[test]
fn test_cli_run_raw_output() {
    let temp_dir = TempDir::new().unwrap();
    let file = sheet_file(&temp_dir, "100\n$1 + 10%\n\n1/0\n$9\n");

    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("run").arg(&file).arg("--raw");

    cmd.assert().success().stdout("100\n110\n\n∞\n? $9\n");
}

#[test]
fn test_cli_run_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let file = sheet_file(&temp_dir, "$a = 2\n$a ^ 10\n");

    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("run").arg(&file).arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["lines"][1]["result"]["value"], 1024.0);
    assert_eq!(json["variables"]["a"], 2.0);
}

#[test]
fn test_cli_run_explain_shows_diagnostics() {
    let temp_dir = TempDir::new().unwrap();
    let file = sheet_file(&temp_dir, "1 + 1\n(2 * 3\n");

    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("run").arg(&file).arg("--explain");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Missing ')'"))
        .stderr(predicate::str::contains("budget.tally:2"));
}

#[test]
fn test_cli_run_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("run").arg(temp_dir.path().join("nope.tally"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read sheet file"));
}

#[test]
fn test_cli_run_raw_and_json_conflict() {
    let temp_dir = TempDir::new().unwrap();
    let file = sheet_file(&temp_dir, "1\n");

    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("run").arg(&file).arg("--raw").arg("--json");

    cmd.assert().failure();
}
