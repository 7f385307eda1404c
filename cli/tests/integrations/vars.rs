use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_vars_lists_final_values() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("vars.tally");
    fs::write(&file, "$x = 1\n$x = $x + 1\n$rate = 0.25\n$broken = 1/0\n").unwrap();

    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("vars").arg(&file);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("$x"))
        .stdout(predicate::str::contains("2"))
        .stdout(predicate::str::contains("0.25"))
        .stdout(predicate::str::contains("$broken").not());
}

#[test]
fn test_cli_vars_empty_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("empty.tally");
    fs::write(&file, "1 + 1\n").unwrap();

    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("vars").arg(&file);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No variables defined"));
}
