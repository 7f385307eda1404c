use assert_cmd::Command;

#[test]
fn test_server_command_available() {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("server"));
}

#[test]
fn test_server_help_lists_options() {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("server").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("--port"))
        .stdout(predicates::str::contains("--host"));
}

#[test]
fn test_server_rejects_missing_sheet_file() {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("server").arg("does-not-exist.tally").arg("--port").arg("0");

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to read sheet file"));
}
