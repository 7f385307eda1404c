use assert_cmd::Command;

#[test]
fn test_interactive_command_available() {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("interactive"));
}

#[test]
fn test_interactive_help_lists_commands() {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.arg("interactive").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains(":insert N text"));
}
