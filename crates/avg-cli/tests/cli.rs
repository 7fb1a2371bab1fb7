use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("avg").unwrap()
}

#[test]
fn test_help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("web"));
}

#[test]
fn test_missing_subcommand() {
    cmd().assert().failure();
}

#[test]
fn test_scan_missing_file() {
    cmd()
        .args(["scan", "/nonexistent/malice/sample"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn test_scan_requires_path() {
    cmd()
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<FILE>"));
}
