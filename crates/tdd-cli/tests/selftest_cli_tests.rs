//! End-to-end tests for the tdd-selftest binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn selftest(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tdd-selftest").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("TDD_COLOR")
        .env_remove("TDD_JSON")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_selftest_passes() {
    let dir = TempDir::new().unwrap();

    selftest(&dir)
        .args(["--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Running 2 test suites\n------------------ Suite: Single Tests\n",
        ))
        .stdout(predicate::str::contains(
            "------------ Test: Test bool confirms failure\nExpected failure\nExpected: true\n",
        ))
        .stdout(predicate::str::contains(
            "------------ Test: Test int confirms failure\nExpected failure\nExpected: 0\nActual: 2\n",
        ))
        .stdout(predicate::str::contains(
            "------------------ Suite: Database\n------------ Setup: Temporary entry\nPassed\n",
        ))
        .stdout(predicate::str::ends_with(
            "-------------------------\nTests passed: 9\nTests failed: 0\n",
        ));
}

#[test]
fn test_selftest_json_report() {
    let dir = TempDir::new().unwrap();

    let output = selftest(&dir).arg("--json").output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["tally"]["passed"], 9);
    assert_eq!(report["tally"]["failed"], 0);
    assert_eq!(report["runs"][0]["verdict"], "expected_failure");
    assert_eq!(report["suites"]["Database"], "torn_down");
}

#[test]
fn test_selftest_list() {
    let dir = TempDir::new().unwrap();

    selftest(&dir)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Database\n    Entry can be renamed\n    Empty entry name is rejected\n",
        ))
        .stdout(predicate::str::ends_with("7 tests in 2 suites\n"))
        .stdout(predicate::str::contains("Tests passed").not());
}

#[test]
fn test_selftest_reads_project_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tdd.toml"), "[output]\ncolor = \"always\"\n").unwrap();

    selftest(&dir)
        .env_remove("NO_COLOR")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}["));
}

#[test]
fn test_selftest_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tdd.toml"), "[output]\ncolour = \"always\"\n").unwrap();

    selftest(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load tdd.toml"));
}

#[test]
fn test_selftest_missing_config_file() {
    let dir = TempDir::new().unwrap();

    selftest(&dir)
        .args(["--config", "nowhere.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}
