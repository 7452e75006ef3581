//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

// === Help Output ===

#[test]
fn test_top_level_help_lists_commands() {
    let mut cmd = Command::cargo_bin("vibetask").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("init-env"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("vibetask").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--in-memory"))
        .stdout(predicate::str::contains("--static-dir"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("vibetask").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sample tasks"));
}

// === init-env ===

#[test]
fn test_init_env_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("app.env");

    let mut cmd = Command::cargo_bin("vibetask").unwrap();
    cmd.arg("init-env").arg("--output").arg(&output);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("DB_PORT=5432"));
    assert!(written.contains("PORT=3000"));
}

#[test]
fn test_init_env_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join(".env");
    std::fs::write(&output, "DB_PASSWORD=secret\n").unwrap();

    let mut cmd = Command::cargo_bin("vibetask").unwrap();
    cmd.arg("init-env").arg("--output").arg(&output);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "DB_PASSWORD=secret\n"
    );
}

// === Configuration errors ===

#[test]
fn test_serve_rejects_invalid_port() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("vibetask").unwrap();
    cmd.current_dir(dir.path())
        .env("PORT", "not-a-port")
        .arg("serve")
        .arg("--in-memory");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("PORT"));
}
