//! Tests for error messages, suggestions and exit codes.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hoist(dir: &TempDir) -> Command {
    let config = dir.path().join("hoist.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("hoist").unwrap();
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(config)
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn conflicting_modes_fail_without_creating_anything() {
    let dir = TempDir::new().unwrap();
    hoist(&dir)
        .args(["setup", "both", "--bower-only", "--node-only"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be combined"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!dir.path().join("both").exists());
}

#[test]
fn existing_directory_is_refused() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("taken")).unwrap();

    hoist(&dir)
        .args(["setup", "taken"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_dir(dir.path().join("taken")).unwrap().count(), 0);
}

#[test]
fn invalid_module_name_is_refused() {
    let dir = TempDir::new().unwrap();
    hoist(&dir)
        .args(["setup", "../escape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid module name"));
}

#[test]
fn setup_tests_without_manifest_fails() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("empty")).unwrap();

    let mut cmd = hoist(&dir);
    cmd.current_dir(dir.path().join("empty"))
        .arg("setup-tests")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("package.json"));

    assert!(!dir.path().join("empty/test").exists());
}

#[cfg(unix)]
#[test]
fn failed_package_manager_exit_code_is_propagated() {
    let dir = TempDir::new().unwrap();
    let module = dir.path().join("widgets");
    fs::create_dir(&module).unwrap();
    fs::write(module.join("package.json"), r#"{ "name": "widgets" }"#).unwrap();

    let mut cmd = hoist(&dir);
    cmd.current_dir(&module)
        .arg("setup-tests")
        .env("HOIST_INSTALL__NODE_PROGRAM", "false")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("External command failed"));
}

#[test]
fn missing_program_is_reported() {
    let dir = TempDir::new().unwrap();
    let module = dir.path().join("widgets");
    fs::create_dir(&module).unwrap();
    fs::write(module.join("package.json"), r#"{ "name": "widgets" }"#).unwrap();

    let mut cmd = hoist(&dir);
    cmd.current_dir(&module)
        .arg("setup-tests")
        .env("HOIST_INSTALL__NODE_PROGRAM", "hoist-no-such-package-manager")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("hoist-no-such-package-manager"));
}

#[test]
fn unknown_config_key_fails() {
    let dir = TempDir::new().unwrap();
    hoist(&dir)
        .args(["config", "get", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown configuration key 'nope'"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("hoist")
        .unwrap()
        .current_dir(dir.path())
        .args(["--config", "absent.toml", "templates"])
        .env("NO_COLOR", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn bad_arguments_exit_two() {
    Command::cargo_bin("hoist")
        .unwrap()
        .args(["setup"])
        .assert()
        .code(2);

    Command::cargo_bin("hoist")
        .unwrap()
        .args(["install", "--yes", "--no"])
        .assert()
        .code(2);
}
