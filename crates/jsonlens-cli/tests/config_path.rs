use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("jsonlens")
        .env("JSONLENS_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_malformed_config_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "indent_width = \"wide\"").unwrap();

    cargo_bin_cmd!("jsonlens")
        .env("JSONLENS_HOME", dir.path())
        .args(["print", "-"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_config_file_sets_indent() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "indent_width = 4\n").unwrap();

    cargo_bin_cmd!("jsonlens")
        .env("JSONLENS_HOME", dir.path())
        .args(["print", "-"])
        .write_stdin(r#"{"a": 1}"#)
        .assert()
        .success()
        .stdout("▾ {\n      a: 1\n  }\n");
}
