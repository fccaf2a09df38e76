//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd to exercise main.rs code paths.

// Skip CLI tests during coverage builds
#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const USERS_JSON: &str = r#"[
  {"name": "John", "age": 30},
  {"name": "Jane", "age": 25}
]"#;

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("sheetport").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetport"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("sheetport").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetport"));
}

#[test]
fn test_export_help() {
    let mut cmd = Command::cargo_bin("sheetport").unwrap();
    cmd.args(["export", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Export records"));
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT / IMPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_writes_xlsx() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("users.json");
    fs::write(&input, USERS_JSON).unwrap();

    let mut cmd = Command::cargo_bin("sheetport").unwrap();
    cmd.arg("export")
        .arg(&input)
        .arg("Users")
        .arg("-d")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Export Complete"));

    assert!(temp_dir.path().join("Users.xlsx").exists());
}

#[test]
fn test_export_output_dir_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("users.json");
    fs::write(&input, USERS_JSON).unwrap();

    let mut cmd = Command::cargo_bin("sheetport").unwrap();
    cmd.env("SHEETPORT_OUTPUT_DIR", temp_dir.path())
        .arg("export")
        .arg(&input)
        .arg("FromEnv")
        .assert()
        .success();

    assert!(temp_dir.path().join("FromEnv.xlsx").exists());
}

#[test]
fn test_export_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("sheetport").unwrap();
    cmd.arg("export")
        .arg(temp_dir.path().join("missing.json"))
        .arg("Users")
        .arg("-d")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_export_then_import_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("users.json");
    fs::write(&input, USERS_JSON).unwrap();

    Command::cargo_bin("sheetport")
        .unwrap()
        .arg("export")
        .arg(&input)
        .arg("Users")
        .arg("-d")
        .arg(temp_dir.path())
        .assert()
        .success();

    let output = Command::cargo_bin("sheetport")
        .unwrap()
        .arg("import")
        .arg(temp_dir.path().join("Users.xlsx"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let imported: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let expected: serde_json::Value = serde_json::from_str(USERS_JSON).unwrap();
    assert_eq!(imported, expected);
}

#[test]
fn test_yaml_export_then_import_to_yaml_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("items.yaml");
    fs::write(&input, "- sku: A-1\n  qty: 3\n  active: true\n").unwrap();

    Command::cargo_bin("sheetport")
        .unwrap()
        .arg("export")
        .arg(&input)
        .arg("items")
        .arg("-d")
        .arg(temp_dir.path())
        .assert()
        .success();

    let output = temp_dir.path().join("items_out.yaml");
    Command::cargo_bin("sheetport")
        .unwrap()
        .arg("import")
        .arg(temp_dir.path().join("items.xlsx"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Import Complete"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("sku: A-1"));
    assert!(content.contains("qty: 3"));
    assert!(content.contains("active: true"));
}

#[test]
fn test_import_corrupt_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corrupt.xlsx");
    fs::write(&path, "not a workbook").unwrap();

    Command::cargo_bin("sheetport")
        .unwrap()
        .arg("import")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error processing file"));
}

#[test]
fn test_import_unknown_sheet_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("users.json");
    fs::write(&input, USERS_JSON).unwrap();

    Command::cargo_bin("sheetport")
        .unwrap()
        .arg("export")
        .arg(&input)
        .arg("Users")
        .arg("-d")
        .arg(temp_dir.path())
        .assert()
        .success();

    Command::cargo_bin("sheetport")
        .unwrap()
        .arg("import")
        .arg(temp_dir.path().join("Users.xlsx"))
        .arg("--sheet")
        .arg("Nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sheet not found: Nope"));
}
