use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn enroll_cmd() -> Command {
    let mut cmd = Command::cargo_bin("enroll").expect("enroll binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write_catalog(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("catalog.yaml");
    fs::write(&path, body).expect("write catalog");
    path
}

const CATALOG: &str = "\
courses:
  - { code: LAB1, title: Chemistry Lab, capacity: 1, schedule: Th 2-5 PM }
students:
  - { id: S100, name: Marie Curie }
  - { id: S101, name: Rosalind Franklin }
operations:
  - { action: register, student: S100, course: LAB1 }
  - { action: register, student: S101, course: LAB1 }
  - { action: drop, student: S101, course: LAB1 }
  - { action: register, student: S999, course: LAB1 }
";

// ---------------------------------------------------------------------------
// 1. Demo walkthrough
// ---------------------------------------------------------------------------

#[test]
fn demo_is_the_default_and_exits_zero() {
    let default_out = enroll_cmd().assert().success().get_output().stdout.clone();
    let demo_out = enroll_cmd().arg("demo").assert().success().get_output().stdout.clone();
    assert_eq!(default_out, demo_out);
}

#[test]
fn demo_prints_slot_changes_in_order() {
    let assert = enroll_cmd().arg("demo").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");

    let steps = [
        "Available Courses:",
        "Available Slots: 30",
        "Student S001 registered for course CS101",
        "Student S002 registered for course MATH101",
        "Available Courses after Registration:",
        "Available Slots: 29",
        "Available Slots: 24",
        "Student S001 dropped course CS101",
        "Available Courses after Dropping:",
    ];
    let mut cursor = 0;
    for step in steps {
        let found = stdout[cursor..]
            .find(step)
            .unwrap_or_else(|| panic!("missing '{step}' after byte {cursor}:\n{stdout}"));
        cursor += found + step.len();
    }

    let after_drop = stdout.split("Available Courses after Dropping:").nth(1).unwrap();
    assert!(after_drop.contains("Course Code: CS101"));
    assert!(after_drop.contains("Available Slots: 30"));
    assert!(after_drop.contains("Available Slots: 24"));
}

// ---------------------------------------------------------------------------
// 2. courses
// ---------------------------------------------------------------------------

#[test]
fn courses_table_shows_demo_data() {
    enroll_cmd()
        .arg("courses")
        .assert()
        .success()
        .stdout(contains("CS101").and(contains("MATH101")).and(contains("TTh 11-12:30 PM")));
}

#[test]
fn courses_json_reflects_catalog_operations() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_catalog(dir.path(), CATALOG);

    let assert = enroll_cmd()
        .args(["courses", "--json", "--catalog"])
        .arg(&path)
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("json");
    let lab = &value[0];
    assert_eq!(lab["code"], "LAB1");
    assert_eq!(lab["enrolled"], 1);
    assert_eq!(lab["available"], 0);
    assert_eq!(lab["roster"], serde_json::json!(["S100"]));
}

#[test]
fn courses_reports_refused_catalog_operations() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_catalog(
        dir.path(),
        "courses:\n  - { code: A, title: Art, capacity: 1 }\n\
         operations:\n  - { action: register, student: S404, course: A }\n",
    );

    enroll_cmd()
        .args(["courses", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("A"))
        .stderr(contains("registration refused"))
        .stderr(contains("1 of 1 catalog operations refused"));
}

#[test]
fn courses_is_quiet_when_every_operation_applies() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_catalog(
        dir.path(),
        "courses:\n  - { code: A, title: Art, capacity: 1 }\n\
         students:\n  - { id: S1, name: Ada }\n\
         operations:\n  - { action: register, student: S1, course: A }\n",
    );

    enroll_cmd()
        .args(["courses", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stderr(contains("refused").not());
}

#[test]
fn missing_catalog_fails_with_context() {
    enroll_cmd()
        .args(["courses", "--catalog", "/definitely/not/here.yaml"])
        .assert()
        .failure()
        .stderr(contains("failed to load catalog"));
}

// ---------------------------------------------------------------------------
// 3. run
// ---------------------------------------------------------------------------

#[test]
fn run_reports_each_outcome_with_its_cause() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_catalog(dir.path(), CATALOG);

    enroll_cmd()
        .args(["run", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Student S100 registered for course LAB1"))
        .stdout(contains("course LAB1 is full (capacity 1)"))
        .stdout(contains("student S101 is not registered for course LAB1"))
        .stdout(contains("student S999 not found"))
        .stdout(contains("1 applied, 3 refused"));
}

#[test]
fn run_json_distinguishes_failure_kinds() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_catalog(dir.path(), CATALOG);

    let assert = enroll_cmd()
        .args(["run", "--json", "--catalog"])
        .arg(&path)
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("json");

    assert_eq!(value["summary"]["applied"], 1);
    assert_eq!(value["summary"]["refused"], 3);
    let kinds: Vec<&str> = value["operations"]
        .as_array()
        .expect("operations")
        .iter()
        .map(|op| op["error_kind"].as_str().unwrap_or("ok"))
        .collect();
    assert_eq!(kinds, ["ok", "capacity_exceeded", "not_registered", "student_not_found"]);
    assert_eq!(value["students"][0]["courses"], serde_json::json!(["LAB1"]));
    assert_eq!(value["students"][1]["courses"], serde_json::json!([]));
}

#[test]
fn run_rejects_duplicates_under_reject_policy() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_catalog(
        dir.path(),
        "duplicates: reject\ncourses:\n  - { code: A, title: A, capacity: 1 }\n  - { code: A, title: B, capacity: 1 }\n",
    );

    enroll_cmd()
        .args(["run", "--catalog"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("course A already exists"));
}
