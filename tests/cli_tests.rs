//! CLI surface tests
//!
//! These never talk to a real backend: they cover argument parsing,
//! configuration errors, and the offline commands (`init`, `completions`).

mod common;

use common::{sct, sct_in, sct_with_backend};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_help_lists_entity_commands() {
    sct()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("post"))
        .stdout(predicate::str::contains("service"))
        .stdout(predicate::str::contains("card"))
        .stdout(predicate::str::contains("logo"))
        .stdout(predicate::str::contains("testimonial"))
        .stdout(predicate::str::contains("upload"));
}

#[test]
fn test_version_flag() {
    sct()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3"));
}

#[test]
fn test_post_subcommand_help() {
    sct()
        .args(["post", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("move"))
        .stdout(predicate::str::contains("preview"));
}

#[test]
fn test_init_writes_config() {
    let tmp = TempDir::new().unwrap();

    sct_in(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created sct.yaml"));

    let content = fs::read_to_string(tmp.path().join("sct.yaml")).unwrap();
    assert!(content.contains("backend:"));
    assert!(content.contains("photo_bucket"));
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let tmp = TempDir::new().unwrap();

    sct_in(&tmp).arg("init").assert().success();
    sct_in(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    sct_in(&tmp).args(["init", "--force"]).assert().success();
}

#[test]
fn test_missing_backend_config_is_explained() {
    let tmp = TempDir::new().unwrap();

    sct_in(&tmp)
        .args(["post", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"))
        .stderr(predicate::str::contains("SCT_BACKEND_URL"));
}

#[test]
fn test_move_rejects_unknown_direction() {
    let tmp = TempDir::new().unwrap();

    // direction parsing happens before any network call
    sct_with_backend(&tmp)
        .args(["post", "move", "1", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown direction"));
}

#[test]
fn test_move_requires_position_and_direction() {
    let tmp = TempDir::new().unwrap();

    sct_with_backend(&tmp)
        .args(["post", "move"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_upload_rejects_unsupported_file_type() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.txt"), "not an image").unwrap();

    sct_with_backend(&tmp)
        .args(["upload", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file type"));
}

#[test]
fn test_upload_missing_file_fails() {
    let tmp = TempDir::new().unwrap();

    sct_with_backend(&tmp)
        .args(["upload", "missing.png"])
        .assert()
        .failure();
}

#[test]
fn test_logo_new_requires_file_or_url() {
    let tmp = TempDir::new().unwrap();

    sct_with_backend(&tmp)
        .args(["logo", "new", "--name", "Acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file or --url"));
}

#[test]
fn test_completions_generate() {
    sct()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sct"));
}
