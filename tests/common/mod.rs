//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get an sct command
pub fn sct() -> Command {
    Command::new(cargo::cargo_bin!("sct"))
}

/// An sct command isolated from the developer's real config: temp working
/// directory, temp HOME, and no backend environment variables.
pub fn sct_in(tmp: &TempDir) -> Command {
    let mut cmd = sct();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("SCT_BACKEND_URL")
        .env_remove("SCT_SERVICE_KEY");
    cmd
}

/// Like [`sct_in`] but with a backend configured that refuses connections,
/// for exercising argument handling that never reaches the network.
pub fn sct_with_backend(tmp: &TempDir) -> Command {
    let mut cmd = sct_in(tmp);
    cmd.env("SCT_BACKEND_URL", "http://127.0.0.1:9")
        .env("SCT_SERVICE_KEY", "test-key");
    cmd
}
