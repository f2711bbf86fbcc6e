//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: hardcoded defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use cipher_qa_test_support::SyntheticBufferBuilder;
use predicates::prelude::*;
use tempfile::TempDir;

/// Plaintext gradient plus one noise cipher that passes the default thresholds.
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    SyntheticBufferBuilder::to_image(&SyntheticBufferBuilder::horizontal_gradient(64, 64))
        .save(dir.path().join("plain.png"))
        .unwrap();
    SyntheticBufferBuilder::to_image(&SyntheticBufferBuilder::gray_noise(64, 64, 1))
        .save(dir.path().join("noise.png"))
        .unwrap();
    dir
}

fn cipher_qa(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cipher-qa").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .args(["--original", "plain.png", "noise.png"]);
    cmd
}

fn write_xdg(dir: &Path, content: &str) {
    let path = dir.join("xdg").join("cipher-qa");
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join("config.toml"), content).unwrap();
}

#[test]
fn test_defaults_pass_noise() {
    let dir = fixture();
    cipher_qa(dir.path()).assert().code(0);
}

#[test]
fn test_project_config_applies_format() {
    let dir = fixture();
    fs::write(dir.path().join(".cipher-qa.toml"), "[output]\nformat = 'json'\n").unwrap();

    cipher_qa(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_cli_overrides_project_config() {
    let dir = fixture();
    fs::write(dir.path().join(".cipher-qa.toml"), "[output]\nformat = 'json'\n").unwrap();

    cipher_qa(dir.path())
        .args(["--format", "jsonl"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_project_config_found_in_parent() {
    let dir = fixture();
    fs::write(
        dir.path().join(".cipher-qa.toml"),
        "[thresholds]\nmin_npcr = 1.0\n",
    )
    .unwrap();
    let nested = dir.path().join("work");
    fs::create_dir_all(&nested).unwrap();

    let mut cmd = Command::cargo_bin("cipher-qa").unwrap();
    cmd.current_dir(&nested)
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .args(["--original", "../plain.png", "../noise.png"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("low_npcr"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_xdg_config_thresholds_apply() {
    let dir = fixture();
    write_xdg(dir.path(), "[thresholds]\nmin_npcr = 1.0\n");

    cipher_qa(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("low_npcr"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_project_config_overrides_xdg() {
    let dir = fixture();
    write_xdg(dir.path(), "[thresholds]\nmin_npcr = 1.0\n");
    fs::write(
        dir.path().join(".cipher-qa.toml"),
        "[thresholds]\nmin_npcr = 0.5\n",
    )
    .unwrap();

    cipher_qa(dir.path()).assert().code(0);
}

#[cfg(target_os = "linux")]
#[test]
fn test_cli_overrides_xdg_threshold() {
    let dir = fixture();
    write_xdg(dir.path(), "[thresholds]\nmin_npcr = 1.0\n");

    cipher_qa(dir.path())
        .args(["--min-npcr", "0.5"])
        .assert()
        .code(0);
}

#[test]
fn test_invalid_config_value_warns() {
    let dir = fixture();
    fs::write(
        dir.path().join(".cipher-qa.toml"),
        "[thresholds]\nmax_correlation = 3.0\n",
    )
    .unwrap();

    cipher_qa(dir.path())
        .assert()
        .stderr(predicate::str::contains(
            "thresholds.max_correlation must be 0.0-1.0",
        ));
}

#[test]
fn test_unparseable_config_is_ignored() {
    let dir = fixture();
    fs::write(dir.path().join(".cipher-qa.toml"), "[output\nformat = 'json'\n").unwrap();

    cipher_qa(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("Failed to parse config file"));
}
