//! Pipeline integration tests using synthetic images.
//!
//! Tests the full comparison pipeline with programmatically generated images.

#![allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::expect_used,
    deprecated
)]

use std::path::Path;

use assert_cmd::Command;
use cipher_qa_core::PixelBuffer;
use cipher_qa_test_support::SyntheticBufferBuilder;
use predicates::prelude::*;
use serde_json::Value;

/// Create a temporary directory with synthetic test images.
fn create_test_images(images: Vec<(&str, PixelBuffer)>) -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().unwrap();

    for (name, buffer) in images {
        let path = temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        SyntheticBufferBuilder::to_image(&buffer).save(&path).unwrap();
    }

    temp_dir
}

fn cipher_qa(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cipher-qa").unwrap();
    cmd.current_dir(dir).env("XDG_CONFIG_HOME", dir.join("xdg"));
    cmd
}

fn parse_lines(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("valid JSONL"))
        .collect()
}

fn issue_types(result: &Value) -> Vec<String> {
    result["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["type"].as_str().unwrap().to_string())
        .collect()
}

fn plain() -> PixelBuffer {
    SyntheticBufferBuilder::horizontal_gradient(128, 128)
}

// === Cipher Quality ===

#[test]
fn test_noise_cipher_has_no_issues() {
    let dir = create_test_images(vec![
        ("plain.png", plain()),
        ("noise.png", SyntheticBufferBuilder::gray_noise(128, 128, 11)),
    ]);

    let output = cipher_qa(dir.path())
        .args(["--original", "plain.png", "noise.png"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let results = parse_lines(&output.stdout);
    assert_eq!(results.len(), 1);

    let metrics = &results[0]["metrics"];
    assert!(metrics["entropy"].as_f64().unwrap() > 7.9);
    assert!(metrics["npcr"].as_f64().unwrap() > 0.99);
    assert!((metrics["uaci"].as_f64().unwrap() - 0.334).abs() < 0.05);
    assert!(metrics["correlation_horizontal"].as_f64().unwrap().abs() < 0.1);
    assert!(issue_types(&results[0]).is_empty());
}

#[test]
fn test_identity_cipher_flags_weak_encryption() {
    // 64 distinct levels: 6 bits of entropy.
    let gradient = SyntheticBufferBuilder::horizontal_gradient(64, 64);
    let dir = create_test_images(vec![("plain.png", gradient.clone()), ("copy.png", gradient)]);

    let output = cipher_qa(dir.path())
        .args(["--original", "plain.png", "copy.png"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let results = parse_lines(&output.stdout);
    let metrics = &results[0]["metrics"];
    assert_eq!(metrics["npcr"].as_f64().unwrap(), 0.0);
    assert_eq!(metrics["uaci"].as_f64().unwrap(), 0.0);

    let types = issue_types(&results[0]);
    for expected in ["low_entropy", "low_npcr", "uaci_out_of_range", "high_correlation"] {
        assert!(types.iter().any(|t| t == expected), "missing {expected} in {types:?}");
    }
}

#[test]
fn test_inverted_cipher_changes_every_pixel() {
    let dir = create_test_images(vec![
        ("plain.png", plain()),
        ("inverse.png", SyntheticBufferBuilder::inverse(&plain())),
    ]);

    let output = cipher_qa(dir.path())
        .args(["--original", "plain.png", "inverse.png"])
        .output()
        .unwrap();

    let results = parse_lines(&output.stdout);
    assert_eq!(results[0]["metrics"]["npcr"].as_f64().unwrap(), 1.0);
    // Inversion keeps the structure, so correlation stays high.
    assert!(issue_types(&results[0]).iter().any(|t| t == "high_correlation"));
    assert_eq!(output.status.code(), Some(1));
}

// === Batch Behavior ===

#[test]
fn test_directory_batch_recursive() {
    let dir = create_test_images(vec![
        ("plain.png", plain()),
        ("ciphers/a.png", SyntheticBufferBuilder::gray_noise(128, 128, 1)),
        ("ciphers/deep/b.png", SyntheticBufferBuilder::gray_noise(128, 128, 2)),
    ]);

    let flat = cipher_qa(dir.path())
        .args(["--original", "plain.png", "ciphers"])
        .output()
        .unwrap();
    assert_eq!(parse_lines(&flat.stdout).len(), 1);

    let recursive = cipher_qa(dir.path())
        .args(["-r", "--original", "plain.png", "ciphers"])
        .output()
        .unwrap();
    let results = parse_lines(&recursive.stdout);
    assert_eq!(results.len(), 2);
    assert!(results[1]["cipher"].as_str().unwrap().ends_with("b.png"));
    assert!(results[1]["original"].as_str().unwrap().ends_with("plain.png"));
}

#[test]
fn test_shape_mismatch_skipped_batch_continues() {
    let dir = create_test_images(vec![
        ("plain.png", plain()),
        ("a_small.png", SyntheticBufferBuilder::gray_noise(64, 64, 1)),
        ("b_good.png", SyntheticBufferBuilder::gray_noise(128, 128, 2)),
    ]);

    let output = cipher_qa(dir.path())
        .args(["--original", "plain.png", "a_small.png", "b_good.png"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(parse_lines(&output.stdout).len(), 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Skipping"), "stderr: {stderr}");
    assert!(stderr.contains("a_small.png"), "stderr: {stderr}");
}

#[test]
fn test_corrupt_cipher_skipped() {
    let dir = create_test_images(vec![
        ("plain.png", plain()),
        ("good.png", SyntheticBufferBuilder::gray_noise(128, 128, 3)),
    ]);
    std::fs::write(dir.path().join("bad.png"), b"not an image").unwrap();

    let output = cipher_qa(dir.path())
        .args(["--original", "plain.png", "bad.png", "good.png"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(parse_lines(&output.stdout).len(), 1);
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad.png"));
}

#[test]
fn test_unreadable_original_is_error() {
    let dir = create_test_images(vec![(
        "noise.png",
        SyntheticBufferBuilder::gray_noise(32, 32, 1),
    )]);

    cipher_qa(dir.path())
        .args(["--original", "missing.png", "noise.png"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("plaintext"));
}

#[test]
fn test_single_row_cipher_skipped() {
    let dir = create_test_images(vec![
        ("plain.png", SyntheticBufferBuilder::uniform_gray(8, 1, 0)),
        ("row.png", SyntheticBufferBuilder::gray_noise(8, 1, 1)),
    ]);

    cipher_qa(dir.path())
        .args(["--original", "plain.png", "row.png"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Skipping"));
}

// === Thresholds and Engine ===

#[test]
fn test_strict_threshold_flags_noise() {
    let dir = create_test_images(vec![
        ("plain.png", plain()),
        ("noise.png", SyntheticBufferBuilder::gray_noise(128, 128, 5)),
    ]);

    let output = cipher_qa(dir.path())
        .args(["--min-npcr", "1.0", "--original", "plain.png", "noise.png"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let results = parse_lines(&output.stdout);
    let issue = &results[0]["issues"][0];
    assert_eq!(issue["type"], "low_npcr");
    assert_eq!(issue["threshold"].as_f64().unwrap(), 1.0);
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = create_test_images(vec![
        ("plain.png", plain()),
        ("noise.png", SyntheticBufferBuilder::rgb_noise(128, 128, 9)),
    ]);

    let run = |extra: &[&str]| {
        let output = cipher_qa(dir.path())
            .args(extra)
            .args(["--original", "plain.png", "noise.png"])
            .output()
            .unwrap();
        parse_lines(&output.stdout).remove(0)["metrics"].clone()
    };

    assert_eq!(run(&[]), run(&["--parallel"]));
}

// === Inspect ===

#[test]
fn test_inspect_reports_single_image_stats() {
    let dir = create_test_images(vec![
        ("board.png", SyntheticBufferBuilder::checkerboard(32, 32, 1)),
        ("buckets.png", SyntheticBufferBuilder::one_per_bucket()),
    ]);

    let output = cipher_qa(dir.path())
        .args(["inspect", "board.png", "buckets.png"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let results = parse_lines(&output.stdout);
    assert_eq!(results.len(), 2);

    let board = &results[0]["stats"];
    assert_eq!(board["entropy"].as_f64().unwrap(), 1.0);
    assert_eq!(board["correlation_horizontal"].as_f64().unwrap(), -1.0);
    assert_eq!(board["correlation_diagonal"].as_f64().unwrap(), 1.0);

    let buckets = &results[1]["stats"];
    assert_eq!(buckets["entropy"].as_f64().unwrap(), 8.0);
    assert_eq!(buckets["histogram_uniformity"].as_f64().unwrap(), 1.0);
    assert_eq!(results[1]["dimensions"]["width"], 16);
}
