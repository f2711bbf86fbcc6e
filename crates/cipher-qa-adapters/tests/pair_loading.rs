//! Integration tests for pairing plaintext and cipher images on disk.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cipher_qa_adapters::{load_image, FsPairSource};
use cipher_qa_core::{PairSource, PixelBuffer};
use cipher_qa_test_support::SyntheticBufferBuilder;
use tempfile::TempDir;

fn save(dir: &Path, name: &str, buffer: &PixelBuffer) -> PathBuf {
    let path = dir.join(name);
    SyntheticBufferBuilder::to_image(buffer)
        .save(&path)
        .expect("should save fixture");
    path
}

/// Plaintext gradient plus two noise ciphers, one nested.
fn fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let original = save(
        dir.path(),
        "plain.png",
        &SyntheticBufferBuilder::horizontal_gradient(16, 16),
    );
    let ciphers = dir.path().join("ciphers");
    std::fs::create_dir_all(ciphers.join("nested")).unwrap();
    save(&ciphers, "a.png", &SyntheticBufferBuilder::gray_noise(16, 16, 1));
    save(
        &ciphers.join("nested"),
        "b.bmp",
        &SyntheticBufferBuilder::gray_noise(16, 16, 2),
    );
    std::fs::write(ciphers.join("key.txt"), "not an image").unwrap();
    (dir, original)
}

#[test]
fn test_lossless_formats_roundtrip() {
    let dir = TempDir::new().unwrap();
    let buffer = SyntheticBufferBuilder::rgb_noise(8, 8, 7);

    for name in ["noise.png", "noise.bmp", "noise.tiff"] {
        let path = save(dir.path(), name, &buffer);
        let info = load_image(&path).expect("should load lossless image");
        assert_eq!(info.buffer, buffer, "{name} should decode bit-exact");
        assert!(info.path.ends_with(name));
    }
}

#[test]
fn test_directory_scan_non_recursive() {
    let (dir, original) = fixture();
    let source = FsPairSource::new(original, vec![dir.path().join("ciphers")], false);

    assert_eq!(source.count_hint(), Some(1));
    let pairs: Vec<_> = source.pairs().collect::<anyhow::Result<_>>().unwrap();
    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].cipher.path.ends_with("a.png"));
    assert!(pairs[0].original.path.ends_with("plain.png"));
}

#[test]
fn test_directory_scan_recursive_shares_original() {
    let (dir, original) = fixture();
    let source = FsPairSource::new(original, vec![dir.path().join("ciphers")], true);

    let pairs: Vec<_> = source.pairs().collect::<anyhow::Result<_>>().unwrap();
    assert_eq!(pairs.len(), 2);
    assert!(Arc::ptr_eq(&pairs[0].original, &pairs[1].original));
    assert_eq!(pairs[1].cipher.dimensions().width, 16);
}

#[test]
fn test_original_is_not_paired_with_itself() {
    let (dir, original) = fixture();
    let source = FsPairSource::new(original.clone(), vec![dir.path().to_path_buf()], false);

    let pairs: Vec<_> = source.pairs().collect::<anyhow::Result<_>>().unwrap();
    assert!(pairs.is_empty());

    let explicit = FsPairSource::new(original.clone(), vec![original], false);
    assert_eq!(explicit.count_hint(), Some(0));
}

#[test]
fn test_missing_original_yields_single_error() {
    let (dir, _) = fixture();
    let source = FsPairSource::new(
        dir.path().join("missing.png"),
        vec![dir.path().join("ciphers")],
        true,
    );

    let items: Vec<_> = source.pairs().collect();
    assert_eq!(items.len(), 1);
    let err = items.into_iter().next().unwrap().unwrap_err();
    assert!(format!("{err:#}").contains("plaintext"));
}

#[test]
fn test_corrupt_cipher_is_an_item_error() {
    let (dir, original) = fixture();
    let bad = dir.path().join("ciphers").join("corrupt.png");
    std::fs::write(&bad, b"not a png").unwrap();

    let source = FsPairSource::new(original, vec![bad], false);
    let items: Vec<_> = source.pairs().collect();
    assert_eq!(items.len(), 1);
    assert!(items[0].is_err());
}

#[test]
fn test_missing_and_unsupported_paths_are_skipped() {
    let (dir, original) = fixture();
    let source = FsPairSource::new(
        original,
        vec![
            dir.path().join("nope.png"),
            dir.path().join("ciphers").join("key.txt"),
        ],
        false,
    );

    assert_eq!(source.count_hint(), Some(0));
    assert_eq!(source.pairs().count(), 0);
}
