//! Filesystem adapter pairing a plaintext image with cipher images.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use cipher_qa_core::{ImagePair, PairSource};
use tracing::{debug, warn};

use crate::decode::load_image;

/// Supported image extensions.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];

/// Pairs one plaintext image with every cipher image found under the given paths.
pub struct FsPairSource {
    original: PathBuf,
    ciphers: Vec<PathBuf>,
    recursive: bool,
}

impl FsPairSource {
    /// Creates a new filesystem pair source.
    ///
    /// # Arguments
    ///
    /// * `original` - The plaintext image every cipher image is compared to
    /// * `ciphers` - Cipher image files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(original: PathBuf, ciphers: Vec<PathBuf>, recursive: bool) -> Self {
        Self {
            original,
            ciphers,
            recursive,
        }
    }

    /// Collects all cipher image files from the configured paths.
    ///
    /// The plaintext image is dropped wherever it shows up among the ciphers.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.ciphers {
            if path.is_file() {
                if is_supported_image(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        if let Ok(original) = self.original.canonicalize() {
            files.retain(|f| {
                let is_original = f.canonicalize().is_ok_and(|c| c == original);
                if is_original {
                    debug!("Skipping plaintext image among ciphers: {}", f.display());
                }
                !is_original
            });
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && is_supported_image(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl PairSource for FsPairSource {
    fn pairs(&self) -> Box<dyn Iterator<Item = Result<ImagePair>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} cipher image files", files.len());

        let original = match load_image(&self.original) {
            Ok(info) => Arc::new(info),
            Err(e) => {
                return Box::new(std::iter::once(Err(
                    e.context("Failed to load plaintext image")
                )));
            }
        };

        Box::new(files.into_iter().map(move |path| {
            let cipher = load_image(&path)?;
            Ok(ImagePair {
                original: Arc::clone(&original),
                cipher,
            })
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.as_str()))
}
