//! Loaded images and per-comparison results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{BufferStats, Issue, MetricsReport, PixelBuffer};

/// Result of comparing one cipher image to its plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Path of the plaintext image.
    pub original: String,
    /// Path of the cipher image.
    pub cipher: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Shared dimensions of both images.
    pub dimensions: ImageDimensions,
    /// Computed metrics.
    pub metrics: MetricsReport,
    /// Thresholds the metrics missed.
    pub issues: Vec<Issue>,
}

/// Statistics of a single image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResult {
    /// Path to the analyzed image.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Image dimensions.
    pub dimensions: ImageDimensions,
    /// Computed statistics.
    pub stats: BufferStats,
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates a dimensions record.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A decoded image and where it came from.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Path or other source identifier.
    pub path: String,
    /// Decoded samples.
    pub buffer: PixelBuffer,
}

impl ImageInfo {
    /// Wraps a decoded buffer.
    #[must_use]
    pub fn new(path: impl Into<String>, buffer: PixelBuffer) -> Self {
        Self {
            path: path.into(),
            buffer,
        }
    }

    /// Dimensions of the decoded buffer.
    #[must_use]
    pub const fn dimensions(&self) -> ImageDimensions {
        let (width, height) = self.buffer.dimensions();
        ImageDimensions::new(width, height)
    }
}

/// A plaintext image and one cipher image produced from it.
///
/// The plaintext is shared between every pair cut from the same source.
#[derive(Debug, Clone)]
pub struct ImagePair {
    /// Plaintext image.
    pub original: Arc<ImageInfo>,
    /// Cipher image.
    pub cipher: ImageInfo,
}
