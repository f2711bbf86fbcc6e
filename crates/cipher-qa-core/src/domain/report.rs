//! Metric reports.

use serde::{Deserialize, Serialize};

use crate::metrics::{Differential, Direction};

/// Every metric for one (plaintext, cipher) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Shannon entropy of the cipher image, in bits (0.0-8.0).
    pub entropy: f64,
    /// Number of Pixel Change Rate (0.0-1.0).
    pub npcr: f64,
    /// Unified Average Changing Intensity (0.0-1.0).
    pub uaci: f64,
    /// Cipher-image correlation with the right neighbor.
    pub correlation_horizontal: f64,
    /// Cipher-image correlation with the neighbor below.
    pub correlation_vertical: f64,
    /// Cipher-image correlation with the lower-right neighbor.
    pub correlation_diagonal: f64,
    /// Heuristic histogram uniformity of the cipher image (0.0-1.0).
    pub histogram_uniformity: f64,
}

impl MetricsReport {
    /// Merges the pair metrics with the cipher image's own statistics.
    #[must_use]
    pub const fn from_parts(differential: Differential, cipher: BufferStats) -> Self {
        Self {
            entropy: cipher.entropy,
            npcr: differential.npcr,
            uaci: differential.uaci,
            correlation_horizontal: cipher.correlation_horizontal,
            correlation_vertical: cipher.correlation_vertical,
            correlation_diagonal: cipher.correlation_diagonal,
            histogram_uniformity: cipher.histogram_uniformity,
        }
    }

    /// Correlation along one axis.
    #[must_use]
    pub const fn correlation(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.correlation_horizontal,
            Direction::Vertical => self.correlation_vertical,
            Direction::Diagonal => self.correlation_diagonal,
        }
    }
}

/// Single-image statistics, independent of any plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferStats {
    /// Shannon entropy in bits (0.0-8.0).
    pub entropy: f64,
    /// Heuristic histogram uniformity (0.0-1.0).
    pub histogram_uniformity: f64,
    /// Correlation with the right neighbor.
    pub correlation_horizontal: f64,
    /// Correlation with the neighbor below.
    pub correlation_vertical: f64,
    /// Correlation with the lower-right neighbor.
    pub correlation_diagonal: f64,
}
