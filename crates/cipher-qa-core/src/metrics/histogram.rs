//! 256-bucket intensity histogram.

use super::{fold_rows, intensity, Accumulator, Parallelism, BUCKETS};
use crate::domain::PixelBuffer;

/// Occurrence count of each grayscale intensity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; BUCKETS],
    total: u64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            bins: [0; BUCKETS],
            total: 0,
        }
    }
}

impl Accumulator for Histogram {
    fn merge(mut self, other: Self) -> Self {
        for (a, b) in self.bins.iter_mut().zip(other.bins) {
            *a += b;
        }
        self.total += other.total;
        self
    }
}

impl Histogram {
    /// Builds the histogram of a buffer's grayscale intensities.
    #[must_use]
    pub fn from_buffer(buffer: &PixelBuffer, parallelism: Parallelism) -> Self {
        fold_rows(buffer.height(), parallelism, |mut hist: Self, y| {
            for &sample in buffer.row(y) {
                hist.add(intensity(sample));
            }
            hist
        })
    }

    /// Builds a histogram from raw intensities.
    #[must_use]
    pub fn from_intensities(values: impl IntoIterator<Item = u8>) -> Self {
        let mut hist = Self::default();
        for v in values {
            hist.add(v);
        }
        hist
    }

    fn add(&mut self, value: u8) {
        self.bins[usize::from(value)] += 1;
        self.total += 1;
    }

    /// Per-intensity counts.
    #[must_use]
    pub const fn bins(&self) -> &[u64; BUCKETS] {
        &self.bins
    }

    /// Count for one intensity.
    #[must_use]
    pub const fn count(&self, value: u8) -> u64 {
        self.bins[value as usize]
    }

    /// Total number of samples.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Whether no samples were counted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of buckets with at least one sample.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.bins.iter().filter(|&&c| c > 0).count()
    }
}
