//! Shannon entropy of the grayscale intensity distribution.

use super::{Histogram, Parallelism, MAX_ENTROPY};
use crate::domain::{MetricsError, PixelBuffer};

/// Computes Shannon entropy (bits per pixel) of a buffer's intensities.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyCalculator {
    parallelism: Parallelism,
}

impl EntropyCalculator {
    /// Creates a calculator with the given reduction strategy.
    #[must_use]
    pub const fn new(parallelism: Parallelism) -> Self {
        Self { parallelism }
    }

    /// Entropy in `[0, 8]`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptyBuffer`] for a zero-pixel buffer.
    pub fn calculate(&self, buffer: &PixelBuffer) -> Result<f64, MetricsError> {
        Self::from_histogram(&Histogram::from_buffer(buffer, self.parallelism))
    }

    /// Entropy of an already-built histogram.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptyBuffer`] if the histogram is empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_histogram(histogram: &Histogram) -> Result<f64, MetricsError> {
        if histogram.is_empty() {
            return Err(MetricsError::EmptyBuffer);
        }
        let total = histogram.total() as f64;
        let entropy = histogram
            .bins()
            .iter()
            .filter(|&&count| count > 0)
            .fold(0.0, |acc, &count| {
                let p = count as f64 / total;
                acc - p * p.log2()
            });
        Ok(entropy.clamp(0.0, MAX_ENTROPY))
    }
}

/// Entropy of `buffer`, reduced sequentially.
///
/// # Errors
///
/// Returns [`MetricsError::EmptyBuffer`] for a zero-pixel buffer.
pub fn entropy(buffer: &PixelBuffer) -> Result<f64, MetricsError> {
    EntropyCalculator::default().calculate(buffer)
}
