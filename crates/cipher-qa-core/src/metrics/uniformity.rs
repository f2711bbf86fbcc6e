//! Chi-square-derived histogram uniformity.
//!
//! The score normalizes chi-square by `total * 255`, which is a heuristic
//! ceiling rather than a calibrated bound. Treat it as a relative indicator,
//! never as a p-value.

use super::{Histogram, Parallelism, BUCKETS, MAX_INTENSITY};
use crate::domain::{MetricsError, PixelBuffer};

/// Scores how close a buffer's intensity histogram is to uniform.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramUniformityScorer {
    parallelism: Parallelism,
}

impl HistogramUniformityScorer {
    /// Creates a scorer with the given reduction strategy.
    #[must_use]
    pub const fn new(parallelism: Parallelism) -> Self {
        Self { parallelism }
    }

    /// Uniformity in `[0, 1]`; `1.0` for a perfectly flat histogram.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptyBuffer`] for a zero-pixel buffer.
    pub fn score(&self, buffer: &PixelBuffer) -> Result<f64, MetricsError> {
        Self::from_histogram(&Histogram::from_buffer(buffer, self.parallelism))
    }

    /// Uniformity of an already-built histogram.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptyBuffer`] if the histogram is empty.
    pub fn from_histogram(histogram: &Histogram) -> Result<f64, MetricsError> {
        if histogram.is_empty() {
            return Err(MetricsError::EmptyBuffer);
        }
        let chi_square = chi_square(histogram);
        #[allow(clippy::cast_precision_loss)]
        let max_chi_square = histogram.total() as f64 * f64::from(MAX_INTENSITY);
        Ok((1.0 - chi_square / max_chi_square).clamp(0.0, 1.0))
    }
}

/// Chi-square statistic of a histogram against the flat distribution.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn chi_square(histogram: &Histogram) -> f64 {
    let expected = histogram.total() as f64 / BUCKETS as f64;
    if expected == 0.0 {
        return 0.0;
    }
    histogram.bins().iter().fold(0.0, |acc, &observed| {
        let d = observed as f64 - expected;
        acc + d * d / expected
    })
}

/// Histogram uniformity of `buffer`, reduced sequentially.
///
/// # Errors
///
/// Returns [`MetricsError::EmptyBuffer`] for a zero-pixel buffer.
pub fn histogram_uniformity(buffer: &PixelBuffer) -> Result<f64, MetricsError> {
    HistogramUniformityScorer::default().score(buffer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_possible_truncation, clippy::float_cmp)]
mod tests {
    use super::*;

    fn gray(v: u8) -> [u8; 4] {
        [v, v, v, 255]
    }

    #[test]
    fn test_one_pixel_per_bucket_is_perfect() {
        let buf = PixelBuffer::from_fn(16, 16, |x, y| gray((y * 16 + x) as u8));
        let hist = Histogram::from_buffer(&buf, Parallelism::Sequential);
        assert_eq!(chi_square(&hist), 0.0);
        assert_eq!(histogram_uniformity(&buf).unwrap(), 1.0);
    }

    #[test]
    fn test_constant_buffer_scores_near_zero() {
        // All mass in one bucket: chi-square = 255 * n, exactly the ceiling.
        let buf = PixelBuffer::from_fn(32, 32, |_, _| gray(7));
        let u = histogram_uniformity(&buf).unwrap();
        assert!(u.abs() < 1e-12, "got {u}");
    }

    #[test]
    fn test_two_buckets_partially_uniform() {
        // n = 256, E = 1: two buckets of 128 give 2 * 127^2 + 254 * 1
        let buf = PixelBuffer::from_fn(16, 16, |x, _| gray(if x < 8 { 0 } else { 255 }));
        let u = histogram_uniformity(&buf).unwrap();
        let expected = 1.0 - 32_512.0 / 65_280.0;
        assert!((u - expected).abs() < 1e-12, "got {u}");
    }

    #[test]
    fn test_more_spread_scores_higher() {
        let narrow = PixelBuffer::from_fn(64, 64, |x, y| gray(((x + y) % 16) as u8));
        let wide = PixelBuffer::from_fn(64, 64, |x, y| gray(((x * 4 + y) % 256) as u8));
        assert!(histogram_uniformity(&wide).unwrap() > histogram_uniformity(&narrow).unwrap());
    }

    #[test]
    fn test_empty_buffer_fails() {
        let buf = PixelBuffer::new(0, 0, vec![]).unwrap();
        assert_eq!(histogram_uniformity(&buf), Err(MetricsError::EmptyBuffer));
    }
}
