//! Combines the analyzers into one report per image pair.

use crate::domain::{BufferStats, MetricsError, MetricsReport, PixelBuffer};
use crate::metrics::{
    ensure_same_shape, CorrelationAnalyzer, DifferentialAnalyzer, Direction, EntropyCalculator,
    HistogramUniformityScorer, Parallelism,
};

/// Runs every analyzer with one reduction strategy.
///
/// Both strategies produce bit-identical reports; `Parallel` only changes how
/// the work is scheduled.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsEngine {
    parallelism: Parallelism,
}

impl MetricsEngine {
    /// Creates an engine.
    #[must_use]
    pub const fn new(parallelism: Parallelism) -> Self {
        Self { parallelism }
    }

    /// Returns the configured reduction strategy.
    #[must_use]
    pub const fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Computes the full report for a plaintext image and its cipher image.
    ///
    /// Entropy, uniformity and correlation describe the cipher image; NPCR and
    /// UACI compare the two.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::ShapeMismatch`] before any analysis if the
    /// dimensions differ, otherwise the first analyzer failure. A report is
    /// never partially filled.
    pub fn compute(
        &self,
        original: &PixelBuffer,
        cipher: &PixelBuffer,
    ) -> Result<MetricsReport, MetricsError> {
        ensure_same_shape(original, cipher)?;

        let differential = DifferentialAnalyzer::new(self.parallelism);
        let (diff, stats) = match self.parallelism {
            Parallelism::Sequential => (
                differential.analyze(original, cipher),
                self.analyze_buffer(cipher),
            ),
            Parallelism::Parallel => rayon::join(
                || differential.analyze(original, cipher),
                || self.analyze_buffer(cipher),
            ),
        };

        Ok(MetricsReport::from_parts(diff?, stats?))
    }

    /// Computes the statistics that need only one image.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptyBuffer`] for a zero-pixel buffer and
    /// [`MetricsError::NoAdjacentPairs`] when it is one pixel wide or tall.
    pub fn analyze_buffer(&self, buffer: &PixelBuffer) -> Result<BufferStats, MetricsError> {
        let entropy = EntropyCalculator::new(self.parallelism);
        let uniformity = HistogramUniformityScorer::new(self.parallelism);
        let correlation = CorrelationAnalyzer::new(self.parallelism);

        let ((entropy, histogram_uniformity), correlations) = match self.parallelism {
            Parallelism::Sequential => (
                (entropy.calculate(buffer), uniformity.score(buffer)),
                correlation.analyze_all(buffer),
            ),
            Parallelism::Parallel => rayon::join(
                || rayon::join(|| entropy.calculate(buffer), || uniformity.score(buffer)),
                || correlation.analyze_all(buffer),
            ),
        };

        let [horizontal, vertical, diagonal] = correlations?;
        Ok(BufferStats {
            entropy: entropy?,
            histogram_uniformity: histogram_uniformity?,
            correlation_horizontal: horizontal,
            correlation_vertical: vertical,
            correlation_diagonal: diagonal,
        })
    }

    /// Correlation along a single axis.
    ///
    /// # Errors
    ///
    /// See [`CorrelationAnalyzer::analyze`].
    pub fn correlation(
        &self,
        buffer: &PixelBuffer,
        direction: Direction,
    ) -> Result<f64, MetricsError> {
        CorrelationAnalyzer::new(self.parallelism).analyze(buffer, direction)
    }
}

/// Computes the full report with sequential reductions.
///
/// # Errors
///
/// See [`MetricsEngine::compute`].
pub fn compute_metrics(
    original: &PixelBuffer,
    cipher: &PixelBuffer,
) -> Result<MetricsReport, MetricsError> {
    MetricsEngine::default().compute(original, cipher)
}

/// Computes single-image statistics with sequential reductions.
///
/// # Errors
///
/// See [`MetricsEngine::analyze_buffer`].
pub fn analyze_buffer(buffer: &PixelBuffer) -> Result<BufferStats, MetricsError> {
    MetricsEngine::default().analyze_buffer(buffer)
}
