//! Error taxonomy for the metrics engine.

use thiserror::Error;

use crate::metrics::Direction;

/// Failures reported by the metrics engine.
///
/// Every failure is deterministic: the same input always yields the same
/// error, so nothing here is worth retrying.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// Buffers being compared have different dimensions.
    #[error(
        "shape mismatch: original is {original_width}x{original_height}, \
         cipher is {cipher_width}x{cipher_height}"
    )]
    ShapeMismatch {
        original_width: u32,
        original_height: u32,
        cipher_width: u32,
        cipher_height: u32,
    },

    /// A zero-pixel buffer was given to an analyzer.
    #[error("pixel buffer is empty")]
    EmptyBuffer,

    /// Sample count does not equal `width * height`.
    #[error("expected {expected} samples for the given dimensions, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// The buffer is too small to contain a single adjacent pair.
    #[error("no adjacent pixel pairs along the {direction} axis")]
    NoAdjacentPairs { direction: Direction },
}
