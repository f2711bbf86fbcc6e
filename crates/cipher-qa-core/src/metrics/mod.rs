//! Statistical analyzers over decoded pixel buffers.
//!
//! Every analyzer is a fold over pixel rows into an integer accumulator with
//! an associative `merge`, so sequential and parallel reductions produce
//! bit-identical results. Floating point only enters in the closed-form step
//! that turns the accumulator into a score.

mod correlation;
mod differential;
mod entropy;
mod grayscale;
mod histogram;
mod uniformity;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub use correlation::{correlation, CorrelationAnalyzer, Direction};
pub use differential::{
    differential, ensure_same_shape, npcr, uaci, Differential, DifferentialAnalyzer,
};
pub use entropy::{entropy, EntropyCalculator};
pub use grayscale::intensity;
pub use histogram::Histogram;
pub use uniformity::{chi_square, histogram_uniformity, HistogramUniformityScorer};

/// Number of grayscale intensity buckets.
pub const BUCKETS: usize = 256;

/// Largest grayscale intensity.
pub const MAX_INTENSITY: u8 = u8::MAX;

/// Upper bound of Shannon entropy for 8-bit intensities.
pub const MAX_ENTROPY: f64 = 8.0;

/// NPCR of an ideal cipher (every pixel changes).
pub const IDEAL_NPCR: f64 = 1.0;

/// UACI of an ideal cipher against its plaintext.
pub const IDEAL_UACI: f64 = 0.334;

/// How a reduction over pixel rows is scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parallelism {
    /// Left-to-right over rows on the calling thread.
    #[default]
    Sequential,
    /// Rows split across the rayon thread pool, partial accumulators merged.
    Parallel,
}

/// Partial result of a row reduction.
pub(crate) trait Accumulator: Default + Send {
    /// Combines two partial results. Must be associative and commutative.
    #[must_use]
    fn merge(self, other: Self) -> Self;
}

/// Folds rows `0..rows` into an accumulator.
pub(crate) fn fold_rows<A, F>(rows: u32, parallelism: Parallelism, fold: F) -> A
where
    A: Accumulator,
    F: Fn(A, u32) -> A + Sync + Send,
{
    match parallelism {
        Parallelism::Sequential => (0..rows).fold(A::default(), fold),
        Parallelism::Parallel => (0..rows)
            .into_par_iter()
            .fold(A::default, &fold)
            .reduce(A::default, A::merge),
    }
}
