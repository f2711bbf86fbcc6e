//! Differential analysis between a plaintext image and its cipher image.

use serde::{Deserialize, Serialize};

use super::{fold_rows, intensity, Accumulator, Parallelism, MAX_INTENSITY};
use crate::domain::{MetricsError, PixelBuffer};

/// NPCR and UACI of one image pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Differential {
    /// Fraction of positions whose RGB triple changed (0.0-1.0).
    pub npcr: f64,
    /// Mean absolute intensity change, normalized by 255 (0.0-1.0).
    pub uaci: f64,
}

#[derive(Debug, Default)]
struct DiffAcc {
    changed: u64,
    abs_diff: u64,
}

impl Accumulator for DiffAcc {
    fn merge(self, other: Self) -> Self {
        Self {
            changed: self.changed + other.changed,
            abs_diff: self.abs_diff + other.abs_diff,
        }
    }
}

/// Computes NPCR and UACI between two same-shaped buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DifferentialAnalyzer {
    parallelism: Parallelism,
}

impl DifferentialAnalyzer {
    /// Creates an analyzer with the given reduction strategy.
    #[must_use]
    pub const fn new(parallelism: Parallelism) -> Self {
        Self { parallelism }
    }

    /// Both rates in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::ShapeMismatch`] if the dimensions differ and
    /// [`MetricsError::EmptyBuffer`] if both buffers are empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn analyze(
        &self,
        original: &PixelBuffer,
        cipher: &PixelBuffer,
    ) -> Result<Differential, MetricsError> {
        ensure_same_shape(original, cipher)?;
        if original.is_empty() {
            return Err(MetricsError::EmptyBuffer);
        }

        let acc = fold_rows(original.height(), self.parallelism, |mut acc: DiffAcc, y| {
            for (&a, &b) in original.row(y).iter().zip(cipher.row(y)) {
                if a[..3] != b[..3] {
                    acc.changed += 1;
                }
                acc.abs_diff += u64::from(intensity(a).abs_diff(intensity(b)));
            }
            acc
        });

        let total = original.len() as f64;
        Ok(Differential {
            npcr: acc.changed as f64 / total,
            uaci: acc.abs_diff as f64 / (total * f64::from(MAX_INTENSITY)),
        })
    }
}

/// Fails unless both buffers have identical width and height.
///
/// # Errors
///
/// Returns [`MetricsError::ShapeMismatch`] naming both shapes.
pub fn ensure_same_shape(original: &PixelBuffer, cipher: &PixelBuffer) -> Result<(), MetricsError> {
    if original.dimensions() == cipher.dimensions() {
        return Ok(());
    }
    Err(MetricsError::ShapeMismatch {
        original_width: original.width(),
        original_height: original.height(),
        cipher_width: cipher.width(),
        cipher_height: cipher.height(),
    })
}

/// NPCR and UACI, reduced sequentially.
///
/// # Errors
///
/// See [`DifferentialAnalyzer::analyze`].
pub fn differential(
    original: &PixelBuffer,
    cipher: &PixelBuffer,
) -> Result<Differential, MetricsError> {
    DifferentialAnalyzer::default().analyze(original, cipher)
}

/// Number of Pixel Change Rate.
///
/// # Errors
///
/// See [`DifferentialAnalyzer::analyze`].
pub fn npcr(original: &PixelBuffer, cipher: &PixelBuffer) -> Result<f64, MetricsError> {
    differential(original, cipher).map(|d| d.npcr)
}

/// Unified Average Changing Intensity.
///
/// # Errors
///
/// See [`DifferentialAnalyzer::analyze`].
pub fn uaci(original: &PixelBuffer, cipher: &PixelBuffer) -> Result<f64, MetricsError> {
    differential(original, cipher).map(|d| d.uaci)
}
