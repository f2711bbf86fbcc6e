//! Pearson correlation between adjacent pixel intensities.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{fold_rows, intensity, Accumulator, Parallelism};
use crate::domain::{MetricsError, PixelBuffer};

/// Axis along which a pixel is paired with its neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Neighbor at `(x + 1, y)`.
    Horizontal,
    /// Neighbor at `(x, y + 1)`.
    Vertical,
    /// Neighbor at `(x + 1, y + 1)`.
    Diagonal,
}

impl Direction {
    /// All directions, in report order.
    pub const ALL: [Self; 3] = [Self::Horizontal, Self::Vertical, Self::Diagonal];

    /// Neighbor offset `(dx, dy)`.
    #[must_use]
    pub const fn offset(self) -> (u32, u32) {
        match self {
            Self::Horizontal => (1, 0),
            Self::Vertical => (0, 1),
            Self::Diagonal => (1, 1),
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Diagonal => "diagonal",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw moment sums of the pair set `{(x, y)}`.
///
/// Kept in integers so partial sums merge exactly in any order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Moments {
    n: u64,
    sum_x: u64,
    sum_y: u64,
    sum_xx: u128,
    sum_yy: u128,
    sum_xy: u128,
}

impl Accumulator for Moments {
    fn merge(self, other: Self) -> Self {
        Self {
            n: self.n + other.n,
            sum_x: self.sum_x + other.sum_x,
            sum_y: self.sum_y + other.sum_y,
            sum_xx: self.sum_xx + other.sum_xx,
            sum_yy: self.sum_yy + other.sum_yy,
            sum_xy: self.sum_xy + other.sum_xy,
        }
    }
}

impl Moments {
    fn push(&mut self, x: u8, y: u8) {
        let (x, y) = (u64::from(x), u64::from(y));
        self.n += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += u128::from(x * x);
        self.sum_yy += u128::from(y * y);
        self.sum_xy += u128::from(x * y);
    }

    /// Pearson coefficient; `0.0` when either side has zero variance.
    ///
    /// `n·Σxy − Σx·Σy` equals `n·Σ(x − x̄)(y − ȳ)`, and likewise for the
    /// variances, so the ratio matches the centered formula while every
    /// intermediate stays exact.
    #[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn coefficient(&self) -> f64 {
        let n = i128::from(self.n);
        let (sx, sy) = (i128::from(self.sum_x), i128::from(self.sum_y));
        let cov = n * self.sum_xy as i128 - sx * sy;
        let var_x = n * self.sum_xx as i128 - sx * sx;
        let var_y = n * self.sum_yy as i128 - sy * sy;
        if var_x == 0 || var_y == 0 {
            return 0.0;
        }
        let r = cov as f64 / (var_x as f64 * var_y as f64).sqrt();
        r.clamp(-1.0, 1.0)
    }
}

/// Computes adjacent-pixel correlation along one axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationAnalyzer {
    parallelism: Parallelism,
}

impl CorrelationAnalyzer {
    /// Creates an analyzer with the given reduction strategy.
    #[must_use]
    pub const fn new(parallelism: Parallelism) -> Self {
        Self { parallelism }
    }

    /// Correlation coefficient in `[-1, 1]`.
    ///
    /// Pixels whose neighbor would fall outside the buffer are left out of the
    /// pair set; nothing wraps or clamps.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptyBuffer`] for a zero-pixel buffer, and
    /// [`MetricsError::NoAdjacentPairs`] when the buffer is one pixel wide or
    /// tall along `direction`.
    pub fn analyze(&self, buffer: &PixelBuffer, direction: Direction) -> Result<f64, MetricsError> {
        if buffer.is_empty() {
            return Err(MetricsError::EmptyBuffer);
        }
        let (dx, dy) = direction.offset();
        let cols = buffer.width().saturating_sub(dx) as usize;
        let rows = buffer.height().saturating_sub(dy);
        if cols == 0 || rows == 0 {
            return Err(MetricsError::NoAdjacentPairs { direction });
        }

        let dx = dx as usize;
        let moments = fold_rows(rows, self.parallelism, |mut m: Moments, y| {
            let here = buffer.row(y);
            let next = buffer.row(y + dy);
            for (&a, &b) in here[..cols].iter().zip(&next[dx..]) {
                m.push(intensity(a), intensity(b));
            }
            m
        });

        Ok(moments.coefficient())
    }

    /// Correlation along every axis, in [`Direction::ALL`] order.
    ///
    /// # Errors
    ///
    /// Fails on the first direction that fails.
    pub fn analyze_all(&self, buffer: &PixelBuffer) -> Result<[f64; 3], MetricsError> {
        let [h, v, d] = Direction::ALL;
        Ok([
            self.analyze(buffer, h)?,
            self.analyze(buffer, v)?,
            self.analyze(buffer, d)?,
        ])
    }
}

/// Correlation along `direction`, reduced sequentially.
///
/// # Errors
///
/// See [`CorrelationAnalyzer::analyze`].
pub fn correlation(buffer: &PixelBuffer, direction: Direction) -> Result<f64, MetricsError> {
    CorrelationAnalyzer::default().analyze(buffer, direction)
}
