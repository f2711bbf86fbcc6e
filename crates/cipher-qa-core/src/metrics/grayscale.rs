//! Luma projection shared by every analyzer.

use crate::domain::Rgba;

/// Grayscale intensity of one sample: `round((r + g + b) / 3)`, alpha ignored.
///
/// A sum divided by three never lands exactly on `.5`, so `(sum + 1) / 3`
/// in integer arithmetic is the rounded value.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
#[inline]
pub const fn intensity(sample: Rgba) -> u8 {
    let sum = sample[0] as u16 + sample[1] as u16 + sample[2] as u16;
    // (765 + 1) / 3 == 255
    ((sum + 1) / 3) as u8
}
