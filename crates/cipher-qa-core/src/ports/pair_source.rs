//! Image pair source port.

use crate::domain::ImagePair;

/// Port for loading (plaintext, cipher) image pairs.
pub trait PairSource: Send + Sync {
    /// Returns an iterator over pairs from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if an image fails to load.
    fn pairs(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImagePair>> + Send + '_>;

    /// Returns the total number of pairs, if known.
    fn count_hint(&self) -> Option<usize>;
}
