//! Result output port.

use crate::domain::{ComparisonResult, InspectResult};

/// Destination for computed results.
pub trait ResultOutput: Send + Sync {
    /// Writes one pair comparison.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, result: &ComparisonResult) -> anyhow::Result<()>;

    /// Writes the statistics of one standalone image.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_stats(&self, result: &InspectResult) -> anyhow::Result<()>;

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
