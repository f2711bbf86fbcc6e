//! Progress reporting for batch comparisons.

use crate::domain::ComparisonResult;

/// Lifecycle of a batch of pair comparisons.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A pair is about to be compared.
    Started {
        /// Plaintext image path.
        original: String,
        /// Cipher image path.
        cipher: String,
        /// Position in the batch (0-based).
        index: usize,
        /// Batch size, if known.
        total: Option<usize>,
    },
    /// A pair was compared.
    Completed {
        /// The comparison result.
        result: ComparisonResult,
    },
    /// A pair could not be loaded or compared.
    Skipped {
        /// Cipher image path, or a positional label when the path is unknown.
        cipher: String,
        /// Why it was skipped.
        reason: String,
    },
    /// The batch is done.
    Finished {
        /// Pairs compared.
        processed: usize,
        /// Pairs skipped.
        skipped: usize,
    },
}

/// Receives progress events.
pub trait ProgressSink: Send + Sync {
    /// Handles one event.
    fn on_event(&self, event: ProgressEvent);
}
