//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use cipher_qa_core::domain::{ComparisonResult, ImageInfo, ImagePair, InspectResult};
use cipher_qa_core::ports::{PairSource, ProgressEvent, ProgressSink, ResultOutput};

/// Mock implementation of `PairSource` for testing.
///
/// Pairs one plaintext with pre-built cipher buffers and tracks iteration.
pub struct MockPairSource {
    original: Arc<ImageInfo>,
    ciphers: Vec<ImageInfo>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockPairSource {
    /// Creates a new mock source.
    #[must_use]
    pub fn new(original: ImageInfo, ciphers: Vec<ImageInfo>) -> Self {
        Self {
            original: Arc::new(original),
            ciphers,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PairSource for MockPairSource {
    fn pairs(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImagePair>> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        Box::new(self.ciphers.iter().cloned().map(|cipher| {
            Ok(ImagePair {
                original: Arc::clone(&self.original),
                cipher,
            })
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.ciphers.len())
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures results for later assertions.
#[derive(Default)]
pub struct MockResultOutput {
    results: Mutex<Vec<ComparisonResult>>,
    stats: Mutex<Vec<InspectResult>>,
    flush_count: Mutex<usize>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured comparisons.
    #[must_use]
    pub fn results(&self) -> Vec<ComparisonResult> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns all captured single-image statistics.
    #[must_use]
    pub fn stats(&self) -> Vec<InspectResult> {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, result: &ComparisonResult) -> anyhow::Result<()> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result.clone());
        Ok(())
    }

    fn write_stats(&self, result: &InspectResult) -> anyhow::Result<()> {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
#[derive(Default)]
pub struct MockProgressSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the cipher paths of all `Skipped` events.
    #[must_use]
    pub fn skipped(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Skipped { cipher, .. } => Some(cipher),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
