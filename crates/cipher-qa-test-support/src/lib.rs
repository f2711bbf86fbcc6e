//! Test support utilities for cipher-qa.
//!
//! Provides port mocks and synthetic pixel buffers with known metric values.
//!
//! # Example
//!
//! ```
//! use cipher_qa_core::compute_metrics;
//! use cipher_qa_test_support::SyntheticBufferBuilder;
//!
//! let plain = SyntheticBufferBuilder::horizontal_gradient(64, 64);
//! let cipher = SyntheticBufferBuilder::inverse(&plain);
//!
//! let report = compute_metrics(&plain, &cipher)?;
//! assert!(report.npcr > 0.99);
//! # Ok::<(), cipher_qa_core::MetricsError>(())
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticBufferBuilder;
pub use mocks::{MockPairSource, MockProgressSink, MockResultOutput};
