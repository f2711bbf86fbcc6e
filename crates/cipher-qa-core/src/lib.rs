//! cipher-qa core - quality metrics for encrypted images.
//!
//! Measures how random-looking a cipher image is, on its own and against the
//! plaintext it was produced from: Shannon entropy, NPCR and UACI,
//! adjacent-pixel correlation, and histogram uniformity. Every metric is a
//! pure function of decoded [`PixelBuffer`]s.
//!
//! ```
//! use cipher_qa_core::{compute_metrics, PixelBuffer};
//!
//! let plain = PixelBuffer::from_fn(4, 4, |_, _| [0, 0, 0, 255]);
//! let report = compute_metrics(&plain, &plain)?;
//! assert_eq!(report.npcr, 0.0);
//! # Ok::<(), cipher_qa_core::MetricsError>(())
//! ```

pub mod assessment;
pub mod domain;
pub mod engine;
pub mod metrics;
pub mod ports;

pub use assessment::{assess, AssessmentConfig};
pub use domain::{
    BufferStats, ComparisonResult, ImageDimensions, ImageInfo, ImagePair, InspectResult, Issue,
    IssueType, MetricsError, MetricsReport, PixelBuffer,
};
pub use engine::{analyze_buffer, compute_metrics, MetricsEngine};
pub use metrics::{Direction, Parallelism};
pub use ports::{PairSource, ProgressEvent, ProgressSink, ResultOutput};
