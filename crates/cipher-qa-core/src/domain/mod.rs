//! Core domain types for encrypted-image quality analysis.

mod error;
mod issue;
mod pixel_buffer;
mod report;
mod result;

pub use error::MetricsError;
pub use issue::{Issue, IssueType};
pub use pixel_buffer::{PixelBuffer, Rgba};
pub use report::{BufferStats, MetricsReport};
pub use result::{ComparisonResult, ImageDimensions, ImageInfo, ImagePair, InspectResult};
