//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod pair_source;
mod progress;
mod result_output;

pub use pair_source::PairSource;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
