//! Quality issues raised when a metric misses its reference value.

use serde::{Deserialize, Serialize};

use crate::metrics::Direction;

/// A metric that failed its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Which check failed.
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Observed metric value.
    pub value: f64,
    /// Threshold the value was held against.
    pub threshold: f64,
    /// Axis, for correlation issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// The check that raised an issue.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Entropy below the minimum.
    LowEntropy,
    /// Too few pixels changed.
    LowNpcr,
    /// UACI too far from the ideal value.
    UaciOutOfRange,
    /// Adjacent pixels still correlated.
    HighCorrelation,
    /// Intensity histogram far from flat.
    NonUniformHistogram,
}
