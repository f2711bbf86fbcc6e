//! Interprets a metrics report against reference values.
//!
//! Assessment is advisory: it never changes the report, it only lists the
//! metrics that missed their thresholds.

use serde::{Deserialize, Serialize};

use crate::domain::{Issue, IssueType, MetricsReport};
use crate::metrics::{Direction, IDEAL_UACI};

/// Thresholds a cipher image is held against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Minimum entropy in bits (0.0-8.0). Uniform RGB noise projects to
    /// roughly 7.4 bits of grayscale entropy.
    pub min_entropy: f64,
    /// Minimum NPCR (0.0-1.0).
    pub min_npcr: f64,
    /// Allowed distance of UACI from [`IDEAL_UACI`].
    pub uaci_tolerance: f64,
    /// Maximum absolute adjacent-pixel correlation on any axis.
    pub max_correlation: f64,
    /// Minimum histogram uniformity (0.0-1.0).
    pub min_uniformity: f64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            min_entropy: 7.0,
            min_npcr: 0.99,
            uaci_tolerance: 0.1,
            max_correlation: 0.1,
            min_uniformity: 0.99,
        }
    }
}

/// Lists every metric in `report` that misses `config`.
///
/// A value exactly at its threshold passes.
#[must_use]
pub fn assess(report: &MetricsReport, config: &AssessmentConfig) -> Vec<Issue> {
    let mut issues = Vec::new();

    if report.entropy < config.min_entropy {
        issues.push(issue(IssueType::LowEntropy, report.entropy, config.min_entropy));
    }
    if report.npcr < config.min_npcr {
        issues.push(issue(IssueType::LowNpcr, report.npcr, config.min_npcr));
    }
    if (report.uaci - IDEAL_UACI).abs() > config.uaci_tolerance {
        issues.push(issue(
            IssueType::UaciOutOfRange,
            report.uaci,
            config.uaci_tolerance,
        ));
    }
    for direction in Direction::ALL {
        let r = report.correlation(direction);
        if r.abs() > config.max_correlation {
            issues.push(Issue {
                direction: Some(direction),
                ..issue(IssueType::HighCorrelation, r, config.max_correlation)
            });
        }
    }
    if report.histogram_uniformity < config.min_uniformity {
        issues.push(issue(
            IssueType::NonUniformHistogram,
            report.histogram_uniformity,
            config.min_uniformity,
        ));
    }

    issues
}

const fn issue(issue_type: IssueType, value: f64, threshold: f64) -> Issue {
    Issue {
        issue_type,
        value,
        threshold,
        direction: None,
    }
}
