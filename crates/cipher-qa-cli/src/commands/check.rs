//! Check command - compare cipher images against their plaintext.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cipher_qa_adapters::FsPairSource;
use cipher_qa_core::{
    assess, AssessmentConfig, ComparisonResult, MetricsEngine, PairSource, Parallelism,
    ProgressEvent, ProgressSink, ResultOutput,
};
use clap::Args;
use tracing::{debug, info};

use super::{iso_timestamp, ExitCode};
use crate::config::AppConfig;
use crate::output::{JsonOutput, OutputFormat, ProgressBar};

/// Parse and validate a threshold value (0.0-1.0).
fn parse_threshold(s: &str) -> Result<f64, String> {
    parse_in_range(s, 1.0)
}

/// Parse and validate an entropy threshold (0.0-8.0 bits).
fn parse_entropy(s: &str) -> Result<f64, String> {
    parse_in_range(s, 8.0)
}

fn parse_in_range(s: &str, max: f64) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..={max:.1}"))
    }
}

/// Shared arguments for pair comparison.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Plaintext image the cipher images were produced from
    #[arg(short, long, value_name = "IMG")]
    pub original: Option<PathBuf>,

    /// Cipher image files or directories
    #[arg(value_name = "CIPHER")]
    pub ciphers: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Minimum cipher entropy in bits (0.0-8.0)
    #[arg(long, value_parser = parse_entropy)]
    pub min_entropy: Option<f64>,

    /// Minimum NPCR (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub min_npcr: Option<f64>,

    /// Allowed UACI distance from 0.334 (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub uaci_tolerance: Option<f64>,

    /// Maximum absolute adjacent-pixel correlation (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub max_correlation: Option<f64>,

    /// Minimum histogram uniformity (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub min_uniformity: Option<f64>,

    /// Split each metric over all cores
    #[arg(long)]
    pub parallel: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }
        if !args.parallel {
            args.parallel = config.engine.parallel.unwrap_or(false);
        }

        let t = &config.thresholds;
        args.min_entropy = args.min_entropy.or(t.min_entropy);
        args.min_npcr = args.min_npcr.or(t.min_npcr);
        args.uaci_tolerance = args.uaci_tolerance.or(t.uaci_tolerance);
        args.max_correlation = args.max_correlation.or(t.max_correlation);
        args.min_uniformity = args.min_uniformity.or(t.min_uniformity);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(OutputFormat::from_config);
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Thresholds with fallback to the hardcoded defaults.
    fn assessment(&self) -> AssessmentConfig {
        let defaults = AssessmentConfig::default();
        AssessmentConfig {
            min_entropy: self.min_entropy.unwrap_or(defaults.min_entropy),
            min_npcr: self.min_npcr.unwrap_or(defaults.min_npcr),
            uaci_tolerance: self.uaci_tolerance.unwrap_or(defaults.uaci_tolerance),
            max_correlation: self.max_correlation.unwrap_or(defaults.max_correlation),
            min_uniformity: self.min_uniformity.unwrap_or(defaults.min_uniformity),
        }
    }

    fn parallelism(&self) -> Parallelism {
        if self.parallel {
            Parallelism::Parallel
        } else {
            Parallelism::Sequential
        }
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Result of running the check command.
#[derive(Debug)]
pub struct CheckResult {
    /// Number of pairs compared.
    pub processed: usize,
    /// Number of pairs skipped.
    pub skipped: usize,
    /// Number of pairs with at least one issue.
    pub with_issues: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    let original = args
        .original
        .clone()
        .context("No original image specified (use --original)")?;
    if args.ciphers.is_empty() {
        anyhow::bail!("No cipher images specified");
    }
    info!(
        "Comparing {} cipher path(s) against {}",
        args.ciphers.len(),
        original.display()
    );

    let source = FsPairSource::new(original, args.ciphers.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);
    let output = JsonOutput::stdout(args.format(), args.pretty);

    let engine = MetricsEngine::new(args.parallelism());
    debug!("Engine parallelism: {:?}", engine.parallelism());

    process_pairs(&source, &engine, &args.assessment(), &output, &progress)
}

/// Compare every pair from `source`, writing one result per compared pair.
///
/// Pairs that fail to load or to compare are reported as skipped and do not
/// stop the batch.
pub fn process_pairs(
    source: &dyn PairSource,
    engine: &MetricsEngine,
    assessment: &AssessmentConfig,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut with_issues = 0usize;

    for (index, item) in source.pairs().enumerate() {
        let pair = match item {
            Ok(pair) => pair,
            Err(e) => {
                // The error carries the path via anyhow context.
                progress.on_event(ProgressEvent::Skipped {
                    cipher: format!("pair {index}"),
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            original: pair.original.path.clone(),
            cipher: pair.cipher.path.clone(),
            index,
            total,
        });

        let metrics = match engine.compute(&pair.original.buffer, &pair.cipher.buffer) {
            Ok(metrics) => metrics,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    cipher: pair.cipher.path,
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        let issues = assess(&metrics, assessment);
        if !issues.is_empty() {
            with_issues += 1;
        }

        let result = ComparisonResult {
            original: pair.original.path.clone(),
            dimensions: pair.cipher.dimensions(),
            cipher: pair.cipher.path,
            timestamp: iso_timestamp(),
            metrics,
            issues,
        };

        output.write(&result)?;
        progress.on_event(ProgressEvent::Completed { result });
        processed += 1;
    }

    output.flush()?;
    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if with_issues > 0 {
        ExitCode::IssuesFound
    } else if processed == 0 && skipped > 0 {
        ExitCode::Error
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed,
        skipped,
        with_issues,
        exit_code,
    })
}
