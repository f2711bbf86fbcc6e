//! Inspect command - single-image statistics.

use std::path::PathBuf;

use anyhow::Result;
use cipher_qa_adapters::load_image;
use cipher_qa_core::{InspectResult, MetricsEngine, Parallelism, ResultOutput};
use clap::Args;
use tracing::info;

use super::{iso_timestamp, ExitCode};
use crate::config::AppConfig;
use crate::output::{JsonOutput, OutputFormat};

/// Arguments for the inspect command.
#[derive(Args, Clone)]
pub struct InspectArgs {
    /// Image files to analyze
    #[arg(required = true, value_name = "IMG")]
    pub paths: Vec<PathBuf>,

    /// Split each metric over all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl InspectArgs {
    /// Apply configuration file values, respecting CLI precedence.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.parallel {
            args.parallel = config.engine.parallel.unwrap_or(false);
        }
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
        args
    }
}

/// Run the inspect command.
pub fn run(args: &InspectArgs) -> Result<ExitCode> {
    info!("Inspecting {} image(s)", args.paths.len());

    let parallelism = if args.parallel {
        Parallelism::Parallel
    } else {
        Parallelism::Sequential
    };
    let output = JsonOutput::stdout(args.format.unwrap_or_default(), args.pretty);

    inspect_paths(&args.paths, &MetricsEngine::new(parallelism), &output)
}

/// Analyze each image on its own. Unreadable or degenerate images are skipped.
fn inspect_paths(
    paths: &[PathBuf],
    engine: &MetricsEngine,
    output: &dyn ResultOutput,
) -> Result<ExitCode> {
    let mut processed = 0usize;
    let mut skipped = 0usize;

    for path in paths {
        let analyzed = load_image(path).and_then(|image| {
            let stats = engine.analyze_buffer(&image.buffer)?;
            Ok(InspectResult {
                dimensions: image.dimensions(),
                path: image.path,
                timestamp: iso_timestamp(),
                stats,
            })
        });

        match analyzed {
            Ok(result) => {
                output.write_stats(&result)?;
                processed += 1;
            }
            Err(e) => {
                eprintln!("WARN: Skipping {}: {e:#}", path.display());
                skipped += 1;
            }
        }
    }

    output.flush()?;

    Ok(if processed == 0 && skipped > 0 {
        ExitCode::Error
    } else {
        ExitCode::Success
    })
}
