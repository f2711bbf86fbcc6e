//! CLI command definitions and handlers.

pub mod check;
pub mod inspect;

use clap::{Parser, Subcommand};
use tracing::debug;

/// Cipher QA - score how random-looking encrypted images are
#[derive(Parser)]
#[command(name = "cipher-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (original, ciphers, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Compare cipher images against their plaintext
    Check(check::CheckArgs),
    /// Report single-image statistics
    Inspect(inspect::InspectArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every pair passed its thresholds.
    Success = 0,
    /// At least one pair missed a threshold.
    IssuesFound = 1,
    /// Usage, I/O, or load error.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
pub fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
