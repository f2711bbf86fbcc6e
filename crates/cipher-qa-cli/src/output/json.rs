//! JSON output adapter.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use cipher_qa_core::{ComparisonResult, InspectResult, ResultOutput};
use clap::ValueEnum;
use serde::Serialize;

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

impl OutputFormat {
    /// Parses a config file value (`"json"` or `"jsonl"`).
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}

/// JSON output adapter.
///
/// In [`OutputFormat::Jsonl`] mode every record is written as soon as it
/// arrives. In [`OutputFormat::Json`] mode records are held until
/// [`ResultOutput::flush`] and written as one array.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    format: OutputFormat,
    pretty: bool,
    pending: Mutex<Vec<serde_json::Value>>,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(format: OutputFormat, pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), format, pretty)
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
            pretty,
            pending: Mutex::new(Vec::new()),
        }
    }

    fn emit<T: Serialize>(&self, record: &T) -> Result<()> {
        match self.format {
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(record)?;
                self.write_line(&json)
            }
            OutputFormat::Json => {
                let value = serde_json::to_value(record)?;
                self.pending
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(value);
                Ok(())
            }
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn write_line(&self, line: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{line}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, result: &ComparisonResult) -> Result<()> {
        self.emit(result)
    }

    fn write_stats(&self, result: &InspectResult) -> Result<()> {
        self.emit(result)
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        if self.format == OutputFormat::Json {
            let records = std::mem::take(
                &mut *self
                    .pending
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            );
            let json = if self.pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            self.write_line(&json)?;
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
