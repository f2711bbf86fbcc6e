//! Cipher QA CLI - randomness metrics for encrypted images.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::check::CheckArgs;
use commands::inspect::InspectArgs;
use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();

    let result = match cli.command {
        Some(Commands::Check(args)) => {
            commands::check::run(&CheckArgs::with_config(args, &config)).map(|r| r.exit_code)
        }
        Some(Commands::Inspect(args)) => {
            commands::inspect::run(&InspectArgs::with_config(args, &config))
        }
        None => {
            // Default behavior: run check with flattened args
            if cli.check.ciphers.is_empty() {
                eprintln!("error: No cipher images specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            commands::check::run(&CheckArgs::with_config(cli.check, &config)).map(|r| r.exit_code)
        }
    };

    match result {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error.into()
        }
    }
}
