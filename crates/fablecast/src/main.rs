//! Fablecast CLI binary.
//!
//! Generates, inspects and publishes content from the command line. Every
//! command prints its outcome as JSON and exits non-zero on failure.

use clap::Parser;
use fablecast::{ContentService, ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    let config = cli::load_config(&cli)?;

    let mut observability = ObservabilityConfig::from(config.logging());
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(observability)?;

    let service = ContentService::from_config(&config)?;
    let succeeded = cli::run(&service, cli.command).await?;
    service.shutdown();

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
