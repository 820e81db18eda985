//! Triage
//!
//! Classifies product events from one or more tabular exports, routes every
//! row to a regulatory workflow, and writes the classified rows together
//! with event-level, row-level and GFE pivot summaries.

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
mod commands;
mod config;
mod inputs;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Classify(args) => {
            info!(inputs = args.inputs.len(), "Starting classification");
            let snapshot = commands::classify(args)?;
            if snapshot.unmatched() > 0 {
                eprintln!(
                    "{} rows matched no workflow rule (workflow 0)",
                    snapshot.unmatched()
                );
            }
        }
        Commands::View(args) => {
            commands::view(args)?;
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("triage=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("triage=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
