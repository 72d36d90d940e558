//! Chainscope - TLS certificate chain inspection
//!
//! Prints lookup results as JSON on stdout. Diagnostics go to stderr.

use anyhow::Context;
use chainscope::cli::{Cli, Commands};
use chainscope::{commands, config, Runner};
use clap::Parser;
use console::style;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let pretty = cli.pretty;
    match cli.command {
        // Decoding a local file needs neither configuration nor the network
        Commands::Decode(args) => commands::run_decode(&args.file, pretty)?,
        Commands::Check(args) => {
            let runner = build_runner(cli.config.as_deref())?;
            commands::run_check(&runner, &args.host, &args.port, pretty).await?
        }
        Commands::Batch(args) => {
            let runner = build_runner(cli.config.as_deref())?;
            commands::run_batch(&runner, &args.hosts, args.file.as_deref(), pretty).await?
        }
        Commands::Query(args) => {
            let runner = build_runner(cli.config.as_deref())?;
            commands::run_query(&runner, &args.query, args.multi, pretty).await?
        }
    }

    Ok(())
}

fn build_runner(config_path: Option<&Path>) -> anyhow::Result<Runner> {
    let settings = config::load_config(config_path).context("Failed to load configuration")?;
    Ok(Runner::new(&settings)?)
}
