//! bondcurve CLI - yield curve bootstrapping from bond portfolios.
//!
//! # Usage
//!
//! ```bash
//! # Solve a sample portfolio for discount factors and spot rates
//! bondcurve bootstrap --sample triangular
//!
//! # Walk through the triangular bootstrap
//! bondcurve trace --file bonds.csv
//!
//! # Flag bonds priced off the zero-coupon strip
//! bondcurve arbitrage --sample mispriced-bond --format json
//!
//! # Risk measures for an inline bond
//! bondcurve risk --maturity 10 --coupon 5 --price 98.5
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bondcurve_config::EngineConfig;

mod cli;
mod commands;
mod error;
mod input;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    init_logging(cli.verbose, &config.logging.filter);
    match &cli.config {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => debug!("Using default configuration"),
    }

    let ctx = Context::new(config, cli.format);

    match cli.command {
        Commands::Matrix(args) => commands::matrix::execute(args, &ctx)?,
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, &ctx)?,
        Commands::Trace(args) => commands::trace::execute(args, &ctx)?,
        Commands::Ytm(args) => commands::ytm::execute(args, &ctx)?,
        Commands::Arbitrage(args) => commands::arbitrage::execute(args, &ctx)?,
        Commands::Risk(args) => commands::risk::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so they never mix with command output.
///
/// `-v` flags win over `RUST_LOG`, which wins over the configured filter.
fn init_logging(verbose: u8, configured: &str) {
    let filter = match verbose {
        0 => std::env::var("RUST_LOG").unwrap_or_else(|_| configured.to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
