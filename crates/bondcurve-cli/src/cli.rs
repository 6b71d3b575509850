//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::{
    ArbitrageArgs, BootstrapArgs, ConfigArgs, MatrixArgs, RiskArgs, TraceArgs, YtmArgs,
};

/// bondcurve - yield curve bootstrapping from bond portfolios
#[derive(Parser)]
#[command(name = "bondcurve")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true, env = "BONDCURVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the cashflow matrix of a portfolio
    Matrix(MatrixArgs),

    /// Solve for discount factors, spot and forward rates
    Bootstrap(BootstrapArgs),

    /// Show the step-by-step triangular bootstrap
    Trace(TraceArgs),

    /// Yield to maturity of every bond
    Ytm(YtmArgs),

    /// Price bonds off a stripped curve and flag mispricings
    Arbitrage(ArbitrageArgs),

    /// Duration, convexity, DV01 and rate shocks for one bond
    Risk(RiskArgs),

    /// List samples or print the effective configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (values only)
    Minimal,
}
