//! Config command implementation.
//!
//! Prints the effective engine configuration and lists the built-in samples.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use bondcurve_core::samples::SampleSet;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_json, print_rows};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (defaults merged with --config)
    Show,

    /// List the built-in sample portfolios
    Samples,
}

#[derive(Debug, Serialize, Tabled)]
struct SampleRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Bonds")]
    bonds: usize,
    #[tabled(rename = "Description")]
    description: &'static str,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Samples => samples(ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => print_json(&ctx.config),
        _ => {
            print!("{}", ctx.config.to_toml_string()?);
            Ok(())
        }
    }
}

fn samples(ctx: &Context) -> Result<()> {
    let rows: Vec<SampleRow> = SampleSet::ALL
        .iter()
        .map(|set| SampleRow {
            name: set.name(),
            bonds: set.bonds().len(),
            description: set.description(),
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header("Sample Portfolios");
    }
    print_rows(&rows, ctx.format, |row| row.name.to_string())
}
