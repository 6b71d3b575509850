//! Arbitrage command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::str::FromStr;
use tabled::Tabled;

use bondcurve_analytics::arbitrage::{
    ArbitrageDetector, CurveSource, MispricingThresholds, Signal,
};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::input::PortfolioArgs;
use crate::output::{print_header, print_json, print_rows, print_success, print_table, KeyValue};

/// Arguments for the arbitrage command.
#[derive(Args, Debug)]
pub struct ArbitrageArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Curve bonds: zero-coupons, all-bonds, or benchmarks:ID,ID,...
    #[arg(long, value_parser = CurveSource::from_str)]
    pub curve_source: Option<CurveSource>,

    /// Symmetric signal band in percent (overrides the configured thresholds)
    #[arg(long)]
    pub band: Option<f64>,
}

#[derive(Debug, Serialize, Tabled)]
struct MispricingRow {
    #[tabled(rename = "Bond")]
    bond_id: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Theoretical")]
    theoretical: String,
    #[tabled(rename = "Mispricing")]
    mispricing: String,
    #[tabled(rename = "%")]
    percent: String,
    #[tabled(rename = "Signal")]
    signal: Signal,
    #[tabled(rename = "Curve")]
    in_curve: bool,
}

/// Execute the arbitrage command.
pub fn execute(args: ArbitrageArgs, ctx: &Context) -> Result<()> {
    let bonds = args.portfolio.load()?;

    let mut config = ctx.config.arbitrage.clone();
    if let Some(source) = args.curve_source {
        config.curve_source = source;
    }
    if let Some(band) = args.band {
        config.thresholds = MispricingThresholds::symmetric(band);
    }

    let analysis = ArbitrageDetector::new(config).analyze(&bonds)?;

    if ctx.format == OutputFormat::Json {
        return print_json(&analysis);
    }

    let numbers = ctx.numbers();
    let rows: Vec<MispricingRow> = analysis
        .mispricings
        .iter()
        .map(|m| MispricingRow {
            bond_id: m.bond_id.clone(),
            market: numbers.price(m.market_price),
            theoretical: numbers.price(m.theoretical_price),
            mispricing: numbers.price(m.mispricing),
            percent: numbers.percent_value(m.percent),
            signal: m.signal,
            in_curve: m.in_curve,
        })
        .collect();

    if ctx.format != OutputFormat::Table {
        return print_rows(&rows, ctx.format, |row| {
            format!("{} {}", row.bond_id, row.signal)
        });
    }

    print_header("Stripped Curve");
    println!(
        "Source: {} ({})",
        analysis.curve_source,
        analysis.curve_bonds.join(", ")
    );
    let curve: Vec<KeyValue> = analysis
        .curve
        .points()
        .iter()
        .map(|p| KeyValue::new(format!("t={}", p.time), numbers.percent(p.rate)))
        .collect();
    print_table(&curve)?;

    print_header("Mispricing");
    print_table(&rows)?;

    let opportunities: Vec<_> = analysis.opportunities().collect();
    if opportunities.is_empty() {
        print_success("No arbitrage opportunities");
    } else {
        for m in opportunities {
            let label = match m.signal {
                Signal::Buy => m.signal.to_string().green().bold(),
                _ => m.signal.to_string().red().bold(),
            };
            println!(
                "{label} {}: market {} vs theoretical {} ({})",
                m.bond_id,
                numbers.price(m.market_price),
                numbers.price(m.theoretical_price),
                numbers.percent_value(m.percent)
            );
        }
    }
    Ok(())
}
