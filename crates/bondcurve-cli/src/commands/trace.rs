//! Trace command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondcurve_curves::bootstrap::BootstrapTracer;
use bondcurve_curves::CashflowMatrix;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::input::PortfolioArgs;
use crate::output::{print_header, print_json, print_rows};

/// Arguments for the trace command.
#[derive(Args, Debug)]
pub struct TraceArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: usize,
    #[tabled(rename = "Bond")]
    bond_id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Equation")]
    equation: String,
    #[tabled(rename = "DF")]
    discount_factor: String,
    #[tabled(rename = "Spot (cont.)")]
    spot_rate: String,
}

/// Execute the trace command.
pub fn execute(args: TraceArgs, ctx: &Context) -> Result<()> {
    let bonds = args.portfolio.load()?;
    let matrix = CashflowMatrix::build(&bonds)?;
    let steps = BootstrapTracer::new(ctx.config.solver.triangular_tolerance).trace(&matrix)?;

    if ctx.format == OutputFormat::Json {
        return print_json(&steps);
    }

    let numbers = ctx.numbers();
    let rows: Vec<StepRow> = steps
        .iter()
        .map(|s| StepRow {
            step: s.step,
            bond_id: s.bond_id.clone(),
            time: s.time.to_string(),
            equation: s.equation.clone(),
            discount_factor: numbers.factor(s.discount_factor),
            spot_rate: numbers.percent(s.spot_rate),
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header("Bootstrap Steps");
        for step in &steps {
            println!("  {}. {}", step.step, step.description);
        }
        println!();
    }
    print_rows(&rows, ctx.format, |row| {
        format!("{} {}", row.time, row.discount_factor)
    })
}
