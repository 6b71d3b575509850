//! YTM command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondcurve_bonds::pricing::{current_yield, premium_discount, YieldSolver};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::input::PortfolioArgs;
use crate::output::{print_header, print_rows, print_warning};

/// Arguments for the ytm command.
#[derive(Args, Debug)]
pub struct YtmArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Override the convergence tolerance on the pricing error
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Override the iteration limit
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

#[derive(Debug, Serialize, Tabled)]
struct YieldRow {
    #[tabled(rename = "Bond")]
    bond_id: String,
    #[tabled(rename = "Maturity")]
    maturity: f64,
    #[tabled(rename = "Coupon")]
    coupon: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "YTM")]
    ytm: String,
    #[tabled(rename = "Current Yield")]
    current_yield: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Iterations")]
    iterations: String,
}

/// Execute the ytm command.
pub fn execute(args: YtmArgs, ctx: &Context) -> Result<()> {
    let bonds = args.portfolio.load()?;

    let mut solver = YieldSolver::new(ctx.config.yield_solver);
    if let Some(tolerance) = args.tolerance {
        solver = solver.with_tolerance(tolerance);
    }
    if let Some(max_iterations) = args.max_iterations {
        solver = solver.with_max_iterations(max_iterations);
    }

    let numbers = ctx.numbers();
    let mut failures = 0;
    let rows: Vec<YieldRow> = bonds
        .iter()
        .zip(solver.solve_portfolio(&bonds))
        .map(|(bond, result)| {
            let (ytm, iterations) = match result {
                Ok(r) => (numbers.percent(r.yield_value), r.iterations.to_string()),
                Err(e) => {
                    failures += 1;
                    print_warning(&e.to_string());
                    ("n/a".to_string(), "-".to_string())
                }
            };
            YieldRow {
                bond_id: bond.id.clone(),
                maturity: bond.maturity,
                coupon: numbers.percent(bond.coupon_rate),
                price: numbers.price(bond.price),
                ytm,
                current_yield: numbers.percent(current_yield(bond, bond.price)),
                status: premium_discount(bond, bond.price).status.to_string(),
                iterations,
            }
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header("Yield to Maturity");
    }
    print_rows(&rows, ctx.format, |row| format!("{} {}", row.bond_id, row.ytm))?;

    if failures > 0 {
        anyhow::bail!("{failures} of {} yields failed", bonds.len());
    }
    Ok(())
}
