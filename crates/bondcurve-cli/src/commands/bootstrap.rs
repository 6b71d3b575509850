//! Bootstrap command implementation.
//!
//! Solves a portfolio for discount factors and reports spot and forward
//! rates with the solver diagnostics.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondcurve_analytics::analysis::CurveAnalysis;
use bondcurve_core::types::{Compounding, TimeKey};
use bondcurve_curves::bootstrap::SolveMethod;
use bondcurve_curves::prelude::LeastSquaresMethod;

use crate::cli::OutputFormat;
use crate::commands::{parse_compounding, Context};
use crate::input::PortfolioArgs;
use crate::output::{print_header, print_json, print_rows, print_table, print_warning, KeyValue};

/// Arguments for the bootstrap command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Spot rate convention (continuous, annual, semiannual)
    #[arg(long, value_parser = parse_compounding)]
    pub compounding: Option<Compounding>,

    /// Least-squares algorithm for non-triangular portfolios (normal, qr, svd)
    #[arg(long, value_parser = parse_method)]
    pub method: Option<LeastSquaresMethod>,

    /// Accept a minimum-norm fit when prices leave some factors undetermined
    #[arg(long)]
    pub min_norm: bool,

    /// Show per-bond repricing residuals
    #[arg(long)]
    pub show_residuals: bool,
}

fn parse_method(s: &str) -> Result<LeastSquaresMethod, String> {
    s.parse::<LeastSquaresMethod>().map_err(|e| e.to_string())
}

/// One row of the bootstrapped curve.
#[derive(Debug, Serialize, Tabled)]
struct CurveRow {
    #[tabled(rename = "Time")]
    time: TimeKey,
    #[tabled(rename = "Discount Factor")]
    #[serde(rename = "discount_factor")]
    df: String,
    #[tabled(rename = "Spot Rate")]
    spot: String,
    #[tabled(rename = "Forward Rate")]
    forward: String,
}

/// Machine-readable view of the result.
#[derive(Serialize)]
struct BootstrapOutput<'a> {
    method: SolveMethod,
    compounding: Compounding,
    times: Vec<f64>,
    discount_factors: &'a [f64],
    spot_rates: Vec<f64>,
    forward_rates: Vec<f64>,
    residuals: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    rank: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition_number: Option<f64>,
    repricing_valid: bool,
}

/// Execute the bootstrap command.
pub fn execute(args: BootstrapArgs, ctx: &Context) -> Result<()> {
    let bonds = args.portfolio.load()?;

    let mut settings = ctx.config.analysis_settings();
    settings.trace = false;
    if let Some(compounding) = args.compounding {
        settings.compounding = compounding;
    }
    if let Some(method) = args.method {
        settings.solver.least_squares_method = method;
    }
    if args.min_norm {
        settings.solver.allow_minimum_norm = true;
    }

    let analysis = CurveAnalysis::run(&bonds, &settings)?;
    let numbers = ctx.numbers();
    let factors = analysis.solution.discount_factors.factors();

    let rows: Vec<CurveRow> = analysis
        .spot_rates
        .iter()
        .zip(factors)
        .map(|(spot, df)| {
            let forward = analysis
                .forward_rates
                .iter()
                .find(|f| f.time == spot.time)
                .map_or_else(|| "-".to_string(), |f| numbers.percent(f.rate));
            CurveRow {
                time: spot.time,
                df: numbers.factor(*df),
                spot: numbers.percent(spot.rate),
                forward,
            }
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => print_table_report(&analysis, &rows, args.show_residuals, ctx)?,
        OutputFormat::Json => {
            let lsq = analysis.solution.least_squares.as_ref();
            print_json(&BootstrapOutput {
                method: analysis.solution.method,
                compounding: analysis.compounding,
                times: analysis.spot_rates.iter().map(|s| s.time.as_years()).collect(),
                discount_factors: factors,
                spot_rates: analysis.spot_rates.iter().map(|s| s.rate).collect(),
                forward_rates: analysis.forward_rates.iter().map(|f| f.rate).collect(),
                residuals: &analysis.solution.residuals,
                rank: lsq.map(|l| l.rank),
                condition_number: lsq.map(|l| l.condition_number),
                repricing_valid: analysis.repricing.is_valid(),
            })?;
        }
        OutputFormat::Csv | OutputFormat::Minimal => {
            print_rows(&rows, ctx.format, |row| format!("{} {}", row.time, row.df))?;
        }
    }
    Ok(())
}

fn print_table_report(
    analysis: &CurveAnalysis,
    rows: &[CurveRow],
    show_residuals: bool,
    ctx: &Context,
) -> Result<()> {
    let numbers = ctx.numbers();

    print_header("Bootstrapped Curve");
    println!(
        "Method: {}   Spot convention: {}",
        analysis.solution.method, analysis.compounding
    );
    print_table(rows)?;

    let mut diagnostics = vec![
        KeyValue::new("Bonds", analysis.matrix.num_bonds().to_string()),
        KeyValue::new("Payment times", analysis.matrix.num_times().to_string()),
    ];
    if let Some(lsq) = &analysis.solution.least_squares {
        diagnostics.push(KeyValue::new("Rank", lsq.rank.to_string()));
        diagnostics.push(KeyValue::new(
            "Condition number (CᵀC)",
            format!("{:.4e}", lsq.condition_number),
        ));
        diagnostics.push(KeyValue::new(
            "Entry ratio (proxy)",
            format!("{:.4e}", lsq.entry_ratio),
        ));
        diagnostics.push(KeyValue::new(
            "RMS residual",
            format!("{:.4e}", lsq.rms_residual()),
        ));
        if lsq.is_rank_deficient() {
            print_warning(&format!(
                "rank {} < {} payment times: minimum-norm solution, some factors are arbitrary",
                lsq.rank,
                analysis.matrix.num_times()
            ));
        }
    }
    diagnostics.push(KeyValue::new(
        "Max repricing error",
        format!("{:.4e}", analysis.repricing.max_error()),
    ));

    print_header("Diagnostics");
    print_table(&diagnostics)?;

    if show_residuals {
        print_header("Repricing");
        let checks: Vec<KeyValue> = analysis
            .repricing
            .checks()
            .iter()
            .map(|c| {
                KeyValue::new(
                    c.bond_id.clone(),
                    format!(
                        "market {} model {} error {:.3e}",
                        numbers.price(c.market_price),
                        numbers.price(c.model_price),
                        c.error
                    ),
                )
            })
            .collect();
        print_table(&checks)?;
    }
    Ok(())
}
