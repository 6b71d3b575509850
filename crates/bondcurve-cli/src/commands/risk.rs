//! Risk command implementation.
//!
//! Duration, convexity and DV01 for one bond, either picked from a portfolio
//! by id or described inline, plus a parallel rate-shock ladder.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondcurve_bonds::pricing::{current_yield, premium_discount, YieldSolver};
use bondcurve_bonds::risk::{rate_shock_ladder, RateShock, RiskMeasures, BASIS_POINT};
use bondcurve_core::types::{Bond, Frequency};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::input::PortfolioArgs;
use crate::output::{print_header, print_json, print_rows, print_table, KeyValue};

/// Arguments for the risk command.
#[derive(Args, Debug)]
pub struct RiskArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Bond id within the portfolio
    #[arg(long)]
    pub bond: Option<String>,

    /// Years to maturity (inline bond)
    #[arg(long, conflicts_with = "bond")]
    pub maturity: Option<f64>,

    /// Annual coupon rate in percent (inline bond)
    #[arg(long, default_value_t = 0.0)]
    pub coupon: f64,

    /// Payments per year: 1, 2 or 4 (inline bond)
    #[arg(long, default_value_t = 2)]
    pub frequency: u32,

    /// Market price (inline bond)
    #[arg(long)]
    pub price: Option<f64>,

    /// Face value (inline bond)
    #[arg(long, default_value_t = 100.0)]
    pub face: f64,

    /// Yield in percent (default: solved yield to maturity)
    #[arg(long = "yield")]
    pub yield_pct: Option<f64>,

    /// Shock size in basis points
    #[arg(long, default_value_t = 100.0)]
    pub shift: f64,
}

#[derive(Debug, Serialize)]
struct RiskOutput<'a> {
    measures: &'a RiskMeasures,
    ytm: f64,
    current_yield: f64,
    premium_discount: f64,
    shocks: &'a [RateShock],
}

#[derive(Debug, Serialize, Tabled)]
struct ShockRow {
    #[tabled(rename = "Shift (bp)")]
    shift_bp: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "%")]
    percent: String,
    #[tabled(rename = "Duration Est.")]
    duration_estimate: String,
    #[tabled(rename = "+Convexity Est.")]
    convexity_estimate: String,
}

impl RiskArgs {
    fn resolve_bond(&self) -> Result<Bond, CliError> {
        if let Some(id) = &self.bond {
            return self
                .portfolio
                .load()?
                .into_iter()
                .find(|bond| &bond.id == id)
                .ok_or_else(|| CliError::BondNotFound(id.clone()));
        }

        if self.portfolio.is_given() {
            return Err(CliError::MissingArgument("--bond".to_string()));
        }

        let maturity = self
            .maturity
            .ok_or_else(|| CliError::MissingArgument("--bond or --maturity".to_string()))?;
        let price = self
            .price
            .ok_or_else(|| CliError::MissingArgument("--price".to_string()))?;
        let frequency =
            Frequency::try_from(self.frequency).map_err(|e| CliError::InvalidArgument {
                name: "frequency",
                reason: e.to_string(),
            })?;

        let bond = Bond::new(
            "BOND",
            maturity,
            self.coupon / 100.0,
            frequency,
            price,
            self.face,
        );
        bond.validate().map_err(|e| CliError::InvalidArgument {
            name: "bond",
            reason: e.to_string(),
        })?;
        Ok(bond)
    }
}

/// Execute the risk command.
pub fn execute(args: RiskArgs, ctx: &Context) -> Result<()> {
    let bond = args.resolve_bond()?;
    let ytm = YieldSolver::new(ctx.config.yield_solver).solve(&bond)?.yield_value;
    let yield_value = args.yield_pct.map_or(ytm, |pct| pct / 100.0);

    let measures = RiskMeasures::compute(&bond, yield_value)?;
    let shift = args.shift * BASIS_POINT;
    let shocks = rate_shock_ladder(&bond, yield_value, &[-shift, shift])?;
    let premium = premium_discount(&bond, bond.price);
    let current = current_yield(&bond, bond.price);

    if ctx.format == OutputFormat::Json {
        return print_json(&RiskOutput {
            measures: &measures,
            ytm,
            current_yield: current,
            premium_discount: premium.amount,
            shocks: &shocks,
        });
    }

    let numbers = ctx.numbers();
    let metrics = vec![
        KeyValue::new("Bond", bond.id.clone()),
        KeyValue::new("Market Price", numbers.price(bond.price)),
        KeyValue::new("Yield to Maturity", numbers.percent(ytm)),
        KeyValue::new("Risk Yield", numbers.percent(yield_value)),
        KeyValue::new("Price at Yield", numbers.price(measures.price)),
        KeyValue::new(
            "Premium/Discount",
            format!("{} ({})", numbers.price(premium.amount), premium.status),
        ),
        KeyValue::new("Current Yield", numbers.percent(current)),
        KeyValue::new("Macaulay Duration", format!("{:.4}", measures.macaulay_duration)),
        KeyValue::new("Modified Duration", format!("{:.4}", measures.modified_duration)),
        KeyValue::new("Convexity", format!("{:.4}", measures.convexity)),
        KeyValue::new("DV01", format!("{:.6}", measures.dv01)),
    ];

    let rows: Vec<ShockRow> = shocks
        .iter()
        .map(|s| ShockRow {
            shift_bp: format!("{:+.0}", s.shift / BASIS_POINT),
            price: numbers.price(s.shocked_price),
            change: numbers.price(s.price_change),
            percent: numbers.percent_value(s.percent_change),
            duration_estimate: numbers.price(s.duration_estimate),
            convexity_estimate: numbers.price(s.convexity_estimate),
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            print_header("Risk Measures");
            print_table(&metrics)?;
            print_header("Rate Shocks");
            print_table(&rows)
        }
        OutputFormat::Minimal => {
            println!(
                "{} {:.4} {:.4} {:.6}",
                bond.id, measures.modified_duration, measures.convexity, measures.dv01
            );
            Ok(())
        }
        _ => print_rows(&metrics, ctx.format, |kv| format!("{} {}", kv.key, kv.value)),
    }
}
