//! Matrix command implementation.

use anyhow::Result;
use clap::Args;

use bondcurve_curves::CashflowMatrix;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::input::PortfolioArgs;
use crate::output::{print_csv_records, print_dynamic_table, print_header, print_json};

/// Arguments for the matrix command.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,
}

/// Execute the matrix command.
pub fn execute(args: MatrixArgs, ctx: &Context) -> Result<()> {
    let bonds = args.portfolio.load()?;
    let matrix = CashflowMatrix::build(&bonds)?;
    let numbers = ctx.numbers();

    let mut header = vec!["Bond".to_string()];
    header.extend(matrix.times().iter().map(|t| format!("t={t}")));
    header.push("Price".to_string());

    let rows: Vec<Vec<String>> = matrix
        .bonds()
        .iter()
        .enumerate()
        .map(|(i, bond)| {
            let mut row = vec![bond.id.clone()];
            row.extend(matrix.row(i).iter().map(|cf| {
                if *cf == 0.0 {
                    "-".to_string()
                } else {
                    numbers.price(*cf)
                }
            }));
            row.push(numbers.price(bond.price));
            row
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            print_header("Cashflow Matrix");
            println!(
                "{} bonds x {} payment times ({})",
                matrix.num_bonds(),
                matrix.num_times(),
                if matrix.is_triangular(ctx.config.solver.triangular_tolerance) {
                    "triangular"
                } else {
                    "not triangular"
                }
            );
            print_dynamic_table(header, rows);
        }
        OutputFormat::Json => print_json(&matrix)?,
        OutputFormat::Csv => print_csv_records(&header, &rows)?,
        OutputFormat::Minimal => {
            for i in 0..matrix.num_bonds() {
                let values: Vec<String> = matrix.row(i).iter().map(ToString::to_string).collect();
                println!("{}", values.join(" "));
            }
        }
    }
    Ok(())
}
