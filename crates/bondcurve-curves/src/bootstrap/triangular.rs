//! Exact sequential bootstrap by back-substitution.
//!
//! This is the only implementation of the triangular elimination. The solver
//! calls it with a no-op observer and the tracer with one that records each
//! step, so the displayed derivation is always the computed one.

use log::debug;

use crate::cashflow_matrix::CashflowMatrix;
use crate::error::{CurveError, CurveResult};

/// State visible to the observer after each discount factor is resolved.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Row (bond index) just processed.
    pub row: usize,
    /// Column (time index) resolved by this row.
    pub column: usize,
    /// Cashflows of the row.
    pub row_values: &'a [f64],
    /// Discount factors resolved so far; entries at and after `column` other
    /// than `column` itself are still zero.
    pub known: &'a [f64],
    /// Market price of the bond.
    pub price: f64,
    /// The factor resolved for `column`.
    pub factor: f64,
}

/// Solves a triangular cashflow matrix for its discount factors.
///
/// Bonds are processed in input order. For each one the last nonzero column
/// is located, the value of its earlier cashflows at the already known
/// factors is subtracted from the price, and the remainder is divided by the
/// final cashflow.
pub fn back_substitute<F>(
    matrix: &CashflowMatrix,
    tolerance: f64,
    mut on_step: F,
) -> CurveResult<Vec<f64>>
where
    F: FnMut(&StepContext<'_>),
{
    if !matrix.is_triangular(tolerance) {
        return Err(CurveError::not_triangular(format!(
            "{} bonds over {} payment times do not each introduce exactly one new time",
            matrix.num_bonds(),
            matrix.num_times()
        )));
    }
    if matrix.num_bonds() != matrix.num_times() {
        return Err(CurveError::not_triangular(format!(
            "{} bonds cannot resolve {} payment times",
            matrix.num_bonds(),
            matrix.num_times()
        )));
    }

    let mut factors = vec![0.0; matrix.num_times()];

    for (i, &price) in matrix.prices().iter().enumerate() {
        let row = matrix.row(i);
        let Some(column) = row.iter().rposition(|x| x.abs() > tolerance) else {
            return Err(CurveError::not_triangular(format!(
                "bond '{}' has no cashflows",
                matrix.bonds()[i].id
            )));
        };

        let known_value: f64 = row[..column]
            .iter()
            .zip(&factors)
            .map(|(cf, df)| cf * df)
            .sum();
        let factor = (price - known_value) / row[column];
        factors[column] = factor;

        on_step(&StepContext {
            row: i,
            column,
            row_values: &row,
            known: &factors,
            price,
            factor,
        });
    }

    debug!("triangular bootstrap resolved {} discount factors", factors.len());
    Ok(factors)
}
