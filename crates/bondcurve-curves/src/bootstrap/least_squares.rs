//! Least-squares discount factors for non-triangular portfolios.

use bondcurve_math::linear_algebra::{
    condition_number, entry_ratio, least_squares, LeastSquaresMethod,
};
use serde::Serialize;

use crate::cashflow_matrix::CashflowMatrix;
use crate::error::CurveResult;

/// Discount factors fitted by least squares, with fit diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeastSquaresResult {
    /// One factor per matrix column.
    pub discount_factors: Vec<f64>,
    /// Fitted minus market price, per bond (`C·d − p`).
    pub residuals: Vec<f64>,
    /// Largest over smallest nonzero singular value of `CᵗC`.
    pub condition_number: f64,
    /// Largest over smallest nonzero absolute entry of `CᵗC`.
    pub entry_ratio: f64,
    /// Numerical rank of `C`.
    pub rank: usize,
    /// Algorithm used.
    pub method: LeastSquaresMethod,
}

impl LeastSquaresResult {
    /// Returns true if the prices do not pin down every factor.
    #[must_use]
    pub fn is_rank_deficient(&self) -> bool {
        self.rank < self.discount_factors.len()
    }

    /// Largest absolute residual.
    #[must_use]
    pub fn max_abs_residual(&self) -> f64 {
        self.residuals.iter().fold(0.0_f64, |m, r| m.max(r.abs()))
    }

    /// Root mean square residual.
    #[must_use]
    pub fn rms_residual(&self) -> f64 {
        if self.residuals.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.residuals.iter().map(|r| r * r).sum();
        (sum_sq / self.residuals.len() as f64).sqrt()
    }
}

/// Fits discount factors minimising `‖C·d − p‖²`.
pub fn solve_least_squares(
    matrix: &CashflowMatrix,
    method: LeastSquaresMethod,
) -> CurveResult<LeastSquaresResult> {
    let c = matrix.matrix();
    let fit = least_squares(c, matrix.prices(), method)?;

    let discount_factors: Vec<f64> = fit.solution.iter().copied().collect();
    let residuals = matrix.residuals(&discount_factors)?;
    let ctc = c.transpose() * c;

    Ok(LeastSquaresResult {
        discount_factors,
        residuals,
        condition_number: condition_number(&ctc),
        entry_ratio: entry_ratio(&ctc),
        rank: fit.rank,
        method: fit.method,
    })
}
