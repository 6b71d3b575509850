//! Repricing validation for bootstrapped discount factors.
//!
//! Every bond used to build a set of discount factors is priced back off
//! those factors and compared with its market price. Exact bootstraps pass
//! at machine precision; least-squares fits fail wherever the prices are
//! inconsistent, which is the point of the report.

use serde::Serialize;
use std::fmt;

use crate::cashflow_matrix::CashflowMatrix;
use crate::discount::DiscountFactors;
use crate::error::{CurveError, CurveResult};

/// Repricing tolerances, absolute in price units.
pub mod tolerances {
    /// Default tolerance.
    pub const DEFAULT: f64 = 1e-8;

    /// Relaxed tolerance for regression fits.
    pub const RELAXED: f64 = 1e-3;
}

/// Result of repricing a single bond.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepricingCheck {
    /// Bond identifier.
    pub bond_id: String,
    /// Observed market price.
    pub market_price: f64,
    /// Price implied by the discount factors.
    pub model_price: f64,
    /// Absolute error |model − market|.
    pub error: f64,
    /// Tolerance applied.
    pub tolerance: f64,
    /// Whether the bond repriced within tolerance.
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a new repricing check result.
    #[must_use]
    pub fn new(bond_id: String, market_price: f64, model_price: f64, tolerance: f64) -> Self {
        let error = (model_price - market_price).abs();
        Self {
            bond_id,
            market_price,
            model_price,
            error,
            tolerance,
            passed: error <= tolerance,
        }
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} {} | model {:.6} vs market {:.6} | error {:.2e} (tol {:.2e})",
            status, self.bond_id, self.model_price, self.market_price, self.error, self.tolerance
        )
    }
}

/// Repricing checks for every bond of a matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    max_error: f64,
    rms_error: f64,
}

impl RepricingReport {
    /// Creates a new repricing report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        let max_error = checks.iter().map(|c| c.error).fold(0.0_f64, f64::max);
        let rms_error = if checks.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = checks.iter().map(|c| c.error * c.error).sum();
            (sum_sq / checks.len() as f64).sqrt()
        };
        Self {
            checks,
            max_error,
            rms_error,
        }
    }

    /// Reprices every bond of `matrix` off `discount_factors`.
    pub fn build(
        matrix: &CashflowMatrix,
        discount_factors: &DiscountFactors,
        tolerance: f64,
    ) -> CurveResult<Self> {
        if discount_factors.times() != matrix.times() {
            return Err(CurveError::length_mismatch(
                "discount factor axis",
                matrix.num_times(),
                discount_factors.len(),
            ));
        }
        let model = matrix.reprice(discount_factors.factors())?;
        let checks = matrix
            .bonds()
            .iter()
            .zip(model)
            .map(|(bond, model_price)| {
                RepricingCheck::new(bond.id.clone(), bond.price, model_price, tolerance)
            })
            .collect();
        Ok(Self::new(checks))
    }

    /// Returns whether every bond repriced within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Returns the individual repricing checks.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Returns the maximum absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Returns the RMS error.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        self.rms_error
    }

    /// Returns the number of bonds that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Returns failed bond IDs for error messages.
    #[must_use]
    pub fn failed_bonds(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.bond_id.as_str())
            .collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repricing Report")?;
        writeln!(f, "================")?;
        writeln!(f, "Status: {}", if self.is_valid() { "PASSED" } else { "FAILED" })?;
        writeln!(f, "Bonds: {}/{} passed", self.passed_count(), self.checks.len())?;
        writeln!(f, "Max Error: {:.2e}", self.max_error)?;
        writeln!(f, "RMS Error: {:.2e}", self.rms_error)?;

        if !self.checks.is_empty() {
            writeln!(f)?;
            writeln!(f, "Details:")?;
            for check in &self.checks {
                writeln!(f, "  {check}")?;
            }
        }

        Ok(())
    }
}
