//! Yield-to-maturity solver.
//!
//! Newton-Raphson on `P(y) − market price`, started from the coupon rate and
//! confined to a yield interval. An iterate that leaves the interval is an
//! error; the solver never restarts from a default guess.
//!
//! # Example
//!
//! ```rust
//! use bondcurve_bonds::pricing::YieldSolver;
//! use bondcurve_core::types::{Bond, Frequency};
//!
//! let bond = Bond::new("2Y", 2.0, 0.045, Frequency::SemiAnnual, 103.5, 100.0);
//! let result = YieldSolver::default().solve(&bond).unwrap();
//! assert!(result.yield_value < 0.045);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use bondcurve_core::types::Bond;
use bondcurve_math::solvers::{newton_raphson_bounded, SolverConfig};
use bondcurve_math::MathError;

use super::{pv_at_yield, pv_derivative};
use crate::error::{BondError, BondResult};

/// Settings for the yield solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldSolverConfig {
    /// Converged when `|P(y) − price|` falls below this.
    pub tolerance: f64,
    /// Maximum Newton iterations.
    pub max_iterations: u32,
    /// Lowest admissible yield.
    pub lower_bound: f64,
    /// Highest admissible yield.
    pub upper_bound: f64,
}

impl Default for YieldSolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 100,
            lower_bound: -0.5,
            upper_bound: 2.0,
        }
    }
}

impl YieldSolverConfig {
    /// Checks the settings are usable.
    ///
    /// The lower bound must stay above `-1` so that `1 + y/f` is positive
    /// for every supported frequency.
    pub fn validate(&self) -> BondResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(BondError::invalid_config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(BondError::invalid_config("max_iterations must be at least 1"));
        }
        if !(self.lower_bound.is_finite() && self.upper_bound.is_finite())
            || self.lower_bound >= self.upper_bound
        {
            return Err(BondError::invalid_config(format!(
                "yield bounds [{}, {}] are not an interval",
                self.lower_bound, self.upper_bound
            )));
        }
        if self.lower_bound <= -1.0 {
            return Err(BondError::invalid_config(format!(
                "lower yield bound must be above -1, got {}",
                self.lower_bound
            )));
        }
        Ok(())
    }
}

/// Result of a yield calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldResult {
    /// Bond the yield belongs to.
    pub bond_id: String,
    /// The calculated yield (as a decimal, e.g., 0.05 for 5%).
    pub yield_value: f64,
    /// Number of iterations to converge.
    pub iterations: u32,
    /// Final pricing error.
    pub residual: f64,
}

/// Yield-to-maturity solver.
#[derive(Debug, Clone, Default)]
pub struct YieldSolver {
    config: YieldSolverConfig,
}

impl YieldSolver {
    /// Creates a solver with the given settings.
    #[must_use]
    pub fn new(config: YieldSolverConfig) -> Self {
        Self { config }
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Sets the admissible yield interval.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.config.lower_bound = lower;
        self.config.upper_bound = upper;
        self
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &YieldSolverConfig {
        &self.config
    }

    /// Solves for the yield that reprices `bond` to its market price.
    pub fn solve(&self, bond: &Bond) -> BondResult<YieldResult> {
        self.config.validate()?;
        bond.validate()?;

        let schedule = bond.schedule()?;
        let frequency = bond.frequency.as_f64();
        let target = bond.price;

        let objective = |y: f64| pv_at_yield(&schedule, y, frequency) - target;
        let derivative = |y: f64| pv_derivative(&schedule, y, frequency);

        let solver_config = SolverConfig::new(self.config.tolerance, self.config.max_iterations);
        let bounds = (self.config.lower_bound, self.config.upper_bound);

        match newton_raphson_bounded(objective, derivative, bond.coupon_rate, bounds, &solver_config)
        {
            Ok(result) => {
                debug!(
                    "yield for {} converged to {:.8} in {} iterations",
                    bond.id, result.root, result.iterations
                );
                Ok(YieldResult {
                    bond_id: bond.id.clone(),
                    yield_value: result.root,
                    iterations: result.iterations,
                    residual: result.residual,
                })
            }
            Err(err) => Err(self.map_solver_error(bond, err)),
        }
    }

    /// Solves every bond in order; one result per bond.
    pub fn solve_portfolio(&self, bonds: &[Bond]) -> Vec<BondResult<YieldResult>> {
        bonds.iter().map(|bond| self.solve(bond)).collect()
    }

    fn map_solver_error(&self, bond: &Bond, err: MathError) -> BondError {
        let bond_id = bond.id.clone();
        match err {
            MathError::OutOfBounds {
                value,
                lower,
                upper,
                iterations,
            } => BondError::YieldOutOfDomain {
                bond_id,
                value,
                lower,
                upper,
                iterations,
            },
            MathError::DivisionByZero { .. } => BondError::ZeroDerivative { bond_id },
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => BondError::YieldConvergenceFailed {
                bond_id,
                iterations,
                residual,
            },
            other => BondError::invalid_config(other.to_string()),
        }
    }
}

/// Yield to maturity with the default solver settings.
pub fn calculate_ytm(bond: &Bond) -> BondResult<YieldResult> {
    YieldSolver::default().solve(bond)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price_from_yield;
    use approx::assert_relative_eq;
    use bondcurve_core::types::Frequency;
    use bondcurve_core::ErrorCategory;

    #[test]
    fn test_ytm_at_par() {
        let bond = Bond::new("P", 5.0, 0.05, Frequency::SemiAnnual, 100.0, 100.0);
        let result = calculate_ytm(&bond).unwrap();
        assert_relative_eq!(result.yield_value, 0.05, epsilon = 1e-10);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.bond_id, "P");
    }

    #[test]
    fn test_ytm_discount_bond() {
        let bond = Bond::new("D", 5.0, 0.05, Frequency::Annual, 95.0, 100.0);
        let result = calculate_ytm(&bond).unwrap();
        assert!(result.yield_value > 0.05);
        assert!(result.residual.abs() < 1e-8);
    }

    #[test]
    fn test_ytm_premium_bond() {
        let bond = Bond::new("2Y", 2.0, 0.045, Frequency::SemiAnnual, 103.5, 100.0);
        let result = calculate_ytm(&bond).unwrap();
        assert!(result.yield_value < 0.045);
    }

    #[test]
    fn test_price_yield_roundtrip() {
        let template = Bond::new("Q", 3.0, 0.032, Frequency::Quarterly, 100.0, 100.0);
        let price = price_from_yield(&template, 0.041).unwrap();
        let bond = template.with_price(price);
        let result = calculate_ytm(&bond).unwrap();
        assert_relative_eq!(result.yield_value, 0.041, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_coupon_ytm() {
        let bond = Bond::zero_coupon("Z", 2.0, 907.03, 1000.0);
        let result = calculate_ytm(&bond).unwrap();
        assert_relative_eq!(
            result.yield_value,
            (1000.0_f64 / 907.03).sqrt() - 1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_out_of_domain_is_error() {
        // A price of 1 on a 10-year bond needs a yield far above 200%.
        let bond = Bond::new("junk", 10.0, 0.05, Frequency::Annual, 1.0, 100.0);
        let err = calculate_ytm(&bond).unwrap_err();
        assert!(matches!(err, BondError::YieldOutOfDomain { .. }));
        assert_eq!(err.category(), ErrorCategory::Convergence);
        assert_eq!(err.bond_id(), Some("junk"));
    }

    #[test]
    fn test_iteration_limit() {
        let bond = Bond::new("D", 10.0, 0.05, Frequency::Annual, 80.0, 100.0);
        let err = YieldSolver::default()
            .with_max_iterations(1)
            .solve(&bond)
            .unwrap_err();
        assert!(matches!(
            err,
            BondError::YieldConvergenceFailed { iterations: 1, .. }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bond = Bond::new("P", 5.0, 0.05, Frequency::Annual, 100.0, 100.0);
        let solver = YieldSolver::default().with_bounds(-1.5, 2.0);
        assert!(matches!(
            solver.solve(&bond),
            Err(BondError::InvalidConfig { .. })
        ));
        let solver = YieldSolver::default().with_tolerance(0.0);
        assert!(solver.solve(&bond).is_err());
    }

    #[test]
    fn test_invalid_bond_rejected() {
        let bond = Bond::new("bad", 5.0, 0.05, Frequency::Annual, -1.0, 100.0);
        let err = calculate_ytm(&bond).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_solve_portfolio_keeps_order() {
        let bonds = vec![
            Bond::new("A", 1.0, 0.03, Frequency::Annual, 100.0, 100.0),
            Bond::new("B", 10.0, 0.05, Frequency::Annual, 1.0, 100.0),
            Bond::new("C", 2.0, 0.04, Frequency::SemiAnnual, 100.0, 100.0),
        ];
        let results = YieldSolver::default().solve_portfolio(&bonds);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().bond_id, "A");
        assert_eq!(results[1].as_ref().unwrap_err().bond_id(), Some("B"));
        assert_relative_eq!(results[2].as_ref().unwrap().yield_value, 0.04, epsilon = 1e-10);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: YieldSolverConfig = serde_json::from_str(r#"{"max_iterations": 50}"#).unwrap();
        assert_eq!(config.max_iterations, 50);
        assert_relative_eq!(config.tolerance, 1e-8);
        assert_relative_eq!(config.upper_bound, 2.0);
    }
}
