//! Discount factor bootstrapping.
//!
//! [`DiscountFactorSolver`] picks the method from the shape of the cashflow
//! matrix:
//!
//! - **Triangular**: each bond, in input order, introduces exactly one new
//!   payment time. Factors are resolved exactly by back-substitution.
//! - **Least squares**: anything else. Factors minimise `‖C·d − p‖²` by
//!   normal equations, QR or SVD (the default).
//!
//! A portfolio whose prices do not pin down every factor is a
//! [`CurveError::Underdetermined`] error naming the free times. The
//! minimum-norm fit is only returned when
//! [`DiscountSolverConfig::allow_minimum_norm`] is set.
//!
//! # Example
//!
//! ```rust
//! use bondcurve_core::samples::SampleSet;
//! use bondcurve_curves::bootstrap::{DiscountFactorSolver, SolveMethod};
//! use bondcurve_curves::CashflowMatrix;
//!
//! let matrix = CashflowMatrix::build(&SampleSet::Triangular.bonds()).unwrap();
//! let solution = DiscountFactorSolver::default().solve(&matrix).unwrap();
//!
//! assert_eq!(solution.method, SolveMethod::Triangular);
//! assert_eq!(solution.discount_factors.len(), 6);
//! ```

mod least_squares;
mod trace;
mod triangular;

pub use least_squares::{solve_least_squares, LeastSquaresResult};
pub use trace::{BootstrapStep, BootstrapTracer};
pub use triangular::{back_substitute, StepContext};

use bondcurve_math::linear_algebra::{undetermined_unknowns, LeastSquaresMethod};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cashflow_matrix::CashflowMatrix;
use crate::discount::DiscountFactors;
use crate::error::{CurveError, CurveResult};

/// Default tolerance for zero tests in the triangularity check.
pub const DEFAULT_TRIANGULAR_TOLERANCE: f64 = 1e-10;

/// Configuration for [`DiscountFactorSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountSolverConfig {
    /// Entries at or below this magnitude count as zero.
    pub triangular_tolerance: f64,
    /// Algorithm for non-triangular matrices.
    pub least_squares_method: LeastSquaresMethod,
    /// Accept the minimum-norm fit of a rank-deficient system instead of
    /// failing. Factors at undetermined times are then arbitrary.
    pub allow_minimum_norm: bool,
}

impl Default for DiscountSolverConfig {
    fn default() -> Self {
        Self {
            triangular_tolerance: DEFAULT_TRIANGULAR_TOLERANCE,
            least_squares_method: LeastSquaresMethod::default(),
            allow_minimum_norm: false,
        }
    }
}

/// How a set of discount factors was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolveMethod {
    /// Exact back-substitution.
    Triangular,
    /// Least-squares regression.
    LeastSquares {
        /// The algorithm used.
        method: LeastSquaresMethod,
    },
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveMethod::Triangular => write!(f, "Triangular bootstrap"),
            SolveMethod::LeastSquares { method } => write!(f, "Least squares ({method})"),
        }
    }
}

/// Discount factors with the method that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountSolution {
    /// One factor per pooled payment time.
    pub discount_factors: DiscountFactors,
    /// Path taken.
    pub method: SolveMethod,
    /// Fitted minus market price, per bond.
    pub residuals: Vec<f64>,
    /// Regression diagnostics, present on the least-squares path.
    pub least_squares: Option<LeastSquaresResult>,
}

impl DiscountSolution {
    /// Returns true if the factors came from exact back-substitution.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.method == SolveMethod::Triangular
    }
}

/// Solves a cashflow matrix for discount factors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountFactorSolver {
    config: DiscountSolverConfig,
}

impl DiscountFactorSolver {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: DiscountSolverConfig) -> Self {
        Self { config }
    }

    /// Sets the least-squares algorithm.
    #[must_use]
    pub fn with_method(mut self, method: LeastSquaresMethod) -> Self {
        self.config.least_squares_method = method;
        self
    }

    /// Accepts minimum-norm fits of rank-deficient systems.
    #[must_use]
    pub fn with_minimum_norm(mut self, allow: bool) -> Self {
        self.config.allow_minimum_norm = allow;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DiscountSolverConfig {
        &self.config
    }

    /// Solves for one discount factor per pooled time.
    pub fn solve(&self, matrix: &CashflowMatrix) -> CurveResult<DiscountSolution> {
        let tolerance = self.config.triangular_tolerance;

        let (factors, method, least_squares) = if matrix.is_triangular(tolerance) {
            debug!("cashflow matrix is triangular, bootstrapping exactly");
            let factors = back_substitute(matrix, tolerance, |_| {})?;
            (factors, SolveMethod::Triangular, None)
        } else {
            let method = self.config.least_squares_method;
            debug!(
                "cashflow matrix is {}x{} and not triangular, using least squares ({method})",
                matrix.num_bonds(),
                matrix.num_times()
            );
            let result = solve_least_squares(matrix, method)?;
            debug!(
                "least squares rank {} condition {:.3e} max residual {:.3e}",
                result.rank,
                result.condition_number,
                result.max_abs_residual()
            );
            if result.is_rank_deficient() {
                let times: Vec<f64> = undetermined_unknowns(matrix.matrix())
                    .into_iter()
                    .map(|j| matrix.times()[j].as_years())
                    .collect();
                if !self.config.allow_minimum_norm {
                    return Err(CurveError::singular_system(
                        result.rank,
                        matrix.num_times(),
                        times,
                    ));
                }
                warn!(
                    "rank {} < {} unknowns, minimum-norm factors at t = {times:?} are not determined by prices",
                    result.rank,
                    matrix.num_times()
                );
            }
            (
                result.discount_factors.clone(),
                SolveMethod::LeastSquares { method },
                Some(result),
            )
        };

        for (time, df) in matrix.times().iter().zip(&factors) {
            if *df > 1.0 || *df <= 0.0 {
                warn!("discount factor {df:.6} at t={time} is outside (0, 1]");
            }
        }

        let residuals = matrix.residuals(&factors)?;
        Ok(DiscountSolution {
            discount_factors: DiscountFactors::new(matrix.times().to_vec(), factors)?,
            method,
            residuals,
            least_squares,
        })
    }
}
