//! Root-finding algorithms.
//!
//! - [`newton_raphson_bounded`]: Newton-Raphson confined to an interval,
//!   converging on the residual only
//!
//! # Example: YTM Calculation
//!
//! ```rust
//! use bondcurve_math::solvers::{newton_raphson_bounded, SolverConfig};
//!
//! // Bond: 5% annual coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//!
//! let d_price_fn = |y: f64| {
//!     let mut dpv = 0.0;
//!     for t in 1..=5 {
//!         dpv -= (t as f64) * 5.0 / (1.0 + y).powi(t + 1);
//!     }
//!     dpv -= 5.0 * 100.0 / (1.0 + y).powi(6);
//!     dpv
//! };
//!
//! let config = SolverConfig::new(1e-8, 100);
//! let result = newton_raphson_bounded(price_fn, d_price_fn, 0.05, (-0.5, 2.0), &config).unwrap();
//! assert!(result.root > 0.05);  // YTM > coupon rate for discount bond
//! ```

mod newton;

pub use newton::newton_raphson_bounded;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Derivatives smaller than this in magnitude are treated as zero.
pub const MIN_DERIVATIVE: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    /// Price of a bullet bond at yield `y`, compounded `freq` times a year.
    fn bond_price(y: f64, coupon: f64, face: f64, periods: i32, freq: f64) -> f64 {
        let c = coupon / freq;
        let mut pv = 0.0;
        for i in 1..=periods {
            pv += c / (1.0 + y / freq).powi(i);
        }
        pv + face / (1.0 + y / freq).powi(periods)
    }

    fn bond_price_derivative(y: f64, coupon: f64, face: f64, periods: i32, freq: f64) -> f64 {
        let c = coupon / freq;
        let mut dpv = 0.0;
        for i in 1..=periods {
            let cf = if i == periods { c + face } else { c };
            dpv -= f64::from(i) / freq * cf / (1.0 + y / freq).powi(i + 1);
        }
        dpv
    }

    #[test]
    fn test_ytm_par_bond() {
        let f = |y: f64| bond_price(y, 5.0, 100.0, 20, 2.0) - 100.0;
        let df = |y: f64| bond_price_derivative(y, 5.0, 100.0, 20, 2.0);

        let result =
            newton_raphson_bounded(f, df, 0.04, (-0.5, 2.0), &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn test_ytm_discount_bond_above_coupon() {
        let f = |y: f64| bond_price(y, 6.0, 100.0, 14, 2.0) - 98.0;
        let df = |y: f64| bond_price_derivative(y, 6.0, 100.0, 14, 2.0);
        let config = SolverConfig::new(1e-10, 100);

        let result = newton_raphson_bounded(f, df, 0.06, (-0.5, 2.0), &config).unwrap();
        assert!(result.root > 0.06);
        assert_relative_eq!(bond_price(result.root, 6.0, 100.0, 14, 2.0), 98.0, epsilon = 1e-9);
    }
}
