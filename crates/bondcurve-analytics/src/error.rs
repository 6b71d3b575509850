//! Error types for the analytics layer.

use bondcurve_bonds::BondError;
use bondcurve_core::{CoreError, ErrorCategory};
use bondcurve_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors raised by arbitrage detection and curve analysis.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Invalid bond or portfolio.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Curve construction failed.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Single-bond analytics failed.
    #[error(transparent)]
    Bond(#[from] BondError),

    /// The curve source selected no bonds.
    #[error("No bonds selected for the curve by source '{source_name}'")]
    EmptyCurveSet {
        /// Name of the curve source policy.
        source_name: String,
    },

    /// A benchmark identifier is not in the portfolio.
    #[error("Benchmark bond '{0}' is not in the portfolio")]
    UnknownBenchmark(String),

    /// Classification thresholds are inconsistent.
    #[error("Invalid mispricing thresholds: buy below {buy_below}%, sell above {sell_above}%")]
    InvalidThresholds {
        /// Buy threshold in percent.
        buy_below: f64,
        /// Sell threshold in percent.
        sell_above: f64,
    },
}

impl AnalyticsError {
    /// Returns the category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(e) => e.category(),
            Self::Curve(e) => e.category(),
            Self::Bond(e) => e.category(),
            Self::EmptyCurveSet { .. } | Self::UnknownBenchmark(_) | Self::InvalidThresholds { .. } => {
                ErrorCategory::Input
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_delegate() {
        let err: AnalyticsError = CurveError::not_triangular("gap").into();
        assert_eq!(err.category(), ErrorCategory::Input);

        let err: AnalyticsError = BondError::ZeroDerivative {
            bond_id: "B".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Convergence);

        let err = AnalyticsError::UnknownBenchmark("X".to_string());
        assert!(err.to_string().contains("'X'"));
        assert_eq!(err.category(), ErrorCategory::Input);
    }
}
