//! Error types for bond operations.

use bondcurve_core::{CoreError, ErrorCategory};
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Invalid bond definition.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Yield calculation failed to converge.
    #[error(
        "Yield for bond '{bond_id}' failed to converge after {iterations} iterations (residual: {residual:.2e})"
    )]
    YieldConvergenceFailed {
        /// Bond identifier.
        bond_id: String,
        /// Number of iterations attempted.
        iterations: u32,
        /// Final pricing error.
        residual: f64,
    },

    /// The yield iteration left its admissible range.
    #[error(
        "Yield for bond '{bond_id}' left [{lower}, {upper}] at {value:.6} after {iterations} iterations"
    )]
    YieldOutOfDomain {
        /// Bond identifier.
        bond_id: String,
        /// The offending iterate.
        value: f64,
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
        /// Iterations completed.
        iterations: u32,
    },

    /// The price/yield derivative vanished.
    #[error("Yield for bond '{bond_id}': price derivative is zero")]
    ZeroDerivative {
        /// Bond identifier.
        bond_id: String,
    },

    /// A yield at or below `-frequency` has no discount factor.
    #[error("Yield {yield_value} is outside the domain for {frequency} payments per year")]
    InvalidYield {
        /// The rejected yield.
        yield_value: f64,
        /// Payments per year.
        frequency: u32,
    },

    /// Invalid solver setting.
    #[error("Invalid yield solver configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },
}

impl BondError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Identifier of the bond involved, when known.
    #[must_use]
    pub fn bond_id(&self) -> Option<&str> {
        match self {
            Self::Core(CoreError::InvalidBond { bond_id, .. })
            | Self::Core(CoreError::NonIntegralSchedule { bond_id, .. })
            | Self::YieldConvergenceFailed { bond_id, .. }
            | Self::YieldOutOfDomain { bond_id, .. }
            | Self::ZeroDerivative { bond_id } => Some(bond_id),
            _ => None,
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(e) => e.category(),
            Self::YieldConvergenceFailed { .. }
            | Self::YieldOutOfDomain { .. }
            | Self::ZeroDerivative { .. } => ErrorCategory::Convergence,
            Self::InvalidYield { .. } => ErrorCategory::Domain,
            Self::InvalidConfig { .. } => ErrorCategory::Input,
        }
    }
}
