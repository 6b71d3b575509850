//! Error types for the bondcurve core.
//!
//! Every crate in the workspace has its own error enum. They all map onto a
//! small closed set of [`ErrorCategory`] values so a caller can decide how to
//! present a failure without matching on every variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Broad classification of engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed bond, empty portfolio, or a broken matrix-construction invariant.
    Input,
    /// A linear system could not be solved.
    SingularSystem,
    /// An iterative solver did not converge or left its domain.
    Convergence,
    /// A rate conversion was attempted outside its mathematical domain.
    Domain,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Input => "input",
            ErrorCategory::SingularSystem => "singular system",
            ErrorCategory::Convergence => "convergence",
            ErrorCategory::Domain => "domain",
        };
        write!(f, "{name}")
    }
}

/// Errors raised while validating bonds and portfolios.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A bond field is out of range.
    #[error("Invalid bond '{bond_id}': {reason}")]
    InvalidBond {
        /// Identifier of the offending bond.
        bond_id: String,
        /// Description of what's invalid.
        reason: String,
    },

    /// `maturity × frequency` is not a whole number of payments.
    #[error(
        "Bond '{bond_id}' has a non-integral schedule: maturity {maturity} x frequency {frequency} = {periods}"
    )]
    NonIntegralSchedule {
        /// Identifier of the offending bond.
        bond_id: String,
        /// Maturity in years.
        maturity: f64,
        /// Payments per year.
        frequency: u32,
        /// The unrounded number of periods.
        periods: f64,
    },

    /// Payment frequency outside the supported set.
    #[error("Unsupported payment frequency: {0} (expected 1, 2 or 4)")]
    UnsupportedFrequency(u32),

    /// Unknown compounding convention name.
    #[error("Unknown compounding convention: '{0}' (expected continuous, annual or semiannual)")]
    UnknownCompounding(String),

    /// The portfolio has no bonds.
    #[error("Portfolio is empty")]
    EmptyPortfolio,

    /// Two bonds share an identifier.
    #[error("Duplicate bond identifier: '{0}'")]
    DuplicateBondId(String),

    /// A time that cannot be represented as a time key.
    #[error("Invalid time: {value} years")]
    InvalidTime {
        /// The rejected value in years.
        value: f64,
    },
}

impl CoreError {
    /// Creates an invalid bond error.
    #[must_use]
    pub fn invalid_bond(bond_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBond {
            bond_id: bond_id.into(),
            reason: reason.into(),
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Input
    }
}
