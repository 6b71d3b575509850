//! Error types for curve construction.

use bondcurve_core::{CoreError, ErrorCategory};
use bondcurve_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Invalid bond or portfolio.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Failure inside a numerical routine.
    #[error(transparent)]
    Math(#[from] MathError),

    /// A bond cashflow has no column on the time axis.
    #[error("Cashflow of bond '{bond_id}' at t={time} is not on the time axis")]
    UnmappedCashflow {
        /// Bond owning the cashflow.
        bond_id: String,
        /// Payment time in years.
        time: f64,
    },

    /// The prices do not pin down every discount factor.
    #[error(
        "Singular system: prices determine only {rank} of {unknowns} discount factors (undetermined at t = {times:?})"
    )]
    Underdetermined {
        /// Numerical rank of the cashflow matrix.
        rank: usize,
        /// Number of payment times.
        unknowns: usize,
        /// Times whose factor is not fixed by the prices, in years.
        times: Vec<f64>,
    },

    /// The matrix cannot be solved by back-substitution.
    #[error("Cashflow matrix is not triangular: {reason}")]
    NotTriangular {
        /// What broke triangularity.
        reason: String,
    },

    /// Lengths of paired sequences disagree.
    #[error("Length mismatch for {what}: expected {expected}, got {got}")]
    LengthMismatch {
        /// What was being paired.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// A discount factor that has no rate (zero, negative or non-finite).
    #[error("Invalid discount factor {value} at t={time}")]
    InvalidDiscountFactor {
        /// Time in years.
        time: f64,
        /// The rejected factor.
        value: f64,
    },

    /// A rate was requested at time zero.
    #[error("Rate undefined at t=0")]
    ZeroTime,

    /// Not enough points for the requested operation.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Times are not strictly increasing.
    #[error("Non-monotonic times at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTimes {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous time.
        prev: f64,
        /// Current time.
        current: f64,
    },
}

impl CurveError {
    /// Creates a not-triangular error.
    #[must_use]
    pub fn not_triangular(reason: impl Into<String>) -> Self {
        Self::NotTriangular {
            reason: reason.into(),
        }
    }

    /// Creates an underdetermined-system error.
    #[must_use]
    pub fn singular_system(rank: usize, unknowns: usize, times: Vec<f64>) -> Self {
        Self::Underdetermined {
            rank,
            unknowns,
            times,
        }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates a non-monotonic times error.
    #[must_use]
    pub fn non_monotonic_times(index: usize, prev: f64, current: f64) -> Self {
        Self::NonMonotonicTimes {
            index,
            prev,
            current,
        }
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(what: &'static str, expected: usize, got: usize) -> Self {
        Self::LengthMismatch {
            what,
            expected,
            got,
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(e) => e.category(),
            Self::Math(e) => e.category(),
            Self::Underdetermined { .. } => ErrorCategory::SingularSystem,
            Self::UnmappedCashflow { .. }
            | Self::NotTriangular { .. }
            | Self::LengthMismatch { .. } => ErrorCategory::Input,
            Self::InvalidDiscountFactor { .. }
            | Self::ZeroTime
            | Self::InsufficientPoints { .. }
            | Self::NonMonotonicTimes { .. } => ErrorCategory::Domain,
        }
    }
}
