//! # Bondcurve Curves
//!
//! Yield curve construction from a bond portfolio.
//!
//! - [`CashflowMatrix`]: bonds × pooled payment times
//! - [`bootstrap`]: discount factors by exact back-substitution or least
//!   squares, plus a step-by-step tracer
//! - [`rates`]: discount factors to spot rates and spot rates to forwards
//! - [`SpotCurve`]: discrete spot curve for pricing bonds
//! - [`repricing`]: validation of factors against market prices
//!
//! ## Example
//!
//! ```rust
//! use bondcurve_core::prelude::*;
//! use bondcurve_curves::prelude::*;
//!
//! let bonds = SampleSet::NoArbitrage.bonds();
//! let matrix = CashflowMatrix::build(&bonds).unwrap();
//! let solution = DiscountFactorSolver::default().solve(&matrix).unwrap();
//! let spots = solution.discount_factors.to_spot_rates(Compounding::Annual).unwrap();
//!
//! for spot in &spots {
//!     assert!((spot.rate - 0.05).abs() < 1e-4);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]

pub mod bootstrap;
pub mod cashflow_matrix;
pub mod discount;
pub mod error;
pub mod rates;
pub mod repricing;
pub mod spot_curve;

pub use cashflow_matrix::{bond_row, CashflowMatrix};
pub use discount::DiscountFactors;
pub use error::{CurveError, CurveResult};
pub use spot_curve::SpotCurve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{
        BootstrapStep, BootstrapTracer, DiscountFactorSolver, DiscountSolution,
        DiscountSolverConfig, LeastSquaresResult, SolveMethod,
    };
    pub use crate::cashflow_matrix::CashflowMatrix;
    pub use crate::discount::DiscountFactors;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::rates::{
        discount_factors_to_spot_rates, spot_rates_to_discount_factors,
        spot_rates_to_forward_rates, ForwardRate, SpotRate,
    };
    pub use crate::repricing::{RepricingCheck, RepricingReport};
    pub use crate::spot_curve::SpotCurve;
    pub use bondcurve_math::linear_algebra::LeastSquaresMethod;
}
