//! # Bondcurve Bonds
//!
//! Single-bond analytics for the bondcurve engine.
//!
//! - [`pricing`]: yield to maturity, price from yield, premium/discount and
//!   current yield
//! - [`risk`]: duration, convexity, DV01 and parallel rate shocks
//!
//! ## Example
//!
//! ```rust
//! use bondcurve_bonds::prelude::*;
//! use bondcurve_core::types::{Bond, Frequency};
//!
//! let bond = Bond::new("5Y", 5.0, 0.05, Frequency::SemiAnnual, 97.0, 100.0);
//! let ytm = calculate_ytm(&bond).unwrap();
//! let risk = RiskMeasures::compute(&bond, ytm.yield_value).unwrap();
//!
//! assert!((risk.price - 97.0).abs() < 1e-6);
//! assert!(risk.modified_duration < risk.macaulay_duration);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::float_cmp)]
#![allow(clippy::unused_self)]

pub mod error;
pub mod pricing;
pub mod risk;

pub use error::{BondError, BondResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{BondError, BondResult};
    pub use crate::pricing::{
        calculate_ytm, current_yield, premium_discount, price_derivative, price_from_yield,
        PremiumDiscount, PriceStatus, YieldResult, YieldSolver, YieldSolverConfig,
    };
    pub use crate::risk::{
        price_change_from_duration, price_change_with_convexity, rate_shock, rate_shock_ladder,
        RateShock, RiskMeasures,
    };
}
