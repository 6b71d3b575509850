//! # Bondcurve Core
//!
//! Core types for the bondcurve yield curve bootstrapping engine.
//!
//! - **Types**: [`Bond`](types::Bond), [`Frequency`](types::Frequency),
//!   [`Compounding`](types::Compounding), [`TimeKey`](types::TimeKey)
//! - **Portfolio**: validation and ordering of bond sets
//! - **Samples**: built-in demonstration portfolios
//! - **Errors**: [`CoreError`](error::CoreError) and the workspace-wide
//!   [`ErrorCategory`](error::ErrorCategory)
//!
//! ## Example
//!
//! ```rust
//! use bondcurve_core::prelude::*;
//!
//! let bond = Bond::new("2Y", 2.0, 0.045, Frequency::SemiAnnual, 103.5, 100.0);
//! let schedule = bond.schedule().unwrap();
//! assert_eq!(schedule.len(), 4);
//! assert_eq!(schedule[3].amount, 102.25);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod portfolio;
pub mod samples;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult, ErrorCategory};
    pub use crate::portfolio::{find_bond, sorted_by_maturity, validate_portfolio};
    pub use crate::samples::SampleSet;
    pub use crate::types::{Bond, BondCashflow, Compounding, Frequency, TimeKey};
}

pub use error::{CoreError, CoreResult, ErrorCategory};
