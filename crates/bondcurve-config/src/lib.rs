//! # Bondcurve Configuration
//!
//! One [`EngineConfig`] document gathers the settings of every component:
//! discount factor solver, yield solver, arbitrage detection, batch
//! execution, logging and report formatting. It is read from TOML or JSON
//! (chosen by file extension) and checked through the [`Validate`] trait,
//! which reports every problem at once rather than stopping at the first.
//!
//! ```toml
//! compounding = "annual"
//! repricing_tolerance = 1e-8
//!
//! [solver]
//! least_squares_method = "svd"
//! allow_minimum_norm = false
//!
//! [arbitrage]
//! curve_source = "zero_coupons"
//!
//! [arbitrage.thresholds]
//! buy_below = -0.5
//! sell_above = 0.5
//!
//! [logging]
//! filter = "info"
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod engine;
pub mod error;

pub use engine::{EngineConfig, LoggingConfig, OutputConfig};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
