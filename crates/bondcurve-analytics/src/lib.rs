//! # Bondcurve Analytics
//!
//! Portfolio-level analytics built on the curve and bond crates.
//!
//! - [`arbitrage`]: strip a spot curve from a chosen subset of bonds, price
//!   every bond off it and classify the mispricing
//! - [`analysis`]: the full pipeline from bonds to discount factors, spot and
//!   forward rates, yields, bootstrap trace and repricing report
//! - [`batch`]: the pipeline over many portfolios, optionally with rayon
//!
//! ## Feature Flags
//!
//! - `parallel`: run large batches on the rayon thread pool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod analysis;
pub mod arbitrage;
pub mod batch;
pub mod error;

pub use error::{AnalyticsError, AnalyticsResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::{AnalysisSettings, CurveAnalysis, YieldOutcome};
    pub use crate::arbitrage::{
        bootstrap_strip, theoretical_price, ArbitrageAnalysis, ArbitrageConfig,
        ArbitrageDetector, CurveSource, Mispricing, MispricingThresholds, Signal,
    };
    pub use crate::batch::{analyze_portfolios, maybe_parallel_map, BatchConfig};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
}
