//! # bondcurve
//!
//! Yield curve bootstrapping from a portfolio of fixed-coupon bonds.
//!
//! This crate re-exports the workspace libraries under short names:
//!
//! - [`core`]: bonds, payment schedules, compounding, sample portfolios
//! - [`math`]: Newton-Raphson and the linear algebra behind least squares
//! - [`curves`]: cashflow matrix, discount factor solver, spot/forward rates
//! - [`bonds`]: price/yield, yield to maturity, duration and convexity
//! - [`analytics`]: the full curve pipeline, arbitrage detection, batches
//! - [`config`]: engine configuration from TOML or JSON
//!
//! # Example
//!
//! ```rust
//! use bondcurve::prelude::*;
//!
//! let bonds = SampleSet::Triangular.bonds();
//! let analysis = CurveAnalysis::run(&bonds, &AnalysisSettings::default()).unwrap();
//!
//! assert!(analysis.solution.is_exact());
//! assert!(analysis.repricing.is_valid());
//! assert_eq!(analysis.spot_rates.len(), 6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use bondcurve_analytics as analytics;
pub use bondcurve_bonds as bonds;
pub use bondcurve_config as config;
pub use bondcurve_core as core;
pub use bondcurve_curves as curves;
pub use bondcurve_math as math;

/// Everything most callers need, from every layer.
pub mod prelude {
    pub use bondcurve_analytics::prelude::*;
    pub use bondcurve_bonds::prelude::*;
    pub use bondcurve_config::{EngineConfig, Validate};
    pub use bondcurve_core::prelude::*;
    pub use bondcurve_curves::prelude::*;
    pub use bondcurve_math::prelude::*;
}
