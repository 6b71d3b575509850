//! Arbitrage detection.
//!
//! A spot curve is stripped from the bonds selected by a [`CurveSource`],
//! every bond is priced off that curve, and the market price is compared
//! with the theoretical one.
//!
//! # Example
//!
//! ```rust
//! use bondcurve_analytics::arbitrage::{ArbitrageDetector, Signal};
//! use bondcurve_core::samples::SampleSet;
//!
//! let analysis = ArbitrageDetector::default()
//!     .analyze(&SampleSet::MispricedBond.bonds())
//!     .unwrap();
//!
//! let b3 = analysis.mispricing("B3").unwrap();
//! assert_eq!(b3.signal, Signal::Sell);
//! ```

mod mispricing;
mod strip;

pub use mispricing::{Mispricing, MispricingThresholds, Signal};
pub use strip::{bootstrap_strip, CurveSource};

use log::debug;
use serde::{Deserialize, Serialize};

use bondcurve_core::portfolio::{sorted_by_maturity, validate_portfolio};
use bondcurve_core::types::{Bond, Compounding};
use bondcurve_curves::bootstrap::DEFAULT_TRIANGULAR_TOLERANCE;
use bondcurve_curves::SpotCurve;

use crate::error::AnalyticsResult;

/// Settings for [`ArbitrageDetector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbitrageConfig {
    /// Bonds that define the curve.
    pub curve_source: CurveSource,
    /// Rate convention of the stripped curve.
    pub compounding: Compounding,
    /// Signal thresholds in percent.
    pub thresholds: MispricingThresholds,
    /// Zero tolerance for the triangularity check.
    pub triangular_tolerance: f64,
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            curve_source: CurveSource::default(),
            compounding: Compounding::Annual,
            thresholds: MispricingThresholds::default(),
            triangular_tolerance: DEFAULT_TRIANGULAR_TOLERANCE,
        }
    }
}

/// Result of an arbitrage scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageAnalysis {
    /// Source policy used for the curve.
    pub curve_source: CurveSource,
    /// The stripped curve.
    pub curve: SpotCurve,
    /// Identifiers of the curve bonds, in maturity order.
    pub curve_bonds: Vec<String>,
    /// One entry per input bond, in input order.
    pub mispricings: Vec<Mispricing>,
}

impl ArbitrageAnalysis {
    /// Entries with a buy or sell signal.
    pub fn opportunities(&self) -> impl Iterator<Item = &Mispricing> {
        self.mispricings.iter().filter(|m| m.is_opportunity())
    }

    /// Entry for a bond.
    #[must_use]
    pub fn mispricing(&self, bond_id: &str) -> Option<&Mispricing> {
        self.mispricings.iter().find(|m| m.bond_id == bond_id)
    }
}

/// Prices a portfolio off a stripped curve and flags mispricings.
#[derive(Debug, Clone, Default)]
pub struct ArbitrageDetector {
    config: ArbitrageConfig,
}

impl ArbitrageDetector {
    /// Creates a detector.
    #[must_use]
    pub fn new(config: ArbitrageConfig) -> Self {
        Self { config }
    }

    /// Sets the curve source.
    #[must_use]
    pub fn with_curve_source(mut self, source: CurveSource) -> Self {
        self.config.curve_source = source;
        self
    }

    /// Sets the signal thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: MispricingThresholds) -> Self {
        self.config.thresholds = thresholds;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ArbitrageConfig {
        &self.config
    }

    /// Runs the scan over `bonds`.
    pub fn analyze(&self, bonds: &[Bond]) -> AnalyticsResult<ArbitrageAnalysis> {
        validate_portfolio(bonds)?;
        self.config.thresholds.validate()?;

        let curve_set = self.config.curve_source.select(bonds)?;
        let curve = bootstrap_strip(
            &curve_set,
            self.config.compounding,
            self.config.triangular_tolerance,
        )?;
        debug!(
            "arbitrage curve from {} bonds ({}), {} points",
            curve_set.len(),
            self.config.curve_source,
            curve.points().len()
        );

        let curve_ids: Vec<String> = sorted_by_maturity(&curve_set)
            .into_iter()
            .map(|b| b.id)
            .collect();

        let mispricings = bonds
            .iter()
            .map(|bond| -> AnalyticsResult<Mispricing> {
                let theoretical = curve.price_bond(bond)?;
                Ok(
                    Mispricing::new(&bond.id, bond.price, theoretical, &self.config.thresholds)
                        .with_in_curve(curve_ids.contains(&bond.id)),
                )
            })
            .collect::<AnalyticsResult<Vec<_>>>()?;

        Ok(ArbitrageAnalysis {
            curve_source: self.config.curve_source.clone(),
            curve,
            curve_bonds: curve_ids,
            mispricings,
        })
    }
}

/// Theoretical price of `bond` off `curve`.
pub fn theoretical_price(curve: &SpotCurve, bond: &Bond) -> AnalyticsResult<f64> {
    Ok(curve.price_bond(bond)?)
}
