//! Spot curve stripped from a subset of the portfolio.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use bondcurve_core::portfolio::{find_bond, sorted_by_maturity};
use bondcurve_core::types::{Bond, Compounding};
use bondcurve_curves::bootstrap::back_substitute;
use bondcurve_curves::rates::discount_factors_to_spot_rates;
use bondcurve_curves::{CashflowMatrix, DiscountFactors, SpotCurve};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Which bonds define the curve that every bond is priced against.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveSource {
    /// Zero-coupon bonds only; coupon bonds are priced off the strip.
    #[default]
    ZeroCoupons,
    /// Every bond. The curve then reprices the whole set exactly.
    AllBonds,
    /// An explicit list of bond identifiers.
    Benchmarks(Vec<String>),
}

impl CurveSource {
    /// Short name of the policy.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CurveSource::ZeroCoupons => "zero-coupons",
            CurveSource::AllBonds => "all-bonds",
            CurveSource::Benchmarks(_) => "benchmarks",
        }
    }

    /// Picks the curve bonds from `bonds`, keeping portfolio order.
    pub fn select(&self, bonds: &[Bond]) -> AnalyticsResult<Vec<Bond>> {
        let selected: Vec<Bond> = match self {
            CurveSource::ZeroCoupons => bonds.iter().filter(|b| b.is_zero_coupon()).cloned().collect(),
            CurveSource::AllBonds => bonds.to_vec(),
            CurveSource::Benchmarks(ids) => ids
                .iter()
                .map(|id| {
                    find_bond(bonds, id)
                        .cloned()
                        .ok_or_else(|| AnalyticsError::UnknownBenchmark(id.clone()))
                })
                .collect::<AnalyticsResult<_>>()?,
        };
        if selected.is_empty() {
            return Err(AnalyticsError::EmptyCurveSet {
                source_name: self.name().to_string(),
            });
        }
        Ok(selected)
    }
}

impl fmt::Display for CurveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveSource::Benchmarks(ids) => write!(f, "benchmarks:{}", ids.join(",")),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl FromStr for CurveSource {
    type Err = String;

    /// Accepts `zero-coupons`, `all-bonds` or `benchmarks:ID,ID,...`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(list) = s.strip_prefix("benchmarks:") {
            let ids: Vec<String> = list
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect();
            if ids.is_empty() {
                return Err("benchmarks: needs at least one bond id".to_string());
            }
            return Ok(CurveSource::Benchmarks(ids));
        }
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "zero-coupons" | "zeros" => Ok(CurveSource::ZeroCoupons),
            "all-bonds" | "all" => Ok(CurveSource::AllBonds),
            other => Err(format!(
                "unknown curve source '{other}' (expected zero-coupons, all-bonds or benchmarks:ID,...)"
            )),
        }
    }
}

/// Bootstraps a spot curve from `bonds` taken in maturity order.
///
/// Runs the same back-substitution as the discount factor solver, then
/// converts the factors under `compounding`. With annual compounding a zero
/// coupon bond's rate is `(F/P)^(1/T) − 1`. A set that does not resolve one
/// new payment time per bond is an input error.
pub fn bootstrap_strip(
    bonds: &[Bond],
    compounding: Compounding,
    tolerance: f64,
) -> AnalyticsResult<SpotCurve> {
    let ordered = sorted_by_maturity(bonds);
    let matrix = CashflowMatrix::build(&ordered)?;
    let factors = back_substitute(&matrix, tolerance, |_| {})?;
    debug!("stripped {} discount factors", factors.len());

    let discount_factors = DiscountFactors::new(matrix.times().to_vec(), factors)?;
    let spots = discount_factors_to_spot_rates(&discount_factors, compounding)?;
    Ok(SpotCurve::new(spots, compounding)?)
}
