//! Discount factors on a payment-time axis.

use bondcurve_core::types::{Bond, Compounding, TimeKey};
use serde::Serialize;

use crate::error::{CurveError, CurveResult};
use crate::rates::{discount_factors_to_spot_rates, SpotRate};

/// Discount factors paired one-to-one with payment times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountFactors {
    times: Vec<TimeKey>,
    factors: Vec<f64>,
}

impl DiscountFactors {
    /// Pairs `times` with `factors`.
    pub fn new(times: Vec<TimeKey>, factors: Vec<f64>) -> CurveResult<Self> {
        if times.len() != factors.len() {
            return Err(CurveError::length_mismatch(
                "discount factors",
                times.len(),
                factors.len(),
            ));
        }
        Ok(Self { times, factors })
    }

    /// The time axis.
    #[must_use]
    pub fn times(&self) -> &[TimeKey] {
        &self.times
    }

    /// The factors, parallel to [`Self::times`].
    #[must_use]
    pub fn factors(&self) -> &[f64] {
        &self.factors
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterates over `(time, factor)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (TimeKey, f64)> + '_ {
        self.times.iter().copied().zip(self.factors.iter().copied())
    }

    /// Factor at an exact time.
    #[must_use]
    pub fn get(&self, time: TimeKey) -> Option<f64> {
        self.times
            .binary_search(&time)
            .ok()
            .map(|i| self.factors[i])
    }

    /// Present value `Σ CF(t)·DF(t)` of a bond on this axis.
    ///
    /// Fails if any cashflow time is absent from the axis.
    pub fn price_bond(&self, bond: &Bond) -> CurveResult<f64> {
        bond.schedule()?.iter().try_fold(0.0, |pv, cf| {
            let df = self.get(cf.time).ok_or_else(|| CurveError::UnmappedCashflow {
                bond_id: bond.id.clone(),
                time: cf.time.as_years(),
            })?;
            Ok(pv + cf.amount * df)
        })
    }

    /// Spot rates under `compounding`.
    pub fn to_spot_rates(&self, compounding: Compounding) -> CurveResult<Vec<SpotRate>> {
        discount_factors_to_spot_rates(self, compounding)
    }
}
