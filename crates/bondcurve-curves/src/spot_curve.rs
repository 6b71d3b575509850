//! Discrete spot curve used to price bonds off a bootstrapped strip.

use bondcurve_core::types::{Bond, Compounding, TimeKey};
use serde::Serialize;

use crate::error::{CurveError, CurveResult};
use crate::rates::SpotRate;

/// A set of spot rates at discrete times under one convention.
///
/// Rates between points are not interpolated. A lookup takes the rate at the
/// exact time when present, the longest rate past the last point, and the
/// nearest point otherwise (the earlier one on a tie).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotCurve {
    compounding: Compounding,
    points: Vec<SpotRate>,
}

impl SpotCurve {
    /// Creates a curve from points with strictly increasing times.
    pub fn new(points: Vec<SpotRate>, compounding: Compounding) -> CurveResult<Self> {
        if points.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                return Err(CurveError::non_monotonic_times(
                    i + 1,
                    pair[0].time.as_years(),
                    pair[1].time.as_years(),
                ));
            }
        }
        Ok(Self {
            compounding,
            points,
        })
    }

    /// The curve points.
    #[must_use]
    pub fn points(&self) -> &[SpotRate] {
        &self.points
    }

    /// The rate convention.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Spot rate used for a cashflow at `time`.
    #[must_use]
    pub fn rate_at(&self, time: TimeKey) -> f64 {
        match self.points.binary_search_by_key(&time, |p| p.time) {
            Ok(i) => self.points[i].rate,
            Err(i) if i == self.points.len() => self.points[i - 1].rate,
            Err(0) => self.points[0].rate,
            Err(i) => {
                let (before, after) = (self.points[i - 1], self.points[i]);
                if time.units() - before.time.units() <= after.time.units() - time.units() {
                    before.rate
                } else {
                    after.rate
                }
            }
        }
    }

    /// Discount factor for a cashflow at `time`.
    #[must_use]
    pub fn discount_factor(&self, time: TimeKey) -> f64 {
        self.compounding
            .discount_factor(self.rate_at(time), time.as_years())
    }

    /// Theoretical price `Σ CF(t)·DF(t)`.
    pub fn price_bond(&self, bond: &Bond) -> CurveResult<f64> {
        Ok(bond
            .schedule()?
            .iter()
            .map(|cf| cf.amount * self.discount_factor(cf.time))
            .sum())
    }
}
