//! Parallel yield shocks.

use serde::Serialize;

use bondcurve_core::types::Bond;

use super::RiskMeasures;
use crate::error::BondResult;
use crate::pricing::price_from_yield;

/// Repricing of a bond under a parallel yield shift.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateShock {
    /// Bond identifier.
    pub bond_id: String,
    /// Yield before the shift.
    pub base_yield: f64,
    /// Size of the shift (decimal, `0.01` = 100bp).
    pub shift: f64,
    /// Price at the base yield.
    pub base_price: f64,
    /// Price at `base_yield + shift`.
    pub shocked_price: f64,
    /// `shocked_price − base_price`.
    pub price_change: f64,
    /// `price_change / base_price × 100`.
    pub percent_change: f64,
    /// Duration-only estimate of `price_change`.
    pub duration_estimate: f64,
    /// Duration plus convexity estimate of `price_change`.
    pub convexity_estimate: f64,
}

impl RateShock {
    /// Error of the duration-only estimate.
    #[must_use]
    pub fn duration_error(&self) -> f64 {
        self.duration_estimate - self.price_change
    }

    /// Error of the duration plus convexity estimate.
    #[must_use]
    pub fn convexity_error(&self) -> f64 {
        self.convexity_estimate - self.price_change
    }
}

/// Reprices `bond` at `base_yield` and `base_yield + shift`.
pub fn rate_shock(bond: &Bond, base_yield: f64, shift: f64) -> BondResult<RateShock> {
    let risk = RiskMeasures::compute(bond, base_yield)?;
    let shocked_price = price_from_yield(bond, base_yield + shift)?;
    let price_change = shocked_price - risk.price;

    Ok(RateShock {
        bond_id: bond.id.clone(),
        base_yield,
        shift,
        base_price: risk.price,
        shocked_price,
        price_change,
        percent_change: price_change / risk.price * 100.0,
        duration_estimate: risk.estimate_change(shift),
        convexity_estimate: risk.estimate_change_with_convexity(shift),
    })
}

/// [`rate_shock`] for each shift in `shifts`.
pub fn rate_shock_ladder(
    bond: &Bond,
    base_yield: f64,
    shifts: &[f64],
) -> BondResult<Vec<RateShock>> {
    shifts
        .iter()
        .map(|&shift| rate_shock(bond, base_yield, shift))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcurve_core::types::Frequency;

    fn ten_year() -> Bond {
        Bond::new("10Y", 10.0, 0.05, Frequency::SemiAnnual, 100.0, 100.0)
    }

    #[test]
    fn test_rate_rise_lowers_price() {
        let shock = rate_shock(&ten_year(), 0.05, 0.01).unwrap();
        assert_relative_eq!(shock.base_price, 100.0, epsilon = 1e-10);
        assert!(shock.shocked_price < shock.base_price);
        assert_relative_eq!(shock.percent_change, shock.price_change, epsilon = 1e-10);
    }

    #[test]
    fn test_convexity_improves_estimate() {
        let shock = rate_shock(&ten_year(), 0.05, 0.02).unwrap();
        assert!(shock.convexity_error().abs() < shock.duration_error().abs());
        // Positive convexity: duration alone overstates losses.
        assert!(shock.duration_estimate < shock.price_change);
    }

    #[test]
    fn test_zero_shift() {
        let shock = rate_shock(&ten_year(), 0.04, 0.0).unwrap();
        assert_relative_eq!(shock.price_change, 0.0, epsilon = 1e-12);
        assert_relative_eq!(shock.duration_estimate, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ladder() {
        let shocks = rate_shock_ladder(&ten_year(), 0.05, &[-0.01, 0.0, 0.01]).unwrap();
        assert_eq!(shocks.len(), 3);
        assert!(shocks[0].price_change > 0.0);
        assert!(shocks[2].price_change < 0.0);
    }

    #[test]
    fn test_shock_below_domain_is_error() {
        assert!(rate_shock(&ten_year(), 0.05, -3.0).is_err());
    }
}
