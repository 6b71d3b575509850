//! Duration, convexity and DV01 from a bond's yield.
//!
//! With `v = 1 / (1 + y/f)` and payment `i` of `n`:
//!
//! ```text
//! P          = Σ CFᵢ vⁱ
//! D_mac      = Σ (i/f) CFᵢ vⁱ / P
//! D_mod      = D_mac / (1 + y/f)
//! Convexity  = Σ CFᵢ i(i+1)/f² v^(i+2) / P
//! DV01       = D_mod × P × 0.0001
//! ```

use serde::Serialize;

use bondcurve_core::types::Bond;

use crate::error::{BondError, BondResult};
use crate::pricing::price_from_yield;

/// One basis point as a decimal.
pub const BASIS_POINT: f64 = 0.0001;

/// Price sensitivities of a bond at a given yield.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMeasures {
    /// Bond identifier.
    pub bond_id: String,
    /// Yield the measures were taken at.
    pub yield_value: f64,
    /// Price at that yield.
    pub price: f64,
    /// PV-weighted average time to payment, in years.
    pub macaulay_duration: f64,
    /// Percentage price sensitivity to the yield.
    pub modified_duration: f64,
    /// Second-order price sensitivity.
    pub convexity: f64,
    /// Price change for a one basis point fall in yield.
    pub dv01: f64,
}

impl RiskMeasures {
    /// Computes all measures for `bond` at `yield_value`.
    pub fn compute(bond: &Bond, yield_value: f64) -> BondResult<Self> {
        let price = price_from_yield(bond, yield_value)?;
        if price <= 0.0 {
            return Err(BondError::InvalidYield {
                yield_value,
                frequency: bond.frequency.periods_per_year(),
            });
        }

        let f = bond.frequency.as_f64();
        let base = 1.0 + yield_value / f;

        let mut weighted_time = 0.0;
        let mut second_moment = 0.0;
        for cf in bond.schedule()? {
            let i = f64::from(cf.period);
            let pv = cf.amount * base.powf(-i);
            weighted_time += (i / f) * pv;
            second_moment += pv * i * (i + 1.0) / (f * f) / (base * base);
        }

        let macaulay_duration = weighted_time / price;
        let modified_duration = macaulay_duration / base;

        Ok(Self {
            bond_id: bond.id.clone(),
            yield_value,
            price,
            macaulay_duration,
            modified_duration,
            convexity: second_moment / price,
            dv01: modified_duration * price * BASIS_POINT,
        })
    }

    /// Duration-only estimate of the price change for a yield move `dy`.
    #[must_use]
    pub fn estimate_change(&self, dy: f64) -> f64 {
        price_change_from_duration(self.modified_duration, self.price, dy)
    }

    /// Duration plus convexity estimate of the price change for `dy`.
    #[must_use]
    pub fn estimate_change_with_convexity(&self, dy: f64) -> f64 {
        price_change_with_convexity(self.modified_duration, self.convexity, self.price, dy)
    }
}

/// `ΔP ≈ −D_mod × P × Δy`.
#[must_use]
pub fn price_change_from_duration(modified_duration: f64, price: f64, dy: f64) -> f64 {
    -modified_duration * price * dy
}

/// `ΔP ≈ P × (−D_mod × Δy + ½ × C × Δy²)`.
#[must_use]
pub fn price_change_with_convexity(
    modified_duration: f64,
    convexity: f64,
    price: f64,
    dy: f64,
) -> f64 {
    price * (-modified_duration * dy + 0.5 * convexity * dy * dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price_derivative;
    use approx::assert_relative_eq;
    use bondcurve_core::types::Frequency;

    #[test]
    fn test_zero_coupon_duration_equals_maturity() {
        let bond = Bond::zero_coupon("Z", 5.0, 780.0, 1000.0);
        let risk = RiskMeasures::compute(&bond, 0.05).unwrap();
        assert_relative_eq!(risk.macaulay_duration, 5.0, epsilon = 1e-12);
        assert_relative_eq!(risk.modified_duration, 5.0 / 1.05, epsilon = 1e-12);
        // n(n+1)/(1+y)² for an annual zero
        assert_relative_eq!(risk.convexity, 30.0 / 1.05_f64.powi(2), epsilon = 1e-10);
    }

    #[test]
    fn test_par_bond_duration() {
        // 5% annual 5y at par: D_mac = (1 − 1.05^-5) × 1.05 / 0.05
        let bond = Bond::new("P", 5.0, 0.05, Frequency::Annual, 100.0, 100.0);
        let risk = RiskMeasures::compute(&bond, 0.05).unwrap();
        let expected = (1.0 - 1.05_f64.powi(-5)) * 1.05 / 0.05;
        assert_relative_eq!(risk.macaulay_duration, expected, epsilon = 1e-10);
        assert_relative_eq!(risk.price, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_modified_duration_matches_derivative() {
        let bond = Bond::new("S", 7.0, 0.04, Frequency::SemiAnnual, 98.0, 100.0);
        let risk = RiskMeasures::compute(&bond, 0.045).unwrap();
        let dp = price_derivative(&bond, 0.045).unwrap();
        assert_relative_eq!(risk.modified_duration, -dp / risk.price, epsilon = 1e-10);
        assert_relative_eq!(
            risk.dv01,
            -dp * BASIS_POINT,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_convexity_matches_second_difference() {
        let bond = Bond::new("Q", 4.0, 0.06, Frequency::Quarterly, 100.0, 100.0);
        let y = 0.05;
        let h = 1e-4;
        let p0 = price_from_yield(&bond, y).unwrap();
        let up = price_from_yield(&bond, y + h).unwrap();
        let down = price_from_yield(&bond, y - h).unwrap();
        let numeric = (up - 2.0 * p0 + down) / (h * h) / p0;
        let risk = RiskMeasures::compute(&bond, y).unwrap();
        assert_relative_eq!(risk.convexity, numeric, max_relative = 1e-4);
    }

    #[test]
    fn test_duration_estimate_sign() {
        let bond = Bond::new("P", 10.0, 0.05, Frequency::SemiAnnual, 100.0, 100.0);
        let risk = RiskMeasures::compute(&bond, 0.05).unwrap();
        assert!(risk.estimate_change(0.01) < 0.0);
        assert!(risk.estimate_change(-0.01) > 0.0);
        assert!(risk.estimate_change_with_convexity(0.01) > risk.estimate_change(0.01));
    }

    #[test]
    fn test_price_change_from_duration() {
        assert_relative_eq!(
            price_change_from_duration(5.0, 100.0, 0.01),
            -5.0,
            epsilon = 1e-12
        );
    }
}
