//! Price from yield, premium/discount and current yield.

use serde::{Deserialize, Serialize};
use std::fmt;

use bondcurve_core::types::Bond;

use super::{period_base, pv_at_yield, pv_derivative};
use crate::error::{BondError, BondResult};

/// Relative distance from face inside which a price counts as par.
pub const PAR_TOLERANCE: f64 = 1e-9;

/// Where a price sits relative to face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceStatus {
    /// Price above face.
    Premium,
    /// Price at face.
    Par,
    /// Price below face.
    Discount,
}

impl fmt::Display for PriceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriceStatus::Premium => "Premium",
            PriceStatus::Par => "Par",
            PriceStatus::Discount => "Discount",
        };
        write!(f, "{name}")
    }
}

/// Premium or discount of a price to face value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PremiumDiscount {
    /// `price − face`.
    pub amount: f64,
    /// `amount / face × 100`.
    pub percent: f64,
    /// Classification of the price.
    pub status: PriceStatus,
}

/// Checks that the discount base `1 + y/f` is positive.
fn check_yield(bond: &Bond, yield_value: f64) -> BondResult<()> {
    if !yield_value.is_finite() || period_base(yield_value, bond.frequency.as_f64()) <= 0.0 {
        return Err(BondError::InvalidYield {
            yield_value,
            frequency: bond.frequency.periods_per_year(),
        });
    }
    Ok(())
}

/// Price of `bond` when all payments are discounted at `yield_value`.
///
/// ```rust
/// use bondcurve_bonds::pricing::price_from_yield;
/// use bondcurve_core::types::{Bond, Frequency};
///
/// let bond = Bond::new("5Y", 5.0, 0.05, Frequency::SemiAnnual, 100.0, 100.0);
/// let price = price_from_yield(&bond, 0.05).unwrap();
/// assert!((price - 100.0).abs() < 1e-10);
/// ```
pub fn price_from_yield(bond: &Bond, yield_value: f64) -> BondResult<f64> {
    check_yield(bond, yield_value)?;
    let schedule = bond.schedule()?;
    Ok(pv_at_yield(&schedule, yield_value, bond.frequency.as_f64()))
}

/// `dP/dy` at `yield_value`.
pub fn price_derivative(bond: &Bond, yield_value: f64) -> BondResult<f64> {
    check_yield(bond, yield_value)?;
    let schedule = bond.schedule()?;
    Ok(pv_derivative(&schedule, yield_value, bond.frequency.as_f64()))
}

/// Premium or discount of `price` relative to the bond's face value.
#[must_use]
pub fn premium_discount(bond: &Bond, price: f64) -> PremiumDiscount {
    let amount = price - bond.face_value;
    let status = if amount.abs() <= PAR_TOLERANCE * bond.face_value {
        PriceStatus::Par
    } else if amount > 0.0 {
        PriceStatus::Premium
    } else {
        PriceStatus::Discount
    };
    PremiumDiscount {
        amount,
        percent: amount / bond.face_value * 100.0,
        status,
    }
}

/// Annual coupon divided by `price`.
#[must_use]
pub fn current_yield(bond: &Bond, price: f64) -> f64 {
    bond.annual_coupon() / price
}
