//! Bond pricing: yield to maturity and price from yield.
//!
//! All calculations discount each scheduled payment at the bond's own
//! frequency:
//!
//! ```text
//! P(y) = Σ CFᵢ / (1 + y/f)^i
//! ```

mod price;
mod yield_solver;

pub use price::{
    current_yield, premium_discount, price_derivative, price_from_yield, PremiumDiscount,
    PriceStatus, PAR_TOLERANCE,
};
pub use yield_solver::{calculate_ytm, YieldResult, YieldSolver, YieldSolverConfig};

use bondcurve_core::types::BondCashflow;

/// Discount base `1 + y/f`.
#[inline]
pub(crate) fn period_base(yield_value: f64, frequency: f64) -> f64 {
    1.0 + yield_value / frequency
}

/// Present value of a schedule at `yield_value`.
pub(crate) fn pv_at_yield(cashflows: &[BondCashflow], yield_value: f64, frequency: f64) -> f64 {
    let base = period_base(yield_value, frequency);
    cashflows
        .iter()
        .map(|cf| cf.amount * base.powi(-(cf.period as i32)))
        .sum()
}

/// First derivative of [`pv_at_yield`] with respect to the yield.
pub(crate) fn pv_derivative(cashflows: &[BondCashflow], yield_value: f64, frequency: f64) -> f64 {
    let base = period_base(yield_value, frequency);
    cashflows
        .iter()
        .map(|cf| {
            let i = f64::from(cf.period);
            -cf.amount * (i / frequency) * base.powi(-(cf.period as i32) - 1)
        })
        .sum()
}
