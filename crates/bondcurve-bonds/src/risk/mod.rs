//! Interest-rate risk measures.
//!
//! - [`RiskMeasures`]: Macaulay and modified duration, convexity, DV01
//! - [`rate_shock`]: repricing under a parallel yield shift, compared with
//!   the duration and duration+convexity estimates

mod duration;
mod shock;

pub use duration::{
    price_change_from_duration, price_change_with_convexity, RiskMeasures, BASIS_POINT,
};
pub use shock::{rate_shock, rate_shock_ladder, RateShock};
