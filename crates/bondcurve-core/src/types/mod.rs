//! Domain types for the bootstrapping engine.
//!
//! - [`Bond`]: fixed-coupon bond and its payment schedule
//! - [`TimeKey`]: canonical payment time
//! - [`Frequency`]: coupon frequency
//! - [`Compounding`]: spot rate convention

mod bond;
mod frequency;
mod time_key;

pub use bond::{Bond, BondCashflow, SCHEDULE_TOLERANCE};
pub use frequency::{Compounding, Frequency};
pub use time_key::{TimeKey, UNITS_PER_YEAR};
