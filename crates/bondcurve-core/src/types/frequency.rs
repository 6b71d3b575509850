//! Frequency and compounding types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Coupon payment frequency.
///
/// Serialized as the number of payments per year (`1`, `2` or `4`) so that
/// portfolios can be read from plain CSV/JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
        }
    }

    /// Returns the number of periods per year as a float.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        f64::from(self.periods_per_year())
    }
}

impl TryFrom<u32> for Frequency {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            other => Err(CoreError::UnsupportedFrequency(other)),
        }
    }
}

impl From<Frequency> for u32 {
    fn from(freq: Frequency) -> Self {
        freq.periods_per_year()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
        };
        write!(f, "{name}")
    }
}

/// Spot rate compounding convention.
///
/// Relationship between a discount factor `DF` and a rate `r` at time `t`:
///
/// ```text
/// Continuous:  DF = exp(-r·t)
/// Annual:      DF = (1 + r)^(-t)
/// SemiAnnual:  DF = (1 + r/2)^(-2t)
/// ```
///
/// # Example
///
/// ```rust
/// use bondcurve_core::types::Compounding;
///
/// let df = Compounding::Annual.discount_factor(0.05, 2.0);
/// let rate = Compounding::Annual.zero_rate(df, 2.0);
/// assert!((rate - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Compounding {
    /// Continuous compounding
    #[default]
    Continuous,
    /// Annual compounding (1x per year)
    Annual,
    /// Semi-annual compounding (2x per year)
    #[serde(alias = "semi-annual", alias = "semi_annual")]
    SemiAnnual,
}

impl Compounding {
    /// All supported conventions.
    pub const ALL: [Compounding; 3] = [
        Compounding::Continuous,
        Compounding::Annual,
        Compounding::SemiAnnual,
    ];

    /// Discount factor implied by `rate` at time `t` (years).
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Continuous => (-rate * t).exp(),
            Compounding::Annual => (1.0 + rate).powf(-t),
            Compounding::SemiAnnual => (1.0 + rate / 2.0).powf(-2.0 * t),
        }
    }

    /// Spot rate implied by discount factor `df` at time `t` (years).
    ///
    /// The caller guarantees `t > 0` and `df > 0`.
    #[must_use]
    pub fn zero_rate(&self, df: f64, t: f64) -> f64 {
        match self {
            Compounding::Continuous => -df.ln() / t,
            Compounding::Annual => (1.0 / df).powf(1.0 / t) - 1.0,
            Compounding::SemiAnnual => 2.0 * ((1.0 / df).powf(1.0 / (2.0 * t)) - 1.0),
        }
    }

    /// Returns true if this is continuous compounding.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Compounding::Continuous)
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Compounding::Continuous => "continuous",
            Compounding::Annual => "annual",
            Compounding::SemiAnnual => "semiannual",
        }
    }
}

impl FromStr for Compounding {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continuous" | "cont" => Ok(Compounding::Continuous),
            "annual" => Ok(Compounding::Annual),
            "semiannual" | "semi-annual" | "semi_annual" => Ok(Compounding::SemiAnnual),
            other => Err(CoreError::UnknownCompounding(other.to_string())),
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Continuous => "Continuous",
            Compounding::Annual => "Annual",
            Compounding::SemiAnnual => "Semi-Annual",
        };
        write!(f, "{name}")
    }
}
