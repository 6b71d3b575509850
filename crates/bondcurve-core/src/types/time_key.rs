//! Fixed-precision payment time keys.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Number of key units per year.
pub const UNITS_PER_YEAR: u64 = 1000;

/// A payment time, stored as an integer number of thousandths of a year.
///
/// Times are canonicalized once, when a schedule is generated, so that
/// equality and ordering between payment dates of different bonds never depend
/// on floating-point noise (`3 × (1/3)` and `1.0` land on the same key).
///
/// Serialized as a year fraction.
///
/// ```rust
/// use bondcurve_core::types::{Frequency, TimeKey};
///
/// let a = TimeKey::from_period(3, Frequency::Quarterly);
/// let b = TimeKey::from_years(0.75).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_years(), 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeKey(u64);

impl TimeKey {
    /// The zero time.
    pub const ZERO: TimeKey = TimeKey(0);

    /// Creates a key from raw units.
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Creates a key by rounding a year fraction to the nearest unit.
    pub fn from_years(years: f64) -> CoreResult<Self> {
        if !years.is_finite() || years < 0.0 {
            return Err(CoreError::InvalidTime { value: years });
        }
        let units = (years * UNITS_PER_YEAR as f64).round();
        if units > u64::MAX as f64 {
            return Err(CoreError::InvalidTime { value: years });
        }
        Ok(Self(units as u64))
    }

    /// Key of the `period`-th payment of a schedule paying `frequency` times a year.
    #[must_use]
    pub fn from_period(period: u32, frequency: super::Frequency) -> Self {
        let per_year = u64::from(frequency.periods_per_year());
        let numerator = u64::from(period) * UNITS_PER_YEAR;
        Self((numerator + per_year / 2) / per_year)
    }

    /// Raw units.
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Year fraction.
    #[must_use]
    pub fn as_years(&self) -> f64 {
        self.0 as f64 / UNITS_PER_YEAR as f64
    }

    /// Returns true for the zero time.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_years())
    }
}

impl Serialize for TimeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_years())
    }
}

impl<'de> Deserialize<'de> for TimeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let years = f64::deserialize(deserializer)?;
        TimeKey::from_years(years).map_err(serde::de::Error::custom)
    }
}
