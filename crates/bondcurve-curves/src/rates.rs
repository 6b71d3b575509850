//! Conversions between discount factors, spot rates and forward rates.

use bondcurve_core::types::{Compounding, TimeKey};
use serde::{Deserialize, Serialize};

use crate::discount::DiscountFactors;
use crate::error::{CurveError, CurveResult};

/// Annualised spot (zero) rate at a payment time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotRate {
    /// Payment time.
    pub time: TimeKey,
    /// Rate as a decimal.
    pub rate: f64,
}

/// Forward rate between two payment times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForwardRate {
    /// Start of the interval.
    pub start: TimeKey,
    /// End of the interval.
    pub time: TimeKey,
    /// Rate as a decimal.
    pub rate: f64,
}

/// Spot rate implied by a single discount factor.
///
/// `t` must be positive and `df` positive and finite.
pub fn discount_factor_to_spot_rate(df: f64, t: f64, compounding: Compounding) -> CurveResult<f64> {
    if t <= 0.0 {
        return Err(CurveError::ZeroTime);
    }
    if !df.is_finite() || df <= 0.0 {
        return Err(CurveError::InvalidDiscountFactor { time: t, value: df });
    }
    Ok(compounding.zero_rate(df, t))
}

/// Converts every discount factor to a spot rate under `compounding`.
pub fn discount_factors_to_spot_rates(
    discount_factors: &DiscountFactors,
    compounding: Compounding,
) -> CurveResult<Vec<SpotRate>> {
    discount_factors
        .iter()
        .map(|(time, df)| {
            Ok(SpotRate {
                time,
                rate: discount_factor_to_spot_rate(df, time.as_years(), compounding)?,
            })
        })
        .collect()
}

/// Converts spot rates back to discount factors under `compounding`.
pub fn spot_rates_to_discount_factors(
    spot_rates: &[SpotRate],
    compounding: Compounding,
) -> CurveResult<DiscountFactors> {
    let times = spot_rates.iter().map(|s| s.time).collect();
    let factors = spot_rates
        .iter()
        .map(|s| compounding.discount_factor(s.rate, s.time.as_years()))
        .collect();
    DiscountFactors::new(times, factors)
}

/// Forward rates between adjacent spot points.
///
/// `f(t₁, t₂) = (s₂·t₂ − s₁·t₁) / (t₂ − t₁)`. Exact for continuously
/// compounded spots; for annual or semi-annual spots it is the usual
/// first-order approximation.
///
/// Needs at least two points with strictly increasing times.
pub fn spot_rates_to_forward_rates(spot_rates: &[SpotRate]) -> CurveResult<Vec<ForwardRate>> {
    if spot_rates.len() < 2 {
        return Err(CurveError::insufficient_points(2, spot_rates.len()));
    }

    spot_rates
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (s1, s2) = (pair[0], pair[1]);
            let (t1, t2) = (s1.time.as_years(), s2.time.as_years());
            if s2.time <= s1.time {
                return Err(CurveError::non_monotonic_times(i + 1, t1, t2));
            }
            Ok(ForwardRate {
                start: s1.time,
                time: s2.time,
                rate: (s2.rate * t2 - s1.rate * t1) / (t2 - t1),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn key(years: f64) -> TimeKey {
        TimeKey::from_years(years).unwrap()
    }

    #[test]
    fn test_conventions() {
        let df = 0.9;
        assert_relative_eq!(
            discount_factor_to_spot_rate(df, 2.0, Compounding::Continuous).unwrap(),
            -(0.9_f64.ln()) / 2.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            discount_factor_to_spot_rate(df, 2.0, Compounding::Annual).unwrap(),
            (1.0 / 0.9_f64).sqrt() - 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(
            discount_factor_to_spot_rate(0.9, 0.0, Compounding::Annual),
            Err(CurveError::ZeroTime)
        );
        assert!(matches!(
            discount_factor_to_spot_rate(-0.1, 1.0, Compounding::Continuous),
            Err(CurveError::InvalidDiscountFactor { .. })
        ));
        assert!(matches!(
            discount_factor_to_spot_rate(f64::NAN, 1.0, Compounding::Continuous),
            Err(CurveError::InvalidDiscountFactor { .. })
        ));
    }

    #[test]
    fn test_round_trip_through_spots() {
        let dfs = DiscountFactors::new(vec![key(0.5), key(1.0), key(2.0)], vec![0.98, 0.95, 0.9])
            .unwrap();
        for compounding in Compounding::ALL {
            let spots = discount_factors_to_spot_rates(&dfs, compounding).unwrap();
            let back = spot_rates_to_discount_factors(&spots, compounding).unwrap();
            for (a, b) in dfs.factors().iter().zip(back.factors()) {
                assert_relative_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_flat_curve_forwards() {
        let spots: Vec<SpotRate> = [0.5, 1.0, 1.5, 3.0]
            .iter()
            .map(|&t| SpotRate {
                time: key(t),
                rate: 0.04,
            })
            .collect();

        let forwards = spot_rates_to_forward_rates(&spots).unwrap();
        assert_eq!(forwards.len(), 3);
        for f in &forwards {
            assert_relative_eq!(f.rate, 0.04, epsilon = 1e-12);
        }
        assert_eq!(forwards[2].start, key(1.5));
        assert_eq!(forwards[2].time, key(3.0));
    }

    #[test]
    fn test_upward_curve_forward() {
        let spots = [
            SpotRate {
                time: key(1.0),
                rate: 0.03,
            },
            SpotRate {
                time: key(2.0),
                rate: 0.04,
            },
        ];
        let forwards = spot_rates_to_forward_rates(&spots).unwrap();
        assert_relative_eq!(forwards[0].rate, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_errors() {
        let one = [SpotRate {
            time: key(1.0),
            rate: 0.03,
        }];
        assert_eq!(
            spot_rates_to_forward_rates(&one),
            Err(CurveError::insufficient_points(2, 1))
        );

        let unordered = [one[0], one[0]];
        assert!(matches!(
            spot_rates_to_forward_rates(&unordered),
            Err(CurveError::NonMonotonicTimes { index: 1, .. })
        ));
    }
}
