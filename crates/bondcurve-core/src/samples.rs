//! Built-in sample portfolios.
//!
//! Useful for demonstrations, tests and the command-line front-end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{Bond, Frequency};

/// Named sample portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleSet {
    /// Six semi-annual bonds with aligned maturities (triangular matrix).
    Triangular,
    /// Nine bonds of mixed frequency over eight times (requires least squares).
    Overdetermined,
    /// Two zeros and a 5% coupon bond, all consistently priced.
    NoArbitrage,
    /// As [`SampleSet::NoArbitrage`] with the coupon bond overpriced.
    MispricedBond,
    /// Four annual bonds with several mispricings.
    MultipleMispricings,
}

impl SampleSet {
    /// All sample sets.
    pub const ALL: [SampleSet; 5] = [
        SampleSet::Triangular,
        SampleSet::Overdetermined,
        SampleSet::NoArbitrage,
        SampleSet::MispricedBond,
        SampleSet::MultipleMispricings,
    ];

    /// Name accepted by [`FromStr`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SampleSet::Triangular => "triangular",
            SampleSet::Overdetermined => "overdetermined",
            SampleSet::NoArbitrage => "no-arbitrage",
            SampleSet::MispricedBond => "mispriced-bond",
            SampleSet::MultipleMispricings => "multiple-mispricings",
        }
    }

    /// One-line description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            SampleSet::Triangular => "aligned semi-annual maturities, solved exactly",
            SampleSet::Overdetermined => "mixed frequencies, solved by least squares",
            SampleSet::NoArbitrage => "zero-coupon strip with a fairly priced coupon bond",
            SampleSet::MispricedBond => "zero-coupon strip with an overpriced coupon bond",
            SampleSet::MultipleMispricings => "four annual bonds, several off the curve",
        }
    }

    /// The bonds of this sample.
    #[must_use]
    pub fn bonds(&self) -> Vec<Bond> {
        match self {
            SampleSet::Triangular => triangular(),
            SampleSet::Overdetermined => overdetermined(),
            SampleSet::NoArbitrage => strip_with_coupon_bond(1000.00),
            SampleSet::MispricedBond => strip_with_coupon_bond(1020.00),
            SampleSet::MultipleMispricings => multiple_mispricings(),
        }
    }
}

impl FromStr for SampleSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SampleSet::ALL
            .into_iter()
            .find(|set| set.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = SampleSet::ALL.iter().map(|s| s.name()).collect();
                format!("unknown sample '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

impl fmt::Display for SampleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn semi(id: &str, maturity: f64, coupon: f64, price: f64) -> Bond {
    Bond::new(id, maturity, coupon, Frequency::SemiAnnual, price, 100.0)
}

fn quarterly(id: &str, maturity: f64, coupon: f64, price: f64) -> Bond {
    Bond::new(id, maturity, coupon, Frequency::Quarterly, price, 100.0)
}

fn annual(id: &str, maturity: f64, coupon: f64, price: f64) -> Bond {
    Bond::new(id, maturity, coupon, Frequency::Annual, price, 1000.0)
}

/// Six semi-annual bonds maturing every six months out to three years.
#[must_use]
pub fn triangular() -> Vec<Bond> {
    vec![
        semi("1", 0.5, 0.03, 100.5),
        semi("2", 1.0, 0.035, 101.2),
        semi("3", 1.5, 0.04, 102.1),
        semi("4", 2.0, 0.045, 103.5),
        semi("5", 2.5, 0.05, 105.2),
        semi("6", 3.0, 0.055, 107.1),
    ]
}

/// Nine bonds whose semi-annual and quarterly schedules interleave over
/// eight payment times. Bonds 8 and 9 pin down DF(1.25) and DF(1.75).
#[must_use]
pub fn overdetermined() -> Vec<Bond> {
    vec![
        semi("1", 0.5, 0.03, 100.5),
        quarterly("2", 0.75, 0.032, 100.8),
        semi("3", 1.0, 0.035, 101.2),
        quarterly("4", 1.0, 0.036, 101.5),
        semi("5", 1.5, 0.04, 102.1),
        semi("6", 2.0, 0.045, 103.5),
        quarterly("7", 2.0, 0.046, 103.8),
        quarterly("8", 1.5, 0.038, 101.95),
        quarterly("9", 1.75, 0.042, 96.17),
    ]
}

fn strip_with_coupon_bond(coupon_bond_price: f64) -> Vec<Bond> {
    vec![
        annual("B1", 1.0, 0.0, 952.38),
        annual("B2", 2.0, 0.0, 907.03),
        annual("B3", 3.0, 0.05, coupon_bond_price),
    ]
}

fn multiple_mispricings() -> Vec<Bond> {
    vec![
        annual("B1", 1.0, 0.0, 960.00),
        annual("B2", 2.0, 0.0, 900.00),
        annual("B3", 3.0, 0.05, 1015.00),
        annual("B4", 4.0, 0.06, 1050.00),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::validate_portfolio;

    #[test]
    fn test_all_samples_are_valid() {
        for set in SampleSet::ALL {
            assert!(validate_portfolio(&set.bonds()).is_ok(), "{set}");
        }
    }

    #[test]
    fn test_sample_sizes() {
        assert_eq!(SampleSet::Triangular.bonds().len(), 6);
        assert_eq!(SampleSet::Overdetermined.bonds().len(), 9);
        assert_eq!(SampleSet::NoArbitrage.bonds().len(), 3);
        assert_eq!(SampleSet::MultipleMispricings.bonds().len(), 4);
    }

    #[test]
    fn test_mispriced_differs_only_in_price() {
        let fair = SampleSet::NoArbitrage.bonds();
        let rich = SampleSet::MispricedBond.bonds();
        assert_eq!(fair[..2], rich[..2]);
        assert_eq!(rich[2].price, 1020.0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "no_arbitrage".parse::<SampleSet>().unwrap(),
            SampleSet::NoArbitrage
        );
        assert_eq!(
            "Triangular".parse::<SampleSet>().unwrap(),
            SampleSet::Triangular
        );
        assert!("bogus".parse::<SampleSet>().is_err());
    }
}
