//! Mispricing of market prices against a theoretical curve price.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Trading signal for a bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Market below theoretical: the bond is cheap.
    Buy,
    /// Market above theoretical: the bond is rich.
    Sell,
    /// Within the thresholds.
    Fair,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Fair => "FAIR",
        };
        write!(f, "{name}")
    }
}

/// Percent mispricing limits for the buy and sell signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MispricingThresholds {
    /// Buy when percent mispricing is strictly below this.
    pub buy_below: f64,
    /// Sell when percent mispricing is strictly above this.
    pub sell_above: f64,
}

impl Default for MispricingThresholds {
    fn default() -> Self {
        Self {
            buy_below: -0.5,
            sell_above: 0.5,
        }
    }
}

impl MispricingThresholds {
    /// Symmetric thresholds at `±band` percent.
    #[must_use]
    pub fn symmetric(band: f64) -> Self {
        Self {
            buy_below: -band.abs(),
            sell_above: band.abs(),
        }
    }

    /// Checks the buy threshold does not exceed the sell threshold.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !(self.buy_below.is_finite() && self.sell_above.is_finite())
            || self.buy_below > self.sell_above
        {
            return Err(AnalyticsError::InvalidThresholds {
                buy_below: self.buy_below,
                sell_above: self.sell_above,
            });
        }
        Ok(())
    }

    /// Signal for a percent mispricing.
    #[must_use]
    pub fn classify(&self, percent: f64) -> Signal {
        if percent < self.buy_below {
            Signal::Buy
        } else if percent > self.sell_above {
            Signal::Sell
        } else {
            Signal::Fair
        }
    }
}

/// Market price of one bond compared with its theoretical price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mispricing {
    /// Bond identifier.
    pub bond_id: String,
    /// Market price.
    pub market_price: f64,
    /// Price off the curve.
    pub theoretical_price: f64,
    /// `market − theoretical`.
    pub mispricing: f64,
    /// `mispricing / theoretical × 100`.
    pub percent: f64,
    /// Resulting signal.
    pub signal: Signal,
    /// Whether the bond was used to build the curve.
    pub in_curve: bool,
}

impl Mispricing {
    /// Compares a market and a theoretical price.
    #[must_use]
    pub fn new(
        bond_id: impl Into<String>,
        market_price: f64,
        theoretical_price: f64,
        thresholds: &MispricingThresholds,
    ) -> Self {
        let mispricing = market_price - theoretical_price;
        let percent = mispricing / theoretical_price * 100.0;
        Self {
            bond_id: bond_id.into(),
            market_price,
            theoretical_price,
            mispricing,
            percent,
            signal: thresholds.classify(percent),
            in_curve: false,
        }
    }

    /// Marks whether the bond belongs to the curve set.
    #[must_use]
    pub fn with_in_curve(mut self, in_curve: bool) -> Self {
        self.in_curve = in_curve;
        self
    }

    /// Returns true for a buy or sell signal.
    #[must_use]
    pub fn is_opportunity(&self) -> bool {
        self.signal != Signal::Fair
    }
}
