//! Bond definition and payment schedule.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Frequency, TimeKey};

/// Tolerance used to decide whether `maturity × frequency` is a whole number.
pub const SCHEDULE_TOLERANCE: f64 = 1e-6;

/// A fixed-coupon bullet bond.
///
/// Rates are decimals (`0.05` for 5%), maturity is in years from today and
/// prices are quoted in currency units on the same scale as `face_value`.
///
/// Field names also accept the camelCase spelling used by JSON front-ends
/// (`couponRate`, `faceValue`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    /// Identifier, unique within a portfolio.
    pub id: String,
    /// Years to maturity.
    pub maturity: f64,
    /// Annual coupon rate as a decimal.
    #[serde(alias = "couponRate")]
    pub coupon_rate: f64,
    /// Coupon payments per year.
    pub frequency: Frequency,
    /// Market (clean) price.
    #[serde(alias = "marketPrice")]
    pub price: f64,
    /// Face (par) value.
    #[serde(alias = "faceValue")]
    pub face_value: f64,
}

/// A single scheduled payment of a bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondCashflow {
    /// Payment number, starting at 1.
    pub period: u32,
    /// Payment time.
    pub time: TimeKey,
    /// Amount paid (coupon, plus face value on the last payment).
    pub amount: f64,
}

impl Bond {
    /// Creates a new bond.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        maturity: f64,
        coupon_rate: f64,
        frequency: Frequency,
        price: f64,
        face_value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            maturity,
            coupon_rate,
            frequency,
            price,
            face_value,
        }
    }

    /// Creates a zero-coupon bond (annual schedule, no coupons).
    #[must_use]
    pub fn zero_coupon(id: impl Into<String>, maturity: f64, price: f64, face_value: f64) -> Self {
        Self::new(id, maturity, 0.0, Frequency::Annual, price, face_value)
    }

    /// Returns a copy of this bond with a different market price.
    #[must_use]
    pub fn with_price(&self, price: f64) -> Self {
        Self {
            price,
            ..self.clone()
        }
    }

    /// Returns true if the bond pays no coupon.
    #[must_use]
    pub fn is_zero_coupon(&self) -> bool {
        self.coupon_rate == 0.0
    }

    /// Coupon paid each period: `face × rate ÷ frequency`.
    #[must_use]
    pub fn coupon_payment(&self) -> f64 {
        self.face_value * self.coupon_rate / self.frequency.as_f64()
    }

    /// Coupon paid over a year.
    #[must_use]
    pub fn annual_coupon(&self) -> f64 {
        self.face_value * self.coupon_rate
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> CoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::invalid_bond(&self.id, "identifier is empty"));
        }
        let checks = [
            ("maturity", self.maturity, self.maturity > 0.0),
            ("price", self.price, self.price > 0.0),
            ("face value", self.face_value, self.face_value > 0.0),
            ("coupon rate", self.coupon_rate, self.coupon_rate >= 0.0),
        ];
        for (field, value, ok) in checks {
            if !value.is_finite() || !ok {
                let bound = if field == "coupon rate" {
                    "non-negative"
                } else {
                    "positive"
                };
                return Err(CoreError::invalid_bond(
                    &self.id,
                    format!("{field} must be finite and {bound}, got {value}"),
                ));
            }
        }
        self.num_payments().map(|_| ())
    }

    /// Number of scheduled payments, `maturity × frequency`.
    ///
    /// Rejects schedules that are not a whole number of periods rather than
    /// rounding away a partial final period.
    pub fn num_payments(&self) -> CoreResult<u32> {
        let frequency = self.frequency.periods_per_year();
        let periods = self.maturity * f64::from(frequency);
        let rounded = periods.round();
        if (periods - rounded).abs() > SCHEDULE_TOLERANCE || rounded < 1.0 {
            return Err(CoreError::NonIntegralSchedule {
                bond_id: self.id.clone(),
                maturity: self.maturity,
                frequency,
                periods,
            });
        }
        if rounded > f64::from(u32::MAX) {
            return Err(CoreError::invalid_bond(&self.id, "maturity is too long"));
        }
        Ok(rounded as u32)
    }

    /// Time key of the final payment.
    pub fn maturity_key(&self) -> CoreResult<TimeKey> {
        Ok(TimeKey::from_period(self.num_payments()?, self.frequency))
    }

    /// The payment schedule in time order.
    ///
    /// Only actual payments are listed: a zero-coupon bond has a single entry
    /// at maturity, still numbered with its period on the frequency grid.
    pub fn schedule(&self) -> CoreResult<Vec<BondCashflow>> {
        let n = self.num_payments()?;
        let coupon = self.coupon_payment();
        Ok((1..=n)
            .map(|period| BondCashflow {
                period,
                time: TimeKey::from_period(period, self.frequency),
                amount: if period == n {
                    coupon + self.face_value
                } else {
                    coupon
                },
            })
            .filter(|cf| cf.amount != 0.0)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn semi_annual() -> Bond {
        Bond::new("2Y", 2.0, 0.045, Frequency::SemiAnnual, 103.5, 100.0)
    }

    #[test]
    fn test_coupon_payment() {
        assert_relative_eq!(semi_annual().coupon_payment(), 2.25, epsilon = 1e-12);
        assert_relative_eq!(semi_annual().annual_coupon(), 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_schedule() {
        let schedule = semi_annual().schedule().unwrap();
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule[0].time.units(), 500);
        assert_relative_eq!(schedule[0].amount, 2.25, epsilon = 1e-12);
        assert_eq!(schedule[3].time.units(), 2000);
        assert_relative_eq!(schedule[3].amount, 102.25, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_coupon_schedule() {
        let bond = Bond::zero_coupon("Z", 3.0, 860.0, 1000.0);
        let schedule = bond.schedule().unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].period, 3);
        assert_eq!(schedule[0].time.units(), 3000);
        assert_relative_eq!(schedule[0].amount, 1000.0);
        assert!(bond.is_zero_coupon());
    }

    #[test]
    fn test_zero_coupon_schedule_ignores_frequency_grid() {
        for frequency in [Frequency::SemiAnnual, Frequency::Quarterly] {
            let bond = Bond::new("Z", 1.5, 0.0, frequency, 94.0, 100.0);
            let schedule = bond.schedule().unwrap();
            assert_eq!(schedule.len(), 1, "{frequency}");
            assert_eq!(schedule[0].time.units(), 1500);
            assert_eq!(
                schedule[0].period,
                bond.num_payments().unwrap(),
                "{frequency}"
            );
        }
    }

    #[test]
    fn test_quarterly_fraction_is_integral() {
        let bond = Bond::new("Q", 0.75, 0.032, Frequency::Quarterly, 100.8, 100.0);
        assert_eq!(bond.num_payments().unwrap(), 3);
        assert_eq!(bond.maturity_key().unwrap().units(), 750);
    }

    #[test]
    fn test_non_integral_schedule_rejected() {
        let bond = Bond::new("odd", 0.6, 0.05, Frequency::SemiAnnual, 100.0, 100.0);
        assert!(matches!(
            bond.num_payments(),
            Err(CoreError::NonIntegralSchedule { .. })
        ));
        assert!(bond.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let base = semi_annual();
        assert!(base.validate().is_ok());

        let mut bad = base.clone();
        bad.price = 0.0;
        assert!(bad.validate().is_err());

        let mut bad = base.clone();
        bad.face_value = -100.0;
        assert!(bad.validate().is_err());

        let mut bad = base.clone();
        bad.maturity = f64::NAN;
        assert!(bad.validate().is_err());

        let mut bad = base.clone();
        bad.coupon_rate = -0.01;
        assert!(bad.validate().is_err());

        let mut bad = base;
        bad.id = "  ".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_with_price_replaces_record() {
        let bond = semi_annual();
        let repriced = bond.with_price(99.0);
        assert_relative_eq!(repriced.price, 99.0);
        assert_eq!(repriced.id, bond.id);
        assert_relative_eq!(bond.price, 103.5);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"id":"1","maturity":0.5,"couponRate":0.03,"frequency":2,"price":100.5,"faceValue":100}"#;
        let bond: Bond = serde_json::from_str(json).unwrap();
        assert_eq!(bond.frequency, Frequency::SemiAnnual);
        assert_relative_eq!(bond.coupon_rate, 0.03);
        assert_relative_eq!(bond.face_value, 100.0);
    }
}
