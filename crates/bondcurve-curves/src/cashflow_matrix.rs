//! Cashflow matrix construction.
//!
//! Row `i` holds the cashflows of bond `i` against the pooled, sorted,
//! de-duplicated payment times of the whole portfolio. The entry at a bond's
//! maturity carries the final coupon plus face value; every time the bond
//! does not pay is zero.

use std::collections::BTreeSet;

use bondcurve_core::portfolio::validate_portfolio;
use bondcurve_core::types::{Bond, TimeKey};
use bondcurve_math::linear_algebra::is_lower_triangular;
use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::{Serialize, Serializer};

use crate::error::{CurveError, CurveResult};

/// Cashflows of a bond portfolio, indexed by bond and payment time.
///
/// # Example
///
/// ```rust
/// use bondcurve_core::samples::SampleSet;
/// use bondcurve_curves::CashflowMatrix;
///
/// let matrix = CashflowMatrix::build(&SampleSet::Triangular.bonds()).unwrap();
/// assert_eq!(matrix.num_bonds(), 6);
/// assert_eq!(matrix.num_times(), 6);
/// assert!(matrix.is_triangular(1e-10));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CashflowMatrix {
    bonds: Vec<Bond>,
    times: Vec<TimeKey>,
    #[serde(serialize_with = "serialize_rows")]
    matrix: DMatrix<f64>,
    #[serde(serialize_with = "serialize_vector")]
    prices: DVector<f64>,
}

impl CashflowMatrix {
    /// Builds the matrix for a portfolio.
    ///
    /// The portfolio is validated first; non-integral schedules, duplicate
    /// identifiers and out-of-range fields are rejected.
    pub fn build(bonds: &[Bond]) -> CurveResult<Self> {
        validate_portfolio(bonds)?;

        let schedules = bonds
            .iter()
            .map(Bond::schedule)
            .collect::<Result<Vec<_>, _>>()?;

        let times: Vec<TimeKey> = schedules
            .iter()
            .flatten()
            .map(|cf| cf.time)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut matrix = DMatrix::zeros(bonds.len(), times.len());
        for (i, (bond, schedule)) in bonds.iter().zip(&schedules).enumerate() {
            for cf in schedule {
                let j = column_of(&times, cf.time, &bond.id)?;
                matrix[(i, j)] += cf.amount;
            }
        }

        let prices = DVector::from_iterator(bonds.len(), bonds.iter().map(|b| b.price));

        debug!(
            "built cashflow matrix: {} bonds x {} payment times",
            bonds.len(),
            times.len()
        );

        Ok(Self {
            bonds: bonds.to_vec(),
            times,
            matrix,
            prices,
        })
    }

    /// The bonds, in input order.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// The pooled payment times, ascending.
    #[must_use]
    pub fn times(&self) -> &[TimeKey] {
        &self.times
    }

    /// The raw matrix.
    #[must_use]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Market prices, parallel to the rows.
    #[must_use]
    pub fn prices(&self) -> &DVector<f64> {
        &self.prices
    }

    /// Number of bonds (rows).
    #[must_use]
    pub fn num_bonds(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of distinct payment times (columns).
    #[must_use]
    pub fn num_times(&self) -> usize {
        self.matrix.ncols()
    }

    /// Row `i` as a vector.
    #[must_use]
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.matrix.row(i).iter().copied().collect()
    }

    /// Returns true if each bond introduces exactly one new payment time,
    /// in input order.
    #[must_use]
    pub fn is_triangular(&self, tolerance: f64) -> bool {
        is_lower_triangular(&self.matrix, tolerance)
    }

    /// Model prices `C·d` for a vector of discount factors on this time axis.
    pub fn reprice(&self, discount_factors: &[f64]) -> CurveResult<Vec<f64>> {
        if discount_factors.len() != self.num_times() {
            return Err(CurveError::length_mismatch(
                "discount factors",
                self.num_times(),
                discount_factors.len(),
            ));
        }
        let d = DVector::from_column_slice(discount_factors);
        Ok((&self.matrix * d).iter().copied().collect())
    }

    /// Residuals `C·d − p`.
    pub fn residuals(&self, discount_factors: &[f64]) -> CurveResult<Vec<f64>> {
        let model = self.reprice(discount_factors)?;
        Ok(model
            .iter()
            .zip(self.prices.iter())
            .map(|(m, p)| m - p)
            .collect())
    }
}

/// Cashflow row of `bond` against an arbitrary ascending time axis.
///
/// Fails if any payment of the bond is missing from `times`.
pub fn bond_row(bond: &Bond, times: &[TimeKey]) -> CurveResult<Vec<f64>> {
    let mut row = vec![0.0; times.len()];
    for cf in bond.schedule()? {
        row[column_of(times, cf.time, &bond.id)?] += cf.amount;
    }
    Ok(row)
}

fn column_of(times: &[TimeKey], time: TimeKey, bond_id: &str) -> CurveResult<usize> {
    times
        .binary_search(&time)
        .map_err(|_| CurveError::UnmappedCashflow {
            bond_id: bond_id.to_string(),
            time: time.as_years(),
        })
}

fn serialize_rows<S: Serializer>(matrix: &DMatrix<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    let rows: Vec<Vec<f64>> = matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect();
    rows.serialize(serializer)
}

fn serialize_vector<S: Serializer>(v: &DVector<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    v.as_slice().serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcurve_core::samples::SampleSet;
    use bondcurve_core::types::Frequency;
    use bondcurve_core::CoreError;

    #[test]
    fn test_triangular_sample_layout() {
        let matrix = CashflowMatrix::build(&SampleSet::Triangular.bonds()).unwrap();

        let units: Vec<u64> = matrix.times().iter().map(TimeKey::units).collect();
        assert_eq!(units, vec![500, 1000, 1500, 2000, 2500, 3000]);

        // Bond 4: 4.5% semi-annual, 2 years
        let row = matrix.row(3);
        assert_relative_eq!(row[0], 2.25, epsilon = 1e-12);
        assert_relative_eq!(row[2], 2.25, epsilon = 1e-12);
        assert_relative_eq!(row[3], 102.25, epsilon = 1e-12);
        assert_relative_eq!(row[4], 0.0);
        assert!(matrix.is_triangular(1e-10));
    }

    #[test]
    fn test_overdetermined_sample_pools_times() {
        let matrix = CashflowMatrix::build(&SampleSet::Overdetermined.bonds()).unwrap();

        let units: Vec<u64> = matrix.times().iter().map(TimeKey::units).collect();
        assert_eq!(units, vec![250, 500, 750, 1000, 1250, 1500, 1750, 2000]);
        assert_eq!(matrix.num_bonds(), 9);
        assert!(!matrix.is_triangular(1e-10));

        // Bond 2: 3.2% quarterly, 0.75 years
        let row = matrix.row(1);
        assert_relative_eq!(row[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(row[1], 0.8, epsilon = 1e-12);
        assert_relative_eq!(row[2], 100.8, epsilon = 1e-12);
        assert_relative_eq!(row[3], 0.0);
    }

    #[test]
    fn test_nonzero_entries_match_schedule() {
        let bonds = SampleSet::Overdetermined.bonds();
        let matrix = CashflowMatrix::build(&bonds).unwrap();

        for (i, bond) in bonds.iter().enumerate() {
            let pay_times: Vec<TimeKey> = bond.schedule().unwrap().iter().map(|c| c.time).collect();
            for (j, t) in matrix.times().iter().enumerate() {
                let entry = matrix.matrix()[(i, j)];
                assert_eq!(entry != 0.0, pay_times.contains(t), "bond {} t={t}", bond.id);
            }
        }
    }

    #[test]
    fn test_rejects_invalid_portfolio() {
        assert!(matches!(
            CashflowMatrix::build(&[]),
            Err(CurveError::Core(CoreError::EmptyPortfolio))
        ));

        let odd = Bond::new("odd", 0.6, 0.05, Frequency::SemiAnnual, 100.0, 100.0);
        assert!(matches!(
            CashflowMatrix::build(&[odd]),
            Err(CurveError::Core(CoreError::NonIntegralSchedule { .. }))
        ));
    }

    #[test]
    fn test_bond_row_against_foreign_axis() {
        let bond = Bond::new("Q", 0.5, 0.04, Frequency::Quarterly, 100.0, 100.0);
        let semi_axis = vec![TimeKey::from_units(500), TimeKey::from_units(1000)];

        assert!(matches!(
            bond_row(&bond, &semi_axis),
            Err(CurveError::UnmappedCashflow { time, .. }) if time == 0.25
        ));

        let axis = vec![
            TimeKey::from_units(250),
            TimeKey::from_units(500),
            TimeKey::from_units(1000),
        ];
        let row = bond_row(&bond, &axis).unwrap();
        assert_relative_eq!(row[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(row[1], 101.0, epsilon = 1e-12);
        assert_relative_eq!(row[2], 0.0);
    }

    #[test]
    fn test_reprice_and_residuals() {
        let bonds = vec![
            Bond::zero_coupon("Z1", 1.0, 95.0, 100.0),
            Bond::new("C2", 2.0, 0.05, Frequency::Annual, 100.0, 100.0),
        ];
        let matrix = CashflowMatrix::build(&bonds).unwrap();

        let model = matrix.reprice(&[0.95, 0.9]).unwrap();
        assert_relative_eq!(model[0], 95.0, epsilon = 1e-12);
        assert_relative_eq!(model[1], 5.0 * 0.95 + 105.0 * 0.9, epsilon = 1e-12);

        let residuals = matrix.residuals(&[0.95, 0.9]).unwrap();
        assert_relative_eq!(residuals[1], model[1] - 100.0, epsilon = 1e-12);

        assert!(matches!(
            matrix.reprice(&[0.9]),
            Err(CurveError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_serializes_rows() {
        let matrix = CashflowMatrix::build(&[Bond::zero_coupon("Z", 1.0, 95.0, 100.0)]).unwrap();
        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json["times"], serde_json::json!([1.0]));
        assert_eq!(json["matrix"], serde_json::json!([[100.0]]));
        assert_eq!(json["prices"], serde_json::json!([95.0]));
    }
}
