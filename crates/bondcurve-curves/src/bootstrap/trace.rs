//! Step-by-step derivation of the triangular bootstrap.

use bondcurve_core::types::{Compounding, TimeKey};
use serde::Serialize;

use super::triangular::{back_substitute, StepContext};
use crate::cashflow_matrix::CashflowMatrix;
use crate::error::CurveResult;
use crate::rates::discount_factor_to_spot_rate;

/// One resolved discount factor, with the equation that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapStep {
    /// 1-based step number (the bond's row).
    pub step: usize,
    /// Time whose factor this step resolves.
    pub time: TimeKey,
    /// Identifier of the bond used.
    pub bond_id: String,
    /// Human-readable summary.
    pub description: String,
    /// `price = cf × knownDF + … + cf × DF(t)`.
    pub equation: String,
    /// The resolved discount factor.
    pub discount_factor: f64,
    /// Continuously compounded spot rate implied by the factor.
    pub spot_rate: f64,
}

/// Records each step of the triangular bootstrap.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapTracer {
    tolerance: f64,
}

impl Default for BootstrapTracer {
    fn default() -> Self {
        Self::new(super::DEFAULT_TRIANGULAR_TOLERANCE)
    }
}

impl BootstrapTracer {
    /// Creates a tracer using `tolerance` for zero tests.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Traces the bootstrap of a triangular matrix.
    ///
    /// Fails with the same error as the solver when the matrix is not
    /// triangular.
    pub fn trace(&self, matrix: &CashflowMatrix) -> CurveResult<Vec<BootstrapStep>> {
        let mut raw = Vec::with_capacity(matrix.num_bonds());
        back_substitute(matrix, self.tolerance, |ctx| {
            raw.push((ctx.row, ctx.column, self.equation(ctx, matrix.times()), ctx.factor));
        })?;

        raw.into_iter()
            .map(|(row, column, equation, factor)| {
                let time = matrix.times()[column];
                let bond_id = matrix.bonds()[row].id.clone();
                Ok(BootstrapStep {
                    step: row + 1,
                    time,
                    description: format!("Solving for DF({time}) from bond {bond_id}"),
                    bond_id,
                    equation,
                    discount_factor: factor,
                    spot_rate: discount_factor_to_spot_rate(
                        factor,
                        time.as_years(),
                        Compounding::Continuous,
                    )?,
                })
            })
            .collect()
    }

    fn equation(&self, ctx: &StepContext<'_>, times: &[TimeKey]) -> String {
        let terms: Vec<String> = ctx.row_values[..=ctx.column]
            .iter()
            .enumerate()
            .filter(|(_, cf)| cf.abs() > self.tolerance)
            .map(|(j, cf)| {
                if j < ctx.column {
                    format!("{cf:.2} × {:.4}", ctx.known[j])
                } else {
                    format!("{cf:.2} × DF({})", times[j])
                }
            })
            .collect();
        format!("{:.2} = {}", ctx.price, terms.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcurve_core::samples::SampleSet;
    use bondcurve_core::types::{Bond, Frequency};

    #[test]
    fn test_equation_format() {
        let bonds = vec![
            Bond::zero_coupon("Z1", 1.0, 95.0, 100.0),
            Bond::new("C2", 2.0, 0.05, Frequency::Annual, 100.0, 100.0),
        ];
        let matrix = CashflowMatrix::build(&bonds).unwrap();
        let steps = BootstrapTracer::default().trace(&matrix).unwrap();

        assert_eq!(steps[0].equation, "95.00 = 100.00 × DF(1)");
        assert_eq!(steps[1].equation, "100.00 = 5.00 × 0.9500 + 105.00 × DF(2)");
        assert_eq!(steps[1].description, "Solving for DF(2) from bond C2");
        assert_eq!(steps[1].step, 2);
    }

    #[test]
    fn test_spot_rate_is_continuous() {
        let matrix = CashflowMatrix::build(&[Bond::zero_coupon("Z", 2.0, 90.0, 100.0)]).unwrap();
        let steps = BootstrapTracer::default().trace(&matrix).unwrap();
        assert_relative_eq!(steps[0].spot_rate, -(0.9_f64.ln()) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_semi_annual_times_in_description() {
        let matrix = CashflowMatrix::build(&SampleSet::Triangular.bonds()).unwrap();
        let steps = BootstrapTracer::default().trace(&matrix).unwrap();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[2].description, "Solving for DF(1.5) from bond 3");
        assert!(steps[2].equation.starts_with("102.10 = 2.00 × "));
        assert!(steps[2].equation.ends_with("102.00 × DF(1.5)"));
    }

    #[test]
    fn test_non_triangular_is_error() {
        let matrix = CashflowMatrix::build(&SampleSet::Overdetermined.bonds()).unwrap();
        assert!(BootstrapTracer::default().trace(&matrix).is_err());
    }
}
