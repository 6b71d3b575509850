//! End-to-end curve analysis of a portfolio.
//!
//! ```text
//! validate → cashflow matrix → discount factors → spot rates
//!          → forward rates → yields → bootstrap trace → repricing
//! ```

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use bondcurve_bonds::pricing::{YieldResult, YieldSolver, YieldSolverConfig};
use bondcurve_bonds::BondResult;
use bondcurve_core::portfolio::validate_portfolio;
use bondcurve_core::types::{Bond, Compounding};
use bondcurve_curves::bootstrap::{
    BootstrapStep, BootstrapTracer, DiscountFactorSolver, DiscountSolution, DiscountSolverConfig,
};
use bondcurve_curves::rates::{spot_rates_to_forward_rates, ForwardRate, SpotRate};
use bondcurve_curves::repricing::{tolerances, RepricingReport};
use bondcurve_curves::CashflowMatrix;

use crate::error::AnalyticsResult;

/// Settings for [`CurveAnalysis::run`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Discount factor solver settings.
    pub solver: DiscountSolverConfig,
    /// Yield solver settings.
    pub yield_solver: YieldSolverConfig,
    /// Convention for the reported spot rates.
    pub compounding: Compounding,
    /// Absolute tolerance of the repricing check.
    pub repricing_tolerance: f64,
    /// Record the bootstrap steps when the matrix is triangular.
    pub trace: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            solver: DiscountSolverConfig::default(),
            yield_solver: YieldSolverConfig::default(),
            compounding: Compounding::default(),
            repricing_tolerance: tolerances::DEFAULT,
            trace: true,
        }
    }
}

/// Yield of one bond, or why it could not be found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldOutcome {
    /// Bond identifier.
    pub bond_id: String,
    /// Solved yield.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<YieldResult>,
    /// Solver failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl YieldOutcome {
    fn new(bond_id: &str, result: BondResult<YieldResult>) -> Self {
        match result {
            Ok(result) => Self {
                bond_id: bond_id.to_string(),
                result: Some(result),
                error: None,
            },
            Err(err) => Self {
                bond_id: bond_id.to_string(),
                result: None,
                error: Some(err.to_string()),
            },
        }
    }

    /// The yield, when solved.
    #[must_use]
    pub fn yield_value(&self) -> Option<f64> {
        self.result.as_ref().map(|r| r.yield_value)
    }
}

/// Everything derived from one portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct CurveAnalysis {
    /// The cashflow matrix.
    pub matrix: CashflowMatrix,
    /// Discount factors and solver diagnostics.
    pub solution: DiscountSolution,
    /// Convention of `spot_rates`.
    pub compounding: Compounding,
    /// One spot rate per payment time.
    pub spot_rates: Vec<SpotRate>,
    /// Forwards between adjacent times; empty with a single time.
    pub forward_rates: Vec<ForwardRate>,
    /// One yield per bond, in input order.
    pub yields: Vec<YieldOutcome>,
    /// Bootstrap steps, for triangular matrices when tracing is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<BootstrapStep>>,
    /// Fitted prices against market.
    pub repricing: RepricingReport,
}

impl CurveAnalysis {
    /// Runs the full pipeline over `bonds`.
    pub fn run(bonds: &[Bond], settings: &AnalysisSettings) -> AnalyticsResult<Self> {
        validate_portfolio(bonds)?;

        let matrix = CashflowMatrix::build(bonds)?;
        debug!(
            "analysing {} bonds over {} payment times",
            matrix.num_bonds(),
            matrix.num_times()
        );

        let solution = DiscountFactorSolver::new(settings.solver).solve(&matrix)?;
        let spot_rates = solution.discount_factors.to_spot_rates(settings.compounding)?;

        let forward_rates = if spot_rates.len() >= 2 {
            spot_rates_to_forward_rates(&spot_rates)?
        } else {
            debug!("single payment time, no forward rates");
            Vec::new()
        };

        let solver = YieldSolver::new(settings.yield_solver);
        let yields = bonds
            .iter()
            .map(|bond| YieldOutcome::new(&bond.id, solver.solve(bond)))
            .collect();

        let trace = if settings.trace && solution.is_exact() {
            Some(BootstrapTracer::new(settings.solver.triangular_tolerance).trace(&matrix)?)
        } else {
            None
        };

        let repricing = RepricingReport::build(
            &matrix,
            &solution.discount_factors,
            settings.repricing_tolerance,
        )?;
        if solution.is_exact() && !repricing.is_valid() {
            warn!(
                "exact bootstrap does not reprice: {:?}",
                repricing.failed_bonds()
            );
        }
        info!(
            "curve analysis done: {} ({} of {} bonds reprice within {:e})",
            solution.method,
            repricing.passed_count(),
            matrix.num_bonds(),
            settings.repricing_tolerance
        );

        Ok(Self {
            matrix,
            solution,
            compounding: settings.compounding,
            spot_rates,
            forward_rates,
            yields,
            trace,
            repricing,
        })
    }

    /// Yield outcome for a bond.
    #[must_use]
    pub fn yield_for(&self, bond_id: &str) -> Option<&YieldOutcome> {
        self.yields.iter().find(|y| y.bond_id == bond_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcurve_core::samples::SampleSet;
    use bondcurve_core::types::Frequency;
    use bondcurve_core::ErrorCategory;
    use bondcurve_curves::bootstrap::SolveMethod;

    #[test]
    fn test_triangular_pipeline() {
        let bonds = SampleSet::Triangular.bonds();
        let analysis = CurveAnalysis::run(&bonds, &AnalysisSettings::default()).unwrap();

        assert_eq!(analysis.solution.method, SolveMethod::Triangular);
        assert_eq!(analysis.spot_rates.len(), 6);
        assert_eq!(analysis.forward_rates.len(), 5);
        assert_eq!(analysis.yields.len(), 6);
        assert_eq!(analysis.trace.as_ref().map(Vec::len), Some(6));
        assert!(analysis.repricing.is_valid());
    }

    #[test]
    fn test_least_squares_pipeline_has_no_trace() {
        let bonds = SampleSet::Overdetermined.bonds();
        let analysis = CurveAnalysis::run(&bonds, &AnalysisSettings::default()).unwrap();
        assert!(!analysis.solution.is_exact());
        assert!(analysis.trace.is_none());
        assert_eq!(analysis.spot_rates.len(), 8);
    }

    #[test]
    fn test_undetermined_portfolio_is_singular() {
        let bonds = vec![
            Bond::new("Z1", 1.0, 0.0, Frequency::SemiAnnual, 97.0, 100.0),
            Bond::new("C15", 1.5, 0.04, Frequency::SemiAnnual, 100.0, 100.0),
        ];
        let err = CurveAnalysis::run(&bonds, &AnalysisSettings::default()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::SingularSystem);

        let mut settings = AnalysisSettings::default();
        settings.solver.allow_minimum_norm = true;
        let analysis = CurveAnalysis::run(&bonds, &settings).unwrap();
        assert_eq!(analysis.spot_rates.len(), 3);
    }

    #[test]
    fn test_single_bond_skips_forwards() {
        let bonds = vec![Bond::zero_coupon("Z", 1.0, 952.38, 1000.0)];
        let analysis = CurveAnalysis::run(&bonds, &AnalysisSettings::default()).unwrap();
        assert!(analysis.forward_rates.is_empty());
        assert_relative_eq!(
            analysis.solution.discount_factors.factors()[0],
            0.95238,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_trace_can_be_disabled() {
        let settings = AnalysisSettings {
            trace: false,
            ..AnalysisSettings::default()
        };
        let analysis = CurveAnalysis::run(&SampleSet::NoArbitrage.bonds(), &settings).unwrap();
        assert!(analysis.trace.is_none());
    }

    #[test]
    fn test_yield_failure_is_reported_not_fatal() {
        let bonds = vec![
            Bond::zero_coupon("Z1", 1.0, 950.0, 1000.0),
            Bond::zero_coupon("Z2", 2.0, 5.0, 1000.0),
        ];
        let analysis = CurveAnalysis::run(&bonds, &AnalysisSettings::default()).unwrap();
        assert!(analysis.yield_for("Z1").unwrap().yield_value().is_some());
        let z2 = analysis.yield_for("Z2").unwrap();
        assert!(z2.result.is_none());
        assert!(z2.error.as_deref().unwrap().contains("Z2"));
    }

    #[test]
    fn test_empty_portfolio_is_error() {
        assert!(CurveAnalysis::run(&[], &AnalysisSettings::default()).is_err());
    }

    #[test]
    fn test_analysis_serializes() {
        let analysis =
            CurveAnalysis::run(&SampleSet::NoArbitrage.bonds(), &AnalysisSettings::default())
                .unwrap();
        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json.get("spot_rates").is_some());
        assert!(json.get("trace").is_some());
    }
}
