//! Analysis of many independent portfolios.
//!
//! With the `parallel` feature, batches at or above the threshold are spread
//! over the rayon thread pool; otherwise they run in order on the caller's
//! thread. Results always come back in input order.

use serde::{Deserialize, Serialize};

use bondcurve_core::types::Bond;

use crate::analysis::{AnalysisSettings, CurveAnalysis};
use crate::error::AnalyticsResult;

/// Controls parallel execution of batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Enable parallel processing (requires the `parallel` feature).
    pub parallel: bool,
    /// Minimum batch size for parallel processing.
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 8,
        }
    }
}

impl BatchConfig {
    /// Always run in order on the caller's thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for `count` items.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

/// Maps `f` over `items`, in parallel when `config` allows it.
pub fn maybe_parallel_map<T, R, F>(items: &[T], config: &BatchConfig, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if config.should_parallelize(items.len()) {
            use rayon::prelude::*;
            return items.par_iter().map(f).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = config;

    items.iter().map(f).collect()
}

/// Runs [`CurveAnalysis::run`] on every portfolio.
pub fn analyze_portfolios(
    portfolios: &[Vec<Bond>],
    settings: &AnalysisSettings,
    config: &BatchConfig,
) -> Vec<AnalyticsResult<CurveAnalysis>> {
    maybe_parallel_map(portfolios, config, |bonds| CurveAnalysis::run(bonds, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondcurve_core::samples::SampleSet;

    #[test]
    fn test_results_in_input_order() {
        let portfolios: Vec<Vec<Bond>> = SampleSet::ALL.iter().map(|s| s.bonds()).collect();
        let results = analyze_portfolios(
            &portfolios,
            &AnalysisSettings::default(),
            &BatchConfig::default().with_threshold(1),
        );
        assert_eq!(results.len(), portfolios.len());
        for (bonds, result) in portfolios.iter().zip(&results) {
            let analysis = result.as_ref().unwrap();
            assert_eq!(analysis.matrix.num_bonds(), bonds.len());
        }
    }

    #[test]
    fn test_failures_stay_per_portfolio() {
        let portfolios = vec![SampleSet::NoArbitrage.bonds(), Vec::new()];
        let results = analyze_portfolios(
            &portfolios,
            &AnalysisSettings::default(),
            &BatchConfig::sequential(),
        );
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_should_parallelize() {
        let config = BatchConfig::sequential();
        assert!(!config.should_parallelize(1000));
        let config = BatchConfig::default();
        assert!(!config.should_parallelize(2));
        assert_eq!(
            config.should_parallelize(100),
            cfg!(feature = "parallel")
        );
    }

    #[test]
    fn test_maybe_parallel_map_preserves_order() {
        let items: Vec<u32> = (0..50).collect();
        let doubled = maybe_parallel_map(&items, &BatchConfig::default().with_threshold(1), |x| x * 2);
        assert_eq!(doubled, (0..50).map(|x| x * 2).collect::<Vec<_>>());
    }
}
