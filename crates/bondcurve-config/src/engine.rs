//! Top-level engine configuration.

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use bondcurve_analytics::analysis::AnalysisSettings;
use bondcurve_analytics::arbitrage::ArbitrageConfig;
use bondcurve_analytics::batch::BatchConfig;
use bondcurve_bonds::pricing::YieldSolverConfig;
use bondcurve_core::types::Compounding;
use bondcurve_curves::bootstrap::DiscountSolverConfig;
use bondcurve_curves::repricing::tolerances;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Log filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `bondcurve_curves=debug`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Number formatting for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Decimals for prices and amounts.
    pub price_decimals: usize,
    /// Decimals for discount factors.
    pub factor_decimals: usize,
    /// Decimals for rates shown in percent.
    pub rate_decimals: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            price_decimals: 4,
            factor_decimals: 6,
            rate_decimals: 4,
        }
    }
}

/// Every tunable of the engine in one document.
///
/// Missing sections and fields take their defaults, so an empty file is a
/// valid configuration.
///
/// ```rust
/// use bondcurve_config::EngineConfig;
///
/// let config = EngineConfig::from_toml_str(r#"
///     compounding = "annual"
///
///     [yield_solver]
///     max_iterations = 50
/// "#).unwrap();
///
/// assert_eq!(config.yield_solver.max_iterations, 50);
/// assert_eq!(config.yield_solver.tolerance, 1e-8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Convention for reported spot rates.
    pub compounding: Compounding,
    /// Absolute tolerance when repricing bonds off the curve.
    pub repricing_tolerance: f64,
    /// Record bootstrap steps in full analyses.
    pub trace: bool,
    /// Discount factor solver.
    pub solver: DiscountSolverConfig,
    /// Yield solver.
    pub yield_solver: YieldSolverConfig,
    /// Arbitrage detection.
    pub arbitrage: ArbitrageConfig,
    /// Batch execution.
    pub batch: BatchConfig,
    /// Logging.
    pub logging: LoggingConfig,
    /// Report formatting.
    pub output: OutputConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            compounding: Compounding::default(),
            repricing_tolerance: tolerances::DEFAULT,
            trace: true,
            solver: DiscountSolverConfig::default(),
            yield_solver: YieldSolverConfig::default(),
            arbitrage: ArbitrageConfig::default(),
            batch: BatchConfig::default(),
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Loads and validates a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match format.as_deref() {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates TOML.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates JSON.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Settings for a full curve analysis.
    #[must_use]
    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            solver: self.solver,
            yield_solver: self.yield_solver,
            compounding: self.compounding,
            repricing_tolerance: self.repricing_tolerance,
            trace: self.trace,
        }
    }
}

fn positive(field: &str, value: f64, errors: &mut Vec<ValidationError>) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ValidationError::with_rule(
            field,
            format!("must be positive and finite, got {value}"),
            "positive",
        ));
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        positive("repricing_tolerance", self.repricing_tolerance, &mut errors);
        positive(
            "solver.triangular_tolerance",
            self.solver.triangular_tolerance,
            &mut errors,
        );
        positive(
            "arbitrage.triangular_tolerance",
            self.arbitrage.triangular_tolerance,
            &mut errors,
        );

        if let Err(err) = self.yield_solver.validate() {
            errors.push(ValidationError::with_rule(
                "yield_solver",
                err.to_string(),
                "yield_solver",
            ));
        }

        if let Err(err) = self.arbitrage.thresholds.validate() {
            errors.push(
                ValidationError::with_rule("thresholds", err.to_string(), "ordered_thresholds")
                    .in_section("arbitrage"),
            );
        }

        if self.logging.filter.trim().is_empty() {
            errors.push(ValidationError::new("logging.filter", "cannot be empty"));
        }

        for (field, value) in [
            ("price_decimals", self.output.price_decimals),
            ("factor_decimals", self.output.factor_decimals),
            ("rate_decimals", self.output.rate_decimals),
        ] {
            if value > 15 {
                errors.push(
                    ValidationError::with_rule(field, "cannot exceed 15", "max_precision")
                        .in_section("output"),
                );
            }
        }

        errors
    }
}
