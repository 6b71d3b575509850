//! CLI command implementations.

pub mod arbitrage;
pub mod bootstrap;
pub mod config;
pub mod matrix;
pub mod risk;
pub mod trace;
pub mod ytm;

pub use arbitrage::ArbitrageArgs;
pub use bootstrap::BootstrapArgs;
pub use config::ConfigArgs;
pub use matrix::MatrixArgs;
pub use risk::RiskArgs;
pub use trace::TraceArgs;
pub use ytm::YtmArgs;

use bondcurve_config::EngineConfig;
use bondcurve_core::types::Compounding;

use crate::cli::OutputFormat;
use crate::output::Numbers;

/// State shared by every command.
pub struct Context {
    /// Effective configuration.
    pub config: EngineConfig,
    /// Requested output format.
    pub format: OutputFormat,
}

impl Context {
    pub fn new(config: EngineConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    /// Number formatting from the configuration.
    pub fn numbers(&self) -> Numbers {
        Numbers::new(self.config.output)
    }
}

/// Parses a compounding name for clap.
pub fn parse_compounding(s: &str) -> Result<Compounding, String> {
    s.parse::<Compounding>().map_err(|e| e.to_string())
}
