//! Portfolio input: CSV or JSON files, or a built-in sample.

use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use bondcurve_core::samples::SampleSet;
use bondcurve_core::types::Bond;

use crate::error::{CliError, CliResult};

/// Where the bonds come from.
#[derive(Args, Debug, Clone)]
pub struct PortfolioArgs {
    /// Portfolio file (.csv with a header row, or .json)
    #[arg(long, conflicts_with = "sample")]
    pub file: Option<PathBuf>,

    /// Built-in sample portfolio (triangular, overdetermined, no-arbitrage,
    /// mispriced-bond, multiple-mispricings)
    #[arg(short, long, value_parser = SampleSet::from_str)]
    pub sample: Option<SampleSet>,
}

impl PortfolioArgs {
    /// Loads the selected portfolio.
    pub fn load(&self) -> CliResult<Vec<Bond>> {
        match (&self.file, self.sample) {
            (Some(path), _) => read_portfolio(path),
            (None, Some(sample)) => {
                debug!("using sample portfolio {sample}");
                Ok(sample.bonds())
            }
            (None, None) => Err(CliError::NoPortfolio),
        }
    }

    /// Returns true when a portfolio was given.
    pub fn is_given(&self) -> bool {
        self.file.is_some() || self.sample.is_some()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortfolioFile {
    List(Vec<Bond>),
    Wrapped { bonds: Vec<Bond> },
}

/// Reads bonds from a CSV or JSON file, chosen by extension.
///
/// CSV columns: `id,maturity,coupon_rate,frequency,price,face_value`, with
/// rates as decimals and frequency as payments per year.
pub fn read_portfolio(path: &Path) -> CliResult<Vec<Bond>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let bonds = match extension.as_deref() {
        Some("csv") => read_csv(path)?,
        Some("json") => read_json(path)?,
        _ => {
            return Err(CliError::UnsupportedInput {
                path: path.to_path_buf(),
            })
        }
    };
    debug!("read {} bonds from {}", bonds.len(), path.display());
    Ok(bonds)
}

fn read_csv(path: &Path) -> CliResult<Vec<Bond>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| parse_error(path, &e))?;

    reader
        .deserialize::<Bond>()
        .map(|record| record.map_err(|e| parse_error(path, &e)))
        .collect()
}

fn read_json(path: &Path) -> CliResult<Vec<Bond>> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: PortfolioFile =
        serde_json::from_str(&content).map_err(|e| parse_error(path, &e))?;
    Ok(match file {
        PortfolioFile::List(bonds) | PortfolioFile::Wrapped { bonds } => bonds,
    })
}

fn parse_error(path: &Path, err: &dyn std::fmt::Display) -> CliError {
    CliError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
