//! Portfolio-level validation.

use log::trace;
use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::types::Bond;

/// Validates a bond portfolio.
///
/// Fails on an empty portfolio, on duplicate identifiers and on the first
/// bond that does not pass [`Bond::validate`].
pub fn validate_portfolio(bonds: &[Bond]) -> CoreResult<()> {
    if bonds.is_empty() {
        return Err(CoreError::EmptyPortfolio);
    }

    let mut seen = HashSet::with_capacity(bonds.len());
    for bond in bonds {
        if !seen.insert(bond.id.as_str()) {
            return Err(CoreError::DuplicateBondId(bond.id.clone()));
        }
        bond.validate()?;
    }
    trace!("validated portfolio of {} bonds", bonds.len());
    Ok(())
}

/// Returns the bonds ordered by maturity, shortest first.
///
/// The sort is stable, so bonds with equal maturities keep their input order.
#[must_use]
pub fn sorted_by_maturity(bonds: &[Bond]) -> Vec<Bond> {
    let mut sorted = bonds.to_vec();
    sorted.sort_by(|a, b| a.maturity.total_cmp(&b.maturity));
    sorted
}

/// Finds a bond by identifier.
#[must_use]
pub fn find_bond<'a>(bonds: &'a [Bond], id: &str) -> Option<&'a Bond> {
    bonds.iter().find(|b| b.id == id)
}
