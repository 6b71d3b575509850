//! Linear least squares: minimise `‖A·x − b‖²`.

use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::solve_linear_system;
use crate::error::{MathError, MathResult};

/// Diagonal entries of `R` below this fraction of the largest are zero pivots.
const QR_PIVOT_TOLERANCE: f64 = 1e-10;

/// Shortfall from unit length below which a column counts as determined.
const DETERMINED_TOLERANCE: f64 = 1e-6;

/// Least-squares algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeastSquaresMethod {
    /// `AᵗA·x = Aᵗb` solved by pivoted LU. Fails on rank-deficient systems.
    NormalEquations,
    /// Householder QR; minimum-norm solution when there are fewer rows than columns.
    Qr,
    /// SVD pseudo-inverse with a relative singular-value cutoff.
    #[default]
    Svd,
}

impl LeastSquaresMethod {
    /// All methods.
    pub const ALL: [LeastSquaresMethod; 3] = [
        LeastSquaresMethod::NormalEquations,
        LeastSquaresMethod::Qr,
        LeastSquaresMethod::Svd,
    ];

    /// Short lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LeastSquaresMethod::NormalEquations => "normal",
            LeastSquaresMethod::Qr => "qr",
            LeastSquaresMethod::Svd => "svd",
        }
    }
}

impl fmt::Display for LeastSquaresMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeastSquaresMethod::NormalEquations => "Normal Equations",
            LeastSquaresMethod::Qr => "QR",
            LeastSquaresMethod::Svd => "SVD",
        };
        write!(f, "{name}")
    }
}

impl FromStr for LeastSquaresMethod {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "normal_equations" | "normal-equations" | "lu" => {
                Ok(LeastSquaresMethod::NormalEquations)
            }
            "qr" => Ok(LeastSquaresMethod::Qr),
            "svd" => Ok(LeastSquaresMethod::Svd),
            other => Err(MathError::invalid_input(format!(
                "unknown least-squares method '{other}' (expected normal, qr or svd)"
            ))),
        }
    }
}

/// Output of [`least_squares`].
#[derive(Debug, Clone)]
pub struct LeastSquaresSolution {
    /// The solution vector `x`.
    pub solution: DVector<f64>,
    /// Numerical rank of `A`.
    pub rank: usize,
    /// Method that produced the solution.
    pub method: LeastSquaresMethod,
}

impl LeastSquaresSolution {
    /// Returns true if `A` had fewer independent columns than unknowns.
    #[must_use]
    pub fn is_rank_deficient(&self) -> bool {
        self.rank < self.solution.len()
    }
}

/// Solves `min ‖A·x − b‖²` with the requested method.
///
/// # Example
///
/// ```rust
/// use bondcurve_math::linear_algebra::{least_squares, LeastSquaresMethod};
/// use nalgebra::{DMatrix, DVector};
///
/// // Fit y = a + b·x through (0, 1), (1, 3), (2, 5)
/// let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
/// let b = DVector::from_vec(vec![1.0, 3.0, 5.0]);
///
/// let fit = least_squares(&a, &b, LeastSquaresMethod::Qr).unwrap();
/// assert!((fit.solution[0] - 1.0).abs() < 1e-10);
/// assert!((fit.solution[1] - 2.0).abs() < 1e-10);
/// ```
pub fn least_squares(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    method: LeastSquaresMethod,
) -> MathResult<LeastSquaresSolution> {
    let (m, n) = a.shape();
    if m == 0 || n == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }
    if b.len() != m {
        return Err(MathError::DimensionMismatch {
            rows1: m,
            cols1: n,
            rows2: b.len(),
            cols2: 1,
        });
    }
    if a.iter().chain(b.iter()).any(|x| !x.is_finite()) {
        return Err(MathError::invalid_input("system contains non-finite values"));
    }

    debug!("least squares {m}x{n} via {method}");

    match method {
        LeastSquaresMethod::NormalEquations => normal_equations(a, b),
        LeastSquaresMethod::Qr => qr(a, b),
        LeastSquaresMethod::Svd => svd(a, b),
    }
}

fn normal_equations(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<LeastSquaresSolution> {
    let at = a.transpose();
    let solution = solve_linear_system(&(&at * a), &(&at * b))?;
    Ok(LeastSquaresSolution {
        rank: solution.len(),
        solution,
        method: LeastSquaresMethod::NormalEquations,
    })
}

fn qr(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<LeastSquaresSolution> {
    let (m, n) = a.shape();

    let solution = if m >= n {
        // A = Q·R, x = R⁻¹·Qᵗb
        let decomposition = a.clone().qr();
        let q = decomposition.q();
        let r = decomposition.r();
        check_pivots(&r)?;
        solve_upper(&r, &(q.transpose() * b))
    } else {
        // Aᵗ = Q·R, x = Q·(Rᵗ)⁻¹·b is the minimum-norm solution
        let decomposition = a.transpose().qr();
        let q = decomposition.q();
        let r = decomposition.r();
        check_pivots(&r)?;
        q * solve_lower_transposed(&r, b)
    };

    Ok(LeastSquaresSolution {
        solution,
        rank: m.min(n),
        method: LeastSquaresMethod::Qr,
    })
}

fn svd(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<LeastSquaresSolution> {
    let (m, n) = a.shape();
    let decomposition = a.clone().svd(true, true);

    let max_sv = decomposition
        .singular_values
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    if max_sv <= 0.0 {
        return Err(MathError::singular("all singular values are zero"));
    }

    let cutoff = singular_value_cutoff(max_sv, m, n);
    let rank = decomposition
        .singular_values
        .iter()
        .filter(|&&s| s > cutoff)
        .count();

    let solution = decomposition
        .solve(b, cutoff)
        .map_err(MathError::invalid_input)?;

    if rank < n {
        debug!("rank-deficient system: rank {rank} < {n} unknowns, minimum-norm solution");
    }

    Ok(LeastSquaresSolution {
        solution,
        rank,
        method: LeastSquaresMethod::Svd,
    })
}

/// Unknowns whose value is not fixed by `A·x = b`.
///
/// Column `j` is determined exactly when the unit vector `eⱼ` lies in the row
/// space of `A`, i.e. when its projection onto the right singular vectors of
/// the nonzero singular values has unit length. Returns the indices of the
/// columns that fail this test, in order; empty for a full-column-rank `A`.
#[must_use]
pub fn undetermined_unknowns(a: &DMatrix<f64>) -> Vec<usize> {
    let (m, n) = a.shape();
    if m == 0 || n == 0 {
        return (0..n).collect();
    }

    let decomposition = a.clone().svd(false, true);
    let Some(v_t) = decomposition.v_t else {
        return (0..n).collect();
    };
    let max_sv = decomposition
        .singular_values
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    let cutoff = singular_value_cutoff(max_sv, m, n);
    let kept: Vec<usize> = (0..decomposition.singular_values.len())
        .filter(|&k| decomposition.singular_values[k] > cutoff)
        .collect();

    (0..n)
        .filter(|&j| {
            let projected: f64 = kept.iter().map(|&k| v_t[(k, j)].powi(2)).sum();
            projected < 1.0 - DETERMINED_TOLERANCE
        })
        .collect()
}

fn singular_value_cutoff(max_sv: f64, m: usize, n: usize) -> f64 {
    max_sv * m.max(n) as f64 * f64::EPSILON
}

fn check_pivots(r: &DMatrix<f64>) -> MathResult<()> {
    let k = r.nrows().min(r.ncols());
    let largest = (0..k).fold(0.0_f64, |acc, i| acc.max(r[(i, i)].abs()));
    match (0..k).find(|&i| r[(i, i)].abs() <= largest * QR_PIVOT_TOLERANCE) {
        Some(i) => Err(MathError::singular(format!("zero pivot in R at {i}"))),
        None => Ok(()),
    }
}

/// Solves `R·x = y` for square upper-triangular `R`.
fn solve_upper(r: &DMatrix<f64>, y: &DVector<f64>) -> DVector<f64> {
    let n = r.ncols();
    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in i + 1..n {
            sum -= r[(i, j)] * x[j];
        }
        x[i] = sum / r[(i, i)];
    }
    x
}

/// Solves `Rᵗ·z = y` for square upper-triangular `R`.
fn solve_lower_transposed(r: &DMatrix<f64>, y: &DVector<f64>) -> DVector<f64> {
    let n = r.nrows();
    let mut z = DVector::zeros(n);
    for i in 0..n {
        let mut sum = y[i];
        for j in 0..i {
            sum -= r[(j, i)] * z[j];
        }
        z[i] = sum / r[(i, i)];
    }
    z
}
