//! Linear algebra utilities.
//!
//! Dense LU with partial pivoting, least squares, condition numbers and the
//! lower-triangularity test used to choose between exact bootstrapping and
//! regression.

mod least_squares;

pub use least_squares::{
    least_squares, undetermined_unknowns, LeastSquaresMethod, LeastSquaresSolution,
};

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

/// Default tolerance for treating a matrix entry as zero.
pub const ZERO_TOLERANCE: f64 = 1e-10;

/// Pivots smaller than this fraction of the largest entry are treated as zero.
pub const LU_PIVOT_TOLERANCE: f64 = 1e-12;

/// LU factors of a square matrix with row pivoting: `P·A = L·U`.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    /// Unit lower-triangular factor.
    pub l: DMatrix<f64>,
    /// Upper-triangular factor.
    pub u: DMatrix<f64>,
    /// `permutation[i]` is the row of `A` that ended up in row `i`.
    pub permutation: Vec<usize>,
}

/// Performs LU decomposition with partial pivoting.
pub fn lu_decomposition(matrix: &DMatrix<f64>) -> MathResult<LuDecomposition> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(MathError::invalid_input(
            "Matrix must be square for LU decomposition",
        ));
    }

    let mut l = DMatrix::identity(n, n);
    let mut u = matrix.clone();
    let mut permutation: Vec<usize> = (0..n).collect();

    let scale = matrix.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    let pivot_floor = scale * LU_PIVOT_TOLERANCE;

    for k in 0..n {
        let (pivot_row, pivot) = (k..n)
            .map(|i| (i, u[(i, k)].abs()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or((k, 0.0));

        if pivot <= pivot_floor {
            return Err(MathError::singular(format!("zero pivot in column {k}")));
        }

        if pivot_row != k {
            u.swap_rows(k, pivot_row);
            permutation.swap(k, pivot_row);
            for j in 0..k {
                let tmp = l[(k, j)];
                l[(k, j)] = l[(pivot_row, j)];
                l[(pivot_row, j)] = tmp;
            }
        }

        for i in k + 1..n {
            let factor = u[(i, k)] / u[(k, k)];
            l[(i, k)] = factor;

            for j in k..n {
                u[(i, j)] -= factor * u[(k, j)];
            }
        }
    }

    Ok(LuDecomposition { l, u, permutation })
}

/// Solves a linear system Ax = b using pivoted LU decomposition.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(MathError::invalid_input("Matrix must be square"));
    }
    if n != b.len() {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: n,
            rows2: b.len(),
            cols2: 1,
        });
    }

    let LuDecomposition { l, u, permutation } = lu_decomposition(a)?;

    // Solve Ly = Pb (forward substitution)
    let mut y = DVector::zeros(n);
    for i in 0..n {
        let mut sum = b[permutation[i]];
        for j in 0..i {
            sum -= l[(i, j)] * y[j];
        }
        y[i] = sum;
    }

    // Solve Ux = y (back substitution)
    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in i + 1..n {
            sum -= u[(i, j)] * x[j];
        }
        x[i] = sum / u[(i, i)];
    }

    Ok(x)
}

/// Returns true if `matrix` is lower triangular with a nonzero diagonal.
///
/// Requires `rows <= cols`, every entry right of the diagonal within
/// `tolerance` of zero and every diagonal entry larger than `tolerance` in
/// magnitude. An empty matrix is not triangular.
pub fn is_lower_triangular(matrix: &DMatrix<f64>, tolerance: f64) -> bool {
    let (rows, cols) = matrix.shape();
    if rows == 0 || rows > cols {
        return false;
    }

    (0..rows).all(|i| {
        matrix[(i, i)].abs() > tolerance && (i + 1..cols).all(|j| matrix[(i, j)].abs() <= tolerance)
    })
}

/// Ratio of the largest to the smallest nonzero singular value.
///
/// Singular values below `σ_max · max(m, n) · ε` count as zero. Returns
/// infinity for the zero matrix.
pub fn condition_number(matrix: &DMatrix<f64>) -> f64 {
    let (m, n) = matrix.shape();
    if m == 0 || n == 0 {
        return f64::INFINITY;
    }

    let singular_values = matrix.singular_values();
    let max_sv = singular_values.iter().copied().fold(0.0_f64, f64::max);
    if max_sv <= 0.0 {
        return f64::INFINITY;
    }

    let cutoff = max_sv * m.max(n) as f64 * f64::EPSILON;
    let min_sv = singular_values
        .iter()
        .copied()
        .filter(|&s| s > cutoff)
        .fold(f64::INFINITY, f64::min);

    max_sv / min_sv
}

/// Largest absolute entry divided by the smallest nonzero absolute entry.
///
/// A cheap magnitude-spread diagnostic; it is not a condition number.
/// Returns 1 when the matrix has no nonzero entries.
pub fn entry_ratio(matrix: &DMatrix<f64>) -> f64 {
    let nonzero = matrix.iter().map(|x| x.abs()).filter(|&x| x > ZERO_TOLERANCE);
    let (min, max) = nonzero.fold((f64::INFINITY, 0.0_f64), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    });
    if max == 0.0 {
        1.0
    } else {
        max / min
    }
}
