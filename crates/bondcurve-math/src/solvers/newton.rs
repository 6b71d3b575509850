//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, MIN_DERIVATIVE};

/// Newton-Raphson confined to `[lower, upper]`.
///
/// Iterates `x_{n+1} = x_n - f(x_n) / f'(x_n)`. Convergence is judged on
/// `|f(x)| < tolerance` only; a tiny step with a large residual is not
/// accepted as a root. An iterate that leaves the interval (or becomes
/// non-finite) aborts with [`MathError::OutOfBounds`] instead of being
/// clamped or reset.
///
/// # Example
///
/// ```rust
/// use bondcurve_math::solvers::{newton_raphson_bounded, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson_bounded(f, df, 1.5, (0.0, 10.0), &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson_bounded<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let (lower, upper) = bounds;
    if lower.is_nan() || upper.is_nan() || lower >= upper {
        return Err(MathError::invalid_input(format!(
            "empty interval [{lower}, {upper}]"
        )));
    }
    if !(lower..=upper).contains(&initial_guess) {
        return Err(MathError::OutOfBounds {
            value: initial_guess,
            lower,
            upper,
            iterations: 0,
        });
    }

    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if dfx.abs() < MIN_DERIVATIVE || !dfx.is_finite() {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        x -= fx / dfx;

        if !x.is_finite() || x < lower || x > upper {
            return Err(MathError::OutOfBounds {
                value: x,
                lower,
                upper,
                iterations: iteration + 1,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}
