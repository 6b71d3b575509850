//! # Bondcurve Math
//!
//! Numerical routines for the bondcurve bootstrapping engine.
//!
//! - **Solvers**: interval-bounded Newton-Raphson
//! - **Linear Algebra**: pivoted LU, least squares (normal equations, QR,
//!   SVD), condition numbers and the triangularity test

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod error;
pub mod linear_algebra;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{
        condition_number, entry_ratio, is_lower_triangular, least_squares, lu_decomposition,
        solve_linear_system, undetermined_unknowns, LeastSquaresMethod, LeastSquaresSolution,
        LuDecomposition,
    };
    pub use crate::solvers::{newton_raphson_bounded, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
