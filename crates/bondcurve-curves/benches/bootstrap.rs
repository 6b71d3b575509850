//! Benchmarks for discount factor solving.
//!
//! Run with: cargo bench -p bondcurve-curves

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use bondcurve_core::types::{Bond, Frequency};
use bondcurve_curves::bootstrap::DiscountFactorSolver;
use bondcurve_curves::CashflowMatrix;
use bondcurve_math::linear_algebra::LeastSquaresMethod;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Semi-annual ladder: triangular.
fn ladder(n: usize) -> Vec<Bond> {
    (1..=n)
        .map(|i| {
            Bond::new(
                format!("L{i}"),
                i as f64 * 0.5,
                0.02 + 0.001 * i as f64,
                Frequency::SemiAnnual,
                100.0 + 0.1 * i as f64,
                100.0,
            )
        })
        .collect()
}

/// Ladder with interleaved quarterly bonds: not triangular.
fn mixed(n: usize) -> Vec<Bond> {
    let mut bonds = ladder(n);
    bonds.extend((1..=n / 2).map(|i| {
        Bond::new(
            format!("Q{i}"),
            i as f64,
            0.03,
            Frequency::Quarterly,
            101.0,
            100.0,
        )
    }));
    bonds
}

fn bench_triangular(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangular_bootstrap");
    for n in [6, 20, 60] {
        let matrix = CashflowMatrix::build(&ladder(n)).unwrap();
        let solver = DiscountFactorSolver::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, m| {
            b.iter(|| solver.solve(black_box(m)).unwrap());
        });
    }
    group.finish();
}

fn bench_least_squares(c: &mut Criterion) {
    let mut group = c.benchmark_group("least_squares");
    let matrix = CashflowMatrix::build(&mixed(20)).unwrap();
    for method in LeastSquaresMethod::ALL {
        let solver = DiscountFactorSolver::default().with_method(method);
        group.bench_with_input(BenchmarkId::new("method", method.name()), &matrix, |b, m| {
            b.iter(|| solver.solve(black_box(m)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_triangular, bench_least_squares);
criterion_main!(benches);
