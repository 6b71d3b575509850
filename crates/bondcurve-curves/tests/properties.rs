//! Property tests for rate conversion and triangular repricing.

use bondcurve_core::prelude::*;
use bondcurve_curves::prelude::*;
use bondcurve_curves::rates::discount_factor_to_spot_rate;
use proptest::prelude::*;

fn compounding() -> impl Strategy<Value = Compounding> {
    prop_oneof![
        Just(Compounding::Continuous),
        Just(Compounding::Annual),
        Just(Compounding::SemiAnnual),
    ]
}

/// A ladder of semi-annual bonds maturing every six months.
fn ladder() -> impl Strategy<Value = Vec<Bond>> {
    prop::collection::vec((0.0..0.10_f64, 80.0..120.0_f64), 1..10).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (coupon, price))| {
                Bond::new(
                    format!("L{}", i + 1),
                    (i + 1) as f64 * 0.5,
                    coupon,
                    Frequency::SemiAnnual,
                    price,
                    100.0,
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_discount_factor_round_trip(
        df in 0.05..1.2_f64,
        t in 0.25..30.0_f64,
        compounding in compounding(),
    ) {
        let rate = discount_factor_to_spot_rate(df, t, compounding).unwrap();
        let back = compounding.discount_factor(rate, t);
        prop_assert!((back - df).abs() < 1e-10 * df.max(1.0));
    }

    #[test]
    fn prop_triangular_bootstrap_reprices(bonds in ladder()) {
        let matrix = CashflowMatrix::build(&bonds).unwrap();
        prop_assert!(matrix.is_triangular(1e-10));

        let solution = DiscountFactorSolver::default().solve(&matrix).unwrap();
        prop_assert_eq!(solution.method, SolveMethod::Triangular);

        let model = matrix.reprice(solution.discount_factors.factors()).unwrap();
        for (m, bond) in model.iter().zip(&bonds) {
            prop_assert!((m - bond.price).abs() < 1e-8, "{} vs {}", m, bond.price);
        }
    }

    #[test]
    fn prop_flat_curve_forwards_are_flat(rate in -0.02..0.15_f64, n in 2usize..12) {
        let spots: Vec<SpotRate> = (1..=n)
            .map(|i| SpotRate {
                time: TimeKey::from_period(i as u32, Frequency::SemiAnnual),
                rate,
            })
            .collect();
        for forward in spot_rates_to_forward_rates(&spots).unwrap() {
            prop_assert!((forward.rate - rate).abs() < 1e-12);
        }
    }
}
