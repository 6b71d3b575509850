//! Arbitrage scenarios from the built-in sample portfolios.

use approx::assert_relative_eq;
use bondcurve_analytics::prelude::*;
use bondcurve_core::prelude::*;

#[test]
fn no_arbitrage_curve_is_flat_and_fair() {
    let bonds = SampleSet::NoArbitrage.bonds();
    let analysis = ArbitrageDetector::default().analyze(&bonds).unwrap();

    assert_eq!(analysis.curve.points().len(), 2);
    for point in analysis.curve.points() {
        assert_relative_eq!(point.rate, 0.05, epsilon = 1e-4);
    }

    let b3 = analysis.mispricing("B3").unwrap();
    assert!(!b3.in_curve);
    assert_relative_eq!(b3.theoretical_price, 1000.0, epsilon = 0.01);
    assert_eq!(b3.signal, Signal::Fair);
    assert_eq!(analysis.opportunities().count(), 0);
}

#[test]
fn all_bonds_curve_reprices_every_bond() {
    let bonds = SampleSet::NoArbitrage.bonds();
    let analysis = ArbitrageDetector::default()
        .with_curve_source(CurveSource::AllBonds)
        .analyze(&bonds)
        .unwrap();

    let rates: Vec<f64> = analysis.curve.points().iter().map(|p| p.rate).collect();
    assert_eq!(rates.len(), 3);
    for rate in rates {
        assert_relative_eq!(rate, 0.05, epsilon = 1e-4);
    }
    for m in &analysis.mispricings {
        assert!(m.in_curve);
        assert_relative_eq!(m.mispricing, 0.0, epsilon = 1e-8);
        assert_eq!(m.signal, Signal::Fair);
    }
}

#[test]
fn rich_coupon_bond_is_a_sell() {
    let bonds = SampleSet::MispricedBond.bonds();
    let analysis = ArbitrageDetector::default().analyze(&bonds).unwrap();

    let b3 = analysis.mispricing("B3").unwrap();
    assert!(b3.mispricing > 0.0);
    assert_relative_eq!(b3.percent, 2.0, epsilon = 0.01);
    assert_eq!(b3.signal, Signal::Sell);
    assert_eq!(analysis.opportunities().count(), 1);
}

#[test]
fn cheap_bond_is_a_buy() {
    let bonds = SampleSet::NoArbitrage.bonds();
    let mut cheap = bonds.clone();
    cheap[2] = bonds[2].with_price(980.0);

    let analysis = ArbitrageDetector::default().analyze(&cheap).unwrap();
    let b3 = analysis.mispricing("B3").unwrap();
    assert!(b3.theoretical_price > b3.market_price);
    assert_eq!(b3.signal, Signal::Buy);
}

#[test]
fn multiple_mispricings_flag_both_coupon_bonds() {
    let bonds = SampleSet::MultipleMispricings.bonds();
    let analysis = ArbitrageDetector::default().analyze(&bonds).unwrap();

    assert_eq!(analysis.curve_bonds, vec!["B1".to_string(), "B2".to_string()]);
    assert_eq!(analysis.mispricing("B1").unwrap().signal, Signal::Fair);
    assert_eq!(analysis.mispricing("B2").unwrap().signal, Signal::Fair);
    assert_eq!(analysis.mispricing("B3").unwrap().signal, Signal::Sell);
    assert_eq!(analysis.mispricing("B4").unwrap().signal, Signal::Sell);
}

#[test]
fn wider_thresholds_silence_signals() {
    let bonds = SampleSet::MispricedBond.bonds();
    let analysis = ArbitrageDetector::default()
        .with_thresholds(MispricingThresholds::symmetric(5.0))
        .analyze(&bonds)
        .unwrap();
    assert_eq!(analysis.opportunities().count(), 0);
}

#[test]
fn benchmark_curve_set() {
    let bonds = SampleSet::MultipleMispricings.bonds();
    let source = CurveSource::Benchmarks(vec!["B2".into(), "B1".into(), "B3".into()]);
    let analysis = ArbitrageDetector::default()
        .with_curve_source(source)
        .analyze(&bonds)
        .unwrap();
    assert_eq!(analysis.curve.points().len(), 3);
    assert_eq!(analysis.curve_bonds, vec!["B1", "B2", "B3"]);
    assert!(analysis.mispricing("B3").unwrap().in_curve);
    assert!(!analysis.mispricing("B4").unwrap().in_curve);
}

#[test]
fn coupon_only_portfolio_has_no_zero_curve() {
    let bonds = SampleSet::Triangular.bonds();
    let err = ArbitrageDetector::default().analyze(&bonds).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Input);
}

#[test]
fn strip_matches_solver_on_triangular_set() {
    let bonds = SampleSet::NoArbitrage.bonds();
    let curve = bootstrap_strip(&bonds, Compounding::Continuous, 1e-10).unwrap();
    let analysis = CurveAnalysis::run(&bonds, &AnalysisSettings::default()).unwrap();
    for (strip, full) in curve.points().iter().zip(&analysis.spot_rates) {
        assert_eq!(strip.time, full.time);
        assert_relative_eq!(strip.rate, full.rate, epsilon = 1e-12);
    }
}
