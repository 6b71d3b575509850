//! End-to-end tests for the bondcurve binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn bondcurve() -> Command {
    let mut cmd = Command::cargo_bin("bondcurve").unwrap();
    cmd.env_remove("BONDCURVE_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn csv_portfolio(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_bootstrap_triangular_sample() {
    bondcurve()
        .args(["bootstrap", "--sample", "triangular"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bootstrapped Curve"))
        .stdout(predicate::str::contains("Triangular bootstrap"));
}

#[test]
fn test_bootstrap_json_is_parseable() {
    let output = bondcurve()
        .args(["bootstrap", "--sample", "triangular", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let factors = value["discount_factors"].as_array().unwrap();
    assert_eq!(factors.len(), 6);
    assert!(factors
        .iter()
        .all(|df| df.as_f64().is_some_and(|v| v > 0.0 && v < 1.0)));
    assert_eq!(value["repricing_valid"], serde_json::Value::Bool(true));
}

#[test]
fn test_bootstrap_overdetermined_reports_rank() {
    let output = bondcurve()
        .args(["bootstrap", "-s", "overdetermined", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["discount_factors"].as_array().unwrap().len(), 8);
    assert_eq!(value["rank"].as_u64(), Some(8));
}

const UNDETERMINED_CSV: &str = "id,maturity,coupon_rate,frequency,price,face_value\n\
     Z1, 1.0, 0.0, 2, 97.0, 100\n\
     C15, 1.5, 0.04, 2, 100.0, 100\n";

#[test]
fn test_bootstrap_undetermined_portfolio_fails() {
    let file = csv_portfolio(UNDETERMINED_CSV);

    bondcurve()
        .arg("bootstrap")
        .arg("--file")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Singular system"))
        .stderr(predicate::str::contains("0.5"));
}

#[test]
fn test_bootstrap_min_norm_accepts_undetermined_portfolio() {
    let file = csv_portfolio(UNDETERMINED_CSV);

    let output = bondcurve()
        .arg("bootstrap")
        .arg("--file")
        .arg(file.path())
        .args(["--min-norm", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["discount_factors"].as_array().unwrap().len(), 3);
    assert_eq!(value["rank"].as_u64(), Some(2));
}

#[test]
fn test_bootstrap_from_csv_file() {
    let file = csv_portfolio(
        "id,maturity,coupon_rate,frequency,price,face_value\n\
         Z1, 1.0, 0.0, 1, 95.0, 100\n\
         Z2, 2.0, 0.0, 1, 90.0, 100\n",
    );

    bondcurve()
        .arg("bootstrap")
        .arg("--file")
        .arg(file.path())
        .args(["--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.950000"))
        .stdout(predicate::str::contains("0.900000"));
}

#[test]
fn test_missing_portfolio_fails() {
    bondcurve()
        .arg("bootstrap")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No portfolio given"));
}

#[test]
fn test_file_and_sample_conflict() {
    bondcurve()
        .args(["matrix", "--sample", "triangular", "--file", "bonds.csv"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_sample_is_rejected() {
    bondcurve()
        .args(["matrix", "--sample", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sample"));
}

#[test]
fn test_arbitrage_flags_overpriced_bond() {
    bondcurve()
        .args(["arbitrage", "--sample", "mispriced-bond"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SELL"))
        .stdout(predicate::str::contains("B3"));
}

#[test]
fn test_arbitrage_minimal_signals() {
    bondcurve()
        .args(["arbitrage", "--sample", "no-arbitrage", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B3 FAIR"));
}

#[test]
fn test_arbitrage_wide_band_silences_signals() {
    bondcurve()
        .args(["arbitrage", "-s", "mispriced-bond", "--band", "5", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B3 FAIR"));
}

#[test]
fn test_trace_triangular() {
    bondcurve()
        .args(["trace", "--sample", "triangular"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solving for DF(0.5) from bond 1"));
}

#[test]
fn test_trace_rejects_non_triangular_portfolio() {
    bondcurve()
        .args(["trace", "--sample", "overdetermined"])
        .assert()
        .failure();
}

#[test]
fn test_ytm_csv_output() {
    bondcurve()
        .args(["ytm", "--sample", "no-arbitrage", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bond_id,maturity"))
        .stdout(predicate::str::contains("B1"));
}

#[test]
fn test_risk_inline_bond() {
    bondcurve()
        .args([
            "risk", "--maturity", "5", "--coupon", "5", "--price", "100", "--frequency", "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Modified Duration"))
        .stdout(predicate::str::contains("5.0000%"));
}

#[test]
fn test_risk_unknown_bond() {
    bondcurve()
        .args(["risk", "--sample", "triangular", "--bond", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the portfolio"));
}

#[test]
fn test_config_samples() {
    bondcurve()
        .args(["config", "samples", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("triangular"))
        .stdout(predicate::str::contains("multiple-mispricings"));
}

#[test]
fn test_config_file_is_applied() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "compounding = \"annual\"").unwrap();

    bondcurve()
        .arg("--config")
        .arg(file.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compounding = \"annual\""));
}
