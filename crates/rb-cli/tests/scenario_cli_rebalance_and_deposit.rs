//! Scenario: `rb rebalance` and `rb deposit` against the built-in catalog
//!
//! # Invariants under test
//!
//! 1. With no `--config`/`--portfolio` the "Full Portfolio" preset is used.
//! 2. An all-VTI holdings export sells VTI and buys everything else.
//! 3. `--json` output is machine-readable on stdout with cent integers.
//! 4. A bad amount or unknown portfolio exits non-zero with a message.

use predicates::prelude::*;
use std::fs;

fn rb(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("rb").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RB_PORTFOLIO_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn holdings_csv(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("positions.csv");
    fs::write(
        &path,
        "Symbol,Description,Current Value\nVTI,Total Market,\"$71,000.00\"\nAAPL,Apple,\"$5.00\"\n",
    )
    .unwrap();
    path
}

#[test]
fn rebalance_default_portfolio_text() {
    let dir = tempfile::tempdir().unwrap();
    let csv = holdings_csv(&dir);

    rb(&dir)
        .args(["rebalance", "--holdings"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("portfolio=Full Portfolio"))
        .stdout(predicate::str::contains("-$20,590.00"))
        .stdout(predicate::str::contains("$12,780.00"))
        .stdout(predicate::str::contains("total=$71,000.00"))
        .stdout(predicate::str::contains("rows_unresolved=1"));
}

#[test]
fn rebalance_json_with_deposit() {
    let dir = tempfile::tempdir().unwrap();
    let csv = holdings_csv(&dir);

    let out = rb(&dir)
        .args([
            "rebalance",
            "--portfolio",
            "full portfolio",
            "--deposit",
            "$29,000.00",
            "--json",
            "--holdings",
        ])
        .arg(&csv)
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["total"], 10_000_000);
    assert_eq!(v["deposit_amount"], 2_900_000);
    assert_eq!(v["symbols"][0]["symbol"], "VTI");
    assert_eq!(v["symbols"][0]["amount_needed"], 0);
    assert_eq!(v["symbols"][2]["amount_needed"], 1_000_000);
}

#[test]
fn deposit_named_portfolio() {
    let dir = tempfile::tempdir().unwrap();

    rb(&dir)
        .args(["deposit", "--portfolio", "No Bonds", "--amount", "$10,000.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("portfolio=No Bonds"))
        .stdout(predicate::str::contains("$8,000.00"))
        .stdout(predicate::str::contains("$2,000.00"))
        .stdout(predicate::str::contains("unallocated=$0.00"));
}

#[test]
fn deposit_json_largest_target_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("thirds.yaml");
    fs::write(
        &cfg,
        "\
stocks:
  - symbol: A
    target_percentage: 33.3
  - symbol: B
    target_percentage: 33.4
  - symbol: C
    target_percentage: 33.3
",
    )
    .unwrap();

    let out = rb(&dir)
        .args([
            "deposit",
            "--amount",
            "1.00",
            "--remainder",
            "largest-target",
            "--json",
            "--config",
        ])
        .arg(&cfg)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["total"], 100);
    assert_eq!(v["policy"], "largest_target");
    assert_eq!(v["allocations"][1]["amount"], 34);
}

#[test]
fn bad_inputs_fail_loudly() {
    let dir = tempfile::tempdir().unwrap();

    rb(&dir)
        .args(["deposit", "--amount", "ten dollars"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --amount 'ten dollars'"));

    rb(&dir)
        .args(["deposit", "--amount=-5.00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deposit amount must be >= 0"));

    rb(&dir)
        .args(["deposit", "--portfolio", "Moonshot", "--amount", "1.00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown --portfolio 'Moonshot'"));
}
