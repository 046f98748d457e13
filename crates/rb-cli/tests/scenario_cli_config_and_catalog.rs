//! Scenario: `rb config-check`, `rb portfolios` and `rb interest`
//!
//! # Invariants under test
//!
//! 1. `config-check` prints a stable `config_hash=` line for a valid file
//!    and refuses percentages that do not add up to 100.
//! 2. A duplicate alias is refused with both owners named.
//! 3. `portfolios` lists the presets when no store is configured and the
//!    store's documents when `RB_PORTFOLIO_DIR` points at one.
//! 4. `interest` reproduces the reference projections.

use predicates::prelude::*;
use std::fs;

fn rb(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("rb").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RB_PORTFOLIO_DIR")
        .env_remove("RUST_LOG");
    cmd
}

const VALID: &str = "\
stocks:
  - symbol: VTI
    target_percentage: 80
    description: Total Market Fund
    alternatives: [ITOT]
  - symbol: VXUS
    target_percentage: 20
    description: International Fund
";

#[test]
fn config_check_prints_hash_and_targets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alloc.yaml");
    fs::write(&path, VALID).unwrap();

    let first = rb(&dir).arg("config-check").arg(&path).output().unwrap();
    let second = rb(&dir).arg("config-check").arg(&path).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let text = String::from_utf8(first.stdout).unwrap();
    let hash_line = text.lines().next().unwrap();
    let hash = hash_line.strip_prefix("config_hash=").unwrap();
    assert_eq!(hash.len(), 64);
    assert!(text.contains("ITOT"));
}

#[test]
fn config_check_rejects_bad_sum() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, VALID.replace("target_percentage: 20", "target_percentage: 10")).unwrap();

    rb(&dir)
        .arg("config-check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("do not add up to 100"));
}

#[test]
fn config_check_rejects_duplicate_alias() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dup.yaml");
    fs::write(
        &path,
        VALID.replace(
            "description: International Fund",
            "description: Intl\n    alternatives: [ITOT]",
        ),
    )
    .unwrap();

    rb(&dir)
        .arg("config-check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "symbol ITOT appears multiple times (primary/alternative for VTI, alternative for VXUS)",
        ));
}

#[test]
fn portfolios_lists_presets_without_store() {
    let dir = tempfile::tempdir().unwrap();

    rb(&dir)
        .arg("portfolios")
        .assert()
        .success()
        .stdout(predicate::str::contains("portfolio=No Bonds"))
        .stdout(predicate::str::contains("portfolio=Indexes only"))
        .stdout(predicate::str::contains("portfolio=Full Portfolio"));
}

#[test]
fn portfolios_reads_store_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    fs::create_dir(&store).unwrap();
    fs::write(
        store.join("growth.yaml"),
        "\
name: Growth
description: all equities
stocks:
  - symbol: VTI
    target_percentage: 100
",
    )
    .unwrap();

    rb(&dir)
        .env("RB_PORTFOLIO_DIR", &store)
        .arg("portfolios")
        .assert()
        .success()
        .stdout(predicate::str::contains("portfolio=Growth"))
        .stdout(predicate::str::contains("description=all equities"))
        .stdout(predicate::str::contains("No Bonds").not());
}

#[test]
fn interest_reference_projections() {
    let dir = tempfile::tempdir().unwrap();

    rb(&dir)
        .args(["interest", "--principal", "10000.00", "--rate", "7", "--years", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frequency=annually"))
        .stdout(predicate::str::contains("future_value=$19,671.51"));

    rb(&dir)
        .args([
            "interest",
            "--principal",
            "$10,000.00",
            "--contribution",
            "100.00",
            "--rate",
            "7",
            "--years",
            "10",
            "--frequency",
            "monthly",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("future_value=$37,405.09"));

    rb(&dir)
        .args(["interest", "--principal", "1.00", "--rate=-1", "--years", "1"])
        .assert()
        .failure();
}
