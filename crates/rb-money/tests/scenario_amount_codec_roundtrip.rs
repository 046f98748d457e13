//! Scenario: amount codec round trip
//!
//! # Invariants under test
//!
//! 1. `parse_amount(format_amount(n, DISPLAY)) == n` for non-negative `n`
//!    up to and beyond 10^9 cents, and for negative `n`.
//! 2. The PLAIN rendering parses back to the same value too.
//! 3. `Cents` serializes as a bare integer.
//!
//! All tests are pure; no IO.

use rb_money::{format_amount, parse_amount, AmountFormat, Cents};

/// Deterministic sample covering every digit-count boundary up to 10^12.
fn samples() -> Vec<i64> {
    let mut out = vec![0, 1, 5, 9, 10, 99, 100, 101, 999, 1_000, 1_001];
    let mut p: i64 = 10;
    while p <= 1_000_000_000_000 {
        out.extend([p - 1, p, p + 1, p * 7 + 3]);
        p *= 10;
    }
    // A cheap LCG walk for values without structure.
    let mut x: i64 = 12_345;
    for _ in 0..500 {
        x = (x.wrapping_mul(1_103_515_245).wrapping_add(12_345)) & 0x3fff_ffff;
        out.push(x);
    }
    out
}

#[test]
fn display_roundtrip_non_negative() {
    for n in samples() {
        let text = format_amount(Cents::new(n), AmountFormat::DISPLAY);
        assert_eq!(
            parse_amount(&text),
            Ok(Cents::new(n)),
            "roundtrip failed for {n} via {text:?}"
        );
    }
}

#[test]
fn display_roundtrip_negative() {
    for n in samples().into_iter().filter(|n| *n > 0) {
        let text = format_amount(Cents::new(-n), AmountFormat::DISPLAY);
        assert_eq!(parse_amount(&text), Ok(Cents::new(-n)), "via {text:?}");
    }
}

#[test]
fn plain_roundtrip() {
    for n in samples() {
        let text = format_amount(Cents::new(n), AmountFormat::PLAIN);
        assert_eq!(parse_amount(&text), Ok(Cents::new(n)), "via {text:?}");
    }
}

#[test]
fn reference_renderings() {
    assert_eq!(format_amount(Cents::new(5), AmountFormat::PLAIN), "0.05");
    assert_eq!(
        format_amount(Cents::new(100_000), AmountFormat::DISPLAY),
        "$1,000.00"
    );
    assert_eq!(format_amount(Cents::new(-150), AmountFormat::PLAIN), "-1.50");
}

#[test]
fn cents_serialize_transparently() {
    let json = serde_json::to_string(&Cents::new(710_000)).unwrap();
    assert_eq!(json, "710000");
    let back: Cents = serde_json::from_str("-42").unwrap();
    assert_eq!(back, Cents::new(-42));
}
