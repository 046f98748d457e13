//! Fixed-point money type.
//!
//! # Scale
//!
//! 1 USD = `Cents(100)`. Every monetary value handled by the calculator
//! (holding values, deposits, suggested transactions, projections) uses this
//! scale. Percentages and drift stay `f64`; they are never implicitly
//! convertible to or from `Cents`.
//!
//! # Arithmetic
//!
//! - `Add`, `Sub`, `Neg`, `AddAssign`, `SubAssign` and `Sum` are implemented
//!   for `Cents op Cents` only; these panic on overflow in debug builds and
//!   wrap in release (matching Rust's standard integer semantics).
//! - `checked_add` / `saturating_add` for callers folding untrusted input.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::codec::{format_amount, AmountFormat};

/// A signed monetary amount in integer cents.
///
/// There is intentionally no `From<i64>` implementation; use [`Cents::new`]
/// where a raw integer is known to be a cent amount.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Zero monetary amount.
    pub const ZERO: Cents = Cents(0);

    /// Maximum representable value.
    pub const MAX: Cents = Cents(i64::MAX);

    /// Minimum representable value.
    pub const MIN: Cents = Cents(i64::MIN);

    #[inline]
    pub const fn new(raw: i64) -> Self {
        Cents(raw)
    }

    /// Extract the underlying raw `i64`.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Value as `f64` cents, for percentage math.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    #[inline]
    pub fn checked_add(self, rhs: Cents) -> Option<Cents> {
        self.0.checked_add(rhs.0).map(Cents)
    }

    /// Saturating addition; clamps at [`Cents::MAX`] / [`Cents::MIN`].
    #[inline]
    pub fn saturating_add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Cents {
    type Output = Cents;
    #[inline]
    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl Sub for Cents {
    type Output = Cents;
    #[inline]
    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0 - rhs.0)
    }
}

impl Neg for Cents {
    type Output = Cents;
    #[inline]
    fn neg(self) -> Cents {
        Cents(-self.0)
    }
}

impl AddAssign for Cents {
    #[inline]
    fn add_assign(&mut self, rhs: Cents) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Cents {
    #[inline]
    fn sub_assign(&mut self, rhs: Cents) {
        self.0 -= rhs.0;
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Cents>>(iter: I) -> Cents {
        iter.copied().sum()
    }
}

/// Renders the display form: `$1,234.56`, `-$0.05`.
impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_amount(*self, AmountFormat::DISPLAY))
    }
}
