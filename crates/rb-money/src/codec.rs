//! Amount codec: currency text <-> [`Cents`].
//!
//! Parsing is positional: the decimal point is removed and the remaining
//! digits are read as a cent count, so inputs are expected to carry exactly
//! two fractional digits (`"$80,000.00"`, `"12.34"`). No decimal-aware
//! rounding happens; `"$5"` is five cents.

use std::fmt;

use crate::Cents;

/// Errors produced by [`parse_amount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    /// Nothing numeric remained after stripping sign, symbol, separators
    /// and the decimal point.
    NotANumber { raw: String },
    /// The digit string does not fit in an `i64` cent count.
    Overflow { raw: String },
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber { raw } => write!(f, "amount '{raw}' is not a number"),
            Self::Overflow { raw } => write!(f, "amount '{raw}' is out of range"),
        }
    }
}

impl std::error::Error for AmountParseError {}

/// Rendering options for [`format_amount`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AmountFormat {
    /// Insert `,` between thousands groups of the dollar part.
    pub grouping: bool,
    /// Prefix a `$`.
    pub currency_symbol: bool,
}

impl AmountFormat {
    /// `1234.56`
    pub const PLAIN: AmountFormat = AmountFormat {
        grouping: false,
        currency_symbol: false,
    };

    /// `$1,234.56`
    pub const DISPLAY: AmountFormat = AmountFormat {
        grouping: true,
        currency_symbol: true,
    };
}

/// Parse a currency string such as `"$80,000.00"` into cents.
///
/// Accepted shape: optional `-` (before or after the `$`), optional leading
/// `$`, digits with any number of `,` separators and at most one `.`.
pub fn parse_amount(text: &str) -> Result<Cents, AmountParseError> {
    let trimmed = text.trim();

    let (mut negative, rest) = match trimmed.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, trimmed),
    };
    let mut rest = rest.strip_prefix('$').unwrap_or(rest);
    if !negative {
        if let Some(r) = rest.strip_prefix('-') {
            negative = true;
            rest = r;
        }
    }

    let mut digits: String = rest.chars().filter(|c| *c != ',').collect();
    if let Some(dot) = digits.find('.') {
        digits.remove(dot);
    }

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountParseError::NotANumber {
            raw: text.to_string(),
        });
    }

    let magnitude: i64 = digits.parse().map_err(|_| AmountParseError::Overflow {
        raw: text.to_string(),
    })?;

    Ok(Cents::new(if negative { -magnitude } else { magnitude }))
}

/// Render cents as text: sign marker, dollars, `.`, two cent digits.
///
/// Amounts under one dollar are zero-padded (`5` -> `0.05`). Grouping and
/// the `$` prefix are controlled by `format`.
pub fn format_amount(amount: Cents, format: AmountFormat) -> String {
    let raw = amount.raw();
    let digits = format!("{:03}", raw.unsigned_abs());
    let (dollars, cents) = digits.split_at(digits.len() - 2);

    let mut out = String::with_capacity(digits.len() + dollars.len() / 3 + 3);
    if raw < 0 {
        out.push('-');
    }
    if format.currency_symbol {
        out.push('$');
    }
    if format.grouping {
        push_grouped(&mut out, dollars);
    } else {
        out.push_str(dollars);
    }
    out.push('.');
    out.push_str(cents);
    out
}

fn push_grouped(out: &mut String, digits: &str) {
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
}
