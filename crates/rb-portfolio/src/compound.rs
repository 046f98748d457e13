//! Compound-interest projection with regular monthly contributions.
//!
//! With `n` compounding periods per year, `r = rate / 100 / n` and
//! `N = n * years`:
//!
//! ```text
//! principal FV     = P * (1 + r)^N
//! contribution FV  = c * ((1 + r)^N - 1) / r      c = monthly * 12 / n
//!                  = c * N                        when r == 0
//! ```
//!
//! Contributions are pooled per compounding period and land at period end.

use std::fmt;
use std::str::FromStr;

use rb_money::Cents;
use serde::{Deserialize, Serialize};

use crate::round_half_up;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundingFrequency {
    #[default]
    Annually,
    Quarterly,
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Self::Annually => 1,
            Self::Quarterly => 4,
            Self::Monthly => 12,
            Self::Daily => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Annually => "annually",
            Self::Quarterly => "quarterly",
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `CompoundingFrequency::from_str` for unknown names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownFrequency(pub String);

impl fmt::Display for UnknownFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown compounding frequency '{}'. expected one of: annually | quarterly | monthly | daily",
            self.0
        )
    }
}

impl std::error::Error for UnknownFrequency {}

impl FromStr for CompoundingFrequency {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annually" | "annual" | "yearly" => Ok(Self::Annually),
            "quarterly" => Ok(Self::Quarterly),
            "monthly" => Ok(Self::Monthly),
            "daily" => Ok(Self::Daily),
            _ => Err(UnknownFrequency(s.to_string())),
        }
    }
}

/// Future value in cents of `principal` plus `monthly_contribution` every
/// month for `years` at `annual_rate_percent` (7.0 = 7 %).
pub fn calculate_interest(
    principal: Cents,
    monthly_contribution: Cents,
    annual_rate_percent: f64,
    years: u32,
    frequency: CompoundingFrequency,
) -> Cents {
    let n = f64::from(frequency.periods_per_year());
    let periods = n * f64::from(years);
    let rate = annual_rate_percent / 100.0 / n;
    let growth = (1.0 + rate).powf(periods);

    let principal_fv = principal.as_f64() * growth;

    let per_period = monthly_contribution.as_f64() * 12.0 / n;
    let contributions_fv = if rate == 0.0 {
        per_period * periods
    } else {
        per_period * (growth - 1.0) / rate
    };

    Cents::new(round_half_up(principal_fv + contributions_fv))
}
