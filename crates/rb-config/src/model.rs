//! Allocation config model and validator.
//!
//! An [`AllocationConfig`] can only be obtained through
//! [`AllocationConfig::from_records`], so holding one means:
//! - target percentages sum to 100 within [`PERCENT_TOLERANCE`];
//! - every percentage lies in `0..=100`;
//! - no symbol (primary or alternative) is claimed twice.
//!
//! Validation is all-or-nothing. The first violation aborts and no partial
//! config is returned.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Allowed distance between the percentage sum and 100.
pub const PERCENT_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Raw (deserialized) records
// ---------------------------------------------------------------------------

/// One stock line exactly as it appears in an allocation document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub symbol: String,
    pub target_percentage: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

impl StockRecord {
    pub fn new<S: Into<String>, D: Into<String>>(
        symbol: S,
        target_percentage: f64,
        description: D,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            target_percentage,
            description: description.into(),
            alternatives: Vec::new(),
        }
    }

    /// Builder-style helper for alias symbols.
    pub fn with_alternatives<I, S>(mut self, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternatives = alternatives.into_iter().map(Into::into).collect();
        self
    }
}

/// Top-level allocation document: `stocks: [...]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawConfig {
    pub stocks: Vec<StockRecord>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Whether a clashing symbol was being claimed as a primary or an alias.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SymbolRole {
    Primary,
    Alternative,
}

/// Structural validation failures. All of them are fatal to config
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `|sum - 100| > PERCENT_TOLERANCE` (or the sum is not finite).
    PercentageMismatch { sum: f64 },
    /// A single target lies outside `0..=100`.
    PercentageOutOfRange { symbol: String, value: f64 },
    /// A primary symbol is the empty string.
    EmptySymbol { index: usize },
    /// `symbol` is already claimed by `existing_owner`; `claimant` tried to
    /// claim it again in the given role.
    DuplicateSymbol {
        symbol: String,
        existing_owner: String,
        claimant: String,
        role: SymbolRole,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PercentageMismatch { sum } => {
                write!(f, "target percentages do not add up to 100 (sum = {sum})")
            }
            Self::PercentageOutOfRange { symbol, value } => write!(
                f,
                "target percentage for {symbol} must be within 0..=100, got {value}"
            ),
            Self::EmptySymbol { index } => {
                write!(f, "stock #{index} has an empty symbol")
            }
            Self::DuplicateSymbol {
                symbol,
                existing_owner,
                claimant,
                role: SymbolRole::Primary,
            } => write!(
                f,
                "symbol {symbol} appears multiple times (primary for both {existing_owner} and {claimant})"
            ),
            Self::DuplicateSymbol {
                symbol,
                existing_owner,
                claimant,
                role: SymbolRole::Alternative,
            } => write!(
                f,
                "symbol {symbol} appears multiple times (primary/alternative for {existing_owner}, alternative for {claimant})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Validated model
// ---------------------------------------------------------------------------

/// One validated line of the allocation plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockTarget {
    pub symbol: String,
    /// Percentage (71.0 = 71 %), not a fraction.
    pub target_percentage: f64,
    pub description: String,
    pub alternatives: Vec<String>,
}

/// Validated, ordered allocation plan. Order drives display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationConfig {
    stocks: Vec<StockTarget>,
    /// Claimed symbol (primary or alias) -> index into `stocks`.
    #[serde(skip)]
    owners: BTreeMap<String, usize>,
}

impl AllocationConfig {
    /// Validate raw records and build the config.
    pub fn from_records(records: Vec<StockRecord>) -> Result<Self, ConfigError> {
        let sum: f64 = records.iter().map(|r| r.target_percentage).sum();
        if !sum.is_finite() || (sum - 100.0).abs() > PERCENT_TOLERANCE {
            return Err(ConfigError::PercentageMismatch { sum });
        }

        for (index, r) in records.iter().enumerate() {
            if r.symbol.is_empty() {
                return Err(ConfigError::EmptySymbol { index });
            }
            if !(0.0..=100.0).contains(&r.target_percentage) {
                return Err(ConfigError::PercentageOutOfRange {
                    symbol: r.symbol.clone(),
                    value: r.target_percentage,
                });
            }
        }

        let mut owners: BTreeMap<String, usize> = BTreeMap::new();
        for (idx, r) in records.iter().enumerate() {
            if let Some(&prev) = owners.get(&r.symbol) {
                return Err(ConfigError::DuplicateSymbol {
                    symbol: r.symbol.clone(),
                    existing_owner: records[prev].symbol.clone(),
                    claimant: r.symbol.clone(),
                    role: SymbolRole::Primary,
                });
            }
            owners.insert(r.symbol.clone(), idx);

            for alt in &r.alternatives {
                if let Some(&prev) = owners.get(alt) {
                    return Err(ConfigError::DuplicateSymbol {
                        symbol: alt.clone(),
                        existing_owner: records[prev].symbol.clone(),
                        claimant: r.symbol.clone(),
                        role: SymbolRole::Alternative,
                    });
                }
                owners.insert(alt.clone(), idx);
            }
        }

        let stocks = records
            .into_iter()
            .map(|r| StockTarget {
                symbol: r.symbol,
                target_percentage: r.target_percentage,
                description: r.description,
                alternatives: r.alternatives,
            })
            .collect();

        Ok(Self { stocks, owners })
    }

    pub fn stocks(&self) -> &[StockTarget] {
        &self.stocks
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Look up a target by its primary symbol.
    pub fn get(&self, primary: &str) -> Option<&StockTarget> {
        self.stocks.iter().find(|s| s.symbol == primary)
    }

    /// Resolve a primary or alternative symbol to the owning target.
    pub fn resolve(&self, symbol: &str) -> Option<&StockTarget> {
        self.owners.get(symbol).map(|&i| &self.stocks[i])
    }

    /// Claimed symbol -> primary symbol, for every claimed symbol.
    pub fn symbol_map(&self) -> BTreeMap<&str, &str> {
        self.owners
            .iter()
            .map(|(sym, &i)| (sym.as_str(), self.stocks[i].symbol.as_str()))
            .collect()
    }
}

impl TryFrom<RawConfig> for AllocationConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::from_records(raw.stocks)
    }
}
