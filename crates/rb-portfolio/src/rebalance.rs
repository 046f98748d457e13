//! Rebalance engine.
//!
//! For a grand total `T` (holdings plus deposit) and each target `s`:
//!
//! ```text
//! current%      = amount / T * 100          (0 when T == 0)
//! drift         = current% - target%        (positive = overweight)
//! amount_needed = round(T * -drift / 100)   (positive = buy, negative = sell)
//! ```
//!
//! Reports come back in config order.

use rb_config::AllocationConfig;
use rb_money::Cents;
use serde::Serialize;

use crate::holdings::{HoldingsSnapshot, IngestStats};
use crate::{round_half_up, HoldingsRow};

/// Drift and suggested transaction for one primary symbol.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub description: String,
    /// Current holdings attributed to this symbol (aliases included).
    pub amount: Cents,
    /// Share of the grand total, 0..=100.
    pub current_percentage: f64,
    pub target_percentage: f64,
    /// `current_percentage - target_percentage`.
    pub drift: f64,
    /// Signed cents to transact: buy when positive, sell when negative.
    pub amount_needed: Cents,
}

/// Output of one rebalance calculation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RebalanceResult {
    /// One report per target, in config order.
    pub symbols: Vec<SymbolReport>,
    /// Holdings total plus deposit, clamped to the `Cents` range.
    pub total: Cents,
    pub deposit_amount: Cents,
    pub holdings: IngestStats,
}

impl RebalanceResult {
    /// Combine an ingested snapshot with an optional incoming deposit.
    pub fn from_snapshot(
        config: &AllocationConfig,
        snapshot: &HoldingsSnapshot,
        deposit: Cents,
    ) -> Self {
        let total = snapshot.total().saturating_add(deposit);
        let t = total.as_f64();

        let symbols = config
            .stocks()
            .iter()
            .map(|s| {
                let amount = snapshot.amount(&s.symbol);
                // An empty portfolio has nothing to be overweight in.
                let current_percentage = if total.is_zero() {
                    0.0
                } else {
                    amount.as_f64() / t * 100.0
                };
                let drift = current_percentage - s.target_percentage;
                let amount_needed = Cents::new(round_half_up(t * (-drift / 100.0)));

                SymbolReport {
                    symbol: s.symbol.clone(),
                    description: s.description.clone(),
                    amount,
                    current_percentage,
                    target_percentage: s.target_percentage,
                    drift,
                    amount_needed,
                }
            })
            .collect();

        Self {
            symbols,
            total,
            deposit_amount: deposit,
            holdings: snapshot.stats(),
        }
    }

    /// Report for a primary symbol.
    pub fn symbol(&self, primary: &str) -> Option<&SymbolReport> {
        self.symbols.iter().find(|r| r.symbol == primary)
    }

    /// Net of all suggested transactions. Equals the deposit up to a few
    /// cents of rounding.
    pub fn net_amount_needed(&self) -> Cents {
        self.symbols.iter().map(|r| r.amount_needed).sum()
    }
}

/// Ingest `rows` and compute drift against `config`, folding in `deposit`.
pub fn compute_rebalance(
    config: &AllocationConfig,
    rows: &[HoldingsRow],
    deposit: Cents,
) -> RebalanceResult {
    let snapshot = HoldingsSnapshot::ingest(config, rows);
    RebalanceResult::from_snapshot(config, &snapshot, deposit)
}
