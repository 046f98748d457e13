//! rb-portfolio
//!
//! Rebalancing math over a validated allocation config:
//! - holdings ingestion (alias resolution, per-primary totals)
//! - drift and amount-needed per symbol
//! - proportional deposit allocation
//! - compound-interest projection
//!
//! Pure deterministic logic. No IO beyond `tracing` diagnostics.

mod types;

pub mod compound;
pub mod deposit;
pub mod holdings;
pub mod rebalance;

pub use compound::{calculate_interest, CompoundingFrequency, UnknownFrequency};
pub use deposit::{
    compute_deposit, compute_deposit_with_policy, DepositAllocation, DepositError, DepositResult,
    RemainderPolicy,
};
pub use holdings::{HoldingsSnapshot, IngestStats};
pub use rebalance::{compute_rebalance, RebalanceResult, SymbolReport};
pub use types::HoldingsRow;

/// Round half toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
///
/// Results land in integer cents, so a negative zero cannot reach callers.
pub(crate) fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}
