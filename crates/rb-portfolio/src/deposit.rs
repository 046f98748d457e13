//! Deposit allocator: split fresh cash across targets, ignoring holdings.
//!
//! Each target gets `floor(amount * target% / 100)`. Under
//! [`RemainderPolicy::Discard`] the cents lost to flooring (at most
//! `targets - 1`) stay unallocated. [`RemainderPolicy::LargestTarget`]
//! hands them to the largest target (first in config order on ties) so the
//! allocations sum to the requested amount exactly.

use std::fmt;

use rb_config::AllocationConfig;
use rb_money::Cents;
use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    #[default]
    Discard,
    LargestTarget,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DepositError {
    /// Deposits are non-negative.
    NegativeAmount { amount: Cents },
}

impl fmt::Display for DepositError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount { amount } => {
                write!(f, "deposit amount must be >= 0, got {amount}")
            }
        }
    }
}

impl std::error::Error for DepositError {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepositAllocation {
    pub symbol: String,
    pub amount: Cents,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepositResult {
    /// One entry per target, in config order.
    pub allocations: Vec<DepositAllocation>,
    /// Sum of `allocations`.
    pub total: Cents,
    pub requested: Cents,
    pub policy: RemainderPolicy,
}

impl DepositResult {
    pub fn allocation(&self, symbol: &str) -> Option<Cents> {
        self.allocations
            .iter()
            .find(|a| a.symbol == symbol)
            .map(|a| a.amount)
    }

    /// Cents of the request left unallocated by flooring.
    pub fn unallocated(&self) -> Cents {
        self.requested - self.total
    }
}

/// Allocate `amount` with [`RemainderPolicy::Discard`].
pub fn compute_deposit(
    config: &AllocationConfig,
    amount: Cents,
) -> Result<DepositResult, DepositError> {
    compute_deposit_with_policy(config, amount, RemainderPolicy::Discard)
}

pub fn compute_deposit_with_policy(
    config: &AllocationConfig,
    amount: Cents,
    policy: RemainderPolicy,
) -> Result<DepositResult, DepositError> {
    if amount.is_negative() {
        return Err(DepositError::NegativeAmount { amount });
    }

    let a = amount.as_f64();
    let mut total = Cents::ZERO;
    let mut allocations: Vec<DepositAllocation> = config
        .stocks()
        .iter()
        .map(|s| {
            let share = Cents::new((a * s.target_percentage / 100.0).floor() as i64);
            // f64 rounding near the i64 limit must not push past the request.
            let share = share.min(amount - total);
            total += share;
            DepositAllocation {
                symbol: s.symbol.clone(),
                amount: share,
            }
        })
        .collect();

    if policy == RemainderPolicy::LargestTarget {
        let leftover = amount - total;
        if leftover > Cents::ZERO {
            if let Some(idx) = largest_target_index(config) {
                allocations[idx].amount += leftover;
                total += leftover;
            }
        }
    }

    Ok(DepositResult {
        allocations,
        total,
        requested: amount,
        policy,
    })
}

fn largest_target_index(config: &AllocationConfig) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in config.stocks().iter().enumerate() {
        match best {
            Some((_, pct)) if s.target_percentage <= pct => {}
            _ => best = Some((i, s.target_percentage)),
        }
    }
    best.map(|(i, _)| i)
}
