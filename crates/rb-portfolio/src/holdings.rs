//! Holdings ingestion.
//!
//! Folds raw holdings rows onto a validated config. Every row ends up in
//! exactly one coverage bucket:
//!
//! | Bucket             | Meaning                                        |
//! |--------------------|------------------------------------------------|
//! | `rows_applied`     | symbol resolved, amount parsed, totals updated |
//! | `rows_unresolved`  | symbol is neither a primary nor an alias       |
//! | `rows_unparseable` | symbol resolved but the amount is not a number |
//! | `rows_overflowed`  | amount would push a total past `i64` cents     |
//!
//! Skipped rows contribute to neither a symbol's amount nor the total.
//! Noisy brokerage exports are expected, so nothing here is fatal.

use std::collections::BTreeMap;

use rb_config::AllocationConfig;
use rb_money::{parse_amount, Cents};
use serde::Serialize;
use tracing::{debug, warn};

use crate::HoldingsRow;

/// Per-ingest coverage counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub rows_read: usize,
    pub rows_applied: usize,
    pub rows_unresolved: usize,
    pub rows_unparseable: usize,
    pub rows_overflowed: usize,
}

/// Per-primary-symbol current amounts derived from one set of rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoldingsSnapshot {
    amounts: BTreeMap<String, Cents>,
    total: Cents,
    stats: IngestStats,
}

impl HoldingsSnapshot {
    /// Resolve each row's symbol through the config and sum amounts per
    /// primary symbol.
    pub fn ingest(config: &AllocationConfig, rows: &[HoldingsRow]) -> Self {
        let mut snap = Self::default();

        for row in rows {
            snap.stats.rows_read += 1;

            let symbol = row.symbol.trim();
            let Some(target) = config.resolve(symbol) else {
                debug!(symbol, "holdings row not in allocation; skipped");
                snap.stats.rows_unresolved += 1;
                continue;
            };

            let amount = match parse_amount(&row.value) {
                Ok(a) => a,
                Err(e) => {
                    warn!(symbol, error = %e, "holdings row value unparseable; skipped");
                    snap.stats.rows_unparseable += 1;
                    continue;
                }
            };

            let held = snap.amount(&target.symbol);
            let (Some(held), Some(total)) =
                (held.checked_add(amount), snap.total.checked_add(amount))
            else {
                warn!(symbol, amount = amount.raw(), "holdings row overflows totals; skipped");
                snap.stats.rows_overflowed += 1;
                continue;
            };

            snap.amounts.insert(target.symbol.clone(), held);
            snap.total = total;
            snap.stats.rows_applied += 1;
        }

        snap
    }

    /// Aggregated amount for a primary symbol; zero when nothing was held.
    pub fn amount(&self, primary: &str) -> Cents {
        self.amounts.get(primary).copied().unwrap_or(Cents::ZERO)
    }

    pub fn amounts(&self) -> &BTreeMap<String, Cents> {
        &self.amounts
    }

    /// Sum of applied rows. Excludes any deposit.
    pub fn total(&self) -> Cents {
        self.total
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }
}
