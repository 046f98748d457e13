//! Built-in allocation presets.
//!
//! These are the fallback catalog whenever no portfolio store is available.

use tracing::error;

use crate::{AllocationConfig, Portfolio, StockRecord};

/// Name of the preset used when the caller does not pick one.
pub const DEFAULT_PORTFOLIO: &str = "Full Portfolio";

type PresetDef = (&'static str, &'static [(&'static str, f64, &'static str)]);

const PRESETS: &[PresetDef] = &[
    (
        "No Bonds",
        &[
            ("VTI", 80.0, "Total Market Fund"),
            ("VXUS", 20.0, "International Fund"),
        ],
    ),
    (
        "Indexes only",
        &[
            ("VTI", 79.0, "Total Market Fund"),
            ("VXUS", 20.0, "International Fund"),
            ("FBTC", 1.0, "Bitcoin ETF"),
        ],
    ),
    (
        DEFAULT_PORTFOLIO,
        &[
            ("VTI", 71.0, "Total Market Fund"),
            ("VXUS", 18.0, "International Fund"),
            ("BND", 10.0, "Bond Fund"),
            ("FBTC", 1.0, "Bitcoin ETF"),
        ],
    ),
];

/// All presets, validated, in catalog order.
pub fn presets() -> Vec<Portfolio> {
    PRESETS
        .iter()
        .filter_map(|(name, lines)| {
            let records = lines
                .iter()
                .map(|(sym, pct, desc)| StockRecord::new(*sym, *pct, *desc))
                .collect();
            match AllocationConfig::from_records(records) {
                Ok(config) => Some(Portfolio {
                    name: (*name).to_string(),
                    description: None,
                    config,
                }),
                Err(e) => {
                    error!(preset = *name, error = %e, "built-in preset failed validation");
                    None
                }
            }
        })
        .collect()
}
