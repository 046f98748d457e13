//! rb-config
//!
//! Allocation configs: the validated model, YAML loading, a stable content
//! fingerprint, built-in presets and the portfolio catalog.
//!
//! Validation failures are typed ([`ConfigError`]); anything touching the
//! filesystem or YAML returns `anyhow::Result` with context, and the typed
//! error stays reachable through `downcast_ref`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

pub mod catalog;
pub mod presets;

mod model;

pub use catalog::{
    find_portfolio, load_portfolios, Portfolio, PortfolioSource, PortfolioStore, YamlDirSource,
    ENV_PORTFOLIO_DIR,
};
pub use model::{
    AllocationConfig, ConfigError, RawConfig, StockRecord, StockTarget, SymbolRole,
    PERCENT_TOLERANCE,
};

/// A validated config plus the fingerprint of its canonical form.
#[derive(Debug, Clone)]
pub struct LoadedAllocation {
    pub config: AllocationConfig,
    /// Lowercase hex SHA-256 of [`canonical_json`].
    pub config_hash: String,
}

/// Parse and validate an allocation document (`stocks: [...]`).
pub fn parse_config_yaml(yaml: &str) -> Result<AllocationConfig> {
    let raw: RawConfig = serde_yaml::from_str(yaml).context("invalid allocation yaml")?;
    let config = AllocationConfig::try_from(raw)?;
    Ok(config)
}

/// Parse, validate and fingerprint an allocation document held in memory.
pub fn load_config_from_str(yaml: &str) -> Result<LoadedAllocation> {
    let config = parse_config_yaml(yaml)?;
    let config_hash = config_hash(&config)?;
    Ok(LoadedAllocation {
        config,
        config_hash,
    })
}

/// Read, validate and fingerprint an allocation file.
pub fn load_config_file(path: &Path) -> Result<LoadedAllocation> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read allocation file: {}", path.display()))?;
    load_config_from_str(&raw)
        .with_context(|| format!("invalid allocation file: {}", path.display()))
}

/// Compact JSON of the validated config. Field order comes from the model,
/// so YAML key order never changes it.
pub fn canonical_json(config: &AllocationConfig) -> Result<String> {
    serde_json::to_string(config).context("canonical json serialize failed")
}

pub fn config_hash(config: &AllocationConfig) -> Result<String> {
    let canonical = canonical_json(config)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
