//! Command handler helpers for the `rb` binary.
//!
//! Argument parsing and config selection shared by several subcommands live
//! here. Text rendering lives in [`render`].

pub mod render;

use anyhow::{Context, Result};
use rb_config::presets::DEFAULT_PORTFOLIO;
use rb_config::{find_portfolio, load_portfolios, AllocationConfig, PortfolioStore};
use rb_money::Cents;
use rb_portfolio::RemainderPolicy;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// A validated config plus a label saying where it came from.
#[derive(Debug)]
pub struct SelectedConfig {
    pub label: String,
    pub config: AllocationConfig,
}

/// Resolve `--config` / `--portfolio` into a validated config.
///
/// With neither flag the catalog's "Full Portfolio" is used, or the first
/// catalog entry when the store does not carry one.
pub fn select_config(
    store: &PortfolioStore,
    config: Option<PathBuf>,
    portfolio: Option<String>,
) -> Result<SelectedConfig> {
    if let Some(path) = config {
        let loaded = rb_config::load_config_file(&path)?;
        info!(path = %path.display(), config_hash = %loaded.config_hash, "loaded allocation file");
        return Ok(SelectedConfig {
            label: path.display().to_string(),
            config: loaded.config,
        });
    }

    let portfolios = load_portfolios(store);
    let picked = match portfolio.as_deref() {
        Some(name) => find_portfolio(&portfolios, name).with_context(|| {
            let known: Vec<&str> = portfolios.iter().map(|p| p.name.as_str()).collect();
            format!(
                "unknown --portfolio '{}'. expected one of: {}",
                name.trim(),
                known.join(" | ")
            )
        })?,
        None => find_portfolio(&portfolios, DEFAULT_PORTFOLIO)
            .or_else(|| portfolios.first())
            .context("portfolio catalog is empty")?,
    };

    Ok(SelectedConfig {
        label: picked.name.clone(),
        config: picked.config.clone(),
    })
}

/// Parse a money flag with the amount codec.
pub fn parse_amount_arg(flag: &str, raw: &str) -> Result<Cents> {
    rb_money::parse_amount(raw).with_context(|| format!("invalid {flag} '{raw}'"))
}

pub fn ensure_non_negative(flag: &str, amount: Cents) -> Result<()> {
    if amount.is_negative() {
        anyhow::bail!("{flag} must be >= 0, got {amount}");
    }
    Ok(())
}

/// Parse a CLI `--remainder` string into a [`RemainderPolicy`].
pub fn parse_remainder_policy(raw: &str) -> Result<RemainderPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "discard" => Ok(RemainderPolicy::Discard),
        "largest-target" | "largest_target" => Ok(RemainderPolicy::LargestTarget),
        other => anyhow::bail!(
            "invalid --remainder '{}'. expected one of: discard | largest-target",
            other
        ),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize json output failed")?;
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_policy_names() {
        assert_eq!(parse_remainder_policy("discard").unwrap(), RemainderPolicy::Discard);
        assert_eq!(
            parse_remainder_policy(" Largest-Target ").unwrap(),
            RemainderPolicy::LargestTarget
        );
        let err = parse_remainder_policy("spread").unwrap_err();
        assert!(err.to_string().contains("discard | largest-target"));
    }

    #[test]
    fn amount_args_go_through_the_codec() {
        assert_eq!(parse_amount_arg("--amount", "$1,000.00").unwrap(), Cents::new(100_000));
        let err = parse_amount_arg("--amount", "lots").unwrap_err();
        assert_eq!(err.to_string(), "invalid --amount 'lots'");
    }

    #[test]
    fn negative_amounts_are_refused() {
        assert!(ensure_non_negative("--deposit", Cents::ZERO).is_ok());
        let err = ensure_non_negative("--deposit", Cents::new(-500)).unwrap_err();
        assert_eq!(err.to_string(), "--deposit must be >= 0, got -$5.00");
    }

    #[test]
    fn default_selection_uses_full_portfolio() {
        let sel = select_config(&PortfolioStore::Unavailable, None, None).unwrap();
        assert_eq!(sel.label, DEFAULT_PORTFOLIO);
        assert_eq!(sel.config.len(), 4);
    }

    #[test]
    fn named_selection_is_case_insensitive() {
        let store = PortfolioStore::Unavailable;
        let sel = select_config(&store, None, Some("no bonds".to_string())).unwrap();
        assert_eq!(sel.label, "No Bonds");
    }

    #[test]
    fn unknown_portfolio_lists_choices() {
        let err = select_config(&PortfolioStore::Unavailable, None, Some("Moon".to_string()))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unknown --portfolio 'Moon'"), "{msg}");
        assert!(msg.contains("Full Portfolio"), "{msg}");
    }
}
