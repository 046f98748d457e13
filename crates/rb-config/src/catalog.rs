//! Portfolio catalog backed by an explicit store handle.
//!
//! # Contract
//! - The process builds one [`PortfolioStore`] at startup
//!   ([`PortfolioStore::from_env`]) and passes it by reference to whatever
//!   needs the catalog. Nothing else reads the environment for it.
//! - A store is either `Unavailable` (no source configured) or `Available`
//!   with a boxed [`PortfolioSource`].
//! - [`load_portfolios`] never fails: an unavailable store, a failing source
//!   or an empty source all yield the built-in presets.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::presets::presets;
use crate::{AllocationConfig, StockRecord};

/// Env var naming a directory of portfolio YAML documents.
pub const ENV_PORTFOLIO_DIR: &str = "RB_PORTFOLIO_DIR";

/// A named allocation plan offered to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    pub name: String,
    pub description: Option<String>,
    pub config: AllocationConfig,
}

/// Anything that can list stored portfolios.
pub trait PortfolioSource: Send + Sync {
    /// Short human label for logs (e.g. the directory path).
    fn describe(&self) -> String;

    fn load(&self) -> Result<Vec<Portfolio>>;
}

/// Explicit handle to the optional portfolio backing store.
pub enum PortfolioStore {
    Unavailable,
    Available(Box<dyn PortfolioSource>),
}

impl PortfolioStore {
    /// Build the store from [`ENV_PORTFOLIO_DIR`]. Unset or blank means
    /// `Unavailable`.
    pub fn from_env() -> Self {
        match std::env::var(ENV_PORTFOLIO_DIR) {
            Ok(dir) if !dir.trim().is_empty() => Self::from_dir(dir.trim()),
            _ => Self::Unavailable,
        }
    }

    pub fn from_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self::Available(Box::new(YamlDirSource::new(dir)))
    }
}

impl fmt::Debug for PortfolioStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("PortfolioStore::Unavailable"),
            Self::Available(src) => write!(f, "PortfolioStore::Available({})", src.describe()),
        }
    }
}

/// List portfolios from the store, falling back to the presets.
pub fn load_portfolios(store: &PortfolioStore) -> Vec<Portfolio> {
    let src = match store {
        PortfolioStore::Unavailable => {
            debug!("portfolio store unavailable; using built-in presets");
            return presets();
        }
        PortfolioStore::Available(src) => src,
    };

    match src.load() {
        Ok(found) if found.is_empty() => {
            warn!(source = %src.describe(), "portfolio store is empty; using built-in presets");
            presets()
        }
        Ok(found) => {
            debug!(source = %src.describe(), count = found.len(), "loaded portfolios");
            found
        }
        Err(e) => {
            warn!(
                source = %src.describe(),
                error = %format!("{e:#}"),
                "failed to load portfolios; using built-in presets"
            );
            presets()
        }
    }
}

/// Case-insensitive lookup by portfolio name.
pub fn find_portfolio<'a>(portfolios: &'a [Portfolio], name: &str) -> Option<&'a Portfolio> {
    let wanted = name.trim();
    portfolios
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(wanted))
}

// ---------------------------------------------------------------------------
// YAML directory source
// ---------------------------------------------------------------------------

/// On-disk portfolio document.
#[derive(Debug, Deserialize)]
struct PortfolioDocument {
    name: String,
    #[serde(default)]
    description: Option<String>,
    stocks: Vec<StockRecord>,
}

/// Reads every `*.yaml` / `*.yml` file in a directory, in file-name order.
/// Any unreadable or invalid document fails the whole load.
#[derive(Debug, Clone)]
pub struct YamlDirSource {
    dir: PathBuf,
}

impl YamlDirSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_paths(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read portfolio dir: {}", self.dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to list portfolio dir: {}", self.dir.display()))?
                .path();
            let is_yaml = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
            if is_yaml && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl PortfolioSource for YamlDirSource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn load(&self) -> Result<Vec<Portfolio>> {
        let mut out = Vec::new();
        for path in self.document_paths()? {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read portfolio: {}", path.display()))?;
            let doc: PortfolioDocument = serde_yaml::from_str(&raw)
                .with_context(|| format!("invalid portfolio yaml: {}", path.display()))?;
            let config = AllocationConfig::from_records(doc.stocks).with_context(|| {
                format!("invalid portfolio '{}' in {}", doc.name, path.display())
            })?;
            out.push(Portfolio {
                name: doc.name,
                description: doc.description,
                config,
            });
        }
        Ok(out)
    }
}
