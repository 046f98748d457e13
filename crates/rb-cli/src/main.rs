use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use rb_config::{load_portfolios, PortfolioStore};
use rb_portfolio::CompoundingFrequency;

mod commands;

use commands::render;

#[derive(Parser)]
#[command(name = "rb")]
#[command(about = "Portfolio rebalancing calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare holdings to targets and print the buy/sell needed per symbol
    Rebalance {
        /// Allocation YAML (`stocks: [...]`)
        #[arg(long, conflicts_with = "portfolio")]
        config: Option<PathBuf>,

        /// Catalog portfolio name (defaults to "Full Portfolio")
        #[arg(long)]
        portfolio: Option<String>,

        /// Brokerage positions CSV with `Symbol` and `Current Value` columns
        #[arg(long)]
        holdings: PathBuf,

        /// Cash about to be added, e.g. 1000.00 or "$1,000.00"
        #[arg(long)]
        deposit: Option<String>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Split a cash deposit across targets, ignoring current holdings
    Deposit {
        #[arg(long, conflicts_with = "portfolio")]
        config: Option<PathBuf>,

        #[arg(long)]
        portfolio: Option<String>,

        /// Cash to allocate, e.g. 10000.00
        #[arg(long)]
        amount: String,

        /// What to do with cents lost to flooring (discard | largest-target)
        #[arg(long, default_value = "discard")]
        remainder: String,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Project a balance forward with compound interest
    Interest {
        /// Starting balance
        #[arg(long)]
        principal: String,

        /// Added every month
        #[arg(long, default_value = "0.00")]
        contribution: String,

        /// Annual rate in percent (7 = 7 %)
        #[arg(long)]
        rate: f64,

        #[arg(long)]
        years: u32,

        #[arg(long, default_value_t = CompoundingFrequency::Annually)]
        frequency: CompoundingFrequency,
    },

    /// List the portfolios in the catalog
    Portfolios,

    /// Validate an allocation YAML and print its hash + targets
    ConfigCheck {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent when missing.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    // Only place the process reads the catalog env.
    let store = PortfolioStore::from_env();
    info!(store = ?store, "portfolio store");

    match cli.cmd {
        Commands::Rebalance {
            config,
            portfolio,
            holdings,
            deposit,
            json,
        } => {
            let selected = commands::select_config(&store, config, portfolio)?;
            let deposit = match deposit {
                Some(d) => commands::parse_amount_arg("--deposit", &d)?,
                None => rb_money::Cents::ZERO,
            };
            commands::ensure_non_negative("--deposit", deposit)?;

            let rows = rb_holdings::parse_holdings_file(&holdings)
                .with_context(|| format!("load holdings failed: {}", holdings.display()))?;
            let result = rb_portfolio::compute_rebalance(&selected.config, &rows, deposit);
            info!(
                rows_read = result.holdings.rows_read,
                rows_applied = result.holdings.rows_applied,
                rows_unresolved = result.holdings.rows_unresolved,
                rows_unparseable = result.holdings.rows_unparseable,
                rows_overflowed = result.holdings.rows_overflowed,
                "holdings ingested"
            );

            if json {
                commands::print_json(&result)?;
            } else {
                println!("portfolio={}", selected.label);
                print!("{}", render::rebalance_table(&result));
            }
        }

        Commands::Deposit {
            config,
            portfolio,
            amount,
            remainder,
            json,
        } => {
            let selected = commands::select_config(&store, config, portfolio)?;
            let amount = commands::parse_amount_arg("--amount", &amount)?;
            let policy = commands::parse_remainder_policy(&remainder)?;

            let result =
                rb_portfolio::compute_deposit_with_policy(&selected.config, amount, policy)?;

            if json {
                commands::print_json(&result)?;
            } else {
                println!("portfolio={}", selected.label);
                print!("{}", render::deposit_table(&result));
            }
        }

        Commands::Interest {
            principal,
            contribution,
            rate,
            years,
            frequency,
        } => {
            let principal = commands::parse_amount_arg("--principal", &principal)?;
            let contribution = commands::parse_amount_arg("--contribution", &contribution)?;
            commands::ensure_non_negative("--principal", principal)?;
            commands::ensure_non_negative("--contribution", contribution)?;
            if !rate.is_finite() || rate < 0.0 {
                anyhow::bail!("invalid --rate '{rate}'. expected a percentage >= 0");
            }

            let fv =
                rb_portfolio::calculate_interest(principal, contribution, rate, years, frequency);
            println!("frequency={frequency}");
            println!("future_value={}", render::money(fv));
        }

        Commands::Portfolios => {
            let portfolios = load_portfolios(&store);
            print!("{}", render::portfolio_list(&portfolios));
        }

        Commands::ConfigCheck { path } => {
            let loaded = rb_config::load_config_file(&path)?;
            println!("config_hash={}", loaded.config_hash);
            print!("{}", render::targets_table(&loaded.config));
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` overrides the
/// default `warn` filter.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
