//! Fixed-width text tables for terminal output. Rows follow config order.

use std::fmt::Write;

use rb_config::{AllocationConfig, Portfolio};
use rb_money::{format_amount, AmountFormat, Cents};
use rb_portfolio::{DepositResult, RebalanceResult};

pub fn money(amount: Cents) -> String {
    format_amount(amount, AmountFormat::DISPLAY)
}

pub fn rebalance_table(result: &RebalanceResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:>16} {:>9} {:>9} {:>9} {:>16}",
        "SYMBOL", "CURRENT", "CURRENT%", "TARGET%", "DRIFT", "AMOUNT_NEEDED"
    );
    for r in &result.symbols {
        let _ = writeln!(
            out,
            "{:<8} {:>16} {:>9.2} {:>9.2} {:>+9.2} {:>16}",
            r.symbol,
            money(r.amount),
            r.current_percentage,
            r.target_percentage,
            r.drift,
            money(r.amount_needed)
        );
    }
    let _ = writeln!(
        out,
        "total={} deposit={}",
        money(result.total),
        money(result.deposit_amount)
    );
    let h = &result.holdings;
    let _ = writeln!(
        out,
        "rows_read={} rows_applied={} rows_unresolved={} rows_unparseable={} rows_overflowed={}",
        h.rows_read, h.rows_applied, h.rows_unresolved, h.rows_unparseable, h.rows_overflowed
    );
    out
}

pub fn deposit_table(result: &DepositResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {:>16}", "SYMBOL", "ALLOCATION");
    for a in &result.allocations {
        let _ = writeln!(out, "{:<8} {:>16}", a.symbol, money(a.amount));
    }
    let _ = writeln!(
        out,
        "total={} requested={} unallocated={}",
        money(result.total),
        money(result.requested),
        money(result.unallocated())
    );
    out
}

pub fn targets_table(config: &AllocationConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:>9}  {:<24} ALTERNATIVES",
        "SYMBOL", "TARGET%", "DESCRIPTION"
    );
    for s in config.stocks() {
        let _ = writeln!(
            out,
            "{:<8} {:>9.2}  {:<24} {}",
            s.symbol,
            s.target_percentage,
            s.description,
            s.alternatives.join(",")
        );
    }
    out
}

pub fn portfolio_list(portfolios: &[Portfolio]) -> String {
    let mut out = String::new();
    for (i, p) in portfolios.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "portfolio={}", p.name);
        if let Some(desc) = &p.description {
            let _ = writeln!(out, "description={desc}");
        }
        out.push_str(&targets_table(&p.config));
    }
    out
}
