//! Holdings CSV loader.
//!
//! Turns a brokerage positions export into [`HoldingsRow`] values. This is the
//! read side only: symbol resolution and amount parsing happen later in
//! `rb_portfolio::HoldingsSnapshot::ingest`, which counts and skips bad rows.
//!
//! ## CSV column contract (case-insensitive, order-independent)
//!
//! | Column          | Example        | Notes                              |
//! |-----------------|----------------|------------------------------------|
//! | `Symbol`        | `VTI`          | Empty cells skip the row           |
//! | `Current Value` | `"$1,234.56"`  | Kept as text; quoted commas allowed |
//!
//! Only the two required cells must be UTF-8. A row whose `Symbol` or
//! `Current Value` cell is not is skipped; other cells are never decoded.
//!
//! Any other columns are ignored. Records too short to reach both columns
//! are skipped, which drops the free-text footer most brokers append.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use rb_portfolio::HoldingsRow;
use tracing::debug;

pub const SYMBOL_COLUMN: &str = "Symbol";
pub const VALUE_COLUMN: &str = "Current Value";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoldingsCsvError {
    /// An I/O or CSV-library error.
    Io(String),
    /// The header row is missing a required column.
    MissingHeader(String),
}

impl fmt::Display for HoldingsCsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldingsCsvError::Io(msg) => write!(f, "csv io error: {msg}"),
            HoldingsCsvError::MissingHeader(col) => {
                write!(f, "csv missing required header column: '{col}'")
            }
        }
    }
}

impl std::error::Error for HoldingsCsvError {}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read and parse the holdings CSV at `path`.
pub fn parse_holdings_file(path: &Path) -> Result<Vec<HoldingsRow>, HoldingsCsvError> {
    let buf = std::fs::read(path)
        .map_err(|e| HoldingsCsvError::Io(format!("read '{}': {e}", path.display())))?;
    parse_holdings_bytes(&buf)
}

/// Parse holdings CSV text. See [`parse_holdings_bytes`].
pub fn parse_holdings_str(src: &str) -> Result<Vec<HoldingsRow>, HoldingsCsvError> {
    parse_holdings_bytes(src.as_bytes())
}

/// Parse raw holdings CSV bytes. Only structural errors (missing header,
/// unreadable input) are returned as `Err`.
///
/// Cells are decoded one at a time, so non-UTF-8 bytes elsewhere in a row
/// (Latin-1 descriptions are common) never cost more than that row.
pub fn parse_holdings_bytes(src: &[u8]) -> Result<Vec<HoldingsRow>, HoldingsCsvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(src);
    let mut records = rdr.byte_records();

    let header = match records.next() {
        Some(rec) => rec.map_err(|e| HoldingsCsvError::Io(e.to_string()))?,
        None => return Ok(Vec::new()),
    };
    let cols = build_col_index(&header);
    let sym_idx = column(&cols, SYMBOL_COLUMN)?;
    let val_idx = column(&cols, VALUE_COLUMN)?;

    let mut out = Vec::new();
    for (i, rec) in records.enumerate() {
        let rec = rec.map_err(|e| HoldingsCsvError::Io(e.to_string()))?;
        // 1-based, header = 1
        let row_num = i + 2;

        let (Some(symbol), Some(value)) = (rec.get(sym_idx), rec.get(val_idx)) else {
            debug!(row = row_num, fields = rec.len(), "short holdings record; skipped");
            continue;
        };
        let (Ok(symbol), Ok(value)) = (std::str::from_utf8(symbol), std::str::from_utf8(value))
        else {
            debug!(row = row_num, "holdings record not valid utf-8; skipped");
            continue;
        };
        let symbol = symbol.trim();
        if symbol.is_empty() {
            debug!(row = row_num, "holdings record without symbol; skipped");
            continue;
        }

        out.push(HoldingsRow::new(symbol, value.trim()));
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Case-insensitive column-name → index map. First occurrence wins; cells
/// that are not UTF-8 cannot name a required column and are left out.
fn build_col_index(header: &csv::ByteRecord) -> HashMap<String, usize> {
    let mut idx = HashMap::new();
    for (i, col) in header.iter().enumerate() {
        if let Ok(col) = std::str::from_utf8(col) {
            idx.entry(col.trim().to_ascii_lowercase()).or_insert(i);
        }
    }
    idx
}

fn column(cols: &HashMap<String, usize>, name: &str) -> Result<usize, HoldingsCsvError> {
    cols.get(&name.to_ascii_lowercase())
        .copied()
        .ok_or_else(|| HoldingsCsvError::MissingHeader(name.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
