//! rb-money
//!
//! Integer-cent money type and the amount codec shared by holdings
//! ingestion, CLI input and report rendering. Pure: no IO.

mod cents;
mod codec;

pub use cents::Cents;
pub use codec::{format_amount, parse_amount, AmountFormat, AmountParseError};
