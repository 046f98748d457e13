use serde::{Deserialize, Serialize};

/// One already-split holdings row: ticker text and its raw value text
/// (e.g. `"$71,000.00"`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingsRow {
    pub symbol: String,
    pub value: String,
}

impl HoldingsRow {
    pub fn new<S: Into<String>, V: Into<String>>(symbol: S, value: V) -> Self {
        Self {
            symbol: symbol.into(),
            value: value.into(),
        }
    }
}
