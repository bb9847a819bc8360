use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Live price snapshot for a symbol.
///
/// Quotes are transient: they are built fresh on every request and never
/// persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Normalized (uppercase) ticker
    pub symbol: String,

    /// Latest traded price
    pub price: Decimal,

    /// Absolute change against the previous close
    pub change: Decimal,

    /// Percent change against the previous close (2.35 means 2.35%)
    pub change_percent: Decimal,

    /// Shares traded in the session
    pub volume: i64,

    pub previous_close: Decimal,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
}
