//! Trade table row type.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::TradeAction;

/// One observed transaction from the trade table.
///
/// Immutable once loaded; components hold read-only views.
#[derive(Clone, Debug, Deserialize)]
pub struct TradeRecord {
    /// Stable member identifier (bioguide id).
    pub member_id: String,
    pub member_name: String,
    pub member_party: String,
    pub member_chamber: String,
    /// Two-letter postal code of the member's state.
    pub member_state: String,
    pub stock_ticker: String,
    pub stock_name: String,
    pub action: TradeAction,
    /// Trade amount in dollars; malformed values are coerced to zero.
    #[serde(deserialize_with = "super::lenient_decimal")]
    pub amount: Decimal,
    /// ISO-parsable trade date. Kept as raw text so invalid dates still
    /// display; [`TradeRecord::date`] parses on demand.
    pub trade_date: String,
    #[serde(default)]
    pub committee_names: Option<String>,
    #[serde(default)]
    pub flagged: Option<String>,
}

impl TradeRecord {
    /// Parses the trade date, if it is a valid `YYYY-MM-DD` value.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.trade_date.trim(), "%Y-%m-%d").ok()
    }
}
