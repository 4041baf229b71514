//! Row types for the externally supplied tables.
//!
//! The trade and roster tables arrive as already-tabular CSV records; the
//! types here mirror their columns one to one. Monetary fields use a
//! lenient decimal parse: a malformed amount becomes zero instead of
//! aborting the whole load.

pub mod member;
pub mod region;
pub mod trade;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

pub use member::{MemberRecord, RosterRow};
pub use region::{RegionAggregate, region_code_for_name, region_name_for_code, regions};
pub use trade::TradeRecord;

/// Trade direction as encoded in the trade table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum TradeAction {
    /// A purchase (wire value `"b"`).
    #[serde(rename = "b")]
    Buy,
    /// A sale (wire value `"s"`).
    #[serde(rename = "s")]
    Sell,
}

impl TradeAction {
    /// Returns the wire-format value used in the trade table.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "b",
            TradeAction::Sell => "s",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
        }
    }
}

/// Deserializes a decimal field leniently: blank or malformed values
/// become [`Decimal::ZERO`] rather than failing the record.
pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_amount(&raw))
}

/// Parses a decimal string, coercing malformed input to zero.
pub fn parse_amount(raw: &str) -> Decimal {
    raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_amount_accepts_plain_decimals() {
        assert_eq!(parse_amount("15000"), dec!(15000));
        assert_eq!(parse_amount(" 1234.50 "), dec!(1234.50));
    }

    #[test]
    fn parse_amount_coerces_malformed_to_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("n/a"), Decimal::ZERO);
        assert_eq!(parse_amount("$1,000"), Decimal::ZERO);
    }

    #[test]
    fn trade_action_wire_names() {
        assert_eq!(TradeAction::Buy.as_str(), "b");
        assert_eq!(TradeAction::Sell.as_str(), "s");
        assert_eq!(TradeAction::Buy.label(), "BUY");
    }
}
