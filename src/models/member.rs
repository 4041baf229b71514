//! Roster table row type and the derived member record.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::trade::TradeRecord;

/// One row of the member roster: a (member, state) pairing.
#[derive(Clone, Debug, Deserialize)]
pub struct RosterRow {
    pub member_bio_guide_id: String,
    pub member_name: String,
    pub member_chamber: String,
    pub member_party: String,
    /// Two-letter postal code, though some exports carry the full state
    /// name; region matching accepts either.
    pub member_state: String,
    pub photo_url: String,
    /// Aggregate trade volume across the whole dataset; malformed values
    /// are coerced to zero.
    #[serde(deserialize_with = "super::lenient_decimal")]
    pub total_trade_volume: Decimal,
}

/// A legislator with their trade history attached.
///
/// Built by joining the roster against the trade store on member id.
/// Rebuilt from scratch whenever the selected region changes.
#[derive(Clone, Debug)]
pub struct MemberRecord {
    pub id: String,
    pub name: String,
    pub chamber: String,
    pub party: String,
    pub state: String,
    pub photo_url: String,
    /// Aggregate trade volume, taken from the roster.
    pub volume: Decimal,
    /// Every trade attributed to this member, in encounter order.
    pub trades: Vec<TradeRecord>,
}

impl MemberRecord {
    /// Builds a member record from a roster row and their trades.
    pub fn from_roster(row: &RosterRow, trades: Vec<TradeRecord>) -> Self {
        Self {
            id: row.member_bio_guide_id.clone(),
            name: row.member_name.clone(),
            chamber: row.member_chamber.clone(),
            party: row.member_party.clone(),
            state: row.member_state.clone(),
            photo_url: row.photo_url.clone(),
            volume: row.total_trade_volume,
            trades,
        }
    }

    /// Returns this member's trades sorted by date descending, most recent
    /// first. Undated trades sort last; ties keep encounter order.
    pub fn sorted_trades(&self) -> Vec<&TradeRecord> {
        let mut trades: Vec<&TradeRecord> = self.trades.iter().collect();
        trades.sort_by(|a, b| match (a.date(), b.date()) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        trades
    }

    /// Party initial shown next to the member's name.
    pub fn party_initial(&self) -> &str {
        self.party.get(..1).unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeAction;
    use rust_decimal_macros::dec;

    fn trade(ticker: &str, date: &str) -> TradeRecord {
        TradeRecord {
            member_id: "M1".to_string(),
            member_name: "Jane Doe".to_string(),
            member_party: "Independent".to_string(),
            member_chamber: "House".to_string(),
            member_state: "CA".to_string(),
            stock_ticker: ticker.to_string(),
            stock_name: ticker.to_string(),
            action: TradeAction::Buy,
            amount: dec!(100),
            trade_date: date.to_string(),
            committee_names: None,
            flagged: None,
        }
    }

    fn member(trades: Vec<TradeRecord>) -> MemberRecord {
        MemberRecord {
            id: "M1".to_string(),
            name: "Jane Doe".to_string(),
            chamber: "House".to_string(),
            party: "Independent".to_string(),
            state: "CA".to_string(),
            photo_url: String::new(),
            volume: dec!(0),
            trades,
        }
    }

    #[test]
    fn trades_sort_most_recent_first() {
        let m = member(vec![
            trade("OLD", "2024-01-02"),
            trade("NEW", "2025-06-01"),
            trade("MID", "2024-11-30"),
        ]);
        let sorted: Vec<&str> = m.sorted_trades().iter().map(|t| t.stock_ticker.as_str()).collect();
        assert_eq!(sorted, ["NEW", "MID", "OLD"]);
    }

    #[test]
    fn date_ties_keep_encounter_order() {
        let m = member(vec![
            trade("FIRST", "2025-03-01"),
            trade("SECOND", "2025-03-01"),
        ]);
        let sorted: Vec<&str> = m.sorted_trades().iter().map(|t| t.stock_ticker.as_str()).collect();
        assert_eq!(sorted, ["FIRST", "SECOND"]);
    }

    #[test]
    fn undated_trades_sort_last() {
        let m = member(vec![trade("RAW", "unknown"), trade("DATED", "2023-01-01")]);
        let sorted: Vec<&str> = m.sorted_trades().iter().map(|t| t.stock_ticker.as_str()).collect();
        assert_eq!(sorted, ["DATED", "RAW"]);
    }
}
