//! Per-region trade aggregation and the choropleth volume scale.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::region::{RegionAggregate, regions};
use crate::models::trade::TradeRecord;

/// Sums trade amounts grouped by the region key derived from each record.
///
/// Single pass over the input, which is never mutated. A trade whose key
/// matches no canonical region accumulates under its raw key; the
/// reconciliation against the fixed region enumeration happens in
/// [`region_totals`].
pub fn aggregate<'a, I, F>(trades: I, region_key_of: F) -> HashMap<String, Decimal>
where
    I: IntoIterator<Item = &'a TradeRecord>,
    F: Fn(&TradeRecord) -> String,
{
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for trade in trades {
        *totals.entry(region_key_of(trade)).or_insert(Decimal::ZERO) += trade.amount;
    }
    totals
}

/// The default region key: the canonical display name for the record's
/// state code, falling back to the raw code when it matches nothing.
pub fn display_name_key(trade: &TradeRecord) -> String {
    crate::models::region::region_name_for_code(&trade.member_state)
        .map(str::to_string)
        .unwrap_or_else(|| trade.member_state.clone())
}

/// Reconciles raw totals against the fixed region enumeration.
///
/// Every canonical region appears exactly once, with volume zero when it
/// has no trades. Keys that match no canonical region are dropped here,
/// never fabricated into new regions.
pub fn region_totals(totals: &HashMap<String, Decimal>) -> Vec<RegionAggregate> {
    regions()
        .iter()
        .map(|(code, name)| RegionAggregate {
            name: (*name).to_string(),
            code: (*code).to_string(),
            id: None,
            volume: totals.get(*name).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Three-breakpoint color scale over the observed volume domain.
///
/// Breakpoints are strictly increasing and the top breakpoint equals the
/// observed maximum, so the deepest color is always reachable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeScale {
    thresholds: [Decimal; 3],
}

impl VolumeScale {
    /// Derives breakpoints from a set of region aggregates.
    pub fn from_totals(totals: &[RegionAggregate]) -> Self {
        let max = totals
            .iter()
            .map(|r| r.volume)
            .max()
            .unwrap_or(Decimal::ZERO);
        Self::from_max(max)
    }

    /// Derives breakpoints from an observed maximum volume.
    pub fn from_max(max: Decimal) -> Self {
        if max <= Decimal::ZERO {
            // Degenerate all-zero data still needs increasing thresholds.
            return Self {
                thresholds: [Decimal::ONE, Decimal::TWO, Decimal::from(3)],
            };
        }
        Self {
            thresholds: [max / Decimal::from(16), max / Decimal::from(4), max],
        }
    }

    /// The low/mid/high breakpoints, monotonically increasing.
    pub fn thresholds(&self) -> [Decimal; 3] {
        self.thresholds
    }

    /// Maps a volume to a bucket index `0..=3`, light to dark. A volume
    /// at or above the top breakpoint lands in the deepest bucket.
    pub fn bucket(&self, volume: Decimal) -> usize {
        self.thresholds.iter().filter(|t| volume >= **t).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeAction;
    use rust_decimal_macros::dec;

    fn trade(state: &str, amount: Decimal) -> TradeRecord {
        TradeRecord {
            member_id: "M1".to_string(),
            member_name: "Jane Doe".to_string(),
            member_party: "Independent".to_string(),
            member_chamber: "House".to_string(),
            member_state: state.to_string(),
            stock_ticker: "ACME".to_string(),
            stock_name: "Acme Corp".to_string(),
            action: TradeAction::Buy,
            amount,
            trade_date: "2025-07-14".to_string(),
            committee_names: None,
            flagged: None,
        }
    }

    #[test]
    fn sums_by_region_in_one_pass() {
        let trades = vec![
            trade("CA", dec!(100)),
            trade("CA", dec!(50)),
            trade("TX", dec!(25)),
        ];
        let totals = aggregate(&trades, display_name_key);
        assert_eq!(totals.get("California"), Some(&dec!(150)));
        assert_eq!(totals.get("Texas"), Some(&dec!(25)));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn conserves_total_volume_for_canonical_regions() {
        let trades = vec![
            trade("CA", dec!(100)),
            trade("NY", dec!(300)),
            trade("WY", dec!(7)),
        ];
        let input_sum: Decimal = trades.iter().map(|t| t.amount).sum();
        let totals = aggregate(&trades, display_name_key);
        let output_sum: Decimal = totals.values().copied().sum();
        assert_eq!(input_sum, output_sum);
    }

    #[test]
    fn unmatched_key_accumulates_under_raw_key() {
        let trades = vec![trade("ZZ", dec!(40))];
        let totals = aggregate(&trades, display_name_key);
        assert_eq!(totals.get("ZZ"), Some(&dec!(40)));
    }

    #[test]
    fn region_totals_cover_full_enumeration() {
        let trades = vec![trade("CA", dec!(150)), trade("ZZ", dec!(40))];
        let totals = region_totals(&aggregate(&trades, display_name_key));

        assert_eq!(totals.len(), regions().len());
        let ca = totals.iter().find(|r| r.code == "CA").unwrap();
        assert_eq!(ca.volume, dec!(150));
        // A region with no trades is present at zero, never dropped.
        let wy = totals.iter().find(|r| r.code == "WY").unwrap();
        assert_eq!(wy.volume, Decimal::ZERO);
        // The unmatched raw key does not fabricate a region.
        assert!(totals.iter().all(|r| r.code != "ZZ" && r.name != "ZZ"));
    }

    #[test]
    fn scale_thresholds_increase_and_bound_max() {
        let scale = VolumeScale::from_max(dec!(16000));
        let [low, mid, high] = scale.thresholds();
        assert!(low < mid && mid < high);
        assert_eq!(high, dec!(16000));
    }

    #[test]
    fn top_bucket_is_reachable() {
        let scale = VolumeScale::from_max(dec!(16000));
        assert_eq!(scale.bucket(dec!(0)), 0);
        assert_eq!(scale.bucket(dec!(1001)), 1);
        assert_eq!(scale.bucket(dec!(4001)), 2);
        // The observed maximum itself reaches the deepest color.
        assert_eq!(scale.bucket(dec!(16000)), 3);
    }

    #[test]
    fn zero_data_keeps_increasing_thresholds() {
        let scale = VolumeScale::from_max(Decimal::ZERO);
        let [low, mid, high] = scale.thresholds();
        assert!(low < mid && mid < high);
        assert_eq!(scale.bucket(Decimal::ZERO), 0);
    }
}
