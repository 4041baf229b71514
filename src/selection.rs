//! The drill-down selection state machine.
//!
//! [`SelectionState`] is the single mutable state of the view: the
//! selected region, the members active in that region, and the member
//! whose detail popout is open. It is owned by the app and mutated only
//! in response to discrete user events; selecting a region fully
//! recomputes the member list before anything renders.

use std::collections::HashSet;

use crate::models::member::MemberRecord;
use crate::models::region::RegionAggregate;
use crate::store::RecordStore;

/// Visual state of one map shape, derived purely from the selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShapeStyle {
    /// Placeholder before geometry and values have loaded.
    #[default]
    Neutral,
    /// The selected region, or every region when none is selected.
    Highlighted,
    /// Every non-selected region while a selection exists.
    Dimmed,
}

/// Multi-level selection: region → member list → open member.
///
/// `selected_member` can only be set through [`SelectionState::open_member`],
/// which requires an index into `members_in_region`, so a member is never
/// open without a region selection behind it.
#[derive(Debug, Default)]
pub struct SelectionState {
    selected_region: Option<RegionAggregate>,
    members_in_region: Vec<MemberRecord>,
    selected_member: Option<MemberRecord>,
}

impl SelectionState {
    pub fn selected_region(&self) -> Option<&RegionAggregate> {
        self.selected_region.as_ref()
    }

    pub fn members_in_region(&self) -> &[MemberRecord] {
        &self.members_in_region
    }

    pub fn selected_member(&self) -> Option<&MemberRecord> {
        self.selected_member.as_ref()
    }

    /// Handles a click on a region shape.
    ///
    /// Clicking the already-selected region toggles the selection off;
    /// any other region becomes the new selection with a freshly
    /// recomputed member list.
    pub fn click_region(&mut self, region: RegionAggregate, store: &RecordStore) {
        let same = self
            .selected_region
            .as_ref()
            .is_some_and(|r| r.name == region.name);
        if same {
            self.clear_region();
        } else {
            self.select_region(region, store);
        }
    }

    /// Selects a region and rebuilds `members_in_region` from the store.
    pub fn select_region(&mut self, region: RegionAggregate, store: &RecordStore) {
        self.members_in_region = build_members(&region, store);
        self.selected_region = Some(region);
        self.selected_member = None;
    }

    /// Clears the whole selection; every shape returns to the resting
    /// highlighted state.
    pub fn clear_region(&mut self) {
        self.selected_region = None;
        self.members_in_region.clear();
        self.selected_member = None;
    }

    /// Opens the detail popout for a member of the current region.
    /// Out-of-range indices are ignored.
    pub fn open_member(&mut self, index: usize) {
        if let Some(member) = self.members_in_region.get(index) {
            self.selected_member = Some(member.clone());
        }
    }

    /// Closes the detail popout. The region selection persists.
    pub fn close_member(&mut self) {
        self.selected_member = None;
    }

    /// Re-runs the member join for the current region.
    ///
    /// Invoked when a late-arriving input (the roster, or the trade
    /// table) completes while a region is already selected, so the
    /// member list fills in without user action.
    pub fn refresh(&mut self, store: &RecordStore) {
        if let Some(region) = &self.selected_region {
            self.members_in_region = build_members(region, store);
        }
    }

    /// The visual state a shape with the given display name should take.
    pub fn shape_style(&self, region_name: &str) -> ShapeStyle {
        match &self.selected_region {
            None => ShapeStyle::Highlighted,
            Some(selected) if selected.name == region_name => ShapeStyle::Highlighted,
            Some(_) => ShapeStyle::Dimmed,
        }
    }
}

/// Joins the roster against the trade store for one region.
///
/// Members are matched on postal code or display name, deduplicated by
/// member id, given their full trade history, and sorted by descending
/// aggregate volume (stable, so roster order breaks ties). An unloaded
/// roster simply yields an empty list.
fn build_members(region: &RegionAggregate, store: &RecordStore) -> Vec<MemberRecord> {
    let rows = store.roster_for_region(&region.code, &region.name);

    let mut members: Vec<MemberRecord> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for row in rows {
        if !seen.insert(row.member_bio_guide_id.as_str()) {
            continue;
        }
        let trades = store.trades_for_member(&row.member_bio_guide_id);
        if trades.is_empty() && store.trades_ready() {
            tracing::warn!(
                member = %row.member_bio_guide_id,
                region = %region.name,
                "roster member has no trades in the trade table"
            );
        }
        members.push(MemberRecord::from_roster(row, trades));
    }

    members.sort_by(|a, b| b.volume.cmp(&a.volume));
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::member::RosterRow;
    use crate::models::trade::TradeRecord;
    use crate::models::TradeAction;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn trade(member: &str, state: &str, amount: Decimal, action: TradeAction) -> TradeRecord {
        TradeRecord {
            member_id: member.to_string(),
            member_name: "Jane Doe".to_string(),
            member_party: "Independent".to_string(),
            member_chamber: "House".to_string(),
            member_state: state.to_string(),
            stock_ticker: "ACME".to_string(),
            stock_name: "Acme Corp".to_string(),
            action,
            amount,
            trade_date: "2025-07-14".to_string(),
            committee_names: None,
            flagged: None,
        }
    }

    fn roster_row(member: &str, state: &str, volume: Decimal) -> RosterRow {
        RosterRow {
            member_bio_guide_id: member.to_string(),
            member_name: format!("Member {member}"),
            member_chamber: "House".to_string(),
            member_party: "Independent".to_string(),
            member_state: state.to_string(),
            photo_url: String::new(),
            total_trade_volume: volume,
        }
    }

    fn california() -> RegionAggregate {
        RegionAggregate {
            name: "California".to_string(),
            code: "CA".to_string(),
            id: Some("06".to_string()),
            volume: dec!(150),
        }
    }

    fn loaded_store() -> RecordStore {
        let mut store = RecordStore::default();
        store.set_trades(vec![
            trade("M1", "CA", dec!(100), TradeAction::Buy),
            trade("M1", "CA", dec!(50), TradeAction::Sell),
        ]);
        store.set_roster(vec![roster_row("M1", "CA", dec!(150))]);
        store
    }

    #[test]
    fn selecting_california_attaches_members_and_trades() {
        let store = loaded_store();
        let mut selection = SelectionState::default();
        selection.select_region(california(), &store);

        let members = selection.members_in_region();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, "M1");
        assert_eq!(members[0].trades.len(), 2);
        assert_eq!(selection.selected_region().unwrap().volume, dec!(150));
    }

    #[test]
    fn roster_rows_keyed_by_full_name_still_match() {
        let mut store = RecordStore::default();
        store.set_trades(vec![trade("M1", "CA", dec!(100), TradeAction::Buy)]);
        store.set_roster(vec![roster_row("M1", "California", dec!(100))]);

        let mut selection = SelectionState::default();
        selection.select_region(california(), &store);
        assert_eq!(selection.members_in_region().len(), 1);
    }

    #[test]
    fn members_sort_by_descending_volume_with_stable_ties() {
        let mut store = RecordStore::default();
        store.set_trades(Vec::new());
        store.set_roster(vec![
            roster_row("SMALL", "CA", dec!(10)),
            roster_row("TIE_A", "CA", dec!(500)),
            roster_row("TIE_B", "CA", dec!(500)),
            roster_row("BIG", "CA", dec!(900)),
        ]);

        let mut selection = SelectionState::default();
        selection.select_region(california(), &store);
        let order: Vec<&str> = selection
            .members_in_region()
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(order, ["BIG", "TIE_A", "TIE_B", "SMALL"]);
    }

    #[test]
    fn region_click_before_roster_loads_yields_empty_then_refreshes() {
        let mut store = RecordStore::default();
        store.set_trades(vec![trade("M1", "CA", dec!(100), TradeAction::Buy)]);

        let mut selection = SelectionState::default();
        selection.select_region(california(), &store);
        assert!(selection.members_in_region().is_empty());

        // Roster arrives while the same region is still selected.
        store.set_roster(vec![roster_row("M1", "CA", dec!(100))]);
        selection.refresh(&store);
        assert_eq!(selection.members_in_region().len(), 1);
    }

    #[test]
    fn clicking_selected_region_toggles_deselection() {
        let store = loaded_store();
        let mut selection = SelectionState::default();
        selection.click_region(california(), &store);
        assert!(selection.selected_region().is_some());

        selection.click_region(california(), &store);
        assert!(selection.selected_region().is_none());
        assert!(selection.members_in_region().is_empty());
    }

    #[test]
    fn select_then_deselect_restores_resting_styles() {
        let store = loaded_store();
        let mut selection = SelectionState::default();
        let initial: Vec<ShapeStyle> = ["California", "Texas", "Wyoming"]
            .iter()
            .map(|n| selection.shape_style(n))
            .collect();
        assert!(initial.iter().all(|s| *s == ShapeStyle::Highlighted));

        selection.select_region(california(), &store);
        assert_eq!(selection.shape_style("California"), ShapeStyle::Highlighted);
        assert_eq!(selection.shape_style("Texas"), ShapeStyle::Dimmed);

        selection.clear_region();
        let restored: Vec<ShapeStyle> = ["California", "Texas", "Wyoming"]
            .iter()
            .map(|n| selection.shape_style(n))
            .collect();
        assert_eq!(initial, restored);
    }

    #[test]
    fn closing_popout_preserves_region_selection() {
        let store = loaded_store();
        let mut selection = SelectionState::default();
        selection.select_region(california(), &store);
        selection.open_member(0);
        assert_eq!(selection.selected_member().unwrap().id, "M1");

        selection.close_member();
        assert!(selection.selected_member().is_none());
        assert_eq!(selection.selected_region().unwrap().name, "California");
    }

    #[test]
    fn member_requires_region() {
        let mut selection = SelectionState::default();
        selection.open_member(0);
        assert!(selection.selected_member().is_none());

        let store = loaded_store();
        selection.select_region(california(), &store);
        selection.open_member(0);
        selection.clear_region();
        // Dropping the region drops the open member with it.
        assert!(selection.selected_member().is_none());
    }

    #[test]
    fn duplicate_roster_rows_collapse_to_one_member() {
        let mut store = RecordStore::default();
        store.set_trades(Vec::new());
        store.set_roster(vec![
            roster_row("M1", "CA", dec!(100)),
            roster_row("M1", "California", dec!(100)),
        ]);

        let mut selection = SelectionState::default();
        selection.select_region(california(), &store);
        assert_eq!(selection.members_in_region().len(), 1);
    }
}
