//! Read-only store for the two tabular inputs.
//!
//! The trade table and the member roster load independently and
//! asynchronously; each flips its readiness flag when it arrives. All
//! consumers hold read-only views; nothing here mutates after load.

use crate::models::member::RosterRow;
use crate::models::trade::TradeRecord;

/// The already-parsed trade records and member roster.
#[derive(Debug, Default)]
pub struct RecordStore {
    trades: Vec<TradeRecord>,
    roster: Vec<RosterRow>,
    trades_ready: bool,
    roster_ready: bool,
}

impl RecordStore {
    /// Installs the trade table once its load completes.
    pub fn set_trades(&mut self, trades: Vec<TradeRecord>) {
        self.trades = trades;
        self.trades_ready = true;
    }

    /// Installs the roster once its load completes.
    pub fn set_roster(&mut self, roster: Vec<RosterRow>) {
        self.roster = roster;
        self.roster_ready = true;
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    pub fn roster(&self) -> &[RosterRow] {
        &self.roster
    }

    pub fn trades_ready(&self) -> bool {
        self.trades_ready
    }

    pub fn roster_ready(&self) -> bool {
        self.roster_ready
    }

    /// Every trade attributed to a member, in encounter order.
    pub fn trades_for_member(&self, member_id: &str) -> Vec<TradeRecord> {
        self.trades
            .iter()
            .filter(|t| t.member_id == member_id)
            .cloned()
            .collect()
    }

    /// Roster rows whose state matches either the postal code or the
    /// display name; upstream exports have used both.
    pub fn roster_for_region<'a>(&'a self, code: &str, name: &str) -> Vec<&'a RosterRow> {
        self.roster
            .iter()
            .filter(|r| r.member_state == code || r.member_state == name)
            .collect()
    }
}
