//! One-shot loaders for the three input sources.
//!
//! Each source (trade table, roster, boundary topology) is fetched by its
//! own fire-and-forget task feeding the app's message channel, so the
//! views render their empty state until each dependency resolves. Loads
//! are order-independent, never retried, and never cancel each other; a
//! stalled or failed load simply leaves its dependent views empty.

use std::path::Path;

use tokio::sync::mpsc;

use crate::config::DataPaths;
use crate::geometry::{self, GeometryIndex, Topology};
use crate::models::member::RosterRow;
use crate::models::trade::TradeRecord;
use crate::tui::event::{LoadSource, Message};

/// Reads and deserializes the trade table.
pub fn read_trades(path: &Path) -> crate::Result<Vec<TradeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let trades = reader.deserialize().collect::<Result<Vec<_>, _>>()?;
    Ok(trades)
}

/// Reads and deserializes the member roster.
pub fn read_roster(path: &Path) -> crate::Result<Vec<RosterRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let roster = reader.deserialize().collect::<Result<Vec<_>, _>>()?;
    Ok(roster)
}

/// Reads the boundary topology and resolves it into a geometry index.
pub fn read_topology(path: &Path) -> crate::Result<GeometryIndex> {
    let raw = std::fs::read_to_string(path)?;
    let topology: Topology = serde_json::from_str(&raw)?;
    geometry::resolve(&topology)
}

/// Spawns the three independent load tasks.
///
/// Each task sends exactly one message: the parsed payload, or
/// [`Message::LoadFailed`] naming its source.
pub fn spawn_loaders(tx: mpsc::UnboundedSender<Message>, paths: DataPaths) {
    let trades_path = paths.trades.clone();
    let trades_tx = tx.clone();
    tokio::task::spawn_blocking(move || {
        let message = match read_trades(&trades_path) {
            Ok(trades) => {
                tracing::info!(rows = trades.len(), path = %trades_path.display(), "trade table loaded");
                Message::Trades(trades)
            }
            Err(err) => load_failed(LoadSource::Trades, err),
        };
        let _ = trades_tx.send(message);
    });

    let roster_path = paths.roster.clone();
    let roster_tx = tx.clone();
    tokio::task::spawn_blocking(move || {
        let message = match read_roster(&roster_path) {
            Ok(roster) => {
                tracing::info!(rows = roster.len(), path = %roster_path.display(), "roster loaded");
                Message::Roster(roster)
            }
            Err(err) => load_failed(LoadSource::Roster, err),
        };
        let _ = roster_tx.send(message);
    });

    let topology_path = paths.topology.clone();
    tokio::task::spawn_blocking(move || {
        let message = match read_topology(&topology_path) {
            Ok(index) => {
                tracing::info!(path = %topology_path.display(), "topology resolved");
                Message::Geometry(Box::new(index))
            }
            Err(err) => load_failed(LoadSource::Topology, err),
        };
        let _ = tx.send(message);
    });
}

fn load_failed(source: LoadSource, err: crate::StatewatchError) -> Message {
    tracing::warn!(source = source.label(), error = %err, "input load failed");
    Message::LoadFailed {
        source,
        error: err.to_string(),
    }
}
