//! Statewatch: a terminal dashboard for legislator stock trades.
//!
//! Aggregates a table of trade records into per-state totals, joins them
//! against TopoJSON boundary geometry, and renders an interactive
//! choropleth with drill-down from state to member to individual trades.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod loader;
pub mod models;
pub mod selection;
pub mod store;
pub mod tui;

pub use error::{Result, StatewatchError};
