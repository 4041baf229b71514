//! Terminal user interface for the Statewatch dashboard.
//!
//! Provides a Ratatui-based TUI centered on the state choropleth map,
//! with mouse drill-down into per-state member lists and a detail popout
//! for a single member's trade history.

pub mod app;
pub mod components;
pub mod event;
pub mod story;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
