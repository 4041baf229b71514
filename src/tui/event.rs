//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use tokio::sync::mpsc;

use crate::geometry::GeometryIndex;
use crate::models::member::RosterRow;
use crate::models::trade::TradeRecord;

use super::app::{App, HoverInfo};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Mouse movement or click.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// The three asynchronously loaded input sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadSource {
    Trades,
    Roster,
    Topology,
}

impl LoadSource {
    /// Returns a display label for the source.
    pub fn label(&self) -> &'static str {
        match self {
            LoadSource::Trades => "trades",
            LoadSource::Roster => "roster",
            LoadSource::Topology => "topology",
        }
    }
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// Trade table finished loading.
    Trades(Vec<TradeRecord>),
    /// Member roster finished loading.
    Roster(Vec<RosterRow>),
    /// Boundary topology resolved into a geometry index.
    Geometry(Box<GeometryIndex>),
    /// One of the input loads failed; the dependent view stays empty.
    LoadFailed { source: LoadSource, error: String },
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Mouse(mouse))) => {
                    if tx.send(Message::Input(Event::Mouse(mouse))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
///
/// This is the only place [`App`] and its selection state mutate.
pub fn update(app: &mut App, message: Message) {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Trades(trades) => {
            app.store.set_trades(trades);
            app.recompute_totals();
            // A region selected before the trades arrived gets its
            // members' trade histories attached now.
            app.selection.refresh(&app.store);
        }
        Message::Roster(roster) => {
            app.store.set_roster(roster);
            // Same region still selected: re-run the join instead of
            // surfacing the earlier empty list as an error.
            app.selection.refresh(&app.store);
        }
        Message::Geometry(index) => {
            app.geometry = Some(*index);
            app.raster = None;
            app.recompute_totals();
        }
        Message::LoadFailed { source, error } => {
            app.show_error(format!("{} load failed: {error}", source.label()));
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Resize(_, _) => {
            // The raster is resolution-dependent; rebuild next frame.
            app.raster = None;
        }
        Event::Tick => app.clear_stale_errors(),
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) {
    // While the popout is open it captures all input.
    if app.selection.selected_member().is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q') => {
                app.selection.close_member();
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Member list navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_member_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_member_cursor(-1),

        // Open the detail popout for the member under the cursor.
        KeyCode::Enter => app.selection.open_member(app.member_cursor),

        // Clear the region selection.
        KeyCode::Esc | KeyCode::Char('c') => {
            app.selection.clear_region();
            app.member_cursor = 0;
        }

        // Tour navigation
        KeyCode::Char('n') => app.next_tour_step(),
        KeyCode::Char('p') => app.previous_tour_step(),

        _ => {}
    }
}

/// Handles mouse events on the map canvas.
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => {
            app.hover = region_under_mouse(app, mouse.column, mouse.row).map(|name| {
                let volume = app
                    .region_by_name(&name)
                    .map(|r| r.volume)
                    .unwrap_or_default();
                HoverInfo { name, volume }
            });
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if app.selection.selected_member().is_some() {
                // Background interaction is suspended under the popout.
                return;
            }
            if let Some(name) = region_under_mouse(app, mouse.column, mouse.row)
                && let Some(region) = app.region_by_name(&name).cloned()
            {
                app.selection.click_region(region, &app.store);
                app.member_cursor = 0;
            }
        }
        _ => {}
    }
}

/// Resolves a terminal cell position to the region drawn there.
///
/// Converts the cell to canvas data coordinates using the map area
/// recorded during the last render, then hit-tests the geometry.
fn region_under_mouse(app: &App, column: u16, row: u16) -> Option<String> {
    let area = app.map_area?;
    let geometry = app.geometry.as_ref()?;

    if column < area.x
        || column >= area.x + area.width
        || row < area.y
        || row >= area.y + area.height
        || area.width == 0
        || area.height == 0
    {
        return None;
    }

    let bounds = geometry.bounds();
    let rel_x = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
    let rel_y = (f64::from(row - area.y) + 0.5) / f64::from(area.height);

    // The topology's y axis grows downward, matching screen rows, so no
    // flip is needed here; the canvas painter does the flipping instead.
    let x = bounds.min_x + rel_x * (bounds.max_x - bounds.min_x);
    let y = bounds.min_y + rel_y * (bounds.max_y - bounds.min_y);

    geometry.region_at((x, y)).map(|shape| shape.name.clone())
}
