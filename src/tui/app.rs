//! Application state for the TUI.

use std::collections::HashMap;
use std::time::Instant;

use ratatui::layout::Rect;
use rust_decimal::Decimal;

use crate::aggregate::{self, VolumeScale};
use crate::geometry::{GeometryIndex, Point};
use crate::models::region::RegionAggregate;
use crate::selection::SelectionState;
use crate::store::RecordStore;

use super::story;

/// Central application state container.
pub struct App {
    // -- Data --
    /// Trade records and roster, filled in as their loads complete.
    pub store: RecordStore,
    /// Resolved boundary geometry, once the topology load completes.
    pub geometry: Option<GeometryIndex>,
    /// Per-region totals over the full region enumeration.
    pub region_totals: Vec<RegionAggregate>,
    /// Color scale derived from the observed volume domain.
    pub scale: VolumeScale,

    // -- Selection --
    /// The one mutable view state: region → members → open member.
    pub selection: SelectionState,
    /// Cursor position in the side-panel member list.
    pub member_cursor: usize,

    // -- Map rendering caches --
    /// Canvas area of the last frame, for mouse hit testing.
    pub map_area: Option<Rect>,
    /// Region fill rasterized at the current canvas resolution.
    pub raster: Option<MapRaster>,
    /// Region currently under the mouse, with its volume.
    pub hover: Option<HoverInfo>,

    // -- Narrative tour --
    /// Index into the fixed tour step sequence.
    pub tour_index: usize,

    // -- UI State --
    /// Error message to display (clears after timeout).
    pub error_message: Option<ErrorDisplay>,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App instance with every load still pending.
    pub fn new() -> Self {
        Self {
            store: RecordStore::default(),
            geometry: None,
            region_totals: aggregate::region_totals(&HashMap::new()),
            scale: VolumeScale::from_max(Decimal::ZERO),
            selection: SelectionState::default(),
            member_cursor: 0,
            map_area: None,
            raster: None,
            hover: None,
            tour_index: 0,
            error_message: None,
            should_quit: false,
        }
    }

    /// Recomputes per-region totals and the color scale from the store.
    ///
    /// Runs when the trade table arrives and again when the geometry
    /// resolves (to attach numeric ids to the aggregates).
    pub fn recompute_totals(&mut self) {
        let totals = aggregate::aggregate(self.store.trades(), aggregate::display_name_key);
        let mut region_totals = aggregate::region_totals(&totals);
        if let Some(geometry) = &self.geometry {
            for region in &mut region_totals {
                region.id = geometry.id_for_name(&region.name).map(str::to_string);
            }
        }
        self.scale = VolumeScale::from_totals(&region_totals);
        self.region_totals = region_totals;
        // Fill colors depend on the new totals.
        self.raster = None;
    }

    /// The aggregate for a region display name, if canonical.
    pub fn region_by_name(&self, name: &str) -> Option<&RegionAggregate> {
        self.region_totals.iter().find(|r| r.name == name)
    }

    /// The current tour step.
    pub fn tour_step(&self) -> &'static story::TourStep {
        story::step(self.tour_index)
    }

    pub fn next_tour_step(&mut self) {
        self.tour_index = (self.tour_index + 1) % story::len();
    }

    pub fn previous_tour_step(&mut self) {
        self.tour_index = self.tour_index.checked_sub(1).unwrap_or(story::len() - 1);
    }

    /// Moves the member cursor, clamped to the current member list.
    pub fn move_member_cursor(&mut self, delta: i64) {
        let len = self.selection.members_in_region().len();
        if len == 0 {
            self.member_cursor = 0;
            return;
        }
        let current = self.member_cursor as i64;
        self.member_cursor = (current + delta).clamp(0, len as i64 - 1) as usize;
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than 5 seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > std::time::Duration::from_secs(5)
        {
            self.error_message = None;
        }
    }

    /// Ensures the fill raster matches the current canvas resolution.
    ///
    /// The base geometry is rasterized once per resolution change;
    /// per-frame styling only recolors the cached sample points.
    pub fn ensure_raster(&mut self, area: Rect) {
        let resolution = (u32::from(area.width) * 2, u32::from(area.height) * 4);
        let stale = self
            .raster
            .as_ref()
            .is_none_or(|r| r.resolution != resolution);
        if !stale {
            return;
        }
        self.raster = self
            .geometry
            .as_ref()
            .map(|geometry| MapRaster::build(geometry, resolution));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-sampled fill points for every region shape, in canvas coordinates.
///
/// Built by sampling a grid at the Braille sub-cell resolution of the map
/// canvas and assigning each sample to the region containing it. The
/// topology's y axis grows downward while the canvas's grows upward, so
/// stored points are already y-flipped, ready to paint.
#[derive(Clone, Debug)]
pub struct MapRaster {
    /// Sub-cell resolution this raster was built for.
    pub resolution: (u32, u32),
    /// Sample points per shape, indexed like `GeometryIndex::shapes()`.
    pub fills: Vec<Vec<Point>>,
}

impl MapRaster {
    /// Rasterizes every shape onto a `cols x rows` sample grid.
    pub fn build(geometry: &GeometryIndex, (cols, rows): (u32, u32)) -> Self {
        let bounds = geometry.bounds();
        let span_x = bounds.max_x - bounds.min_x;
        let span_y = bounds.max_y - bounds.min_y;

        let mut fills: Vec<Vec<Point>> = vec![Vec::new(); geometry.shapes().len()];
        if cols == 0 || rows == 0 || span_x <= 0.0 || span_y <= 0.0 {
            return Self {
                resolution: (cols, rows),
                fills,
            };
        }

        for row in 0..rows {
            // Sample cell centers.
            let y = bounds.min_y + span_y * (f64::from(row) + 0.5) / f64::from(rows);
            for col in 0..cols {
                let x = bounds.min_x + span_x * (f64::from(col) + 0.5) / f64::from(cols);
                let hit = geometry
                    .shapes()
                    .iter()
                    .position(|shape| shape.contains((x, y)));
                if let Some(index) = hit {
                    fills[index].push((x, bounds.min_y + bounds.max_y - y));
                }
            }
        }

        Self {
            resolution: (cols, rows),
            fills,
        }
    }
}

/// Region name and volume shown in the hover tooltip.
#[derive(Clone, Debug)]
pub struct HoverInfo {
    pub name: String,
    pub volume: Decimal,
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    /// The error message.
    pub message: String,
    /// When the error was shown.
    pub timestamp: Instant,
}
