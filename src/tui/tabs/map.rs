//! Map tab layout and choropleth rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};

use crate::format;
use crate::selection::ShapeStyle;
use crate::tui::app::App;
use crate::tui::components::{legend, side_panel, status_bar};

/// Renders the map tab: title, status bar, tour header, choropleth with
/// tooltip and legend, and the side panel.
pub fn render(frame: &mut Frame, app: &mut App, dimmed: bool) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Status bar
            Constraint::Length(2), // Tour header
            Constraint::Min(10),   // Map + side panel
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    render_title(frame, main_layout[0]);
    status_bar::render(frame, main_layout[1], app);
    render_tour_header(frame, main_layout[2], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(main_layout[3]);

    let map_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Choropleth canvas
            Constraint::Length(1), // Hover tooltip
            Constraint::Length(2), // Legend
        ])
        .split(content[0]);

    render_choropleth(frame, map_column[0], app, dimmed);
    render_tooltip(frame, map_column[1], app);
    legend::render(frame, map_column[2], app);

    side_panel::render(frame, content[1], app, dimmed);

    render_keybindings(frame, main_layout[4]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Trade Volume by State",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .centered();
    frame.render_widget(title, area);
}

/// Renders the active tour step's title and tagline.
fn render_tour_header(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.tour_step();
    let lines = vec![
        Line::from(vec![
            Span::styled(step.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  ({})", step.tagline),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(step.text, Style::default().fg(Color::Gray))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Draws the choropleth: cached raster fill per region, then the
/// interior-border mesh on top.
///
/// The base geometry is rasterized once per canvas resolution (see
/// [`App::ensure_raster`]); this pass only assigns colors, derived from
/// the selection state, the tour focus, and the volume scale.
fn render_choropleth(frame: &mut Frame, area: Rect, app: &mut App, dimmed: bool) {
    let block = Block::default().borders(Borders::ALL).title(" Map ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Recorded for mouse hit testing in the event handler.
    app.map_area = Some(inner);
    app.ensure_raster(inner);

    let Some(geometry) = &app.geometry else {
        let placeholder =
            Paragraph::new("Loading boundary data...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, inner);
        return;
    };

    let bounds = geometry.bounds();
    let flip = |y: f64| bounds.min_y + bounds.max_y - y;

    // With no selection, a tour step with a focus list takes over the
    // highlight/dim split.
    let tour_focus: &[&str] = if app.selection.selected_region().is_none() {
        app.tour_step().state_ids
    } else {
        &[]
    };

    // Per-shape fill color for this frame.
    let colors: Vec<Color> = geometry
        .shapes()
        .iter()
        .map(|shape| {
            let style = if dimmed {
                ShapeStyle::Dimmed
            } else if !tour_focus.is_empty() {
                if tour_focus.contains(&shape.id.as_str()) {
                    ShapeStyle::Highlighted
                } else {
                    ShapeStyle::Dimmed
                }
            } else {
                app.selection.shape_style(&shape.name)
            };
            let volume = app
                .region_by_name(&shape.name)
                .map(|r| r.volume)
                .unwrap_or_default();
            shape_color(style, app.scale.bucket(volume))
        })
        .collect();

    let raster = app.raster.as_ref();
    let mesh_color = if dimmed { Color::DarkGray } else { Color::White };

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([bounds.min_x, bounds.max_x])
        .y_bounds([bounds.min_y, bounds.max_y])
        .paint(|ctx| {
            if let Some(raster) = raster {
                for (fill, color) in raster.fills.iter().zip(&colors) {
                    ctx.draw(&Points {
                        coords: fill,
                        color: *color,
                    });
                }
            }
            ctx.layer();
            for border in geometry.mesh() {
                for pair in border.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: flip(pair[0].1),
                        x2: pair[1].0,
                        y2: flip(pair[1].1),
                        color: mesh_color,
                    });
                }
            }
        });

    frame.render_widget(canvas, inner);
}

/// Fill color for one shape given its visual state and volume bucket.
fn shape_color(style: ShapeStyle, bucket: usize) -> Color {
    match style {
        ShapeStyle::Neutral | ShapeStyle::Dimmed => Color::DarkGray,
        ShapeStyle::Highlighted => legend::VOLUME_RAMP[bucket.min(legend::VOLUME_RAMP.len() - 1)],
    }
}

/// Renders the hover tooltip line under the map.
fn render_tooltip(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.hover {
        Some(hover) => Line::from(vec![
            Span::styled(
                hover.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  Volume: "),
            Span::styled(
                format::currency(hover.volume),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        None => Line::from(Span::styled(
            "Hover a state for volume; click to drill down",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[click]select state [j/k]members [Enter]open member [Esc/c]clear [n/p]tour [q]quit";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
