//! Color-scale legend for the choropleth.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use rust_decimal::Decimal;

use crate::format;
use crate::tui::app::App;

/// Four-step green ramp, light to dark, matching the volume buckets.
pub const VOLUME_RAMP: [Color; 4] = [
    Color::Rgb(247, 252, 245),
    Color::Rgb(199, 233, 192),
    Color::Rgb(116, 196, 118),
    Color::Rgb(0, 68, 27),
];

/// Renders the legend: a title line and one swatch per bucket with its
/// volume range.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let [low, mid, high] = app.scale.thresholds();

    let labels = [
        format!("< {}", format::currency(low)),
        range_label(low, mid),
        range_label(mid, high),
        format!("\u{2265} {}", format::currency(high)),
    ];

    let mut swatches: Vec<Span> = Vec::with_capacity(labels.len() * 3);
    for (color, label) in VOLUME_RAMP.iter().zip(&labels) {
        swatches.push(Span::styled("██", Style::default().fg(*color)));
        swatches.push(Span::raw(format!(" {label}  ")));
    }

    let lines = vec![
        Line::from(Span::styled(
            "Trade Volume",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(swatches),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn range_label(from: Decimal, to: Decimal) -> String {
    format!("{}–{}", format::currency(from), format::currency(to))
}
