//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::App;

/// Renders the status bar: per-source load status, the current
/// selection, and any transient error.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let source = |label: &str, ready: bool| -> Span<'_> {
        if ready {
            Span::styled(format!(" {label} "), Style::default().fg(Color::Green))
        } else {
            Span::styled(format!(" {label}... "), Style::default().fg(Color::Yellow))
        }
    };

    let selection_span = match app.selection.selected_region() {
        Some(region) => Span::styled(
            format!(" {} ", region.name),
            Style::default().fg(Color::Cyan),
        ),
        None => Span::styled(" no selection ", Style::default().fg(Color::Gray)),
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        source("trades", app.store.trades_ready()),
        Span::raw("│"),
        source("roster", app.store.roster_ready()),
        Span::raw("│"),
        source("map", app.geometry.is_some()),
        Span::raw("│"),
        selection_span,
        Span::raw("│"),
        error_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
