//! Side panel: selected-state details and the member list.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::format;
use crate::tui::app::App;

/// Renders the drill-down side panel.
///
/// With a region selected: the region's name, total volume, and its
/// members sorted by descending volume, with the keyboard cursor
/// highlighted. Otherwise a prompt to click a state.
pub fn render(frame: &mut Frame, area: Rect, app: &App, dimmed: bool) {
    let border_style = if dimmed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let block = Block::default()
        .title(" State details ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(region) = app.selection.selected_region() else {
        let prompt = Paragraph::new(Line::from(Span::styled(
            "Click a state to view details",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(prompt, inner);
        return;
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            region.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Total Trade Volume: {}",
            format::currency(region.volume)
        )),
        Line::default(),
    ];

    let members = app.selection.members_in_region();
    if members.is_empty() {
        let note = if app.store.roster_ready() {
            "No members recorded for this state"
        } else {
            "Loading roster..."
        };
        lines.push(Line::from(Span::styled(
            note,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let visible_rows = inner.height.saturating_sub(lines.len() as u16) as usize;
    for (i, member) in members.iter().take(visible_rows).enumerate() {
        let volume = format::currency(member.volume);
        // Truncate the name so name + volume fit the panel width.
        let name_budget = (inner.width as usize).saturating_sub(volume.len() + 4);
        let name = truncate(&member.name, name_budget);

        let row_style = if i == app.member_cursor {
            Style::default().bg(Color::Cyan).fg(Color::Black)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(" {name} | {volume} "),
            row_style,
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Truncates a string to a display width, appending an ellipsis.
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + 2 > max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_names_alone() {
        assert_eq!(truncate("Jane Doe", 20), "Jane Doe");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let out = truncate("Representative Longname", 10);
        assert!(out.ends_with('…'));
        assert!(out.width() <= 10);
    }
}
