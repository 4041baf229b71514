//! Detail popout: one member's identity and trade history.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::format;
use crate::models::TradeAction;
use crate::tui::app::App;

/// Renders the member detail popout as a centered overlay.
///
/// The left column shows the member's identity, the right their trades
/// sorted most recent first, each row styled by direction.
pub fn render(frame: &mut Frame, app: &App) {
    let Some(member) = app.selection.selected_member() else {
        return;
    };

    let area = centered(frame.area(), 60, 60);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", member.name))
        .title_bottom(Line::from(" [Esc/x] close ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(inner);

    render_identity(frame, columns[0], app);
    render_trades(frame, columns[1], app);
}

fn render_identity(frame: &mut Frame, area: Rect, app: &App) {
    let Some(member) = app.selection.selected_member() else {
        return;
    };

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("{} | {}", member.name, member.party_initial()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} | {}", member.chamber, member.state)),
        Line::from(Span::styled(
            format!("Volume: {}", format::currency(member.volume)),
            Style::default().fg(Color::Cyan),
        )),
        Line::default(),
        Line::from(Span::styled(
            member.photo_url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_trades(frame: &mut Frame, area: Rect, app: &App) {
    let Some(member) = app.selection.selected_member() else {
        return;
    };

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        format!("{:<8} {:>14}  {}", "Ticker", "Amount", "Date"),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let max_rows = area.height.saturating_sub(1) as usize;
    for trade in member.sorted_trades().into_iter().take(max_rows) {
        // Buys and sells get distinct, non-overlapping treatments.
        let row_style = match trade.action {
            TradeAction::Buy => Style::default().fg(Color::Black).bg(Color::Green),
            TradeAction::Sell => Style::default().fg(Color::White).bg(Color::Red),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{:<8} {:>14}  {}",
                trade.stock_ticker,
                format!("~{}", format::currency(trade.amount)),
                format::trade_date(&trade.trade_date),
            ),
            row_style,
        )));
    }

    if member.trades.is_empty() {
        lines.push(Line::from(Span::styled(
            "No trades on record",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// A rect centered in `area` taking the given percentages of each axis.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
