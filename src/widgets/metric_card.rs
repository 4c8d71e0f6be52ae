use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::severity_color;
use crate::core::metrics::{MetricCard, TrendDirection};
use crate::utils::capitalize;

/// Card: value and trend on top, severity-colored bar below
pub fn render_metric_card(frame: &mut Frame, area: Rect, card: &MetricCard) {
    let color = severity_color(card.severity);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", card.title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let trend_color = match TrendDirection::of(card.trend) {
        TrendDirection::Up => Color::Red,
        TrendDirection::Down => Color::Green,
        TrendDirection::Flat => Color::Gray,
    };

    let headline = Paragraph::new(Line::from(vec![
        Span::styled(card.display_value(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(card.display_trend(), Style::default().fg(trend_color)),
    ]));
    frame.render_widget(headline, chunks[0]);

    let status = Paragraph::new(Span::styled(
        capitalize(card.severity.as_str()),
        Style::default().fg(color),
    ));
    frame.render_widget(status, chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
        .ratio(card.fill_percent() / 100.0)
        .label("");
    frame.render_widget(gauge, chunks[2]);
}
