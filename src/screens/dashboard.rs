/// Main dashboard screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Clear, Dataset, Gauge, GraphType, Paragraph, Row, Table,
        TableState, Wrap,
    },
    Frame,
};

use crate::core::alerts::AlertSeverity;
use crate::core::charts::{series_labels, series_points, DISK_USAGE, HEALTH_SCORE};
use crate::core::dashboard::DashboardState;
use crate::core::processes::{Process, RowEmphasis, NO_RESULTS_MESSAGE};
use crate::core::thresholds::Severity;
use crate::core::toast::ToastQueue;
use crate::utils::{format_clock, format_percent, APP_TITLE, DASHBOARD_KEYS, SEARCH_PLACEHOLDER};
use crate::widgets::{
    alert_marker, centered_rect, emphasis_color, render_metric_card, render_toasts, severity_color,
    status_badge,
};

/// Per-frame view flags owned by the app loop
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardView<'a> {
    pub user: Option<&'a str>,
    pub search_mode: bool,
    pub show_help: bool,
}

pub struct DashboardScreen;

impl DashboardScreen {
    pub fn render(frame: &mut Frame, state: &DashboardState, toasts: &ToastQueue, view: DashboardView) {
        let alert_rows = state.alerts().len() as u16;
        let banner_height = if alert_rows == 0 { 0 } else { alert_rows + 2 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),             // header
                Constraint::Length(banner_height), // alerts
                Constraint::Length(6),             // metric cards
                Constraint::Length(12),            // charts
                Constraint::Min(8),                // processes
                Constraint::Length(1),             // footer
            ])
            .split(frame.size());

        Self::render_header(frame, chunks[0], state, view.user);
        if banner_height > 0 {
            Self::render_alerts(frame, chunks[1], state);
        }
        Self::render_cards(frame, chunks[2], state);
        Self::render_charts(frame, chunks[3]);
        Self::render_processes(frame, chunks[4], state, view.search_mode);
        Self::render_footer(frame, chunks[5], view.search_mode);

        if view.show_help {
            Self::render_help(frame);
        }

        render_toasts(frame, frame.size(), toasts);
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &DashboardState, user: Option<&str>) {
        let alert_count = state.alerts().len();
        let alert_style = match overall_severity(state) {
            Severity::Critical => Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
            Severity::Warning => Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
            Severity::Healthy => Style::default().fg(Color::Green),
        };

        let mut spans = vec![
            Span::styled(APP_TITLE, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("  |  "),
            Span::styled(
                format!("Last updated: {}", format_clock(&state.last_update())),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("  |  "),
            Span::styled(format!(" {} alerts ", alert_count), alert_style),
        ];
        if let Some(user) = user {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(user.to_string(), Style::default().fg(Color::White)));
        }

        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn render_alerts(frame: &mut Frame, area: Rect, state: &DashboardState) {
        let lines: Vec<Line> = state
            .alerts()
            .iter()
            .map(|alert| {
                let (color, tag) = match alert.severity {
                    AlertSeverity::Critical => (Color::Red, "CRITICAL"),
                    AlertSeverity::Warning => (Color::Yellow, "WARNING "),
                };
                Line::from(vec![
                    Span::styled(format!("{} ", tag), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::styled(alert.message.clone(), Style::default().fg(color)),
                ])
            })
            .collect();

        let banner = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Active Alerts "),
        );
        frame.render_widget(banner, area);
    }

    fn render_cards(frame: &mut Frame, area: Rect, state: &DashboardState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        for (card, column) in state.cards().iter().zip(columns.iter()) {
            render_metric_card(frame, *column, card);
        }
    }

    fn render_charts(frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let cpu = series_points(|p| p.cpu);
        let memory = series_points(|p| p.memory);
        let network = series_points(|p| p.network);

        let datasets = vec![
            Dataset::default()
                .name("CPU")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&cpu),
            Dataset::default()
                .name("Memory")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Magenta))
                .data(&memory),
            Dataset::default()
                .name("Network")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Green))
                .data(&network),
        ];

        let labels = series_labels();
        let last_x = labels.len().saturating_sub(1) as f64;
        let x_labels: Vec<Span> = [labels.first(), labels.get(labels.len() / 2), labels.last()]
            .into_iter()
            .flatten()
            .map(|l| Span::styled(*l, Style::default().fg(Color::Gray)))
            .collect();

        let chart = Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL).title(" Performance Over Time "))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, last_x])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, 100.0])
                    .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
            );
        frame.render_widget(chart, columns[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(columns[1]);

        let disk = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Disk Usage "))
            .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
            .percent(DISK_USAGE.used_percent())
            .label(format!("{}%  {}", DISK_USAGE.used_percent(), DISK_USAGE.summary()));
        frame.render_widget(disk, side[0]);

        let health_color = severity_color(HEALTH_SCORE.severity());
        let health = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{}", HEALTH_SCORE.score),
                Style::default().fg(health_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(HEALTH_SCORE.label(), Style::default().fg(health_color))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" System Health Score "));
        frame.render_widget(health, side[1]);
    }

    fn render_processes(frame: &mut Frame, area: Rect, state: &DashboardState, search_mode: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let search_span = if state.search.is_empty() && !search_mode {
            Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else if search_mode {
            Span::styled(format!("{}_", state.search), Style::default().fg(Color::Yellow))
        } else {
            Span::styled(state.search.clone(), Style::default().fg(Color::White))
        };
        let controls = Paragraph::new(Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(Color::Cyan)),
            search_span,
            Span::styled("   Status: ", Style::default().fg(Color::Cyan)),
            Span::raw(state.status_filter.label()),
            Span::styled("   Threshold: ", Style::default().fg(Color::Cyan)),
            Span::raw(state.threshold_filter.label()),
        ]));
        frame.render_widget(controls, chunks[0]);

        let visible = state.visible_processes();
        let title = format!(" Processes  [{} of {}] ", visible.len(), state.total_processes());
        let block = Block::default().borders(Borders::ALL).title(title);

        if visible.is_empty() {
            let empty = Paragraph::new(Span::styled(NO_RESULTS_MESSAGE, Style::default().fg(Color::Gray)))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(empty, chunks[1]);
            return;
        }

        let header = Row::new(vec!["PID", "Name", "CPU", "Memory", "Status", "User"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let rows: Vec<Row> = visible.iter().map(Self::process_row).collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Min(16),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

        let mut table_state = TableState::default();
        table_state.select(Some(state.selected.min(visible.len() - 1)));
        frame.render_stateful_widget(table, chunks[1], &mut table_state);
    }

    fn process_row(process: &Process) -> Row<'static> {
        let name_style = Style::default().fg(emphasis_color(process.emphasis()));
        let name_style = if process.emphasis() == RowEmphasis::Critical {
            name_style.add_modifier(Modifier::BOLD)
        } else {
            name_style
        };

        let mut name = vec![Span::styled(process.name.clone(), name_style)];
        if let Some(marker) = alert_marker(process) {
            name.push(marker);
        }

        Row::new(vec![
            Cell::from(process.pid.to_string()),
            Cell::from(Line::from(name)),
            Cell::from(Span::styled(
                format_percent(process.cpu_usage),
                Style::default().fg(emphasis_color(process.cpu_level())),
            )),
            Cell::from(Span::styled(
                format_percent(process.memory_usage),
                Style::default().fg(emphasis_color(process.memory_level())),
            )),
            Cell::from(status_badge(process.status)),
            Cell::from(process.user.clone()),
        ])
    }

    fn render_footer(frame: &mut Frame, area: Rect, search_mode: bool) {
        let text = if search_mode {
            Line::from(vec![
                Span::styled("[Enter] ", Style::default().fg(Color::Cyan)),
                Span::raw("Apply  "),
                Span::styled("[Esc] ", Style::default().fg(Color::Cyan)),
                Span::raw("Cancel search"),
            ])
        } else {
            Line::from(
                DASHBOARD_KEYS
                    .iter()
                    .flat_map(|(key, desc)| {
                        vec![
                            Span::styled(format!("[{}] ", key), Style::default().fg(Color::Cyan)),
                            Span::styled(format!("{}  ", desc), Style::default().fg(Color::DarkGray)),
                        ]
                    })
                    .collect::<Vec<_>>(),
            )
        };
        frame.render_widget(Paragraph::new(text), area);
    }

    fn render_help(frame: &mut Frame) {
        let popup_area = centered_rect(60, (DASHBOARD_KEYS.len() + 6) as u16, frame.size());

        let mut help_text = vec![
            Line::from(Span::styled(
                "System Monitor - Keyboard Shortcuts",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, desc) in DASHBOARD_KEYS {
            help_text.push(Line::from(vec![
                Span::styled(format!("  [{:<8}] ", key), Style::default().fg(Color::Yellow)),
                Span::raw(*desc),
            ]));
        }
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "Press [?] or [Esc] to close this help",
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));

        frame.render_widget(Clear, popup_area);
        let help_widget = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(Span::styled(" Help ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(help_widget, popup_area);
    }
}

/// Tone of the header alert badge: the worst current alert
pub fn overall_severity(state: &DashboardState) -> Severity {
    if state.alerts().iter().any(|a| a.is_critical()) {
        Severity::Critical
    } else if state.alerts().is_empty() {
        Severity::Healthy
    } else {
        Severity::Warning
    }
}
