use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::toast::ToastQueue;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

/// Stack active toasts in the top-right corner of `area`, newest last
pub fn render_toasts(frame: &mut Frame, area: Rect, toasts: &ToastQueue) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);
    let mut y = area.y + 1;

    for toast in toasts.active() {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);

        let body = Paragraph::new(vec![Line::from(toast.message.as_str())])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(Span::styled(
                        format!(" {} ", toast.title),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
        y += TOAST_HEIGHT;
    }
}
