// Small rendering building blocks shared by the login and dashboard screens.
// Everything is drawn with ratatui primitives (Gauge, Paragraph, Block, Clear).

pub mod metric_card;
pub mod status_badge;
pub mod toast;

use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::core::processes::RowEmphasis;
use crate::core::thresholds::Severity;

pub use metric_card::render_metric_card;
pub use status_badge::{alert_marker, status_badge};
pub use toast::render_toasts;

/// Healthy green, warning yellow, critical red
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Healthy => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Critical => Color::Red,
    }
}

pub fn emphasis_color(emphasis: RowEmphasis) -> Color {
    match emphasis {
        RowEmphasis::Normal => Color::White,
        RowEmphasis::Warning => Color::Yellow,
        RowEmphasis::Critical => Color::Red,
    }
}

/// Rect of at most `width` x `height`, centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
