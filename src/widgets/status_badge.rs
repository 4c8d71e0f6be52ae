use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use super::severity_color;
use crate::core::processes::{Process, ProcessStatus};
use crate::core::thresholds::Severity;
use crate::utils::capitalize;

/// Badge tone for a process status
pub fn status_tone(status: ProcessStatus) -> Severity {
    match status {
        ProcessStatus::Running => Severity::Healthy,
        ProcessStatus::Warning => Severity::Warning,
        ProcessStatus::Critical | ProcessStatus::Stopped => Severity::Critical,
    }
}

pub fn status_badge(status: ProcessStatus) -> Span<'static> {
    Span::styled(
        format!("● {}", capitalize(status.as_str())),
        Style::default().fg(severity_color(status_tone(status))),
    )
}

/// Marker shown next to the name of a process over the critical line
pub fn alert_marker(process: &Process) -> Option<Span<'static>> {
    process.exceeds_critical().then(|| {
        Span::styled(
            " ⚠",
            Style::default()
                .fg(severity_color(Severity::Critical))
                .add_modifier(Modifier::BOLD),
        )
    })
}
