/// Alert derivation from the current metric sample
///
/// Alerts are rebuilt from scratch each cycle; nothing carries over from the
/// previous sample. Only cpu and memory alert. The alert rules use strict
/// greater-than on 75/60 (cpu) and 65 (memory), which differs from the
/// inclusive card thresholds, and memory has no warning alert.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::metrics::MetricSample;

pub const CPU_CRITICAL_ABOVE: f64 = 75.0;
pub const CPU_WARNING_ABOVE: f64 = 60.0;
pub const MEMORY_CRITICAL_ABOVE: f64 = 65.0;

pub const CRITICAL_ALERT_TITLE: &str = "Critical Alert";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Warning => f.write_str("warning"),
            AlertSeverity::Critical => f.write_str("critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Stable per cause, e.g. "cpu-critical"
    pub id: String,
    pub message: String,
    pub severity: AlertSeverity,
}

impl Alert {
    fn new(id: &str, message: String, severity: AlertSeverity) -> Self {
        Self {
            id: id.to_string(),
            message,
            severity,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == AlertSeverity::Critical
    }
}

pub fn derive_alerts(sample: &MetricSample) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if sample.cpu > CPU_CRITICAL_ABOVE {
        alerts.push(Alert::new(
            "cpu-critical",
            format!("CPU usage critical: {:.1}%", sample.cpu),
            AlertSeverity::Critical,
        ));
    } else if sample.cpu > CPU_WARNING_ABOVE {
        alerts.push(Alert::new(
            "cpu-warning",
            format!("CPU usage high: {:.1}%", sample.cpu),
            AlertSeverity::Warning,
        ));
    }

    if sample.memory > MEMORY_CRITICAL_ABOVE {
        alerts.push(Alert::new(
            "memory-critical",
            format!("Memory usage critical: {:.1}%", sample.memory),
            AlertSeverity::Critical,
        ));
    }

    alerts
}

/// Receives one-shot user notifications (toasts)
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&mut self, title: &str, alert: &Alert);
}

/// Forward each critical alert to the notifier exactly once; warnings are dropped.
/// Returns the number of notifications sent.
pub fn notify_critical(alerts: &[Alert], notifier: &mut dyn Notifier) -> usize {
    let mut sent = 0;
    for alert in alerts.iter().filter(|a| a.is_critical()) {
        tracing::warn!(alert_id = %alert.id, "{}", alert.message);
        notifier.notify(CRITICAL_ALERT_TITLE, alert);
        sent += 1;
    }
    sent
}
