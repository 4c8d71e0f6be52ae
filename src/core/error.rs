/// Error types for the monitoring core

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MonitorError {
    #[error("invalid metric type '{0}' (expected cpu, memory, disk or network)")]
    InvalidMetricType(String),

    #[error("invalid filter value '{0}'")]
    InvalidFilter(String),

    #[error("invalid {metric} threshold: warning {warning} must be below critical {critical}, both within (0, 100)")]
    InvalidThreshold {
        metric: String,
        warning: f64,
        critical: f64,
    },

    #[error("session store error: {0}")]
    Session(String),
}

pub type MonitorResult<T> = std::result::Result<T, MonitorError>;
