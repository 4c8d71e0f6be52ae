pub mod error;
pub mod thresholds;
pub mod metrics;
pub mod charts;
pub mod alerts;
pub mod toast;
pub mod processes;
pub mod auth;
pub mod session;
pub mod ticker;
pub mod dashboard;

pub use error::{MonitorError, MonitorResult};
pub use thresholds::{classify, classify_named, MetricType, Severity, Threshold, ThresholdTable};
pub use metrics::{MetricSample, MetricTrends, RandomSampleSource, SampleSource};
pub use alerts::{derive_alerts, notify_critical, Alert, AlertSeverity, Notifier};
pub use processes::{filter_processes, mock_processes, Process, ProcessStatus, StatusFilter, ThresholdFilter};
pub use auth::{Authenticator, ConfiguredAuthenticator, Credentials};
pub use session::{resolve_route, FileSessionStore, Route, Session};
pub use ticker::{TickUpdate, TickerHandle};
pub use dashboard::DashboardState;
