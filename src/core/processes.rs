/// Process table data and filtering
///
/// The rows are a fixed mock set; filtering produces a derived view and never
/// mutates the rows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::MonitorError;

pub const HIGH_CPU_ABOVE: f64 = 50.0;
pub const HIGH_MEMORY_ABOVE: f64 = 15.0;
pub const CRITICAL_CPU_ABOVE: f64 = 70.0;
pub const CRITICAL_MEMORY_ABOVE: f64 = 20.0;

pub const NO_RESULTS_MESSAGE: &str = "No processes found matching your criteria";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    Running,
    Stopped,
    Warning,
    Critical,
}

impl ProcessStatus {
    pub fn all() -> &'static [ProcessStatus] {
        &[
            ProcessStatus::Running,
            ProcessStatus::Warning,
            ProcessStatus::Critical,
            ProcessStatus::Stopped,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Running => "running",
            ProcessStatus::Stopped => "stopped",
            ProcessStatus::Warning => "warning",
            ProcessStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessStatus {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(ProcessStatus::Running),
            "stopped" => Ok(ProcessStatus::Stopped),
            "warning" => Ok(ProcessStatus::Warning),
            "critical" => Ok(ProcessStatus::Critical),
            _ => Err(MonitorError::InvalidFilter(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub pid: u32,
    pub name: String,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub status: ProcessStatus,
    pub user: String,
}

impl Process {
    fn mock(pid: u32, name: &str, cpu_usage: f64, memory_usage: f64, status: ProcessStatus, user: &str) -> Self {
        Self {
            pid,
            name: name.to_string(),
            cpu_usage,
            memory_usage,
            status,
            user: user.to_string(),
        }
    }

    /// Over the critical cpu or memory line, regardless of status
    pub fn exceeds_critical(&self) -> bool {
        self.cpu_usage > CRITICAL_CPU_ABOVE || self.memory_usage > CRITICAL_MEMORY_ABOVE
    }

    pub fn emphasis(&self) -> RowEmphasis {
        if self.status == ProcessStatus::Critical || self.exceeds_critical() {
            RowEmphasis::Critical
        } else if self.status == ProcessStatus::Warning
            || self.cpu_usage > HIGH_CPU_ABOVE
            || self.memory_usage > HIGH_MEMORY_ABOVE
        {
            RowEmphasis::Warning
        } else {
            RowEmphasis::Normal
        }
    }

    pub fn cpu_level(&self) -> RowEmphasis {
        usage_level(self.cpu_usage, HIGH_CPU_ABOVE, CRITICAL_CPU_ABOVE)
    }

    pub fn memory_level(&self) -> RowEmphasis {
        usage_level(self.memory_usage, HIGH_MEMORY_ABOVE, CRITICAL_MEMORY_ABOVE)
    }
}

/// How loudly a row or cell should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEmphasis {
    Normal,
    Warning,
    Critical,
}

fn usage_level(value: f64, warning_above: f64, critical_above: f64) -> RowEmphasis {
    if value > critical_above {
        RowEmphasis::Critical
    } else if value > warning_above {
        RowEmphasis::Warning
    } else {
        RowEmphasis::Normal
    }
}

pub fn mock_processes() -> Vec<Process> {
    use ProcessStatus::*;

    vec![
        Process::mock(1234, "chrome", 15.2, 8.4, Running, "admin"),
        Process::mock(5678, "node", 45.7, 12.1, Warning, "admin"),
        Process::mock(9012, "firefox", 8.3, 6.2, Running, "user"),
        Process::mock(3456, "docker", 78.9, 24.6, Critical, "root"),
        Process::mock(7890, "vscode", 12.5, 4.8, Running, "admin"),
        Process::mock(2468, "postgres", 23.1, 16.3, Running, "postgres"),
        Process::mock(1357, "nginx", 3.2, 1.9, Running, "www-data"),
        Process::mock(8024, "redis", 5.8, 3.4, Running, "redis"),
        Process::mock(4680, "mysql", 67.3, 18.7, Critical, "mysql"),
        Process::mock(9753, "apache", 19.4, 7.2, Warning, "www-data"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProcessStatus),
}

impl StatusFilter {
    pub fn matches(&self, process: &Process) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => process.status == *status,
        }
    }

    /// Cycle order used by the dashboard: all, running, warning, critical, stopped
    pub fn next(&self) -> Self {
        let order = ProcessStatus::all();
        match self {
            StatusFilter::All => StatusFilter::Only(order[0]),
            StatusFilter::Only(status) => {
                let idx = order.iter().position(|s| s == status).unwrap_or(0);
                order
                    .get(idx + 1)
                    .map(|s| StatusFilter::Only(*s))
                    .unwrap_or(StatusFilter::All)
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Only(ProcessStatus::Running) => "Running",
            StatusFilter::Only(ProcessStatus::Warning) => "Warning",
            StatusFilter::Only(ProcessStatus::Critical) => "Critical",
            StatusFilter::Only(ProcessStatus::Stopped) => "Stopped",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            other => other.parse::<ProcessStatus>().map(StatusFilter::Only),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdFilter {
    #[default]
    All,
    HighCpu,
    HighMemory,
    Critical,
}

impl ThresholdFilter {
    pub fn matches(&self, process: &Process) -> bool {
        match self {
            ThresholdFilter::All => true,
            ThresholdFilter::HighCpu => process.cpu_usage > HIGH_CPU_ABOVE,
            ThresholdFilter::HighMemory => process.memory_usage > HIGH_MEMORY_ABOVE,
            ThresholdFilter::Critical => process.exceeds_critical(),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThresholdFilter::All => ThresholdFilter::HighCpu,
            ThresholdFilter::HighCpu => ThresholdFilter::HighMemory,
            ThresholdFilter::HighMemory => ThresholdFilter::Critical,
            ThresholdFilter::Critical => ThresholdFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThresholdFilter::All => "All Processes",
            ThresholdFilter::HighCpu => "High CPU (>50%)",
            ThresholdFilter::HighMemory => "High Memory (>15%)",
            ThresholdFilter::Critical => "Critical (>70%)",
        }
    }
}

impl FromStr for ThresholdFilter {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ThresholdFilter::All),
            "high-cpu" => Ok(ThresholdFilter::HighCpu),
            "high-memory" => Ok(ThresholdFilter::HighMemory),
            "critical" => Ok(ThresholdFilter::Critical),
            _ => Err(MonitorError::InvalidFilter(s.to_string())),
        }
    }
}

/// Case-insensitive name substring, or substring of the decimal pid
pub fn matches_search(process: &Process, search: &str) -> bool {
    process.name.to_lowercase().contains(&search.to_lowercase())
        || process.pid.to_string().contains(search)
}

pub fn filter_processes(
    rows: &[Process],
    search: &str,
    status: StatusFilter,
    threshold: ThresholdFilter,
) -> Vec<Process> {
    rows.iter()
        .filter(|p| matches_search(p, search) && status.matches(p) && threshold.matches(p))
        .cloned()
        .collect()
}
