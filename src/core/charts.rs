/// Static chart series for the performance analytics panel

use super::thresholds::Severity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub time: &'static str,
    pub cpu: f64,
    pub memory: f64,
    pub network: f64,
}

const fn point(time: &'static str, cpu: f64, memory: f64, network: f64) -> TimeSeriesPoint {
    TimeSeriesPoint { time, cpu, memory, network }
}

pub const PERFORMANCE_SERIES: &[TimeSeriesPoint] = &[
    point("10:00", 25.0, 45.0, 30.0),
    point("10:05", 35.0, 48.0, 40.0),
    point("10:10", 42.0, 52.0, 35.0),
    point("10:15", 58.0, 46.0, 55.0),
    point("10:20", 45.0, 58.0, 42.0),
    point("10:25", 38.0, 55.0, 38.0),
    point("10:30", 52.0, 62.0, 48.0),
    point("10:35", 48.0, 59.0, 52.0),
    point("10:40", 41.0, 54.0, 45.0),
    point("10:45", 36.0, 51.0, 41.0),
];

/// Series as (x, y) pairs, x being the point index
pub fn series_points(select: fn(&TimeSeriesPoint) -> f64) -> Vec<(f64, f64)> {
    PERFORMANCE_SERIES
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, select(p)))
        .collect()
}

pub fn series_labels() -> Vec<&'static str> {
    PERFORMANCE_SERIES.iter().map(|p| p.time).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    pub used_gb: u64,
    pub total_gb: u64,
}

impl DiskUsage {
    pub fn used_percent(&self) -> u16 {
        if self.total_gb == 0 {
            return 0;
        }
        ((self.used_gb * 100) / self.total_gb) as u16
    }

    pub fn summary(&self) -> String {
        format!("Used: {} GB / {} GB", self.used_gb, self.total_gb)
    }
}

pub const DISK_USAGE: DiskUsage = DiskUsage { used_gb: 340, total_gb: 500 };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthScore {
    pub score: u16,
}

impl HealthScore {
    pub fn severity(&self) -> Severity {
        match self.score {
            80..=u16::MAX => Severity::Healthy,
            50..=79 => Severity::Warning,
            _ => Severity::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.severity() {
            Severity::Healthy => "Healthy",
            Severity::Warning => "Degraded",
            Severity::Critical => "Unhealthy",
        }
    }
}

pub const HEALTH_SCORE: HealthScore = HealthScore { score: 85 };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_series() {
        assert_eq!(PERFORMANCE_SERIES.len(), 10);
        assert_eq!(series_labels().first(), Some(&"10:00"));
        assert_eq!(series_labels().last(), Some(&"10:45"));

        let cpu = series_points(|p| p.cpu);
        assert_eq!(cpu[3], (3.0, 58.0));
    }

    #[test]
    fn test_disk_usage() {
        assert_eq!(DISK_USAGE.used_percent(), 68);
        assert_eq!(DISK_USAGE.summary(), "Used: 340 GB / 500 GB");
    }

    #[test]
    fn test_health_score() {
        assert_eq!(HEALTH_SCORE.score, 85);
        assert_eq!(HEALTH_SCORE.label(), "Healthy");
        assert_eq!(HealthScore { score: 60 }.severity(), Severity::Warning);
    }
}
