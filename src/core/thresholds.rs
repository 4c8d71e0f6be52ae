/// Metric status evaluation
///
/// Maps a metric value to a severity tier using per-metric warning/critical
/// thresholds. Boundaries are inclusive: a value equal to a threshold lands
/// in that threshold's tier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{MonitorError, MonitorResult};

/// The four tracked metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Cpu,
    Memory,
    Disk,
    Network,
}

impl MetricType {
    pub fn all() -> &'static [MetricType] {
        &[
            MetricType::Cpu,
            MetricType::Memory,
            MetricType::Disk,
            MetricType::Network,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            MetricType::Cpu => "cpu",
            MetricType::Memory => "memory",
            MetricType::Disk => "disk",
            MetricType::Network => "network",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MetricType {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(MetricType::Cpu),
            "memory" => Ok(MetricType::Memory),
            "disk" => Ok(MetricType::Disk),
            "network" => Ok(MetricType::Network),
            _ => Err(MonitorError::InvalidMetricType(s.to_string())),
        }
    }
}

/// Severity tier of a single metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Healthy,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Healthy => "healthy",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub warning: f64,
    pub critical: f64,
}

impl Threshold {
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }
}

/// Per-metric thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTable {
    pub cpu: Threshold,
    pub memory: Threshold,
    pub disk: Threshold,
    pub network: Threshold,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            cpu: Threshold::new(60.0, 75.0),
            memory: Threshold::new(50.0, 65.0),
            disk: Threshold::new(80.0, 90.0),
            network: Threshold::new(70.0, 85.0),
        }
    }
}

impl ThresholdTable {
    pub fn get(&self, metric: MetricType) -> Threshold {
        match metric {
            MetricType::Cpu => self.cpu,
            MetricType::Memory => self.memory,
            MetricType::Disk => self.disk,
            MetricType::Network => self.network,
        }
    }

    /// Check that every pair satisfies 0 < warning < critical < 100
    pub fn validate(&self) -> MonitorResult<()> {
        for metric in MetricType::all() {
            let t = self.get(*metric);
            let in_range = t.warning > 0.0 && t.critical < 100.0;
            if !in_range || t.warning >= t.critical {
                return Err(MonitorError::InvalidThreshold {
                    metric: metric.key().to_string(),
                    warning: t.warning,
                    critical: t.critical,
                });
            }
        }
        Ok(())
    }
}

/// Inclusive on both boundaries. NaN compares false everywhere and reads as healthy.
pub fn classify(value: f64, metric: MetricType, thresholds: &ThresholdTable) -> Severity {
    let threshold = thresholds.get(metric);
    if value >= threshold.critical {
        Severity::Critical
    } else if value >= threshold.warning {
        Severity::Warning
    } else {
        Severity::Healthy
    }
}

/// Same as [`classify`] but takes the metric name as text
pub fn classify_named(value: f64, metric: &str, thresholds: &ThresholdTable) -> MonitorResult<Severity> {
    let metric = metric.parse::<MetricType>()?;
    Ok(classify(value, metric, thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_healthy() {
        let table = ThresholdTable::default();
        for metric in MetricType::all() {
            assert_eq!(classify(f64::NAN, *metric, &table), Severity::Healthy);
        }
    }

    #[test]
    fn test_default_table_values() {
        let table = ThresholdTable::default();
        assert_eq!(table.cpu, Threshold::new(60.0, 75.0));
        assert_eq!(table.memory, Threshold::new(50.0, 65.0));
        assert_eq!(table.disk, Threshold::new(80.0, 90.0));
        assert_eq!(table.network, Threshold::new(70.0, 85.0));
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let table = ThresholdTable::default();
        assert_eq!(classify(75.0, MetricType::Cpu, &table), Severity::Critical);
        assert_eq!(classify(60.0, MetricType::Cpu, &table), Severity::Warning);
        assert_eq!(classify(59.99, MetricType::Cpu, &table), Severity::Healthy);
        assert_eq!(classify(65.0, MetricType::Memory, &table), Severity::Critical);
        assert_eq!(classify(50.0, MetricType::Memory, &table), Severity::Warning);
        assert_eq!(classify(90.0, MetricType::Disk, &table), Severity::Critical);
        assert_eq!(classify(85.0, MetricType::Network, &table), Severity::Critical);
        assert_eq!(classify(69.9, MetricType::Network, &table), Severity::Healthy);
    }

    #[test]
    fn test_classify_matches_threshold_definition() {
        let table = ThresholdTable::default();
        for metric in MetricType::all() {
            let t = table.get(*metric);
            let mut value = -10.0;
            while value <= 120.0 {
                let expected = if value >= t.critical {
                    Severity::Critical
                } else if value >= t.warning {
                    Severity::Warning
                } else {
                    Severity::Healthy
                };
                assert_eq!(classify(value, *metric, &table), expected, "{} at {}", metric, value);
                value += 0.5;
            }
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let table = ThresholdTable::default();
        let first = classify(72.3, MetricType::Cpu, &table);
        let second = classify(72.3, MetricType::Cpu, &table);
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_named() {
        let table = ThresholdTable::default();
        assert_eq!(classify_named(95.0, "DISK", &table), Ok(Severity::Critical));
        assert_eq!(
            classify_named(10.0, "gpu", &table),
            Err(MonitorError::InvalidMetricType("gpu".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_inverted_pair() {
        let mut table = ThresholdTable::default();
        table.disk = Threshold::new(90.0, 80.0);
        assert!(matches!(
            table.validate(),
            Err(MonitorError::InvalidThreshold { ref metric, .. }) if metric == "disk"
        ));

        table.disk = Threshold::new(0.0, 80.0);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_partial_table_uses_defaults() {
        let table: ThresholdTable = toml::from_str("[cpu]\nwarning = 40.0\ncritical = 55.0\n").unwrap();
        assert_eq!(table.cpu, Threshold::new(40.0, 55.0));
        assert_eq!(table.memory, ThresholdTable::default().memory);
    }
}
