/// Simulated system metrics
///
/// Samples are generated locally and replaced wholesale on every tick.
/// No history is kept; the charts use the static series in `charts.rs`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::thresholds::{classify, MetricType, Severity, ThresholdTable};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSample {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
}

impl MetricSample {
    pub fn new(cpu: f64, memory: f64, disk: f64, network: f64) -> Self {
        Self { cpu, memory, disk, network }
    }

    pub fn value(&self, metric: MetricType) -> f64 {
        match metric {
            MetricType::Cpu => self.cpu,
            MetricType::Memory => self.memory,
            MetricType::Disk => self.disk,
            MetricType::Network => self.network,
        }
    }
}

/// Per-metric percentage change shown next to each card
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricTrends {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
}

impl MetricTrends {
    pub fn value(&self, metric: MetricType) -> f64 {
        match metric {
            MetricType::Cpu => self.cpu,
            MetricType::Memory => self.memory,
            MetricType::Disk => self.disk,
            MetricType::Network => self.network,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn of(trend: f64) -> Self {
        if trend > 0.0 {
            TrendDirection::Up
        } else if trend < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Flat => "→",
        }
    }
}

/// Anything that can produce a fresh sample (and card trends) on demand
pub trait SampleSource: Send {
    fn sample(&mut self) -> MetricSample;

    fn trends(&mut self) -> MetricTrends {
        MetricTrends::default()
    }
}

/// Uniformly random values within fixed per-metric ranges
pub struct RandomSampleSource {
    rng: StdRng,
}

impl RandomSampleSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSampleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for RandomSampleSource {
    fn sample(&mut self) -> MetricSample {
        MetricSample {
            cpu: self.rng.gen_range(10.0..90.0),
            memory: self.rng.gen_range(20.0..90.0),
            disk: self.rng.gen_range(45.0..85.0),
            network: self.rng.gen_range(15.0..75.0),
        }
    }

    fn trends(&mut self) -> MetricTrends {
        MetricTrends {
            cpu: self.rng.gen_range(-5.0..5.0),
            memory: self.rng.gen_range(-4.0..4.0),
            disk: self.rng.gen_range(0.0..3.0),
            network: self.rng.gen_range(-7.5..7.5),
        }
    }
}

/// Always returns the same sample
#[derive(Debug, Clone)]
pub struct FixedSampleSource {
    sample: MetricSample,
}

impl FixedSampleSource {
    pub fn new(sample: MetricSample) -> Self {
        Self { sample }
    }
}

impl SampleSource for FixedSampleSource {
    fn sample(&mut self) -> MetricSample {
        self.sample
    }
}

/// Display model for one metric card
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: &'static str,
    pub metric: MetricType,
    pub value: f64,
    pub unit: &'static str,
    pub severity: Severity,
    pub trend: f64,
}

impl MetricCard {
    pub fn title_for(metric: MetricType) -> &'static str {
        match metric {
            MetricType::Cpu => "CPU Usage",
            MetricType::Memory => "Memory Usage",
            MetricType::Disk => "Disk Usage",
            MetricType::Network => "Network Activity",
        }
    }

    pub fn unit_for(metric: MetricType) -> &'static str {
        match metric {
            MetricType::Network => " MB/s",
            _ => "%",
        }
    }

    /// Progress bar fill, capped at 100
    pub fn fill_percent(&self) -> f64 {
        self.value.clamp(0.0, 100.0)
    }

    pub fn display_value(&self) -> String {
        format!("{:.1}{}", self.value, self.unit)
    }

    pub fn display_trend(&self) -> String {
        format!("{} {:.1}%", TrendDirection::of(self.trend).arrow(), self.trend.abs())
    }
}

/// Build the four cards in display order
pub fn build_cards(sample: &MetricSample, trends: &MetricTrends, thresholds: &ThresholdTable) -> Vec<MetricCard> {
    MetricType::all()
        .iter()
        .map(|metric| {
            let value = sample.value(*metric);
            MetricCard {
                title: MetricCard::title_for(*metric),
                metric: *metric,
                value,
                unit: MetricCard::unit_for(*metric),
                severity: classify(value, *metric, thresholds),
                trend: trends.value(*metric),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_samples_stay_in_range() {
        let mut source = RandomSampleSource::with_seed(7);
        for _ in 0..500 {
            let s = source.sample();
            assert!((10.0..90.0).contains(&s.cpu));
            assert!((20.0..90.0).contains(&s.memory));
            assert!((45.0..85.0).contains(&s.disk));
            assert!((15.0..75.0).contains(&s.network));

            let t = source.trends();
            assert!((-5.0..5.0).contains(&t.cpu));
            assert!((0.0..3.0).contains(&t.disk));
        }
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RandomSampleSource::with_seed(42);
        let mut b = RandomSampleSource::with_seed(42);
        assert_eq!(a.sample(), b.sample());
    }

    #[test]
    fn test_build_cards() {
        let sample = MetricSample::new(80.0, 55.0, 40.0, 120.0);
        let trends = MetricTrends { cpu: 2.5, memory: -1.0, disk: 0.0, network: 3.0 };
        let cards = build_cards(&sample, &trends, &ThresholdTable::default());

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].title, "CPU Usage");
        assert_eq!(cards[0].severity, Severity::Critical);
        assert_eq!(cards[1].severity, Severity::Warning);
        assert_eq!(cards[2].severity, Severity::Healthy);
        assert_eq!(cards[3].unit, " MB/s");
        assert_eq!(cards[3].fill_percent(), 100.0);
        assert_eq!(cards[3].display_value(), "120.0 MB/s");
    }

    #[test]
    fn test_trend_display() {
        let card = MetricCard {
            title: "Memory Usage",
            metric: MetricType::Memory,
            value: 42.0,
            unit: "%",
            severity: Severity::Healthy,
            trend: -2.345,
        };
        assert_eq!(card.display_trend(), "↓ 2.3%");
        assert_eq!(TrendDirection::of(0.0), TrendDirection::Flat);
        assert_eq!(TrendDirection::of(1.0).arrow(), "↑");
    }
}
