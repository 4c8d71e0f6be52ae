/// Dashboard view state
///
/// Owns the single current sample, the current alert list and the process
/// table controls. Updates replace sample and alerts wholesale.

use chrono::{DateTime, Local};

use super::alerts::{notify_critical, Alert, Notifier};
use super::metrics::{build_cards, MetricCard, MetricSample, MetricTrends};
use super::processes::{filter_processes, mock_processes, Process, StatusFilter, ThresholdFilter};
use super::thresholds::ThresholdTable;
use super::ticker::TickUpdate;

pub struct DashboardState {
    thresholds: ThresholdTable,
    sample: MetricSample,
    trends: MetricTrends,
    alerts: Vec<Alert>,
    last_update: DateTime<Local>,
    processes: Vec<Process>,
    pub search: String,
    pub status_filter: StatusFilter,
    pub threshold_filter: ThresholdFilter,
    pub selected: usize,
}

impl DashboardState {
    /// Seed with an initial sample; no alerts until the first tick
    pub fn new(thresholds: ThresholdTable, initial: TickUpdate) -> Self {
        Self {
            thresholds,
            sample: initial.sample,
            trends: initial.trends,
            alerts: Vec::new(),
            last_update: initial.at,
            processes: mock_processes(),
            search: String::new(),
            status_filter: StatusFilter::All,
            threshold_filter: ThresholdFilter::All,
            selected: 0,
        }
    }

    /// Replace sample and alerts, then raise notifications for critical alerts
    pub fn apply(&mut self, update: TickUpdate, notifier: &mut dyn Notifier) -> usize {
        self.sample = update.sample;
        self.trends = update.trends;
        self.alerts = update.alerts;
        self.last_update = update.at;
        notify_critical(&self.alerts, notifier)
    }

    /// Fresh sample with the alert list emptied, as on first open.
    /// No notifications are raised.
    pub fn reload(&mut self, update: TickUpdate) {
        self.sample = update.sample;
        self.trends = update.trends;
        self.alerts.clear();
        self.last_update = update.at;
    }

    pub fn sample(&self) -> &MetricSample {
        &self.sample
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn last_update(&self) -> DateTime<Local> {
        self.last_update
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn cards(&self) -> Vec<MetricCard> {
        build_cards(&self.sample, &self.trends, &self.thresholds)
    }

    pub fn total_processes(&self) -> usize {
        self.processes.len()
    }

    pub fn visible_processes(&self) -> Vec<Process> {
        filter_processes(&self.processes, &self.search, self.status_filter, self.threshold_filter)
    }

    pub fn cycle_status_filter(&mut self) {
        self.status_filter = self.status_filter.next();
        self.clamp_selection();
    }

    pub fn cycle_threshold_filter(&mut self) {
        self.threshold_filter = self.threshold_filter.next();
        self.clamp_selection();
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.clamp_selection();
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.status_filter = StatusFilter::All;
        self.threshold_filter = ThresholdFilter::All;
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let count = self.visible_processes().len();
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_processes().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}
