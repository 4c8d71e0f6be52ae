/// Periodic metric refresh as a cancellable background task
///
/// Each tick draws a new sample, derives alerts and sends the result to the
/// UI loop. The handle owns both the task and the receiving end, so once it is
/// cancelled or dropped no further update can reach the view.

use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::alerts::{derive_alerts, Alert};
use super::metrics::{MetricSample, MetricTrends, SampleSource};

/// Default period between metric refreshes
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(7);

#[derive(Debug, Clone, PartialEq)]
pub struct TickUpdate {
    pub sample: MetricSample,
    pub trends: MetricTrends,
    pub alerts: Vec<Alert>,
    pub at: DateTime<Local>,
}

impl TickUpdate {
    /// Draw a sample from the source and derive everything else from it
    pub fn generate(source: &mut dyn SampleSource) -> Self {
        let sample = source.sample();
        Self {
            sample,
            trends: source.trends(),
            alerts: derive_alerts(&sample),
            at: Local::now(),
        }
    }
}

pub struct TickerHandle {
    task: Option<JoinHandle<()>>,
    shutdown: Option<oneshot::Sender<()>>,
    updates: mpsc::UnboundedReceiver<TickUpdate>,
}

impl TickerHandle {
    /// Start ticking. The first update arrives one full period after spawn.
    pub fn spawn<S>(mut source: S, period: Duration) -> Self
    where
        S: SampleSource + 'static,
    {
        let (update_tx, updates) = mpsc::unbounded_channel();
        let (shutdown, mut shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticks.tick() => {
                        let update = TickUpdate::generate(&mut source);
                        tracing::debug!(
                            cpu = update.sample.cpu,
                            memory = update.sample.memory,
                            alerts = update.alerts.len(),
                            "metrics tick"
                        );
                        if update_tx.send(update).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("metrics ticker stopped");
        });

        tracing::info!(period_ms = period.as_millis() as u64, "metrics ticker started");

        Self {
            task: Some(task),
            shutdown: Some(shutdown),
            updates,
        }
    }

    /// Next pending update without waiting
    pub fn try_next(&mut self) -> Option<TickUpdate> {
        self.updates.try_recv().ok()
    }

    /// Only the most recent pending update; older ones are superseded anyway
    pub fn latest(&mut self) -> Option<TickUpdate> {
        let mut latest = None;
        while let Some(update) = self.try_next() {
            latest = Some(update);
        }
        latest
    }

    pub async fn next(&mut self) -> Option<TickUpdate> {
        self.updates.recv().await
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |t| !t.is_finished())
    }

    /// Stop the task and discard anything still queued
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.updates.close();
        while self.updates.try_recv().is_ok() {}
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::FixedSampleSource;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn hot_sample() -> MetricSample {
        MetricSample::new(80.0, 70.0, 50.0, 30.0)
    }

    /// Counts how often the ticker draws a sample
    struct CountingSource {
        draws: Arc<AtomicUsize>,
    }

    impl SampleSource for CountingSource {
        fn sample(&mut self) -> MetricSample {
            self.draws.fetch_add(1, Ordering::SeqCst);
            hot_sample()
        }
    }

    fn counting_ticker(period: Duration) -> (TickerHandle, Arc<AtomicUsize>) {
        let draws = Arc::new(AtomicUsize::new(0));
        let source = CountingSource { draws: Arc::clone(&draws) };
        (TickerHandle::spawn(source, period), draws)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut ticker = TickerHandle::spawn(FixedSampleSource::new(hot_sample()), Duration::from_secs(7));

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(ticker.try_next().is_none());

        let update = ticker.next().await.unwrap();
        assert_eq!(update.sample, hot_sample());
        let ids: Vec<&str> = update.alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["cpu-critical", "memory-critical"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_repeat() {
        let mut ticker = TickerHandle::spawn(FixedSampleSource::new(hot_sample()), Duration::from_secs(7));

        tokio::time::sleep(Duration::from_secs(22)).await;
        tokio::task::yield_now().await;

        let mut count = 0;
        while ticker.try_next().is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_keeps_newest() {
        let mut ticker = TickerHandle::spawn(FixedSampleSource::new(hot_sample()), Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(3500)).await;
        tokio::task::yield_now().await;

        assert!(ticker.latest().is_some());
        assert!(ticker.try_next().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_sampling() {
        let (ticker, draws) = counting_ticker(Duration::from_secs(7));
        assert!(ticker.is_running());

        tokio::time::sleep(Duration::from_millis(7500)).await;
        tokio::task::yield_now().await;
        assert_eq!(draws.load(Ordering::SeqCst), 1);

        ticker.cancel();
        tokio::time::advance(Duration::from_secs(70)).await;
        tokio::task::yield_now().await;
        assert_eq!(draws.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_updates_after_stop() {
        let (mut ticker, draws) = counting_ticker(Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        let drawn = draws.load(Ordering::SeqCst);
        assert_eq!(drawn, 1);

        ticker.stop();
        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(ticker.try_next().is_none());
        assert_eq!(draws.load(Ordering::SeqCst), drawn);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_sampling() {
        let (ticker, draws) = counting_ticker(Duration::from_secs(1));
        drop(ticker);

        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(draws.load(Ordering::SeqCst), 0);
    }
}
