/// Transient notifications shown in the corner of the dashboard

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::alerts::{Alert, Notifier};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(5);
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub expires_at: Instant,
}

pub struct ToastQueue {
    duration: Duration,
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            toasts: VecDeque::new(),
        }
    }

    pub fn push(&mut self, title: &str, message: &str, now: Instant) {
        self.toasts.push_back(Toast {
            title: title.to_string(),
            message: message.to_string(),
            expires_at: now + self.duration,
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    /// Drop expired toasts
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, title: &str, alert: &Alert) {
        self.push(title, &alert.message, Instant::now());
    }
}
