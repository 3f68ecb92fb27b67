//! In-process request metrics collector
//!
//! Tracks request count, cumulative latency, and error count for a single
//! service instance. Unlike the facade metrics in the parent module this keeps
//! its own state, so callers can render a summary without a recorder.

use std::fmt;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestMetrics {
    request_count: u64,
    total_latency: Duration,
    error_count: u64,
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one handled request
    ///
    /// Totals saturate instead of overflowing.
    pub fn record_request(&mut self, latency: Duration, is_error: bool) {
        self.request_count = self.request_count.saturating_add(1);
        self.total_latency = self.total_latency.saturating_add(latency);
        if is_error {
            self.error_count = self.error_count.saturating_add(1);
        }
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    /// Mean latency, truncated to whole nanoseconds. Zero when nothing was recorded.
    pub fn average_latency(&self) -> Duration {
        if self.request_count == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total_latency.as_nanos() / u128::from(self.request_count);
        let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
        Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
    }

    /// Fraction of requests that were errors, in `[0.0, 1.0]`
    pub fn error_rate(&self) -> f64 {
        if self.request_count == 0 {
            return 0.0;
        }
        self.error_count as f64 / self.request_count as f64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for RequestMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Requests: {}, Avg Latency: {:?}, Error Rate: {:.2}%",
            self.request_count,
            self.average_latency(),
            self.error_rate() * 100.0
        )
    }
}
