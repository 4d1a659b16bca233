//! Logger metrics for observability
//!
//! Counters describing what the dispatcher did with each record. Sink
//! failures never reach the caller, so these counters are the in-process way
//! to notice them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Dispatch counters for one logger
///
/// # Example
///
/// ```
/// use rust_leveled_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_created();
/// metrics.record_delivered();
///
/// assert_eq!(metrics.records_created(), 1);
/// assert_eq!(metrics.delivered(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records built, one per logging call
    records_created: AtomicU64,

    /// Successful backend deliveries
    delivered: AtomicU64,

    /// Backends skipped because their threshold rejected the record
    filtered: AtomicU64,

    /// Backends that returned an error
    sink_failures: AtomicU64,

    /// Backends that panicked
    sink_panics: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            records_created: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            sink_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_created(&self) -> u64 {
        self.records_created.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_panics(&self) -> u64 {
        self.sink_panics.load(Ordering::Relaxed)
    }

    /// Record a created record, returning the previous count
    #[inline]
    pub fn record_created(&self) -> u64 {
        self.records_created.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_panic(&self) -> u64 {
        self.sink_panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed deliveries (errors and panics) as a percentage of attempted ones.
    ///
    /// Returns 0.0 if nothing was attempted.
    pub fn failure_rate(&self) -> f64 {
        let failed = (self.sink_failures() + self.sink_panics()) as f64;
        let attempted = self.delivered() as f64 + failed;
        if attempted == 0.0 {
            0.0
        } else {
            (failed / attempted) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.records_created.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.sink_panics.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            records_created: AtomicU64::new(self.records_created()),
            delivered: AtomicU64::new(self.delivered()),
            filtered: AtomicU64::new(self.filtered()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            sink_panics: AtomicU64::new(self.sink_panics()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.records_created(), 0);
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.filtered(), 0);
        assert_eq!(metrics.sink_failures(), 0);
        assert_eq!(metrics.sink_panics(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_sink_failure(), 0);
        assert_eq!(metrics.record_sink_failure(), 1);
        assert_eq!(metrics.sink_failures(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_delivered();
        }
        for _ in 0..5 {
            metrics.record_sink_failure();
        }
        for _ in 0..5 {
            metrics.record_sink_panic();
        }

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_created();
        metrics.record_filtered();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.records_created(), 0);
        assert_eq!(snapshot.records_created(), 1);
        assert_eq!(snapshot.filtered(), 1);
    }
}
