//! Observability metrics for visit tracking.
//!
//! Provides counters about filter behavior for monitoring and debugging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking filter statistics.
///
/// All counters use atomic operations for thread-safe updates and reads.
/// Cloning shares the underlying counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Evaluations that produced a visit record
    visits_tracked: AtomicU64,
    /// Evaluations short-circuited by a rule or the override hook
    visits_excluded: AtomicU64,
    /// Inserts rejected by the persistence backend
    store_failures: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an evaluation that decided to track.
    pub(crate) fn record_tracked(&self) {
        self.inner.visits_tracked.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an excluded evaluation.
    pub(crate) fn record_excluded(&self) {
        self.inner.visits_excluded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed insert.
    pub(crate) fn record_store_failure(&self) {
        self.inner.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Total evaluations that produced a record.
    ///
    /// Counts the filter decision, not persistence success; see
    /// [`store_failures`](Self::store_failures) for rejected inserts.
    pub fn visits_tracked(&self) -> u64 {
        self.inner.visits_tracked.load(Ordering::Relaxed)
    }

    /// Total excluded evaluations.
    pub fn visits_excluded(&self) -> u64 {
        self.inner.visits_excluded.load(Ordering::Relaxed)
    }

    /// Total inserts rejected by the backend.
    pub fn store_failures(&self) -> u64 {
        self.inner.store_failures.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            visits_tracked: self.visits_tracked(),
            visits_excluded: self.visits_excluded(),
            store_failures: self.store_failures(),
        }
    }

    /// Reset all counters to zero.
    ///
    /// Useful for testing or when starting a new monitoring period.
    pub fn reset(&self) {
        self.inner.visits_tracked.store(0, Ordering::Relaxed);
        self.inner.visits_excluded.store(0, Ordering::Relaxed);
        self.inner.store_failures.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time copy of the metrics counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Evaluations that produced a visit record
    pub visits_tracked: u64,
    /// Evaluations short-circuited by a rule or the override hook
    pub visits_excluded: u64,
    /// Inserts rejected by the persistence backend
    pub store_failures: u64,
}

impl MetricsSnapshot {
    /// Total number of evaluations.
    pub fn total_evaluations(&self) -> u64 {
        self.visits_tracked.saturating_add(self.visits_excluded)
    }

    /// Fraction of evaluations that were excluded, in `[0.0, 1.0]`.
    pub fn exclusion_rate(&self) -> f64 {
        let total = self.total_evaluations();
        if total == 0 {
            0.0
        } else {
            self.visits_excluded as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = Metrics::new();
        assert_eq!(metrics.visits_tracked(), 0);
        assert_eq!(metrics.visits_excluded(), 0);
        assert_eq!(metrics.store_failures(), 0);
    }

    #[test]
    fn test_record_and_snapshot() {
        let metrics = Metrics::new();
        metrics.record_tracked();
        metrics.record_tracked();
        metrics.record_excluded();
        metrics.record_store_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.visits_tracked, 2);
        assert_eq!(snapshot.visits_excluded, 1);
        assert_eq!(snapshot.store_failures, 1);
        assert_eq!(snapshot.total_evaluations(), 3);
    }

    #[test]
    fn test_total_evaluations_saturates() {
        let snapshot = MetricsSnapshot {
            visits_tracked: u64::MAX,
            visits_excluded: 1,
            store_failures: 0,
        };
        assert_eq!(snapshot.total_evaluations(), u64::MAX);
    }

    #[test]
    fn test_clone_shares_counters() {
        let metrics = Metrics::new();
        let clone = metrics.clone();

        metrics.record_tracked();
        assert_eq!(clone.visits_tracked(), 1);
    }

    #[test]
    fn test_exclusion_rate() {
        let metrics = Metrics::new();
        assert_eq!(metrics.snapshot().exclusion_rate(), 0.0);

        metrics.record_tracked();
        metrics.record_excluded();
        metrics.record_excluded();
        metrics.record_excluded();

        let rate = metrics.snapshot().exclusion_rate();
        assert!((rate - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_tracked();
        metrics.record_excluded();
        metrics.record_store_failure();

        metrics.reset();
        assert_eq!(metrics.snapshot().total_evaluations(), 0);
        assert_eq!(metrics.store_failures(), 0);
    }
}
