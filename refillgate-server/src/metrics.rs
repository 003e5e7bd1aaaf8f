//! Simple metrics collection for observability
//!
//! Lightweight atomic counters with zero allocations in the hot path,
//! exposed as a JSON snapshot on the HTTP transport.

use refillgate::Verdict;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Core metrics collected by the server
pub struct Metrics {
    /// Server start time
    start_time: Instant,

    /// Total quota checks processed
    pub total_checks: AtomicU64,
    /// Checks that were admitted
    pub admitted: AtomicU64,
    /// Admits that drained the last attempt
    pub warned: AtomicU64,
    /// Checks that were denied
    pub denied: AtomicU64,
    /// Requests rejected before reaching the limiter (bad input)
    pub rejected_input: AtomicU64,
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub total_checks: u64,
    pub admitted: u64,
    pub warned: u64,
    pub denied: u64,
    pub rejected_input: u64,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            total_checks: AtomicU64::new(0),
            admitted: AtomicU64::new(0),
            warned: AtomicU64::new(0),
            denied: AtomicU64::new(0),
            rejected_input: AtomicU64::new(0),
        }
    }

    /// Record the outcome of one quota check
    pub fn record(&self, verdict: &Verdict) {
        self.total_checks.fetch_add(1, Ordering::Relaxed);
        match verdict {
            Verdict::Admitted { should_warn, .. } => {
                self.admitted.fetch_add(1, Ordering::Relaxed);
                if *should_warn {
                    self.warned.fetch_add(1, Ordering::Relaxed);
                }
            }
            Verdict::Exceeded { .. } => {
                self.denied.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Record a request that never reached the limiter
    pub fn record_rejected_input(&self) {
        self.rejected_input.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            total_checks: self.total_checks.load(Ordering::Relaxed),
            admitted: self.admitted.load(Ordering::Relaxed),
            warned: self.warned.load(Ordering::Relaxed),
            denied: self.denied.load(Ordering::Relaxed),
            rejected_input: self.rejected_input.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    #[test]
    fn test_record_counts_by_verdict() {
        let metrics = Metrics::new();
        let now = SystemTime::now();

        metrics.record(&Verdict::Admitted {
            should_warn: false,
            refill_at: now,
        });
        metrics.record(&Verdict::Admitted {
            should_warn: true,
            refill_at: now,
        });
        metrics.record(&Verdict::Exceeded { retry_at: now });
        metrics.record_rejected_input();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_checks, 3);
        assert_eq!(snapshot.admitted, 2);
        assert_eq!(snapshot.warned, 1);
        assert_eq!(snapshot.denied, 1);
        assert_eq!(snapshot.rejected_input, 1);
    }
}
