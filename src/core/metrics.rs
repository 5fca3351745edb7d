//! Facility counters for observability
//!
//! Lightweight atomic counters exposing how many records entered the
//! central queue, how many were fanned out, and where losses occurred.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct FacilityMetrics {
    /// Records accepted onto the central queue
    records_enqueued: AtomicU64,

    /// Records dequeued by the dispatcher and fanned out
    records_dispatched: AtomicU64,

    /// Appender write/close failures swallowed by workers
    appender_errors: AtomicU64,

    /// Shutdown flushes that hit the bounded drain window
    flush_timeouts: AtomicU64,
}

impl FacilityMetrics {
    pub const fn new() -> Self {
        Self {
            records_enqueued: AtomicU64::new(0),
            records_dispatched: AtomicU64::new(0),
            appender_errors: AtomicU64::new(0),
            flush_timeouts: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_enqueued(&self) -> u64 {
        self.records_enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_dispatched(&self) -> u64 {
        self.records_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn appender_errors(&self) -> u64 {
        self.appender_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_timeouts(&self) -> u64 {
        self.flush_timeouts.load(Ordering::Relaxed)
    }

    /// Records that entered the queue but were never fanned out, i.e.
    /// discarded by a timed-out shutdown flush.
    pub fn records_lost(&self) -> u64 {
        self.records_enqueued()
            .saturating_sub(self.records_dispatched())
    }

    #[inline]
    pub(crate) fn record_enqueued(&self) -> u64 {
        self.records_enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn record_dispatched(&self) -> u64 {
        self.records_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn record_appender_error(&self) -> u64 {
        self.appender_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn record_flush_timeout(&self) -> u64 {
        self.flush_timeouts.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.records_enqueued.store(0, Ordering::Relaxed);
        self.records_dispatched.store(0, Ordering::Relaxed);
        self.appender_errors.store(0, Ordering::Relaxed);
        self.flush_timeouts.store(0, Ordering::Relaxed);
    }
}

impl Default for FacilityMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_start_at_zero() {
        let metrics = FacilityMetrics::new();
        assert_eq!(metrics.records_enqueued(), 0);
        assert_eq!(metrics.records_dispatched(), 0);
        assert_eq!(metrics.appender_errors(), 0);
        assert_eq!(metrics.flush_timeouts(), 0);
        assert_eq!(metrics.records_lost(), 0);
    }

    #[test]
    fn test_records_lost() {
        let metrics = FacilityMetrics::new();
        for _ in 0..10 {
            metrics.record_enqueued();
        }
        for _ in 0..7 {
            metrics.record_dispatched();
        }
        assert_eq!(metrics.records_lost(), 3);
    }

    #[test]
    fn test_reset() {
        let metrics = FacilityMetrics::new();
        metrics.record_enqueued();
        metrics.record_appender_error();
        metrics.reset();
        assert_eq!(metrics.records_enqueued(), 0);
        assert_eq!(metrics.appender_errors(), 0);
    }
}
