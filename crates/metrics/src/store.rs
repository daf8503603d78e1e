//! Process-lifetime metrics counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Shared counters tracked for the lifetime of the process.
///
/// All fields are atomics updated with relaxed ordering. Counters are
/// independent of each other, so a snapshot is not a consistent cut across
/// fields, only a recent value of each.
#[derive(Debug, Default)]
pub struct MetricsStore {
    requests_total: AtomicU64,
    errors_total: AtomicU64,
    active_connections: AtomicU64,
    // f64 seconds stored as raw bits.
    request_duration_bits: AtomicU64,
}

/// Point-in-time view of the metrics store.
///
/// `memory_usage_bytes` and `uptime_seconds` are sampled from the system at
/// snapshot time rather than tracked in the store.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Total requests handled since startup.
    pub requests_total: u64,

    /// Duration of the most recent tracked request, in seconds.
    pub request_duration_seconds: f64,

    /// Most recently reported number of active connections.
    pub active_connections: u64,

    /// Total errors observed since startup.
    pub errors_total: u64,

    /// Process memory usage in bytes.
    pub memory_usage_bytes: u64,

    /// Process uptime in seconds.
    pub uptime_seconds: f64,
}

impl MetricsStore {
    /// Creates a store with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one handled request.
    pub fn increment_requests(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds `count` to the error total.
    pub fn add_errors(&self, count: u64) {
        self.errors_total.fetch_add(count, Ordering::Relaxed);
    }

    /// Reports the current number of active connections.
    pub fn set_active_connections(&self, count: u64) {
        self.active_connections.store(count, Ordering::Relaxed);
    }

    /// Records the duration of the most recent tracked request.
    pub fn record_request_duration(&self, seconds: f64) {
        self.request_duration_bits
            .store(seconds.to_bits(), Ordering::Relaxed);
    }

    /// Duration of the most recent tracked request, in seconds.
    #[must_use]
    pub fn request_duration_seconds(&self) -> f64 {
        f64::from_bits(self.request_duration_bits.load(Ordering::Relaxed))
    }

    /// Takes a snapshot, overlaying the given system readings.
    #[must_use]
    pub fn snapshot(&self, memory_usage_bytes: u64, uptime_seconds: f64) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            request_duration_seconds: self.request_duration_seconds(),
            active_connections: self.active_connections.load(Ordering::Relaxed),
            errors_total: self.errors_total.load(Ordering::Relaxed),
            memory_usage_bytes,
            uptime_seconds,
        }
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        self.requests_total.store(0, Ordering::Relaxed);
        self.errors_total.store(0, Ordering::Relaxed);
        self.active_connections.store(0, Ordering::Relaxed);
        self.request_duration_bits.store(0, Ordering::Relaxed);
    }
}
