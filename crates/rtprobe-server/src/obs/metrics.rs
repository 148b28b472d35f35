//! Request accounting for the HTTP surface.
//!
//! Counters are plain atomics. Latencies go into a fixed-bucket histogram kept
//! in microseconds to avoid floating point math on the hot path; snapshots
//! convert boundaries to seconds for the registry.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use rtprobe_core::Float64Histogram;

// Fixed upper bounds in microseconds:
// 100us, 500us, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s (+ overflow bucket)
const BUCKETS_MICROS: [u64; 9] = [100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000];
const BUCKET_COUNT: usize = BUCKETS_MICROS.len() + 1;

/// Per-bucket (non-cumulative) latency counts.
pub struct AtomicHistogram {
    buckets: [AtomicU64; BUCKET_COUNT],
}

impl Default for AtomicHistogram {
    fn default() -> Self {
        Self {
            buckets: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

impl AtomicHistogram {
    /// Record one observation in the bucket that contains it.
    pub fn observe(&self, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        let idx = BUCKETS_MICROS
            .iter()
            .position(|&b| micros <= b)
            .unwrap_or(BUCKETS_MICROS.len());
        self.buckets[idx].fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot with boundaries in seconds: `[0, 100us, ..., 1s, +inf]`.
    pub fn snapshot(&self) -> Float64Histogram {
        let counts = self
            .buckets
            .iter()
            .map(|b| b.load(Ordering::Relaxed))
            .collect();

        let mut bounds = Vec::with_capacity(BUCKET_COUNT + 1);
        bounds.push(0.0);
        bounds.extend(BUCKETS_MICROS.iter().map(|&us| us as f64 / 1_000_000.0));
        bounds.push(f64::INFINITY);

        Float64Histogram::new(counts, bounds)
    }
}

#[derive(Default)]
pub struct HttpMetrics {
    requests: AtomicU64,
    errors: AtomicU64,
    latencies: AtomicHistogram,
    draining: AtomicBool,
}

impl HttpMetrics {
    /// Account one finished request. `failed` covers 4xx/5xx answers.
    pub fn record(&self, elapsed: Duration, failed: bool) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
        self.latencies.observe(elapsed);
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn latencies(&self) -> Float64Histogram {
        self.latencies.snapshot()
    }

    /// Mark draining state.
    pub fn set_draining(&self) { self.draining.store(true, Ordering::Relaxed); }
    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool { self.draining.load(Ordering::Relaxed) }
}
