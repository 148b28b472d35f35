//! Lightweight in-process request metrics.
//!
//! Stored as atomics, recorded by the accounting middleware and exposed to
//! callers through the process registry (`/http/*` counters).

pub mod metrics;

pub use metrics::HttpMetrics;
