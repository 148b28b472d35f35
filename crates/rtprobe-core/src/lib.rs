//! rtprobe core: the metric query-and-conversion engine.
//!
//! Given a registry of counters (descriptor catalog + sample-by-name), the
//! engine enumerates counters, validates requested names, samples them and
//! normalizes every value kind into a single serializable `TypedValue`. It
//! carries no transport or runtime dependencies so it can run behind any
//! surface.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Broken invariants
//! (unconvertible kinds, histograms that never reach their median threshold)
//! surface as `ProbeError::Internal` so callers and tests can assert on them.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod engine;
pub mod error;
pub mod metric;
pub mod registry;

/// Shared result type.
pub use error::{ClientCode, ProbeError, Result};

pub use engine::MetricQueryEngine;
pub use metric::{
    CounterDescriptor, Float64Histogram, MetricReport, SampleValue, TypedValue, ValueKind,
};
pub use registry::{MetricRegistry, StaticRegistry};
