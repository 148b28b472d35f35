//! Metric data model.
//!
//! - `kind`: the closed set of value kinds a counter may declare.
//! - `histogram`: bucketed distributions and their median-bucket reduction.
//! - `value`: raw samples as read from a registry, and the typed scalar that
//!   leaves the engine.
//!
//! Kinds and values are exhaustive enums so every dispatch over them is
//! checked by the compiler.

pub mod histogram;
pub mod kind;
pub mod value;

use serde::Serialize;

pub use histogram::Float64Histogram;
pub use kind::ValueKind;
pub use value::{SampleValue, TypedValue};

/// Immutable counter metadata owned by a registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterDescriptor {
    /// Unique name, e.g. `/sched/tasks:tasks`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Declared value kind (serialized as its label).
    pub kind: ValueKind,
    /// Value only increases over the process lifetime.
    pub cumulative: bool,
}

impl CounterDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ValueKind,
        cumulative: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            cumulative,
        }
    }
}

/// One resolved counter in a query result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub name: String,
    pub description: String,
    /// Kind label, see [`ValueKind::label`].
    pub kind: &'static str,
    pub cumulative: bool,
    pub value: TypedValue,
}
