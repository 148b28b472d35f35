//! Raw samples and typed output values.

use serde::Serialize;

use super::{Float64Histogram, ValueKind};

/// Raw value as read from a registry.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    /// The registry could not produce a value for the name.
    Bad,
    Uint64(u64),
    Float64(f64),
    Histogram(Float64Histogram),
}

impl SampleValue {
    /// Runtime kind tag of this payload.
    pub fn kind(&self) -> ValueKind {
        match self {
            SampleValue::Bad => ValueKind::Bad,
            SampleValue::Uint64(_) => ValueKind::Uint64,
            SampleValue::Float64(_) => ValueKind::Float64,
            SampleValue::Histogram(_) => ValueKind::Float64Histogram,
        }
    }
}

/// The only value shape exposed outward.
///
/// Serializes as `{"type": "uint64", "value": 42}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum TypedValue {
    #[serde(rename = "uint64")]
    Uint64(u64),
    #[serde(rename = "float64")]
    Float64(f64),
    #[serde(rename = "histogram-median")]
    HistogramMedian(f64),
}

impl TypedValue {
    pub fn type_tag(&self) -> &'static str {
        match self {
            TypedValue::Uint64(_) => "uint64",
            TypedValue::Float64(_) => "float64",
            TypedValue::HistogramMedian(_) => "histogram-median",
        }
    }
}
