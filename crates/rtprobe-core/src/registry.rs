//! Registry capability consumed by the engine.
//!
//! A registry is two operations: list every known descriptor, and sample the
//! current value of one name. Implementations must tolerate concurrent calls
//! without coordination from the engine.

use std::collections::HashMap;
use std::sync::Arc;

use crate::metric::{CounterDescriptor, SampleValue};

/// Live catalog of counters plus a read API.
pub trait MetricRegistry: Send + Sync {
    /// Full descriptor catalog. Names are unique.
    fn descriptors(&self) -> Vec<CounterDescriptor>;

    /// Current value for `name`, or `SampleValue::Bad` if it cannot be read.
    fn sample(&self, name: &str) -> SampleValue;
}

impl<R: MetricRegistry + ?Sized> MetricRegistry for Arc<R> {
    fn descriptors(&self) -> Vec<CounterDescriptor> {
        (**self).descriptors()
    }

    fn sample(&self, name: &str) -> SampleValue {
        (**self).sample(name)
    }
}

/// Fixed registry: descriptors and samples set up front.
///
/// Useful for embedding precomputed values and for tests. Samples may be set
/// for names that have no descriptor and vice versa.
#[derive(Debug, Default, Clone)]
pub struct StaticRegistry {
    descriptors: Vec<CounterDescriptor>,
    samples: HashMap<String, SampleValue>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor together with the value it samples to.
    /// Replaces an existing entry with the same name.
    pub fn with(mut self, descriptor: CounterDescriptor, value: SampleValue) -> Self {
        self.samples.insert(descriptor.name.clone(), value);
        self.descriptors.retain(|d| d.name != descriptor.name);
        self.descriptors.push(descriptor);
        self
    }

    /// Override only the sampled value for a name.
    pub fn with_sample(mut self, name: impl Into<String>, value: SampleValue) -> Self {
        self.samples.insert(name.into(), value);
        self
    }
}

impl MetricRegistry for StaticRegistry {
    fn descriptors(&self) -> Vec<CounterDescriptor> {
        self.descriptors.clone()
    }

    fn sample(&self, name: &str) -> SampleValue {
        self.samples.get(name).cloned().unwrap_or(SampleValue::Bad)
    }
}
