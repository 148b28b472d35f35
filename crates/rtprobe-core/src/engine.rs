//! Metric query engine.
//!
//! Pipeline per requested name (request order, first error aborts the batch):
//! 1) exact lookup in the catalog
//! 2) reject `KindBad` descriptors without sampling
//! 3) sample via the registry
//! 4) re-check the sampled kind against the declared kind
//! 5) convert to a `TypedValue`
//!
//! The engine holds no state besides its registry handle; the catalog is read
//! fresh on every call.

use tracing::{debug, error};

use crate::error::{ProbeError, Result};
use crate::metric::{CounterDescriptor, MetricReport, SampleValue, TypedValue, ValueKind};
use crate::registry::MetricRegistry;

pub struct MetricQueryEngine<R> {
    registry: R,
}

impl<R: MetricRegistry> MetricQueryEngine<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Full descriptor catalog, no values.
    pub fn list_all(&self) -> Vec<CounterDescriptor> {
        self.registry.descriptors()
    }

    /// Resolve every requested name or fail with the first error.
    /// Never returns a partial result.
    pub fn query<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<MetricReport>> {
        let catalog = self.registry.descriptors();
        let mut out = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            match self.resolve(&catalog, name) {
                Ok(report) => out.push(report),
                Err(e) => {
                    if e.is_defect() {
                        error!(metric = %name, error = %e, "metric query hit a defect");
                    } else {
                        debug!(metric = %name, error = %e, "metric query rejected");
                    }
                    return Err(e);
                }
            }
        }

        Ok(out)
    }

    fn resolve(&self, catalog: &[CounterDescriptor], name: &str) -> Result<MetricReport> {
        let desc = catalog
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| ProbeError::UnknownMetric(name.to_string()))?;

        if desc.kind == ValueKind::Bad {
            return Err(ProbeError::UnsupportedKind {
                name: name.to_string(),
                kind: desc.kind.label(),
            });
        }

        let sample = self.registry.sample(name);
        if sample.kind() != desc.kind {
            return Err(ProbeError::KindDrift {
                name: name.to_string(),
                sampled: sample.kind().label(),
            });
        }

        Ok(MetricReport {
            name: desc.name.clone(),
            description: desc.description.clone(),
            kind: desc.kind.label(),
            cumulative: desc.cumulative,
            value: convert(name, sample)?,
        })
    }
}

/// Convert a kind-checked sample into its outward value.
fn convert(name: &str, sample: SampleValue) -> Result<TypedValue> {
    match sample {
        SampleValue::Uint64(v) => Ok(TypedValue::Uint64(v)),
        SampleValue::Float64(v) => Ok(TypedValue::Float64(v)),
        SampleValue::Histogram(h) => h.median_bucket().map(TypedValue::HistogramMedian),
        SampleValue::Bad => Err(ProbeError::Internal(format!(
            "unconvertible kind KindBad reached conversion for {name}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Float64Histogram;

    #[test]
    fn bad_sample_never_converts() {
        assert!(matches!(
            convert("/x:y", SampleValue::Bad),
            Err(ProbeError::Internal(_))
        ));
    }

    #[test]
    fn histogram_converts_to_median() {
        let h = Float64Histogram::new(vec![2, 2, 4], vec![0.0, 10.0, 20.0]);
        assert_eq!(
            convert("/h:s", SampleValue::Histogram(h)).ok(),
            Some(TypedValue::HistogramMedian(20.0))
        );
    }

    #[test]
    fn broken_histogram_surfaces_as_internal() {
        let h = Float64Histogram::new(vec![], vec![]);
        assert!(matches!(
            convert("/h:s", SampleValue::Histogram(h)),
            Err(ProbeError::Internal(_))
        ));
    }
}
