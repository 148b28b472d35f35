//! Query engine behavior against a fixed registry.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicU64, Ordering};

use rtprobe_core::{
    CounterDescriptor, Float64Histogram, MetricQueryEngine, MetricRegistry, ProbeError,
    SampleValue, StaticRegistry, TypedValue, ValueKind,
};

const GOROUTINES: &str = "/sched/tasks:tasks";
const USER_CPU: &str = "/cpu/classes/user:cpu-seconds";
const LATENCIES: &str = "/sched/latencies:seconds";
const BROKEN: &str = "/broken:unknown";

fn fixture() -> StaticRegistry {
    StaticRegistry::new()
        .with(
            CounterDescriptor::new(GOROUTINES, "Count of live tasks.", ValueKind::Uint64, false),
            SampleValue::Uint64(42),
        )
        .with(
            CounterDescriptor::new(USER_CPU, "CPU time in user code.", ValueKind::Float64, true),
            SampleValue::Float64(1.25),
        )
        .with(
            CounterDescriptor::new(
                LATENCIES,
                "Time spent runnable before running.",
                ValueKind::Float64Histogram,
                true,
            ),
            SampleValue::Histogram(Float64Histogram::new(vec![2, 2, 4], vec![0.0, 10.0, 20.0])),
        )
        .with(
            CounterDescriptor::new(BROKEN, "Unsupported.", ValueKind::Bad, false),
            SampleValue::Bad,
        )
}

#[test]
fn scalar_values_pass_through_unchanged() {
    let engine = MetricQueryEngine::new(fixture());

    let out = engine.query(&[GOROUTINES]).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, GOROUTINES);
    assert_eq!(out[0].description, "Count of live tasks.");
    assert_eq!(out[0].kind, "KindUint64");
    assert!(!out[0].cumulative);
    assert_eq!(out[0].value, TypedValue::Uint64(42));

    let out = engine.query(&[USER_CPU]).unwrap();
    assert_eq!(out[0].kind, "KindFloat64");
    assert!(out[0].cumulative);
    assert_eq!(out[0].value, TypedValue::Float64(1.25));
}

#[test]
fn large_unsigned_values_are_not_narrowed() {
    let reg = StaticRegistry::new().with(
        CounterDescriptor::new("/gc/heap/allocs:bytes", "", ValueKind::Uint64, true),
        SampleValue::Uint64(u64::MAX),
    );
    let out = MetricQueryEngine::new(reg).query(&["/gc/heap/allocs:bytes"]).unwrap();
    assert_eq!(out[0].value, TypedValue::Uint64(u64::MAX));
}

#[test]
fn histogram_reduces_to_median_bucket() {
    let engine = MetricQueryEngine::new(fixture());
    let out = engine.query(&[LATENCIES]).unwrap();
    assert_eq!(out[0].kind, "KindFloat64Histogram");
    assert_eq!(out[0].value, TypedValue::HistogramMedian(20.0));
    assert_eq!(out[0].value.type_tag(), "histogram-median");
}

#[test]
fn results_follow_request_order() {
    let engine = MetricQueryEngine::new(fixture());
    let out = engine.query(&[LATENCIES, GOROUTINES, USER_CPU]).unwrap();
    let names: Vec<_> = out.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec![LATENCIES, GOROUTINES, USER_CPU]);
}

#[test]
fn duplicate_names_resolve_twice() {
    let engine = MetricQueryEngine::new(fixture());
    let out = engine.query(&[GOROUTINES, GOROUTINES]).unwrap();
    assert_eq!(out.len(), 2);
}

#[test]
fn unknown_name_fails() {
    let engine = MetricQueryEngine::new(fixture());
    let err = engine.query(&["unknown.metric.name"]).unwrap_err();
    match err {
        ProbeError::UnknownMetric(name) => assert_eq!(name, "unknown.metric.name"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn batch_is_all_or_nothing() {
    let engine = MetricQueryEngine::new(fixture());
    let res = engine.query(&[GOROUTINES, "unknown.metric.name"]);
    assert!(matches!(res, Err(ProbeError::UnknownMetric(ref n)) if n == "unknown.metric.name"));
}

#[test]
fn first_error_wins() {
    let engine = MetricQueryEngine::new(fixture());
    let err = engine.query(&[BROKEN, "unknown.metric.name"]).unwrap_err();
    assert!(matches!(err, ProbeError::UnsupportedKind { .. }));
}

#[test]
fn empty_request_is_empty_result() {
    let engine = MetricQueryEngine::new(fixture());
    let names: [&str; 0] = [];
    assert!(engine.query(&names).unwrap().is_empty());
}

#[test]
fn bad_kind_is_rejected_before_sampling() {
    struct CountingRegistry {
        inner: StaticRegistry,
        reads: AtomicU64,
    }

    impl MetricRegistry for CountingRegistry {
        fn descriptors(&self) -> Vec<CounterDescriptor> {
            self.inner.descriptors()
        }
        fn sample(&self, name: &str) -> SampleValue {
            self.reads.fetch_add(1, Ordering::Relaxed);
            self.inner.sample(name)
        }
    }

    let reg = CountingRegistry {
        inner: fixture(),
        reads: AtomicU64::new(0),
    };
    let engine = MetricQueryEngine::new(reg);
    let err = engine.query(&[BROKEN]).unwrap_err();
    match err {
        ProbeError::UnsupportedKind { name, kind } => {
            assert_eq!(name, BROKEN);
            assert_eq!(kind, "KindBad");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(engine.registry().reads.load(Ordering::Relaxed), 0);
}

#[test]
fn sampled_kind_drift_is_reported() {
    let reg = fixture().with_sample(GOROUTINES, SampleValue::Float64(3.0));
    let err = MetricQueryEngine::new(reg).query(&[GOROUTINES]).unwrap_err();
    match err {
        ProbeError::KindDrift { ref name, sampled } => {
            assert_eq!(name, GOROUTINES);
            assert_eq!(sampled, "KindFloat64");
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_defect());
}

#[test]
fn unreadable_sample_is_drift() {
    let reg = fixture().with_sample(USER_CPU, SampleValue::Bad);
    let err = MetricQueryEngine::new(reg).query(&[USER_CPU]).unwrap_err();
    assert!(matches!(err, ProbeError::KindDrift { sampled: "KindBad", .. }));
}

#[test]
fn empty_histogram_is_internal() {
    let reg = fixture().with_sample(
        LATENCIES,
        SampleValue::Histogram(Float64Histogram::new(vec![], vec![])),
    );
    let err = MetricQueryEngine::new(reg).query(&[LATENCIES]).unwrap_err();
    assert!(matches!(err, ProbeError::Internal(_)));
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}

#[test]
fn catalog_round_trips_through_query() {
    let engine = MetricQueryEngine::new(fixture());
    let catalog = engine.list_all();
    assert_eq!(catalog.len(), 4);

    for desc in catalog.iter().filter(|d| d.kind != ValueKind::Bad) {
        let out = engine.query(&[desc.name.as_str()]).unwrap();
        assert_eq!(out[0].name, desc.name);
        assert_eq!(out[0].kind, desc.kind.label());
    }
}

#[test]
fn repeated_queries_have_identical_shape() {
    struct LiveRegistry {
        ticks: AtomicU64,
    }

    impl MetricRegistry for LiveRegistry {
        fn descriptors(&self) -> Vec<CounterDescriptor> {
            vec![CounterDescriptor::new("/ticks:ticks", "Ticks.", ValueKind::Uint64, true)]
        }
        fn sample(&self, _name: &str) -> SampleValue {
            SampleValue::Uint64(self.ticks.fetch_add(1, Ordering::Relaxed))
        }
    }

    let engine = MetricQueryEngine::new(LiveRegistry {
        ticks: AtomicU64::new(0),
    });
    let a = engine.query(&["/ticks:ticks"]).unwrap();
    let b = engine.query(&["/ticks:ticks"]).unwrap();

    assert_eq!(a[0].name, b[0].name);
    assert_eq!(a[0].kind, b[0].kind);
    assert_eq!(a[0].description, b[0].description);
    assert_ne!(a[0].value, b[0].value);
}

#[test]
fn report_serializes_flat() {
    let engine = MetricQueryEngine::new(fixture());
    let out = engine.query(&[GOROUTINES]).unwrap();
    let v = serde_json::to_value(&out[0]).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "name": GOROUTINES,
            "description": "Count of live tasks.",
            "kind": "KindUint64",
            "cumulative": false,
            "value": {"type": "uint64", "value": 42}
        })
    );

    let catalog = serde_json::to_value(engine.list_all()).unwrap();
    assert_eq!(catalog[0]["kind"], "KindUint64");
    assert!(catalog[0].get("value").is_none());
}
