//! Live process registry.
//!
//! Counters are `(descriptor, sampler)` pairs keyed by name. Entries can be
//! added, replaced and removed while the server runs, so the catalog a caller
//! enumerated may be stale by the time it queries; the engine re-checks kinds
//! at sample time.

pub mod process;

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use rtprobe_core::{CounterDescriptor, MetricRegistry, SampleValue, ValueKind};

use crate::obs::HttpMetrics;

type Sampler = Arc<dyn Fn() -> SampleValue + Send + Sync>;

struct Entry {
    descriptor: CounterDescriptor,
    sampler: Sampler,
}

/// Registry backed by closures reading live process state.
#[derive(Default)]
pub struct ProcessRegistry {
    entries: DashMap<String, Entry>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Registry with the built-in process, scheduler and HTTP counters.
    pub fn with_defaults(http: Arc<HttpMetrics>) -> Self {
        let reg = Self::new();
        let started = Instant::now();

        reg.register(
            CounterDescriptor::new(
                "/process/uptime:seconds",
                "Wall-clock time since the registry was created.",
                ValueKind::Float64,
                true,
            ),
            move || SampleValue::Float64(started.elapsed().as_secs_f64()),
        );

        register_sched(&reg);
        register_http(&reg, http);

        if sysinfo::IS_SUPPORTED_SYSTEM {
            match process::ProcessSampler::current() {
                Ok(stats) => register_process(&reg, Arc::new(stats)),
                Err(e) => tracing::warn!(error = %e, "process counters unavailable"),
            }
        }

        reg
    }

    /// Add a counter, replacing any existing one with the same name.
    pub fn register<F>(&self, descriptor: CounterDescriptor, sampler: F)
    where
        F: Fn() -> SampleValue + Send + Sync + 'static,
    {
        let name = descriptor.name.clone();
        let replaced = self
            .entries
            .insert(
                name.clone(),
                Entry {
                    descriptor,
                    sampler: Arc::new(sampler),
                },
            )
            .is_some();
        tracing::debug!(metric = %name, replaced, "counter registered");
    }

    /// Remove a counter. Returns whether it existed.
    pub fn unregister(&self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetricRegistry for ProcessRegistry {
    /// Sorted by name.
    fn descriptors(&self) -> Vec<CounterDescriptor> {
        let mut out: Vec<CounterDescriptor> = self
            .entries
            .iter()
            .map(|e| e.value().descriptor.clone())
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    fn sample(&self, name: &str) -> SampleValue {
        // Clone the sampler out so the shard lock is not held while it runs.
        let sampler = match self.entries.get(name) {
            Some(e) => Arc::clone(&e.value().sampler),
            None => return SampleValue::Bad,
        };
        sampler()
    }
}

fn register_sched(reg: &ProcessRegistry) {
    reg.register(
        CounterDescriptor::new(
            "/sched/workers:threads",
            "Worker threads of the async runtime serving requests.",
            ValueKind::Uint64,
            false,
        ),
        || {
            let n = tokio::runtime::Handle::try_current()
                .map(|h| h.metrics().num_workers())
                .unwrap_or(0);
            SampleValue::Uint64(n as u64)
        },
    );
    reg.register(
        CounterDescriptor::new(
            "/sched/tasks:tasks",
            "Count of live tasks in the async runtime.",
            ValueKind::Uint64,
            false,
        ),
        || {
            let n = tokio::runtime::Handle::try_current()
                .map(|h| h.metrics().num_alive_tasks())
                .unwrap_or(0);
            SampleValue::Uint64(n as u64)
        },
    );
}

fn register_http(reg: &ProcessRegistry, http: Arc<HttpMetrics>) {
    let m = Arc::clone(&http);
    reg.register(
        CounterDescriptor::new(
            "/http/requests:requests",
            "Cumulative count of HTTP requests served.",
            ValueKind::Uint64,
            true,
        ),
        move || SampleValue::Uint64(m.requests()),
    );

    let m = Arc::clone(&http);
    reg.register(
        CounterDescriptor::new(
            "/http/errors:requests",
            "Cumulative count of HTTP requests answered with a 4xx or 5xx status.",
            ValueKind::Uint64,
            true,
        ),
        move || SampleValue::Uint64(m.errors()),
    );

    reg.register(
        CounterDescriptor::new(
            "/http/latencies:seconds",
            "Distribution of HTTP request handling latencies.",
            ValueKind::Float64Histogram,
            true,
        ),
        move || SampleValue::Histogram(http.latencies()),
    );
}

fn register_process(reg: &ProcessRegistry, stats: Arc<process::ProcessSampler>) {
    type Read = fn(&process::ProcessSnapshot) -> SampleValue;

    let counters: [(&str, &str, ValueKind, bool, Read); 3] = [
        (
            "/cpu/classes/total:cpu-seconds",
            "Estimated total CPU time consumed by the process.",
            ValueKind::Float64,
            true,
            |s| SampleValue::Float64(s.cpu_seconds),
        ),
        (
            "/memory/classes/resident:bytes",
            "Resident set size of the process.",
            ValueKind::Uint64,
            false,
            |s| SampleValue::Uint64(s.resident_bytes),
        ),
        (
            "/memory/classes/virtual:bytes",
            "Virtual memory size of the process.",
            ValueKind::Uint64,
            false,
            |s| SampleValue::Uint64(s.virtual_bytes),
        ),
    ];

    for (name, description, kind, cumulative, read) in counters {
        let stats = Arc::clone(&stats);
        let metric = name.to_string();
        reg.register(
            CounterDescriptor::new(name, description, kind, cumulative),
            move || match stats.snapshot() {
                Ok(s) => read(&s),
                Err(e) => {
                    tracing::warn!(%metric, pid = %stats.pid(), error = %e, "process read failed");
                    SampleValue::Bad
                }
            },
        );
    }
}
