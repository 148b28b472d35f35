//! Shared application state for the rtprobe server.
//!
//! - Owns the validated config, the live registry and the query engine.
//! - Cheap to clone (one `Arc`).

use std::sync::Arc;

use rtprobe_core::error::Result;
use rtprobe_core::MetricQueryEngine;

use crate::config::ProbeConfig;
use crate::obs::HttpMetrics;
use crate::registry::ProcessRegistry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ProbeConfig,
    http: Arc<HttpMetrics>,
    engine: MetricQueryEngine<Arc<ProcessRegistry>>,
}

impl AppState {
    /// Build application state with the default process registry.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ProbeConfig) -> Result<Self> {
        cfg.validate()?;

        let http = Arc::new(HttpMetrics::default());
        let registry = Arc::new(ProcessRegistry::with_defaults(Arc::clone(&http)));
        tracing::info!(counters = registry.len(), "process registry ready");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                http,
                engine: MetricQueryEngine::new(registry),
            }),
        })
    }

    pub fn cfg(&self) -> &ProbeConfig {
        &self.inner.cfg
    }

    pub fn engine(&self) -> &MetricQueryEngine<Arc<ProcessRegistry>> {
        &self.inner.engine
    }

    /// Live registry, for registering extra counters at runtime.
    pub fn registry(&self) -> Arc<ProcessRegistry> {
        Arc::clone(self.inner.engine.registry())
    }

    pub fn http_metrics(&self) -> &HttpMetrics {
        &self.inner.http
    }

    pub fn set_draining(&self) {
        self.inner.http.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.http.is_draining()
    }
}
