//! Shared application state.
//!
//! The registry is built and fully registered here, before the router exists,
//! so no registration can race with request traffic. Startup errors
//! (duplicate metric names, bad buckets) come back as `Result`.

use std::sync::Arc;

use reqmeter_core::error::Result;
use reqmeter_core::Registry;

use crate::config::GatewayConfig;
use crate::obs::metrics::HttpMetrics;
use crate::obs::process::ProcessMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    registry: Registry,
    http: Option<HttpMetrics>,
    process: Option<ProcessMetrics>,
}

impl AppState {
    /// Build state with a fresh registry holding the gateway's own metrics.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        Self::with_registry(cfg, Registry::new())
    }

    /// Build state on top of a registry the caller has already populated
    /// with application metrics. Gateway metrics are registered after them.
    pub fn with_registry(cfg: GatewayConfig, mut registry: Registry) -> Result<Self> {
        let (http, process) = if cfg.metrics.enabled {
            let http = HttpMetrics::register(&mut registry, &cfg.metrics)?;
            let process = if cfg.metrics.process_metrics {
                Some(ProcessMetrics::register(&mut registry)?)
            } else {
                None
            };
            (Some(http), process)
        } else {
            tracing::info!("request metrics disabled");
            (None, None)
        };

        tracing::debug!(metrics = registry.len(), "metric registry ready");

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, registry, http, process }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Request metrics, or `None` when `metrics.enabled` is off.
    pub fn http_metrics(&self) -> Option<HttpMetrics> {
        self.inner.http.clone()
    }

    /// Process gauges, refreshed by the metrics endpoint before each scrape.
    pub fn process_metrics(&self) -> Option<&ProcessMetrics> {
        self.inner.process.as_ref()
    }
}
