//! Request metrics for the service.
//!
//! A `Metrics` value owns its own `prometheus::Registry` and is constructed
//! once at startup, then handed to the router through `AppState`. The
//! registry holds the request counter plus the default process collector, and
//! is rendered by the `/metrics` handler in text exposition format.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

use crate::state::AppState;

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    http_requests: IntCounter,
}

impl Metrics {
    /// Builds the registry and registers all metrics.
    ///
    /// Returns an error if metric registration fails (e.g. duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        registry.register(Box::new(http_requests.clone()))?;

        // Process metrics (CPU, memory, start time) are only implemented on
        // Linux in the prometheus crate.
        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry: Arc::new(registry),
            http_requests,
        })
    }

    /// Counts one inbound HTTP request. `IntCounter` is atomic, so concurrent
    /// requests may race here safely.
    pub fn inc_http_requests(&self) {
        self.http_requests.inc();
    }

    pub fn http_requests_count(&self) -> u64 {
        self.http_requests.get()
    }

    /// Encodes every registered metric in Prometheus text exposition format.
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Request-pipeline stage: counts and logs every inbound request before the
/// matched handler runs.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.metrics().inc_http_requests();
    tracing::info!(method = %req.method(), path = %req.uri().path(), "incoming request");
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_increments_and_renders() {
        let metrics = Metrics::new().unwrap();
        metrics.inc_http_requests();
        metrics.inc_http_requests();

        assert_eq!(metrics.http_requests_count(), 2);

        let text = metrics.gather().unwrap();
        assert!(text.contains("# TYPE http_requests_total counter"));
        assert!(text.contains("http_requests_total 2"));
    }

    #[test]
    fn registries_are_independent() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.inc_http_requests();
        assert_eq!(a.http_requests_count(), 1);
        assert_eq!(b.http_requests_count(), 0);
    }
}
