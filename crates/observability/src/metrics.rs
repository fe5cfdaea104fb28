//! Prometheus request metrics
//!
//! Without [`init_metrics`] no recorder is installed and every update below
//! is a no-op, so handlers can record unconditionally.

use metrics::{counter, gauge, histogram, Counter, Gauge, Histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Start the Prometheus exporter on `0.0.0.0:port`
///
/// Metrics are served at `/metrics`. Must be called from within a Tokio
/// runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// Metric set for one HTTP endpoint
///
/// * `decayviz_requests_total{endpoint}`
/// * `decayviz_responses_total{endpoint, status}`
/// * `decayviz_request_duration_seconds{endpoint}`
/// * `decayviz_requests_in_flight{endpoint}`
#[derive(Clone)]
pub struct EndpointMetrics {
    endpoint: &'static str,
    requests_total: Counter,
    request_duration: Histogram,
    in_flight: Gauge,
}

impl EndpointMetrics {
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            requests_total: counter!("decayviz_requests_total", "endpoint" => endpoint),
            request_duration: histogram!(
                "decayviz_request_duration_seconds",
                "endpoint" => endpoint
            ),
            in_flight: gauge!("decayviz_requests_in_flight", "endpoint" => endpoint),
        }
    }

    /// Record a completed request
    pub fn record_request(&self, duration: Duration, status_code: u16) {
        self.requests_total.increment(1);
        counter!(
            "decayviz_responses_total",
            "endpoint" => self.endpoint,
            "status" => status_code.to_string()
        )
        .increment(1);
        self.request_duration.record(duration.as_secs_f64());
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }
}

/// Records duration and status of one request when dropped
///
/// ```ignore
/// let metrics = EndpointMetrics::new("decay_chain");
/// let mut guard = RequestMetricsGuard::new(&metrics);
/// // ... handle request ...
/// guard.set_status(400);
/// ```
pub struct RequestMetricsGuard<'a> {
    metrics: &'a EndpointMetrics,
    start: Instant,
    status_code: u16,
}

impl<'a> RequestMetricsGuard<'a> {
    pub fn new(metrics: &'a EndpointMetrics) -> Self {
        metrics.in_flight.increment(1.0);
        Self {
            metrics,
            start: Instant::now(),
            status_code: 200,
        }
    }

    /// Set the status code (call before drop)
    pub fn set_status(&mut self, code: u16) {
        self.status_code = code;
    }

    pub fn status(&self) -> u16 {
        self.status_code
    }
}

impl Drop for RequestMetricsGuard<'_> {
    fn drop(&mut self) {
        self.metrics.in_flight.decrement(1.0);
        self.metrics
            .record_request(self.start.elapsed(), self.status_code);
    }
}
