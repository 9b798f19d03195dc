//! Prometheus request metrics, compiled with the `metrics` feature.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Path the scrape endpoint is served on.
pub(crate) const METRICS_PATH: &str = "/metrics";

/// Build the request metrics middleware and its scrape endpoint.
///
/// # Errors
/// Fails when the collectors cannot be registered.
pub(crate) fn request_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("pupil_tracker")
        .endpoint(METRICS_PATH)
        .exclude(METRICS_PATH)
        .build()
        .map_err(|e| std::io::Error::other(format!("metrics registration failed: {e}")))
}
