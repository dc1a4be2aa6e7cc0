//! Metrics collection and exposition.
//!
//! # Metrics
//! - `converter_requests_total` (counter): inbound requests by endpoint, status
//! - `converter_request_duration_seconds` (histogram): inbound latency by endpoint
//! - `converter_upstream_fetch_duration_seconds` (histogram): upstream GET latency
//! - `converter_entries_emitted_total` (counter): proxy lines written
//! - `converter_errors_total` (counter): failed conversions by kind
//!
//! Recording without an installed exporter is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one inbound request.
pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "converter_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("converter_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream fetch.
pub fn record_upstream_fetch(status: u16, start: Instant) {
    metrics::histogram!(
        "converter_upstream_fetch_duration_seconds",
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_entries(count: usize) {
    metrics::counter!("converter_entries_emitted_total").increment(count as u64);
}

pub fn record_error(kind: &'static str) {
    metrics::counter!("converter_errors_total", "kind" => kind).increment(1);
}
