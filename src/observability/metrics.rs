//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tunnel_requests_total` (counter): forward requests by outcome, status
//! - `tunnel_request_duration_seconds` (histogram): time spent per outcome
//!   of requests that reached the relay
//! - `tunnel_rejected_total` (counter): requests refused by the gatekeeper
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus recorder"),
    }
}

/// Record the end of one forward request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "tunnel_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("tunnel_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record a request refused by the gatekeeper. Counted only; no duration.
pub fn record_rejection() {
    metrics::counter!("tunnel_rejected_total").increment(1);
}
