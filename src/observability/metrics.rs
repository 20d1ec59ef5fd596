//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Expose a Prometheus-compatible metrics endpoint
//! - Track per-route request counts and latencies
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by method, route, status
//! - `relay_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Metric recording never fails a request; exporter startup problems are
//!   logged and the relay keeps serving without metrics

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info};

/// Start the Prometheus exporter on `address`.
pub fn init_metrics(address: SocketAddr) {
    match PrometheusBuilder::new()
        .with_http_listener(address)
        .install()
    {
        Ok(()) => info!(address = %address, "metrics endpoint started"),
        Err(err) => error!(error = %err, "failed to start metrics endpoint"),
    }
}

/// Record one completed relay pass.
pub fn record_relay(method: &str, route: &str, status: u16, started: Instant) {
    counter!(
        "relay_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "relay_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .record(started.elapsed().as_secs_f64());
}
