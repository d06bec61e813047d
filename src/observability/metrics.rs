//! Metrics collection and exposition.
//!
//! # Metrics
//! - `graphql_requests_total` (counter): requests by method, strategy, response status
//! - `graphql_request_duration_seconds` (histogram): time from receipt to response
//! - `graphql_rejections_total` (counter): requests rejected before dispatch, by reason

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);

    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start Prometheus metrics exporter"),
    }
}

/// Record a handled request. Rejected requests use the strategy `"none"`.
pub fn record_request(method: &str, strategy: &str, status: u16, start_time: Instant) {
    let method = method.to_string();
    let strategy = strategy.to_string();

    counter!(
        "graphql_requests_total",
        "method" => method.clone(),
        "strategy" => strategy.clone(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "graphql_request_duration_seconds",
        "method" => method,
        "strategy" => strategy
    )
    .record(start_time.elapsed().as_secs_f64());
}

/// Record a request rejected before reaching the engine.
pub fn record_rejection(method: &str, reason: &'static str, status: u16) {
    counter!(
        "graphql_rejections_total",
        "method" => method.to_string(),
        "reason" => reason,
        "status" => status.to_string()
    )
    .increment(1);
}
