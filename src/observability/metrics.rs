//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound relay calls by envelope code
//! - `relay_request_duration_seconds` (histogram): inbound latency
//! - `relay_requests_aborted_total` (counter): calls cut off by middleware
//! - `relay_backend_calls_total` (counter): backend round trips by outcome
//! - `relay_backend_duration_seconds` (histogram): backend latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound relay call.
pub fn record_request(code: u16, start: Instant) {
    counter!("relay_requests_total", "code" => code.to_string()).increment(1);
    histogram!("relay_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_aborted() {
    counter!("relay_requests_aborted_total").increment(1);
}

/// Record one backend round trip.
pub fn record_backend_call(outcome: &'static str, start: Instant) {
    counter!("relay_backend_calls_total", "outcome" => outcome).increment(1);
    histogram!("relay_backend_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
