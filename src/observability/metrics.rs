//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define beacon metrics (rounds, durations, per-target readiness)
//! - Optionally expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `beacon_rounds_total` (counter): rounds executed
//! - `beacon_round_duration_seconds` (histogram): scan + emit latency
//! - `beacon_target_ready` (gauge): 1=ready, 0=not ready, by kind/namespace/name
//! - `beacon_signal` (gauge): last value handed to the metric sink
//! - `beacon_emit_failures_total` (counter): failed publish calls
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - These are process metrics, separate from the published health signal

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::config::ResourceKind;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed round.
pub fn record_round(duration: Duration) {
    counter!("beacon_rounds_total").increment(1);
    histogram!("beacon_round_duration_seconds").record(duration.as_secs_f64());
}

/// Record the readiness of a single target.
pub fn record_target_ready(kind: &ResourceKind, namespace: &str, name: &str, ready: bool) {
    gauge!(
        "beacon_target_ready",
        "kind" => kind.to_string(),
        "namespace" => namespace.to_string(),
        "name" => name.to_string()
    )
    .set(if ready { 1.0 } else { 0.0 });
}

/// Record the value handed to the metric sink.
pub fn record_signal(value: f64) {
    gauge!("beacon_signal").set(value);
}

/// Record a failed publish call.
pub fn record_emit_failure() {
    counter!("beacon_emit_failures_total").increment(1);
}
