//! Metric sink subsystem.
//!
//! # Data Flow
//! ```text
//! ScanResult aggregate (bool)
//!     → emitter.rs (bool → 1.0/0.0, dry-run suppression)
//!     → MetricSink::publish (one data point)
//!     → cloudwatch.rs (PutMetricData)
//! ```
//!
//! # Design Decisions
//! - Publish failures are not retried here; the next round publishes again
//! - Dimensions are always sent as a list, possibly empty

pub mod cloudwatch;
pub mod emitter;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Dimension;

pub use cloudwatch::CloudWatchSink;
pub use emitter::{emit, EmitError, MetricEmitter};

/// A single numeric data point, timestamped by the backend on receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDatum {
    pub namespace: String,
    pub name: String,
    pub dimensions: Vec<Dimension>,
    pub value: f64,
}

/// Errors returned by a metric backend.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("publish failed: {0}")]
    Publish(String),
}

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Write access to a metrics backend.
#[async_trait]
pub trait MetricSink: Send + Sync {
    /// Publish exactly one data point.
    async fn publish(&self, datum: &MetricDatum) -> SinkResult<()>;
}
