//! Health signal emission.

use std::sync::Arc;

use thiserror::Error;

use crate::config::MetricConfig;
use crate::observability::metrics;
use crate::sink::{MetricDatum, MetricSink, SinkError};

/// Error returned when the health signal could not be published.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to update metric: {0}")]
    Publish(#[from] SinkError),
}

/// Build the data point for a boolean health signal.
pub fn datum_for(metric: &MetricConfig, value: bool) -> MetricDatum {
    MetricDatum {
        namespace: metric.namespace.clone(),
        name: metric.name.clone(),
        dimensions: metric.dimensions.clone(),
        value: if value { 1.0 } else { 0.0 },
    }
}

/// Publish `value` as a 1.0/0.0 gauge, or do nothing when `dry_run` is set.
pub async fn emit(
    sink: &dyn MetricSink,
    metric: &MetricConfig,
    value: bool,
    dry_run: bool,
) -> Result<(), EmitError> {
    let datum = datum_for(metric, value);

    if dry_run {
        tracing::debug!(
            namespace = %datum.namespace,
            metric = %datum.name,
            value = datum.value,
            "Dry run, metric not published"
        );
        return Ok(());
    }

    if let Err(e) = sink.publish(&datum).await {
        metrics::record_emit_failure();
        return Err(e.into());
    }

    metrics::record_signal(datum.value);
    tracing::debug!(
        namespace = %datum.namespace,
        metric = %datum.name,
        value = datum.value,
        "Metric published"
    );
    Ok(())
}

/// A sink bound to the process-wide dry-run flag.
#[derive(Clone)]
pub struct MetricEmitter {
    sink: Arc<dyn MetricSink>,
    dry_run: bool,
}

impl MetricEmitter {
    pub fn new(sink: Arc<dyn MetricSink>, dry_run: bool) -> Self {
        Self { sink, dry_run }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub async fn emit(&self, metric: &MetricConfig, value: bool) -> Result<(), EmitError> {
        emit(self.sink.as_ref(), metric, value, self.dry_run).await
    }
}
