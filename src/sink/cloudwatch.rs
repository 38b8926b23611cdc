//! Amazon CloudWatch metric sink.

use async_trait::async_trait;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum as CloudWatchDatum, StandardUnit};
use aws_sdk_cloudwatch::Client;

use crate::sink::{MetricDatum, MetricSink, SinkError, SinkResult};

/// Publishes data points with `PutMetricData`.
#[derive(Clone, Debug)]
pub struct CloudWatchSink {
    client: Client,
}

impl CloudWatchSink {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default credential and region chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        tracing::info!(region = ?config.region(), "CloudWatch client initialized");

        Self::new(Client::new(&config))
    }
}

/// Translate a data point into the CloudWatch wire type.
fn to_cloudwatch(datum: &MetricDatum) -> CloudWatchDatum {
    let dimensions = datum
        .dimensions
        .iter()
        .map(|d| Dimension::builder().name(&d.name).value(&d.value).build())
        .collect::<Vec<_>>();

    CloudWatchDatum::builder()
        .metric_name(&datum.name)
        .unit(StandardUnit::None)
        .value(datum.value)
        .set_dimensions(Some(dimensions))
        .build()
}

#[async_trait]
impl MetricSink for CloudWatchSink {
    async fn publish(&self, datum: &MetricDatum) -> SinkResult<()> {
        self.client
            .put_metric_data()
            .namespace(&datum.namespace)
            .metric_data(to_cloudwatch(datum))
            .send()
            .await
            .map_err(|e| SinkError::Publish(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}
