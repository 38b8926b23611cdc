//! Shared fakes for integration testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::Notify;

use async_trait::async_trait;
use readiness_beacon::config::{Dimension, MetricConfig, ResourceKind, TargetConfig};
use readiness_beacon::registry::{RegistryError, RegistryResult, ReplicaCounts, ResourceRegistry};
use readiness_beacon::sink::{MetricDatum, MetricSink, SinkError, SinkResult};

/// Registry answering from a fixed table keyed by resource name.
/// Unknown names are reported as not found.
#[derive(Default)]
pub struct ScriptedRegistry {
    answers: HashMap<String, ReplicaCounts>,
    calls: AtomicUsize,
}

impl ScriptedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, desired: i64, ready: i64) -> Self {
        self.answers.insert(name.to_string(), ReplicaCounts::new(desired, ready));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceRegistry for ScriptedRegistry {
    async fn replica_counts(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> RegistryResult<ReplicaCounts> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::NotFound {
                kind: kind.to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}

/// Registry whose query blocks until released, for holding a round open.
#[derive(Default)]
pub struct GatedRegistry {
    entered: Notify,
    release: Notify,
}

impl GatedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until a query is in flight.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the in-flight query answer.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ResourceRegistry for GatedRegistry {
    async fn replica_counts(
        &self,
        _kind: &ResourceKind,
        _namespace: &str,
        _name: &str,
    ) -> RegistryResult<ReplicaCounts> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(ReplicaCounts::new(1, 1))
    }
}

/// Sink recording every published data point, optionally failing.
#[derive(Default)]
pub struct RecordingSink {
    fail: bool,
    published: Mutex<Vec<MetricDatum>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn published(&self) -> Vec<MetricDatum> {
        self.published.lock().unwrap().clone()
    }

    pub fn values(&self) -> Vec<f64> {
        self.published().iter().map(|d| d.value).collect()
    }
}

#[async_trait]
impl MetricSink for RecordingSink {
    async fn publish(&self, datum: &MetricDatum) -> SinkResult<()> {
        self.published.lock().unwrap().push(datum.clone());
        if self.fail {
            return Err(SinkError::Publish("AccessDenied".to_string()));
        }
        Ok(())
    }
}

pub fn metric() -> MetricConfig {
    MetricConfig {
        namespace: "Kubernetes".into(),
        name: "ClusterReady".into(),
        dimensions: vec![Dimension::new("Cluster", "test")],
        ..Default::default()
    }
}

pub fn deployment(name: &str) -> TargetConfig {
    TargetConfig::new("Deployment", "default", name, "AllOfThem")
}
