//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the beacon.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};

/// Interval used when the configured one is below [`MIN_SECONDS`].
pub const DEFAULT_SECONDS: i64 = 60;

/// Smallest accepted round interval in seconds.
pub const MIN_SECONDS: i64 = 1;

/// Root configuration for the beacon.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BeaconConfig {
    /// Compute the signal but never publish it.
    pub dry_run: bool,

    /// Round interval in seconds.
    pub seconds: i64,

    /// Metric published once per round.
    pub metric: MetricConfig,

    /// Workload resources checked every round.
    pub targets: Vec<TargetConfig>,

    /// Log output settings.
    pub logging: LoggingConfig,

    /// Process metrics settings.
    pub observability: ObservabilityConfig,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            seconds: DEFAULT_SECONDS,
            metric: MetricConfig::default(),
            targets: Vec::new(),
            logging: LoggingConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl BeaconConfig {
    /// Apply defaults that serde cannot express (out-of-range interval,
    /// empty logging settings).
    pub fn normalize(mut self) -> Self {
        if self.seconds < MIN_SECONDS {
            self.seconds = DEFAULT_SECONDS;
        }

        let defaults = LoggingConfig::default();
        if self.logging.level.trim().is_empty() {
            self.logging.level = defaults.level;
        }
        if self.logging.format.trim().is_empty() {
            self.logging.format = defaults.format;
        }
        self
    }

    /// Round interval, never shorter than [`MIN_SECONDS`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.seconds.max(MIN_SECONDS).unsigned_abs())
    }
}

/// Which aggregate of a scan is published as the metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalSource {
    /// Every target answered and satisfied its readiness mode.
    #[default]
    Ready,
    /// Every target query answered, regardless of readiness.
    Success,
}

/// Metric descriptor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricConfig {
    /// Metric namespace (e.g., "Kubernetes").
    pub namespace: String,

    /// Metric name (e.g., "ClusterReady").
    pub name: String,

    /// Ordered dimensions attached to every data point.
    pub dimensions: Vec<Dimension>,

    /// Aggregate used as the published value.
    pub signal: SignalSource,
}

/// A single metric dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Kind of workload resource a target points at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ResourceKind {
    DaemonSet,
    Deployment,
    StatefulSet,
    /// Anything else found in the config file. Rejected by validation.
    Unsupported(String),
}

impl ResourceKind {
    pub fn is_supported(&self) -> bool {
        !matches!(self, ResourceKind::Unsupported(_))
    }
}

impl From<String> for ResourceKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DaemonSet" => ResourceKind::DaemonSet,
            "Deployment" => ResourceKind::Deployment,
            "StatefulSet" => ResourceKind::StatefulSet,
            _ => ResourceKind::Unsupported(raw),
        }
    }
}

impl From<&str> for ResourceKind {
    fn from(raw: &str) -> Self {
        ResourceKind::from(raw.to_string())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::DaemonSet => f.write_str("DaemonSet"),
            ResourceKind::Deployment => f.write_str("Deployment"),
            ResourceKind::StatefulSet => f.write_str("StatefulSet"),
            ResourceKind::Unsupported(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for ResourceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How many ready instances a target needs to count as ready.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ReadinessMode {
    /// Every desired instance must be ready.
    AllOfThem,
    /// One ready instance is enough (or none desired).
    AtLeastOne,
    /// Anything else found in the config file. Rejected by validation.
    Unrecognized(String),
}

impl From<String> for ReadinessMode {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "AllOfThem" => ReadinessMode::AllOfThem,
            "AtLeastOne" => ReadinessMode::AtLeastOne,
            _ => ReadinessMode::Unrecognized(raw),
        }
    }
}

impl From<&str> for ReadinessMode {
    fn from(raw: &str) -> Self {
        ReadinessMode::from(raw.to_string())
    }
}

impl fmt::Display for ReadinessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessMode::AllOfThem => f.write_str("AllOfThem"),
            ReadinessMode::AtLeastOne => f.write_str("AtLeastOne"),
            ReadinessMode::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for ReadinessMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single workload resource to check.
///
/// Absent keys deserialize to empty values so validation can report them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Resource kind (DaemonSet, Deployment or StatefulSet).
    pub kind: ResourceKind,

    /// Namespace of the resource (e.g., "kube-system").
    pub namespace: String,

    /// Name of the resource (e.g., "coredns").
    pub name: String,

    /// Readiness mode (AllOfThem or AtLeastOne).
    pub mode: ReadinessMode,
}

impl TargetConfig {
    pub fn new(
        kind: impl Into<ResourceKind>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        mode: impl Into<ReadinessMode>,
    ) -> Self {
        Self {
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
            mode: mode.into(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            kind: ResourceKind::Unsupported(String::new()),
            namespace: String::new(),
            name: String::new(),
            mode: ReadinessMode::Unrecognized(String::new()),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level ("debug" or "info").
    pub level: String,

    /// Output format ("json" or "text").
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Process metrics configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Prometheus scrape endpoint bind address. Disabled when absent.
    pub metrics_address: Option<String>,
}
