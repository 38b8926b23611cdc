//! Scan result types.

use serde::Serialize;

use crate::config::{ReadinessMode, ResourceKind, SignalSource, TargetConfig};

/// Outcome of checking one target in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetResult {
    /// The registry answered. `ready` is only meaningful when true.
    pub success: bool,
    /// The target satisfied its readiness mode.
    pub ready: bool,
    pub kind: ResourceKind,
    pub namespace: String,
    pub name: String,
    pub mode: ReadinessMode,
    /// Ready instances reported by the registry.
    pub observed: i64,
    /// Desired instances reported by the registry.
    pub desired: i64,
}

impl TargetResult {
    /// Result for a target whose query failed or could not be made.
    pub fn failed(target: &TargetConfig) -> Self {
        Self {
            success: false,
            ready: false,
            kind: target.kind.clone(),
            namespace: target.namespace.clone(),
            name: target.name.clone(),
            mode: target.mode.clone(),
            observed: 0,
            desired: 0,
        }
    }

    /// Result for a target whose query succeeded.
    pub fn answered(target: &TargetConfig, observed: i64, desired: i64, ready: bool) -> Self {
        Self {
            success: true,
            ready,
            observed,
            desired,
            ..Self::failed(target)
        }
    }
}

/// Outcome of one round over every configured target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Every target query succeeded.
    pub success: bool,
    /// Every target is ready.
    pub ready: bool,
    /// One result per target, in configuration order.
    pub results: Vec<TargetResult>,
}

impl ScanResult {
    /// Aggregate per-target results. An empty list is vacuously healthy.
    pub fn from_results(results: Vec<TargetResult>) -> Self {
        Self {
            success: results.iter().all(|r| r.success),
            ready: results.iter().all(|r| r.ready),
            results,
        }
    }

    /// The aggregate selected by `source`.
    pub fn signal(&self, source: SignalSource) -> bool {
        match source {
            SignalSource::Ready => self.ready,
            SignalSource::Success => self.success,
        }
    }

    /// Both aggregates hold.
    pub fn is_healthy(&self) -> bool {
        self.success && self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str) -> TargetConfig {
        TargetConfig::new("Deployment", "default", name, "AllOfThem")
    }

    #[test]
    fn test_failed_result_is_zeroed() {
        let result = TargetResult::failed(&target("api"));
        assert!(!result.success);
        assert!(!result.ready);
        assert_eq!((result.observed, result.desired), (0, 0));
        assert_eq!(result.name, "api");
    }

    #[test]
    fn test_aggregation_ready_and_not_ready() {
        let scan = ScanResult::from_results(vec![
            TargetResult::answered(&target("a"), 2, 2, true),
            TargetResult::answered(&target("b"), 1, 2, false),
        ]);
        assert!(scan.success);
        assert!(!scan.ready);
        assert!(!scan.is_healthy());
        assert!(scan.signal(SignalSource::Success));
        assert!(!scan.signal(SignalSource::Ready));
    }

    #[test]
    fn test_aggregation_with_failure() {
        let scan = ScanResult::from_results(vec![
            TargetResult::answered(&target("a"), 2, 2, true),
            TargetResult::failed(&target("b")),
        ]);
        assert!(!scan.success);
        assert!(!scan.ready);
        assert_eq!(scan.results.len(), 2);
        assert_eq!(scan.results[1].name, "b");
    }

    #[test]
    fn test_empty_scan_is_vacuously_healthy() {
        let scan = ScanResult::from_results(Vec::new());
        assert!(scan.success);
        assert!(scan.ready);
    }

    #[test]
    fn test_serializes_for_logging() {
        let scan = ScanResult::from_results(vec![TargetResult::answered(&target("a"), 1, 1, true)]);
        let json = serde_json::to_value(&scan).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["results"][0]["kind"], "Deployment");
        assert_eq!(json["results"][0]["mode"], "AllOfThem");
        assert_eq!(json["results"][0]["observed"], 1);
    }
}
