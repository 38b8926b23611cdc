//! Target scanning.
//!
//! # Responsibilities
//! - Query the registry for each configured target, in order
//! - Turn every query failure into a not-successful result
//! - Aggregate the per-target results and log a summary

use std::sync::Arc;

use crate::config::TargetConfig;
use crate::health::readiness::is_ready;
use crate::health::types::{ScanResult, TargetResult};
use crate::observability::metrics;
use crate::registry::ResourceRegistry;

/// Checks every target against the registry.
#[derive(Clone)]
pub struct TargetScanner {
    registry: Arc<dyn ResourceRegistry>,
}

impl TargetScanner {
    pub fn new(registry: Arc<dyn ResourceRegistry>) -> Self {
        Self { registry }
    }

    /// Scan all targets sequentially. Never fails: an unreachable target
    /// only downgrades its own result.
    pub async fn scan(&self, targets: &[TargetConfig]) -> ScanResult {
        let mut results = Vec::with_capacity(targets.len());

        for target in targets {
            let result = self.scan_target(target).await;
            metrics::record_target_ready(&target.kind, &target.namespace, &target.name, result.ready);
            results.push(result);
        }

        let scan = ScanResult::from_results(results);
        log_summary(&scan);
        scan
    }

    async fn scan_target(&self, target: &TargetConfig) -> TargetResult {
        if !target.kind.is_supported() {
            tracing::warn!(
                kind = %target.kind,
                namespace = %target.namespace,
                name = %target.name,
                "Skipping target with unsupported kind"
            );
            return TargetResult::failed(target);
        }

        match self
            .registry
            .replica_counts(&target.kind, &target.namespace, &target.name)
            .await
        {
            Ok(counts) => {
                let ready = is_ready(&target.mode, counts.ready, counts.desired);
                TargetResult::answered(target, counts.ready, counts.desired, ready)
            }
            Err(e) => {
                tracing::error!(
                    kind = %target.kind,
                    namespace = %target.namespace,
                    name = %target.name,
                    error = %e,
                    "Failed to query resource registry"
                );
                TargetResult::failed(target)
            }
        }
    }
}

fn log_summary(scan: &ScanResult) {
    let summary = match serde_json::to_string(scan) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize scan result");
            String::new()
        }
    };

    if scan.is_healthy() {
        tracing::debug!(scan = %summary, "Done with scan. All looking good.");
    } else {
        tracing::warn!(
            success = scan.success,
            ready = scan.ready,
            scan = %summary,
            "Done with scan. Something is wrong."
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceKind;
    use crate::registry::{RegistryError, RegistryResult, ReplicaCounts};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers by resource name: "missing" fails, anything else reports
    /// the counts it was built with.
    struct StaticRegistry {
        counts: ReplicaCounts,
        calls: AtomicUsize,
    }

    impl StaticRegistry {
        fn new(desired: i64, ready: i64) -> Arc<Self> {
            Arc::new(Self {
                counts: ReplicaCounts::new(desired, ready),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ResourceRegistry for StaticRegistry {
        async fn replica_counts(
            &self,
            kind: &ResourceKind,
            namespace: &str,
            name: &str,
        ) -> RegistryResult<ReplicaCounts> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if name == "missing" {
                return Err(RegistryError::NotFound {
                    kind: kind.to_string(),
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                });
            }
            Ok(self.counts)
        }
    }

    #[tokio::test]
    async fn test_all_ready() {
        let registry = StaticRegistry::new(2, 2);
        let scanner = TargetScanner::new(registry.clone());

        let scan = scanner
            .scan(&[
                TargetConfig::new("Deployment", "default", "api", "AllOfThem"),
                TargetConfig::new("DaemonSet", "kube-system", "proxy", "AtLeastOne"),
            ])
            .await;

        assert!(scan.success);
        assert!(scan.ready);
        assert_eq!(scan.results[0].observed, 2);
        assert_eq!(scan.results[0].desired, 2);
        assert_eq!(registry.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_scan() {
        let registry = StaticRegistry::new(3, 1);
        let scanner = TargetScanner::new(registry.clone());

        let scan = scanner
            .scan(&[
                TargetConfig::new("Deployment", "default", "missing", "AllOfThem"),
                TargetConfig::new("StatefulSet", "default", "db", "AtLeastOne"),
            ])
            .await;

        assert!(!scan.success);
        assert!(!scan.ready);
        assert_eq!(scan.results.len(), 2);
        assert!(!scan.results[0].success);
        assert!(scan.results[1].success);
        assert!(scan.results[1].ready);
        assert_eq!(registry.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unsupported_kind_skips_registry() {
        let registry = StaticRegistry::new(1, 1);
        let scanner = TargetScanner::new(registry.clone());

        let cron_job = TargetConfig::new("CronJob", "default", "nightly", "AllOfThem");

        let scan = scanner
            .scan(&[
                cron_job.clone(),
                TargetConfig::new("Deployment", "default", "api", "AllOfThem"),
            ])
            .await;

        assert!(!scan.success);
        assert_eq!(scan.results[0], TargetResult::failed(&cron_job));
        assert!(scan.results[1].ready);
        assert_eq!(registry.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_duplicate_targets_are_scanned_twice() {
        let registry = StaticRegistry::new(1, 0);
        let scanner = TargetScanner::new(registry.clone());
        let target = TargetConfig::new("Deployment", "default", "api", "AllOfThem");

        let scan = scanner.scan(&[target.clone(), target]).await;

        assert_eq!(scan.results.len(), 2);
        assert!(scan.success);
        assert!(!scan.ready);
        assert_eq!(registry.calls.load(Ordering::SeqCst), 2);
    }
}
