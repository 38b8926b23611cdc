//! Kubernetes-backed resource registry.
//!
//! # Responsibilities
//! - Connect to the API server (in-cluster or kubeconfig)
//! - Query DaemonSets, Deployments and StatefulSets by namespace/name
//! - Map their status fields onto desired/ready counts

use std::ffi::OsStr;
use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::NamespaceResourceScope;
use kube::config::{Config, KubeConfigOptions};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;

use crate::config::ResourceKind;
use crate::registry::{RegistryError, RegistryResult, ReplicaCounts, ResourceRegistry};

const SERVICE_HOST_ENV: &str = "KUBERNETES_SERVICE_HOST";

/// Where the client configuration comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    InCluster,
    Kubeconfig,
}

impl ConfigSource {
    fn detect(service_host: Option<&OsStr>) -> Self {
        match service_host {
            Some(host) if !host.is_empty() => Self::InCluster,
            _ => Self::Kubeconfig,
        }
    }
}

/// Registry client talking to the Kubernetes API.
#[derive(Clone)]
pub struct KubeRegistry {
    client: Client,
}

impl KubeRegistry {
    /// Wrap an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the in-cluster service account when running inside
    /// a pod (`KUBERNETES_SERVICE_HOST` set), otherwise from the local
    /// kubeconfig.
    pub async fn try_default() -> RegistryResult<Self> {
        let source = ConfigSource::detect(std::env::var_os(SERVICE_HOST_ENV).as_deref());
        let config = match source {
            ConfigSource::InCluster => Config::incluster().map_err(|e| {
                RegistryError::Api(format!("failed to load in-cluster config: {}", e))
            })?,
            ConfigSource::Kubeconfig => Config::from_kubeconfig(&KubeConfigOptions::default())
                .await
                .map_err(|e| RegistryError::Api(format!("failed to load kubeconfig: {}", e)))?,
        };

        let client = Client::try_from(config)
            .map_err(|e| RegistryError::Api(format!("failed to create Kubernetes client: {}", e)))?;

        tracing::info!(source = ?source, "Kubernetes client initialized");

        Ok(Self::new(client))
    }

    async fn get<K>(&self, kind: &ResourceKind, namespace: &str, name: &str) -> RegistryResult<K>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        api.get(name).await.map_err(|e| match e {
            kube::Error::Api(response) if response.code == 404 => RegistryError::NotFound {
                kind: kind.to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            other => RegistryError::Api(other.to_string()),
        })
    }
}

#[async_trait]
impl ResourceRegistry for KubeRegistry {
    async fn replica_counts(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> RegistryResult<ReplicaCounts> {
        match kind {
            ResourceKind::DaemonSet => {
                let daemon_set: DaemonSet = self.get(kind, namespace, name).await?;
                Ok(daemon_set_counts(&daemon_set))
            }
            ResourceKind::Deployment => {
                let deployment: Deployment = self.get(kind, namespace, name).await?;
                Ok(deployment_counts(&deployment))
            }
            ResourceKind::StatefulSet => {
                let stateful_set: StatefulSet = self.get(kind, namespace, name).await?;
                Ok(stateful_set_counts(&stateful_set))
            }
            ResourceKind::Unsupported(raw) => Err(RegistryError::UnsupportedKind(raw.clone())),
        }
    }
}

impl std::fmt::Debug for KubeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeRegistry")
            .field("default_namespace", &self.client.default_namespace())
            .finish()
    }
}

/// Scheduled vs ready pods of a DaemonSet.
pub fn daemon_set_counts(daemon_set: &DaemonSet) -> ReplicaCounts {
    daemon_set
        .status
        .as_ref()
        .map(|s| ReplicaCounts::new(s.desired_number_scheduled.into(), s.number_ready.into()))
        .unwrap_or_default()
}

/// Total vs ready replicas of a Deployment.
pub fn deployment_counts(deployment: &Deployment) -> ReplicaCounts {
    deployment
        .status
        .as_ref()
        .map(|s| {
            ReplicaCounts::new(
                s.replicas.unwrap_or(0).into(),
                s.ready_replicas.unwrap_or(0).into(),
            )
        })
        .unwrap_or_default()
}

/// Total vs ready replicas of a StatefulSet.
pub fn stateful_set_counts(stateful_set: &StatefulSet) -> ReplicaCounts {
    stateful_set
        .status
        .as_ref()
        .map(|s| ReplicaCounts::new(s.replicas.into(), s.ready_replicas.unwrap_or(0).into()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::{DaemonSetStatus, DeploymentStatus, StatefulSetStatus};

    #[test]
    fn test_service_host_selects_in_cluster_config() {
        assert_eq!(
            ConfigSource::detect(Some(OsStr::new("10.96.0.1"))),
            ConfigSource::InCluster
        );
    }

    #[test]
    fn test_kubeconfig_outside_a_pod() {
        assert_eq!(ConfigSource::detect(None), ConfigSource::Kubeconfig);
        assert_eq!(ConfigSource::detect(Some(OsStr::new(""))), ConfigSource::Kubeconfig);
    }

    #[test]
    fn test_daemon_set_counts() {
        let daemon_set = DaemonSet {
            status: Some(DaemonSetStatus {
                desired_number_scheduled: 4,
                number_ready: 3,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(daemon_set_counts(&daemon_set), ReplicaCounts::new(4, 3));
    }

    #[test]
    fn test_deployment_counts_missing_ready() {
        let deployment = Deployment {
            status: Some(DeploymentStatus {
                replicas: Some(2),
                ready_replicas: None,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(deployment_counts(&deployment), ReplicaCounts::new(2, 0));
    }

    #[test]
    fn test_stateful_set_counts() {
        let stateful_set = StatefulSet {
            status: Some(StatefulSetStatus {
                replicas: 3,
                ready_replicas: Some(3),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(stateful_set_counts(&stateful_set), ReplicaCounts::new(3, 3));
    }

    #[test]
    fn test_missing_status_counts_as_zero() {
        assert_eq!(deployment_counts(&Deployment::default()), ReplicaCounts::default());
        assert_eq!(daemon_set_counts(&DaemonSet::default()), ReplicaCounts::default());
        assert_eq!(stateful_set_counts(&StatefulSet::default()), ReplicaCounts::default());
    }
}
