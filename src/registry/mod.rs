//! Resource registry subsystem.
//!
//! # Data Flow
//! ```text
//! Target (kind, namespace, name)
//!     → ResourceRegistry::replica_counts
//!     → kubernetes.rs (one typed query per kind)
//!     → ReplicaCounts { desired, ready }
//! ```
//!
//! # Design Decisions
//! - The scanner only sees the trait, so it stays kind-agnostic
//! - Every failure is a `RegistryError`; the scanner decides what it means

pub mod kubernetes;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ResourceKind;

pub use kubernetes::KubeRegistry;

/// Desired vs ready instance counts of a workload resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplicaCounts {
    pub desired: i64,
    pub ready: i64,
}

impl ReplicaCounts {
    pub fn new(desired: i64, ready: i64) -> Self {
        Self { desired, ready }
    }
}

/// Errors that can occur while querying the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The resource does not exist.
    #[error("{kind} {namespace}/{name} not found")]
    NotFound {
        kind: String,
        namespace: String,
        name: String,
    },

    /// API, transport or auth failure.
    #[error("API error: {0}")]
    Api(String),

    /// The kind has no query.
    #[error("unsupported resource kind: {0}")]
    UnsupportedKind(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Read access to workload status.
#[async_trait]
pub trait ResourceRegistry: Send + Sync {
    /// Fetch the desired and ready counts of the named resource.
    async fn replica_counts(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> RegistryResult<ReplicaCounts>;
}
