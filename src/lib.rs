//! Kubernetes workload readiness beacon library.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod scheduler;
pub mod sink;

pub use config::schema::BeaconConfig;
pub use lifecycle::Shutdown;
pub use scheduler::RoundScheduler;
