//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, default the interval)
//!     → validation.rs (semantic checks)
//!     → BeaconConfig (validated, immutable)
//!     → split into targets / metric / settings for the round scheduler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Unknown kinds and modes survive parsing so validation can name them

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BeaconConfig;
pub use schema::{Dimension, MetricConfig, ReadinessMode, ResourceKind, SignalSource, TargetConfig};
pub use schema::{LoggingConfig, ObservabilityConfig};
