//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the optional metrics endpoint
//! - Build the Kubernetes and CloudWatch clients
//! - Wire signal handling to the round loop and run it
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Clients are built once and shared for the process lifetime
//! - Logging is initialized by the caller, before anything here runs

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;

use crate::config::BeaconConfig;
use crate::health::TargetScanner;
use crate::lifecycle::signals::spawn_signal_handler;
use crate::lifecycle::{Shutdown, ShutdownSignal};
use crate::observability::metrics;
use crate::registry::{KubeRegistry, RegistryError, ResourceRegistry};
use crate::scheduler::{RoundError, RoundScheduler, RoundSettings};
use crate::sink::{CloudWatchSink, MetricEmitter, MetricSink};

pub const PROGRAM: &str = "readiness-beacon";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const BUILD_DATE: &str = match option_env!("BEACON_BUILD_DATE") {
    Some(date) => date,
    None => "n/a",
};
pub const GIT_COMMIT: &str = match option_env!("BEACON_GIT_COMMIT") {
    Some(commit) => commit,
    None => "n/a",
};

/// Version banner. `verbose` adds build metadata.
pub fn version_text(verbose: bool) -> String {
    if verbose {
        format!(
            "Program: {}\nVersion: {}\nBuildDate: {}\nGitCommit: {}\n",
            PROGRAM, VERSION, BUILD_DATE, GIT_COMMIT
        )
    } else {
        format!("{} {}\n", PROGRAM, VERSION)
    }
}

/// Errors that abort the process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("failed to start metrics endpoint: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to set up resource registry: {0}")]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Round(#[from] RoundError),
}

/// Command line overrides applied on top of the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Force dry run even if the config disables it.
    pub dry_run: bool,
    /// Execute a single round, then exit.
    pub once: bool,
}

/// Build the real clients and run rounds until shutdown or a fatal error.
pub async fn run(config: BeaconConfig, options: RunOptions) -> Result<(), StartupError> {
    if let Some(raw) = &config.observability.metrics_address {
        let addr: SocketAddr = raw
            .parse()
            .map_err(|_| StartupError::MetricsAddress(raw.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let registry = Arc::new(KubeRegistry::try_default().await?);
    let sink = Arc::new(CloudWatchSink::from_env().await);

    tracing::info!("Done with setup. Start aggregation.");

    let shutdown = Arc::new(Shutdown::new());
    let signals = spawn_signal_handler(shutdown.clone());

    let result = run_rounds(&config, options, registry, sink, shutdown.subscribe()).await;
    signals.abort();

    result?;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wire the round loop from config and the given clients.
pub async fn run_rounds(
    config: &BeaconConfig,
    options: RunOptions,
    registry: Arc<dyn ResourceRegistry>,
    sink: Arc<dyn MetricSink>,
    shutdown: ShutdownSignal,
) -> Result<(), RoundError> {
    let scanner = TargetScanner::new(registry);
    let emitter = MetricEmitter::new(sink, config.dry_run || options.dry_run);
    let settings = RoundSettings::from_config(config, options.once);

    RoundScheduler::new(scanner, emitter, settings).run(shutdown).await
}
