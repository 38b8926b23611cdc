//! Round scheduling.
//!
//! # Responsibilities
//! - Fire a round every interval (start to start)
//! - Run scan then emit inside each round
//! - Stop on shutdown, on a publish failure, or after one round in single mode

use std::time::Duration;

use thiserror::Error;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::schema::MIN_SECONDS;
use crate::config::{BeaconConfig, MetricConfig, TargetConfig};
use crate::health::{ScanResult, TargetScanner};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::sink::{EmitError, MetricEmitter};

/// Error that ends the round loop.
#[derive(Debug, Error)]
pub enum RoundError {
    #[error("round {tick} failed: {source}")]
    Emit {
        tick: u64,
        #[source]
        source: EmitError,
    },
}

/// Inputs of the round loop, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct RoundSettings {
    /// Time between round starts.
    pub interval: Duration,
    pub metric: MetricConfig,
    pub targets: Vec<TargetConfig>,
    /// Stop after the first round.
    pub single: bool,
}

impl RoundSettings {
    pub fn from_config(config: &BeaconConfig, single: bool) -> Self {
        Self {
            interval: config.interval(),
            metric: config.metric.clone(),
            targets: config.targets.clone(),
            single,
        }
    }
}

/// Drives the scanner and the emitter on a fixed interval.
pub struct RoundScheduler {
    scanner: TargetScanner,
    emitter: MetricEmitter,
    settings: RoundSettings,
}

impl RoundScheduler {
    pub fn new(scanner: TargetScanner, emitter: MetricEmitter, settings: RoundSettings) -> Self {
        Self {
            scanner,
            emitter,
            settings,
        }
    }

    /// Run rounds until shutdown. The first round fires one interval after
    /// start, or right away in single mode. Returns `Ok` on shutdown or after a single round, and the
    /// emit error that stopped the loop otherwise.
    pub async fn run(self, mut shutdown: ShutdownSignal) -> Result<(), RoundError> {
        tracing::info!(
            interval_secs = self.settings.interval.as_secs(),
            targets = self.settings.targets.len(),
            dry_run = self.emitter.dry_run(),
            single = self.settings.single,
            "Round scheduler starting"
        );

        // interval_at panics on a zero period.
        let interval = self
            .settings
            .interval
            .max(Duration::from_secs(MIN_SECONDS.unsigned_abs()));
        let start = if self.settings.single {
            Instant::now()
        } else {
            Instant::now() + interval
        };
        let mut ticker = time::interval_at(start, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut tick: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!(rounds = tick, "Round scheduler received shutdown signal, exiting loop");
                    return Ok(());
                }
                _ = ticker.tick() => {}
            }

            tick += 1;
            self.execute_round(tick).await?;

            if self.settings.single {
                tracing::info!("Single round done, exiting loop");
                return Ok(());
            }
        }
    }

    /// Scan every target and publish the configured aggregate.
    pub async fn execute_round(&self, tick: u64) -> Result<ScanResult, RoundError> {
        let started = Instant::now();
        tracing::info!(tick, "Executing new tick round.");

        let scan = self.scanner.scan(&self.settings.targets).await;
        let value = scan.signal(self.settings.metric.signal);
        let emitted = self.emitter.emit(&self.settings.metric, value).await;

        let duration = started.elapsed();
        metrics::record_round(duration);

        match emitted {
            Ok(()) => {
                tracing::info!(
                    tick,
                    value,
                    duration_ms = duration.as_millis() as u64,
                    "Done with tick round."
                );
                Ok(scan)
            }
            Err(source) => {
                tracing::error!(tick, error = %source, "Failed to update metric.");
                Err(RoundError::Emit { tick, source })
            }
        }
    }
}
