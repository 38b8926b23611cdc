//! Kubernetes workload readiness beacon.
//!
//! Checks a fixed set of workloads every interval and publishes one
//! CloudWatch data point: 1 when all of them are ready, 0 otherwise.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                       READINESS BEACON                        │
//!   │                                                               │
//!   │  ┌─────────┐   ┌───────────┐   ┌──────────┐   ┌───────────┐  │
//!   │  │ config  │──▶│ scheduler │──▶│  health  │──▶│ registry  │──┼──▶ Kubernetes API
//!   │  │ loader  │   │  rounds   │   │ scanner  │   │   kube    │  │
//!   │  └─────────┘   └─────┬─────┘   └──────────┘   └───────────┘  │
//!   │                      │                                        │
//!   │                      ▼                                        │
//!   │                ┌───────────┐   ┌────────────┐                 │
//!   │                │   sink    │──▶│ cloudwatch │─────────────────┼──▶ CloudWatch
//!   │                │  emitter  │   │            │                 │
//!   │                └───────────┘   └────────────┘                 │
//!   │                                                               │
//!   │  ┌─────────────────────────────────────────────────────────┐  │
//!   │  │  lifecycle (startup / signals / shutdown)               │  │
//!   │  │  observability (tracing logs, prometheus metrics)       │  │
//!   │  └─────────────────────────────────────────────────────────┘  │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use readiness_beacon::config::load_config;
use readiness_beacon::lifecycle::startup::{self, RunOptions, BUILD_DATE, GIT_COMMIT, PROGRAM, VERSION};
use readiness_beacon::observability::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "readiness-beacon")]
#[command(about = "Publish the readiness of Kubernetes workloads as a CloudWatch metric", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, env = "READINESS_BEACON_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Compute the signal but never publish it.
    #[arg(long)]
    dry_run: bool,

    /// Execute a single round immediately, then exit.
    #[arg(long)]
    once: bool,

    /// Debug logging; with --version, print build details.
    #[arg(short, long)]
    verbose: bool,

    /// Print version information and exit.
    #[arg(short = 'V', long)]
    version: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        print!("{}", startup::version_text(cli.verbose));
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to create config from {}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging, cli.verbose);

    tracing::info!(
        program = PROGRAM,
        version = VERSION,
        build_date = BUILD_DATE,
        git_commit = GIT_COMMIT,
        "Starting"
    );
    tracing::info!(
        config = %cli.config.display(),
        seconds = config.seconds,
        targets = config.targets.len(),
        dry_run = config.dry_run || cli.dry_run,
        "Configuration loaded"
    );

    let options = RunOptions {
        dry_run: cli.dry_run,
        once: cli.once,
    };

    match startup::run(config, options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Exiting on fatal error");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "readiness-beacon",
            "--config",
            "/etc/beacon.toml",
            "--dry-run",
            "--once",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("/etc/beacon.toml"));
        assert!(cli.dry_run);
        assert!(cli.once);
        assert!(cli.verbose);
        assert!(!cli.version);
    }

    #[test]
    fn test_cli_version_flag() {
        let cli = Cli::try_parse_from(["readiness-beacon", "--version", "--verbose"]).unwrap();
        assert!(cli.version);
        assert!(cli.verbose);
    }
}
