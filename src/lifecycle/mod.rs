//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Metrics endpoint → Kubernetes client → CloudWatch client → Round loop
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Round loop exits between rounds → Exit 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config and logging first, clients next, loop last
//! - A round in flight always completes

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use startup::{run, run_rounds, RunOptions, StartupError};
