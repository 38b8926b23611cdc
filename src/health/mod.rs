//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Targets (from config)
//!     → scanner.rs (one registry query per target, in order)
//!     → readiness.rs (mode, observed, desired → ready)
//!     → types.rs (TargetResult per target, folded into ScanResult)
//! ```
//!
//! # Design Decisions
//! - A failed query downgrades its own target, never the whole scan
//! - Aggregates are plain ANDs over the per-target flags
//! - Nothing is kept between rounds

pub mod readiness;
pub mod scanner;
pub mod types;

pub use readiness::is_ready;
pub use scanner::TargetScanner;
pub use types::{ScanResult, TargetResult};
