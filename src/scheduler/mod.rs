//! Round scheduling subsystem.
//!
//! # Data Flow
//! ```text
//! interval tick
//!     → health::TargetScanner (N registry queries)
//!     → ScanResult aggregate
//!     → sink::MetricEmitter (one publish)
//!
//! shutdown signal
//!     → loop exits cleanly between rounds
//! ```
//!
//! # State Machine
//! ```text
//! Idle → Ticking → Stopped
//! Ticking → Stopped: shutdown, single round done, or publish failure (error)
//! ```

pub mod rounds;

pub use rounds::{RoundError, RoundScheduler, RoundSettings};
