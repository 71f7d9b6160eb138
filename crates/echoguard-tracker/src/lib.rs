//! Echoguard Change Tracker
//!
//! Distinguishes writes performed by an automated code generator from edits
//! performed by a human, so a filesystem watcher can ignore the generator's
//! own output instead of feeding it back into regeneration.
//!
//! # Core Concepts
//!
//! - [`ChangeTracker`]: the stateful classifier; one instance per watched
//!   project
//! - [`Classification`]: the outcome of a single classification decision
//! - [`TrackerConfig`]: settle delay, auto-resume timeout, debug logging
//! - [`Scheduler`] / [`ScheduledTask`]: the timer seam behind the safety net
//!
//! # Call contract
//!
//! The generator brackets every write:
//!
//! ```rust,ignore
//! tracker.register_upcoming_write(&path, &bytes)?;
//! fs::write(&path, &bytes).await?;
//! tracker.confirm_write_complete(&path).await?;
//! ```
//!
//! The watcher consults the tracker on every change notification:
//!
//! ```rust,ignore
//! if tracker.classify_change(&path, &current_bytes) {
//!     reverse_sync(&path).await?;
//! }
//! ```
//!
//! Classification never fails: internal faults degrade to "user edit" so the
//! watcher pipeline keeps functioning, and an unconfirmed write is released
//! by the safety timer rather than pausing a path forever.

#![warn(unreachable_pub)]

mod config;
mod error;
mod path;
mod scheduler;
mod stats;
mod tracker;

pub use config::{TrackerConfig, DEFAULT_AUTO_RESUME_TIMEOUT, DEFAULT_PAUSE_DURATION};
pub use error::TrackerError;
pub use path::TrackedPath;
pub use scheduler::{ScheduledTask, Scheduler, TimerCallback, TokioScheduler};
pub use stats::{ClassificationCounts, TrackerStats};
pub use tracker::{ChangeTracker, Classification, PathState};

// Re-export the digest types that appear in this crate's public API.
pub use echoguard_digest::{Blake3Digester, ContentDigest, DigestError, Digester};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
