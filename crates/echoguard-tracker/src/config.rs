//! Tracker configuration
//!
//! Defines [`TrackerConfig`], the recognized tuning surface of the change
//! tracker. Configuration is constructed by the caller; the tracker never
//! reads anything from disk.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default settle delay before a confirmed write resumes change detection
pub const DEFAULT_PAUSE_DURATION: Duration = Duration::from_millis(100);

/// Default safety-net duration after which an unconfirmed write is released
pub const DEFAULT_AUTO_RESUME_TIMEOUT: Duration = Duration::from_millis(5000);

/// Change tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Settle delay applied by `confirm_write_complete` before the pause
    /// lifts. Absorbs filesystem event-delivery lag (network and virtualized
    /// filesystems can report a write well after it happened).
    pub pause_duration: Duration,
    /// How long a path may stay paused without confirmation before the
    /// safety timer force-clears it.
    pub auto_resume_timeout: Duration,
    /// Emit a structured log line for every classification decision.
    pub debug: bool,
}

impl TrackerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With settle delay
    #[inline]
    #[must_use]
    pub fn with_pause_duration(mut self, pause_duration: Duration) -> Self {
        self.pause_duration = pause_duration;
        self
    }

    /// With auto-resume timeout
    #[inline]
    #[must_use]
    pub fn with_auto_resume_timeout(mut self, auto_resume_timeout: Duration) -> Self {
        self.auto_resume_timeout = auto_resume_timeout;
        self
    }

    /// With per-decision debug logging
    #[inline]
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            pause_duration: DEFAULT_PAUSE_DURATION,
            auto_resume_timeout: DEFAULT_AUTO_RESUME_TIMEOUT,
            debug: false,
        }
    }
}
