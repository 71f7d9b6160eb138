//! Tracker statistics
//!
//! Cumulative counters for troubleshooting a misbehaving pipeline (e.g. a
//! generator that never confirms, or a watcher that keeps firing resyncs).

use crate::tracker::Classification;

/// Snapshot of tracker activity since construction or the last `clear`
#[derive(Debug, Clone, Default)]
pub struct TrackerStats {
    /// Writes announced via `register_upcoming_write`
    pub registered_writes: u64,
    /// Pauses lifted by `confirm_write_complete`
    pub confirmed_writes: u64,
    /// Pauses force-cleared by the safety timer
    pub auto_resumes: u64,
    /// Classification outcomes by kind
    pub classifications: ClassificationCounts,
}

/// Per-outcome classification counters
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationCounts {
    /// Suppressed because the path was mid-write
    pub paused: u64,
    /// Path had no digest on record
    pub unknown: u64,
    /// Content matched the generator's last write
    pub tool_writes: u64,
    /// Content diverged from the generator's last write
    pub user_edits: u64,
    /// Digest computation failed (fail-open)
    pub failed: u64,
}

impl ClassificationCounts {
    pub(crate) fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Paused => self.paused += 1,
            Classification::Unknown => self.unknown += 1,
            Classification::ToolWrite => self.tool_writes += 1,
            Classification::UserEdit => self.user_edits += 1,
            Classification::Failed => self.failed += 1,
        }
    }

    /// Total classifications performed
    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.paused + self.unknown + self.tool_writes + self.user_edits + self.failed
    }

    /// Decisions that suppressed a watcher reaction
    #[inline]
    #[must_use]
    pub fn suppressed(&self) -> u64 {
        self.paused + self.tool_writes
    }

    /// Decisions that signalled a user edit
    #[inline]
    #[must_use]
    pub fn user_visible(&self) -> u64 {
        self.unknown + self.user_edits + self.failed
    }
}
