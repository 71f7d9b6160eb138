//! The change tracker
//!
//! A per-path, two-state machine (*Idle* / *Generating*) with an expected
//! content digest attached to every path the generator has written. The
//! generator brackets each write with [`ChangeTracker::register_upcoming_write`]
//! and [`ChangeTracker::confirm_write_complete`]; the watcher asks
//! [`ChangeTracker::classify_change`] whether an observed change came from
//! outside the generator.
//!
//! # Decision order
//!
//! Classification checks the cheapest evidence first:
//!
//! 1. paused path → tool write (no digest computed)
//! 2. no digest on record → user edit (unseen paths are user-owned)
//! 3. digest comparison against the generator's last registered write
//!
//! During a generation burst almost every query stops at step 1.
//!
//! # Self-healing
//!
//! A generator crash between register and confirm would otherwise pause a
//! path forever. Every registration arms a safety timer that force-clears
//! the pause after `auto_resume_timeout`; confirmation cancels it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use parking_lot::Mutex;

use echoguard_digest::{Blake3Digester, ContentDigest, Digester};

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::path::TrackedPath;
use crate::scheduler::{ScheduledTask, Scheduler, TokioScheduler};
use crate::stats::TrackerStats;

/// Outcome of a single classification decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Path is mid-write by the generator; suppressed without comparison
    Paused,
    /// No expected digest on record; unseen paths are user-owned
    Unknown,
    /// Content is exactly what the generator last wrote
    ToolWrite,
    /// Content diverged from the generator's last write
    UserEdit,
    /// Digest computation failed; failed open
    Failed,
}

impl Classification {
    /// Whether this outcome should drive the reverse-sync pipeline
    #[inline]
    #[must_use]
    pub const fn is_user_edit(self) -> bool {
        matches!(self, Self::Unknown | Self::UserEdit | Self::Failed)
    }
}

/// Observable per-path state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    /// Not mid-write; changes are classified by digest comparison
    Idle,
    /// Between a registered write and its confirmation (or timer expiry)
    Generating,
}

/// Pause entry: the pause marker and its safety timer are one value, so they
/// cannot disagree. The sequence number ties the timer to the registration
/// that armed it; a superseded timer must not clear a newer pause.
#[derive(Debug)]
struct PauseEntry {
    seq: u64,
    timer: ScheduledTask,
}

struct TrackerInner {
    config: TrackerConfig,
    expected: DashMap<TrackedPath, ContentDigest>,
    paused: DashMap<TrackedPath, PauseEntry>,
    pause_seq: AtomicU64,
    stats: Mutex<TrackerStats>,
}

/// Stateful classifier separating generator writes from user edits
///
/// One instance per watched project. All state is in memory; `clear` is the
/// bulk release for shutdown and test isolation. Operations on different
/// paths never contend: state is keyed per path in concurrent maps.
///
/// Cheap to clone; clones are handles onto the same tracker, so the
/// generator and the watcher sides can each hold one.
#[derive(Clone)]
pub struct ChangeTracker {
    inner: Arc<TrackerInner>,
    digester: Arc<dyn Digester>,
    scheduler: Arc<dyn Scheduler>,
}

impl ChangeTracker {
    /// Create a tracker with the default digester and Tokio timers
    ///
    /// The default scheduler spawns timer tasks, so the tracker must be used
    /// from within a Tokio runtime.
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_components(config, Arc::new(Blake3Digester), Arc::new(TokioScheduler))
    }

    /// Create a tracker with explicit digest and timer implementations
    #[must_use]
    pub fn with_components(
        config: TrackerConfig,
        digester: Arc<dyn Digester>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                config,
                expected: DashMap::new(),
                paused: DashMap::new(),
                pause_seq: AtomicU64::new(0),
                stats: Mutex::new(TrackerStats::default()),
            }),
            digester,
            scheduler,
        }
    }

    /// Announce that the generator is about to write `content` to `path`
    ///
    /// Records the content digest as the expected digest for the path (last
    /// write wins), pauses the path, and arms the safety timer. A re-entrant
    /// call during rapid regeneration replaces the digest and disarms the
    /// previous timer before arming a new one.
    ///
    /// Digest computation is best-effort: a failure is logged and the path
    /// is paused anyway, it just carries no fresh digest.
    ///
    /// # Errors
    /// Returns [`TrackerError::EmptyPath`] for an empty path; the caller
    /// must not proceed with the write.
    pub fn register_upcoming_write(
        &self,
        path: &str,
        content: &[u8],
    ) -> Result<(), TrackerError> {
        let path = TrackedPath::new(path)?;

        match self.digester.digest(content) {
            Ok(digest) => {
                if self.inner.config.debug {
                    tracing::debug!(
                        path = %path,
                        digest = %digest.short(),
                        "registered upcoming write"
                    );
                }
                self.inner.expected.insert(path.clone(), digest);
            }
            Err(error) => {
                tracing::warn!(
                    path = %path,
                    %error,
                    "digest computation failed; pausing without an expected digest"
                );
            }
        }

        self.pause(path);
        self.inner.stats.lock().registered_writes += 1;
        Ok(())
    }

    /// Confirm that the generator's write attempt for `path` finished
    ///
    /// Awaits the settle delay so trailing filesystem events for the write
    /// drain before the pause lifts, then unpauses the path and cancels its
    /// safety timer. Only the calling task suspends during the delay; every
    /// other path stays fully operable.
    ///
    /// Calling without a prior registration is a successful no-op.
    ///
    /// # Errors
    /// Returns [`TrackerError::EmptyPath`] for an empty path.
    pub async fn confirm_write_complete(&self, path: &str) -> Result<(), TrackerError> {
        let path = TrackedPath::new(path)?;

        tokio::time::sleep(self.inner.config.pause_duration).await;

        if let Some((_, entry)) = self.inner.paused.remove(&path) {
            entry.timer.cancel();
            self.inner.stats.lock().confirmed_writes += 1;
            if self.inner.config.debug {
                tracing::debug!(path = %path, "write confirmed; change detection resumed");
            }
        }
        Ok(())
    }

    /// Decide whether observed content is a user edit (`true`) or the
    /// generator's own output (`false`)
    ///
    /// Pure read with respect to tracker state. Never fails: internal faults
    /// degrade to `true`, since losing a genuine edit is worse than a
    /// spurious resync.
    #[must_use]
    pub fn classify_change(&self, path: &str, content: &[u8]) -> bool {
        self.classify(path, content).is_user_edit()
    }

    /// Classify with the full decision outcome, for diagnostics
    #[must_use]
    pub fn classify(&self, path: &str, content: &[u8]) -> Classification {
        let classification = self.classify_inner(path, content);
        self.inner.stats.lock().classifications.record(classification);
        if self.inner.config.debug {
            tracing::debug!(path, ?classification, "classified change");
        }
        classification
    }

    fn classify_inner(&self, path: &str, content: &[u8]) -> Classification {
        // An empty path can never have been registered.
        if path.is_empty() {
            return Classification::Unknown;
        }

        if self.inner.paused.contains_key(path) {
            return Classification::Paused;
        }

        let Some(expected) = self.inner.expected.get(path).map(|e| *e.value()) else {
            return Classification::Unknown;
        };

        match self.digester.digest(content) {
            Ok(actual) if actual == expected => Classification::ToolWrite,
            Ok(_) => Classification::UserEdit,
            Err(error) => {
                tracing::warn!(
                    path,
                    %error,
                    "digest computation failed; treating change as a user edit"
                );
                Classification::Failed
            }
        }
    }

    /// Whether `path` is currently mid-write
    #[inline]
    #[must_use]
    pub fn is_paused(&self, path: &str) -> bool {
        !path.is_empty() && self.inner.paused.contains_key(path)
    }

    /// Observable state of `path`
    ///
    /// Unseen paths are `Idle`.
    #[inline]
    #[must_use]
    pub fn path_state(&self, path: &str) -> PathState {
        if self.is_paused(path) {
            PathState::Generating
        } else {
            PathState::Idle
        }
    }

    /// The digest of the generator's last registered write for `path`
    #[inline]
    #[must_use]
    pub fn expected_digest(&self, path: &str) -> Option<ContentDigest> {
        self.inner.expected.get(path).map(|e| *e.value())
    }

    /// Number of paths with an expected digest on record
    #[inline]
    #[must_use]
    pub fn tracked_path_count(&self) -> usize {
        self.inner.expected.len()
    }

    /// Snapshot of activity counters
    #[must_use]
    pub fn stats(&self) -> TrackerStats {
        self.inner.stats.lock().clone()
    }

    /// Tracker configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.inner.config
    }

    /// Wipe all per-path state and cancel every outstanding timer
    ///
    /// The only bulk-cancellation mechanism. Intended for process shutdown
    /// and test isolation.
    pub fn clear(&self) {
        // Dropping the pause entries disarms their timers.
        self.inner.paused.clear();
        self.inner.expected.clear();
        *self.inner.stats.lock() = TrackerStats::default();
        tracing::debug!("tracker state cleared");
    }

    /// Pause `path` and arm its safety timer
    fn pause(&self, path: TrackedPath) {
        let seq = self.inner.pause_seq.fetch_add(1, Ordering::Relaxed);

        // Disarm a previous registration's timer before arming the new one,
        // so no two timers are live for the same path.
        if let Some((_, previous)) = self.inner.paused.remove(&path) {
            previous.timer.cancel();
        }

        let timer = self.scheduler.schedule(self.inner.config.auto_resume_timeout, {
            let inner = Arc::downgrade(&self.inner);
            let path = path.clone();
            Box::new(move || auto_resume(&inner, &path, seq))
        });

        self.inner.paused.insert(path, PauseEntry { seq, timer });
    }
}

impl std::fmt::Debug for ChangeTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeTracker")
            .field("config", &self.inner.config)
            .field("tracked_paths", &self.inner.expected.len())
            .field("paused_paths", &self.inner.paused.len())
            .finish_non_exhaustive()
    }
}

/// Safety-timer expiry: the generator never confirmed, so the pause is
/// force-cleared. Guarded by the sequence number so a timer from a
/// superseded registration cannot clear a newer pause.
fn auto_resume(inner: &Weak<TrackerInner>, path: &TrackedPath, seq: u64) {
    let Some(inner) = inner.upgrade() else {
        return;
    };

    if inner
        .paused
        .remove_if(path.as_str(), |_, entry| entry.seq == seq)
        .is_some()
    {
        inner.stats.lock().auto_resumes += 1;
        tracing::warn!(
            path = %path,
            "write was never confirmed; auto-resuming change detection"
        );
    }
}
