//! Testing utilities for the Echoguard workspace
//!
//! Deterministic timer driving, failure-injecting digesters, and content
//! fixtures shared by the tracker test suites.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use echoguard_digest::{ContentDigest, DigestError, Digester};
use echoguard_tracker::{ScheduledTask, Scheduler, TimerCallback};

/// Scheduler whose timers only fire when the test says so.
///
/// `schedule` parks the callback; `fire_all` runs every parked callback in
/// arming order. Cancellation (explicit or on drop) unparks without running.
#[derive(Default)]
pub struct ManualScheduler {
    pending: Arc<Mutex<HashMap<u64, TimerCallback>>>,
    next_id: AtomicU64,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of armed, unfired timers
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Fire every armed timer, returning how many ran
    pub fn fire_all(&self) -> usize {
        let callbacks = self.drain();
        let fired = callbacks.len();
        for callback in callbacks {
            callback();
        }
        fired
    }

    /// Remove every armed callback without running it
    ///
    /// Lets a test hold onto a callback and invoke it later, simulating a
    /// timer that was already mid-flight when the tracker state changed.
    pub fn take_pending(&self) -> Vec<TimerCallback> {
        self.drain()
    }

    fn drain(&self) -> Vec<TimerCallback> {
        let mut pending = self.pending.lock();
        let mut ids: Vec<u64> = pending.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| pending.remove(&id))
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, _delay: Duration, callback: TimerCallback) -> ScheduledTask {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.pending.lock().insert(id, callback);

        let pending = Arc::clone(&self.pending);
        ScheduledTask::new(move || {
            pending.lock().remove(&id);
        })
    }
}

/// Digester that always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingDigester;

impl Digester for FailingDigester {
    fn digest(&self, _content: &[u8]) -> Result<ContentDigest, DigestError> {
        Err(DigestError::Provider("injected failure".to_string()))
    }
}

/// Digester that succeeds for the first `n` calls, then fails
#[derive(Debug, Default)]
pub struct FailAfterDigester {
    remaining: AtomicU64,
}

impl FailAfterDigester {
    #[must_use]
    pub fn new(successes: u64) -> Self {
        Self {
            remaining: AtomicU64::new(successes),
        }
    }
}

impl Digester for FailAfterDigester {
    fn digest(&self, content: &[u8]) -> Result<ContentDigest, DigestError> {
        let remaining = self.remaining.load(Ordering::SeqCst);
        if remaining == 0 {
            return Err(DigestError::Provider("injected failure".to_string()));
        }
        self.remaining.store(remaining - 1, Ordering::SeqCst);
        Ok(ContentDigest::of(content))
    }
}

/// Generated source fixture used across the tracker suites
#[must_use]
pub fn button_source() -> &'static [u8] {
    b"const Button = () => <button>Click</button>"
}

/// A human-edited variant of [`button_source`]
#[must_use]
pub fn modified_button_source() -> &'static [u8] {
    b"const Button = () => <button>Modified</button>"
}
