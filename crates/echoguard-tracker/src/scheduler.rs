//! Scheduled-task abstraction
//!
//! The safety timer is the tracker's only autonomous behavior, so it runs
//! behind an explicit seam: [`Scheduler`] arms a one-shot callback and hands
//! back a [`ScheduledTask`] that cancels it. Production code uses
//! [`TokioScheduler`]; tests drive timers deterministically through a manual
//! implementation instead of sleeping.

use std::fmt;
use std::time::Duration;

/// One-shot callback armed by a [`Scheduler`]
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Arms one-shot timers for the tracker's safety net
pub trait Scheduler: Send + Sync + 'static {
    /// Schedule `callback` to run once after `delay`
    ///
    /// The returned handle cancels the timer when dropped or explicitly
    /// cancelled. Cancellation of an already-fired timer is a no-op.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> ScheduledTask;
}

/// Cancellation handle for a scheduled callback
///
/// Cancel-on-drop: replacing a pause entry in the tracker's map is enough to
/// disarm the superseded timer. The closure is `Sync` because handles live
/// inside the tracker's shared state.
pub struct ScheduledTask {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ScheduledTask {
    /// Build a handle from a cancellation closure
    #[must_use]
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the timer
    pub fn cancel(mut self) {
        self.disarm();
    }

    fn disarm(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Tokio-backed scheduler
///
/// Spawns a task that sleeps for the delay and then runs the callback, so it
/// must be used from within a Tokio runtime. Under `start_paused` test
/// runtimes the delay follows virtual time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> ScheduledTask {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        let abort = handle.abort_handle();
        ScheduledTask::new(move || abort.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_fires_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let task = TokioScheduler.schedule(
            Duration::from_millis(50),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );

        tokio::time::sleep(Duration::from_millis(49)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(fired.load(Ordering::SeqCst));

        drop(task);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_cancel_prevents_firing() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let task = TokioScheduler.schedule(
            Duration::from_millis(50),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );
        task.cancel();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_drop_cancels() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        drop(TokioScheduler.schedule(
            Duration::from_millis(50),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }
}
