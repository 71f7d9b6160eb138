//! Pause-window and safety-timer behavior under virtual time.

use std::time::Duration;

use echoguard_tracker::{ChangeTracker, Classification, PathState, TrackerConfig};
use echoguard_test_utils::{button_source, modified_button_source};

#[tokio::test(start_paused = true)]
async fn test_pause_suppresses_all_comparison() {
    let tracker = ChangeTracker::new(TrackerConfig::new());
    let path = "/project/Button.tsx";

    tracker.register_upcoming_write(path, button_source()).unwrap();

    // While paused, even content that differs from the expected digest is
    // suppressed without comparison.
    assert!(!tracker.classify_change(path, button_source()));
    assert!(!tracker.classify_change(path, modified_button_source()));
    assert!(!tracker.classify_change(path, b""));
    assert_eq!(tracker.classify(path, b"junk"), Classification::Paused);
    assert_eq!(tracker.path_state(path), PathState::Generating);
}

#[tokio::test(start_paused = true)]
async fn test_self_healing_when_confirmation_never_arrives() {
    let tracker = ChangeTracker::new(TrackerConfig::new());
    let path = "/project/Button.tsx";

    tracker.register_upcoming_write(path, button_source()).unwrap();
    assert!(tracker.is_paused(path));

    // Crash scenario: confirm_write_complete is never called. The safety
    // timer must release the pause on its own.
    tokio::time::sleep(Duration::from_millis(5001)).await;
    tokio::task::yield_now().await;

    assert!(!tracker.is_paused(path));
    assert_eq!(tracker.path_state(path), PathState::Idle);
    assert_eq!(tracker.stats().auto_resumes, 1);

    // A differing edit after auto-resume is detected normally.
    assert!(tracker.classify_change(path, modified_button_source()));
}

#[tokio::test(start_paused = true)]
async fn test_confirmation_cancels_safety_timer() {
    let tracker = ChangeTracker::new(TrackerConfig::new());
    let path = "/project/Button.tsx";

    tracker.register_upcoming_write(path, button_source()).unwrap();
    tracker.confirm_write_complete(path).await.unwrap();

    tokio::time::sleep(Duration::from_millis(6000)).await;
    tokio::task::yield_now().await;

    let stats = tracker.stats();
    assert_eq!(stats.confirmed_writes, 1);
    assert_eq!(stats.auto_resumes, 0);
}

#[tokio::test(start_paused = true)]
async fn test_reregistration_rearms_safety_timer() {
    let tracker = ChangeTracker::new(TrackerConfig::new());
    let path = "/project/Button.tsx";

    tracker.register_upcoming_write(path, button_source()).unwrap();

    // Just before the first timer would fire, a new generation starts.
    tokio::time::sleep(Duration::from_millis(4500)).await;
    tracker
        .register_upcoming_write(path, modified_button_source())
        .unwrap();

    // The original deadline passes; the rearmed timer must keep the pause.
    tokio::time::sleep(Duration::from_millis(1000)).await;
    tokio::task::yield_now().await;
    assert!(tracker.is_paused(path));

    // The rearmed deadline passes.
    tokio::time::sleep(Duration::from_millis(4100)).await;
    tokio::task::yield_now().await;
    assert!(!tracker.is_paused(path));
    assert_eq!(tracker.stats().auto_resumes, 1);
}

#[tokio::test(start_paused = true)]
async fn test_settle_delay_holds_pause_until_it_elapses() {
    let config = TrackerConfig::new().with_pause_duration(Duration::from_millis(100));
    let tracker = ChangeTracker::new(config);
    let path = "/project/Button.tsx";

    tracker.register_upcoming_write(path, button_source()).unwrap();

    let confirm = tokio::spawn({
        let tracker = tracker.clone();
        async move { tracker.confirm_write_complete(path).await }
    });

    // Mid-settle the path is still paused: a watcher event for the write
    // itself must be suppressed.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(tracker.is_paused(path));
    assert!(!tracker.classify_change(path, modified_button_source()));

    confirm.await.unwrap().unwrap();
    assert!(!tracker.is_paused(path));
}

#[tokio::test(start_paused = true)]
async fn test_custom_timeouts_are_honored() {
    let config = TrackerConfig::new()
        .with_pause_duration(Duration::from_millis(10))
        .with_auto_resume_timeout(Duration::from_millis(200));
    let tracker = ChangeTracker::new(config);
    let path = "/project/Button.tsx";

    tracker.register_upcoming_write(path, button_source()).unwrap();

    tokio::time::sleep(Duration::from_millis(201)).await;
    tokio::task::yield_now().await;

    assert!(!tracker.is_paused(path));
    assert_eq!(tracker.stats().auto_resumes, 1);
}

#[tokio::test(start_paused = true)]
async fn test_clear_cancels_outstanding_timers() {
    let tracker = ChangeTracker::new(TrackerConfig::new());

    tracker
        .register_upcoming_write("/project/A.tsx", b"a")
        .unwrap();
    tracker
        .register_upcoming_write("/project/B.tsx", b"b")
        .unwrap();

    tracker.clear();

    tokio::time::sleep(Duration::from_millis(6000)).await;
    tokio::task::yield_now().await;

    // No timer survived the reset.
    assert_eq!(tracker.stats().auto_resumes, 0);
    assert_eq!(tracker.tracked_path_count(), 0);
}
