use std::time::{Duration, Instant};

use snail::shutdown::{announce_shutdown, ExitOutcome, ShutdownSignal, TerminationFlag};

#[test]
fn termination_flag_observes_sigterm() {
    let flag = TerminationFlag::register().expect("failed to register SIGTERM flag");
    assert!(!flag.is_raised());

    // raise() delivers to the calling thread and the handler runs before it
    // returns, so no settling sleep is needed.
    signal_hook::low_level::raise(signal_hook::consts::SIGTERM).expect("failed to raise SIGTERM");
    assert!(flag.is_raised());

    // A second delivery finds the flag already raised and changes nothing.
    signal_hook::low_level::raise(signal_hook::consts::SIGTERM).expect("failed to raise SIGTERM");
    assert!(flag.is_raised());
}

#[test]
fn shutdown_signal_starts_running() {
    let signal = ShutdownSignal::new();
    assert!(!signal.is_shutting_down());
}

#[tokio::test]
async fn trigger_wakes_waiters() {
    let signal = ShutdownSignal::new();
    let waiter_handle = signal.handle();
    let waiter = tokio::spawn(async move { waiter_handle.wait().await });

    tokio::time::sleep(Duration::from_millis(10)).await;
    signal.handle().trigger();

    tokio::time::timeout(Duration::from_secs(1), waiter)
        .await
        .expect("waiter should wake after trigger")
        .expect("waiter task panicked");
    assert!(signal.is_shutting_down());
}

#[tokio::test]
async fn wait_returns_immediately_when_already_triggered() {
    let signal = ShutdownSignal::new();
    signal.handle().trigger();

    let start = Instant::now();
    signal.handle().wait().await;
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn trigger_is_one_shot() {
    let signal = ShutdownSignal::new();
    let handle = signal.handle();
    handle.trigger();
    // A second trigger during shutdown is a no-op, not an error.
    handle.trigger();
    assert!(handle.is_shutting_down());
}

#[test]
fn signal_announce_holds_for_the_grace_period() {
    let grace = Duration::from_millis(200);
    let mut out = Vec::new();

    let start = Instant::now();
    announce_shutdown(&mut out, ExitOutcome::TerminatedBySignal, grace).expect("announce failed");
    let elapsed = start.elapsed();

    assert!(elapsed >= grace, "exited before the grace period: {elapsed:?}");
    assert_eq!(String::from_utf8(out).expect("utf8"), "\nkilled by Salt\n");
}

#[test]
fn interrupt_announce_is_immediate_and_distinct() {
    let mut out = Vec::new();

    let start = Instant::now();
    announce_shutdown(&mut out, ExitOutcome::UserInterrupt, Duration::ZERO)
        .expect("announce failed");
    assert!(start.elapsed() < Duration::from_millis(100));

    assert_eq!(String::from_utf8(out).expect("utf8"), "\nSnail crawled away.\n");
    assert_ne!(
        ExitOutcome::UserInterrupt.farewell(),
        ExitOutcome::TerminatedBySignal.farewell()
    );
}
