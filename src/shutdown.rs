use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use signal_hook::consts::SIGTERM;
use tokio::signal;
use tokio::sync::Notify;

/// How the process ends. Both paths exit with status 0; only the farewell
/// line and the grace delay differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// External termination request (SIGTERM).
    TerminatedBySignal,
    /// Local cancellation (ESC or Ctrl-C inside the render loop).
    UserInterrupt,
}

impl ExitOutcome {
    pub fn farewell(self) -> &'static str {
        match self {
            ExitOutcome::TerminatedBySignal => "killed by Salt",
            ExitOutcome::UserInterrupt => "Snail crawled away.",
        }
    }
}

/// Writes the farewell for `outcome`, flushed immediately, then holds the
/// process for `grace`. The flush matters: the drawing surface may only just
/// have been restored and the exit can follow without another scheduling
/// point.
pub fn announce_shutdown<W: Write>(
    out: &mut W,
    outcome: ExitOutcome,
    grace: Duration,
) -> io::Result<()> {
    writeln!(out, "\n{}", outcome.farewell())?;
    out.flush()?;
    if !grace.is_zero() {
        thread::sleep(grace);
    }
    Ok(())
}

/// One-shot SIGTERM latch for the render loop.
///
/// Registered once, explicitly, at process start; the handler suppresses the
/// default fatal disposition and raises the flag, which the loop observes at
/// its per-frame suspension point. Once observed, no further frames render.
/// Repeat deliveries find the flag already raised and are no-ops.
#[derive(Clone)]
pub struct TerminationFlag(Arc<AtomicBool>);

impl TerminationFlag {
    pub fn register() -> io::Result<Self> {
        let flag = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(SIGTERM, Arc::clone(&flag))?;
        Ok(Self(flag))
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One-shot shutdown latch for the webhook server: triggered by SIGTERM,
/// Ctrl-C, or programmatically (tests, embedding).
pub struct ShutdownSignal {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Create a handle for sharing.
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shutdown: Arc::clone(&self.shutdown),
            notify: Arc::clone(&self.notify),
        }
    }

    /// Resolves when a termination signal arrives or the latch is triggered.
    pub async fn wait_for_signal(&self) -> io::Result<()> {
        let handle = self.handle();
        if handle.is_shutting_down() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            tokio::select! {
                _ = signal::ctrl_c() => {},
                _ = sigterm.recv() => {},
                _ = handle.wait() => {},
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = signal::ctrl_c() => {},
                _ = handle.wait() => {},
            }
        }

        self.shutdown.store(true, Ordering::SeqCst);
        tracing::info!("shutting down gracefully");
        Ok(())
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Lightweight handle for triggering and observing shutdown.
#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn trigger(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub async fn wait(&self) {
        // Subscribe to Notify BEFORE checking the flag to avoid TOCTOU race:
        // without this, trigger() could fire between the check and the await,
        // and notify_waiters() would have no subscribers, losing the notification.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }
}
