//! # Debounce Timer
//!
//! Collapses a burst of triggers into one action after a quiet period.
//!
//! ## Timer Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   keystrokes:   a......ab.....abc..........................             │
//! │   timers:       [x     [x     [============ fires ─► action             │
//! │                                                                         │
//! │   Every trigger ABORTS the pending timer and starts a fresh one, so     │
//! │   the action runs exactly once per burst, with the last trigger's       │
//! │   payload. `[x` marks a timer that was aborted mid-sleep.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A restartable quiet-period timer.
pub struct Debouncer {
    quiet: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Debouncer {
            quiet,
            pending: Mutex::new(None),
        }
    }

    /// Schedules `action` to run after the quiet period, aborting any
    /// previously scheduled run.
    pub fn trigger<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let quiet = self.quiet;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            action.await;
        });
        let mut pending = self.pending.lock().expect("debouncer mutex poisoned");
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Aborts any pending run without scheduling a new one.
    pub fn cancel(&self) {
        if let Some(previous) = self
            .pending
            .lock()
            .expect("debouncer mutex poisoned")
            .take()
        {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_payload() {
        let fired = Arc::new(AtomicU32::new(0));
        let last = Arc::new(AtomicU32::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(400));

        for payload in 1..=3u32 {
            let fired = Arc::clone(&fired);
            let last = Arc::clone(&last);
            debouncer.trigger(async move {
                fired.fetch_add(1, Ordering::SeqCst);
                last.store(payload, Ordering::SeqCst);
            });
            // Keystrokes 100ms apart, well inside the quiet period.
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_pending_run() {
        let fired = Arc::new(AtomicU32::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(400));

        let fired_clone = Arc::clone(&fired);
        debouncer.trigger(async move {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_fire() {
        let fired = Arc::new(AtomicU32::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(400));

        for _ in 0..2 {
            let fired = Arc::clone(&fired);
            debouncer.trigger(async move {
                fired.fetch_add(1, Ordering::SeqCst);
            });
            // Gap longer than the quiet period: the timer fires in between.
            tokio::time::sleep(Duration::from_millis(600)).await;
        }

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
