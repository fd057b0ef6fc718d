//! Debouncing of bursty input
//!
//! Coalesces rapid calls into one deferred action that runs once the input has
//! been quiet for a fixed interval.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs only the last action of a burst, `delay` after the burst ends
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet interval
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Create a debouncer with a quiet interval in milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Schedule `action`, replacing whatever was scheduled before.
    ///
    /// Must be called from within a tokio runtime. Once the delay has elapsed
    /// the action runs on its own task, so later calls no longer affect it.
    pub fn call<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let mut pending = self.pending();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action());
        }));
    }

    /// Drop the scheduled action, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.pending().take() {
            handle.abort();
        }
    }

    /// Whether an action is still waiting for its quiet period
    pub fn is_pending(&self) -> bool {
        self.pending()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
