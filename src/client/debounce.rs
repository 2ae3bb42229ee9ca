//! Cancellable single-slot timer
//!
//! One pending action at a time: scheduling replaces (and cancels) the
//! previous one, so a burst of triggers collapses into the last action,
//! fired once the window elapses with no new trigger. `cancel` makes
//! teardown a single deterministic call.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Single-slot debounce timer.
pub struct Debouncer {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
        }
    }

    /// Schedule `action` to run after `window`, cancelling any previously
    /// scheduled action. Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, window: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            action.await;
        });

        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Cancel the pending action, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Whether an action is currently scheduled (it may also have already
    /// run; the slot is not cleared on completion).
    pub fn is_scheduled(&self) -> bool {
        self.pending.lock().unwrap().is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
