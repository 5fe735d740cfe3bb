//! Coalesces rapid document edits into a single downstream recompute.
//!
//! There is exactly one pending timer: each new value cancels the previous
//! one, so only the last value of a quiet window is delivered. The preview
//! pipeline listens on the paired receiver and rebuilds at most once per
//! quiet period instead of once per keystroke.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The quiet window applied to preview recomputes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Returns the debouncer and the receiver debounced values arrive on.
    /// Must be created and used inside a tokio runtime.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Debouncer {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Schedules `value` for delivery after the quiet delay, replacing any
    /// previously pending value.
    pub fn push(&mut self, value: T) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may be gone during shutdown; nothing to do then.
            let _ = tx.send(value);
        }));
    }

    /// True while a value is waiting out its quiet window. The handle is
    /// not cleared on delivery, so this is only meaningful right after a
    /// push.
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
