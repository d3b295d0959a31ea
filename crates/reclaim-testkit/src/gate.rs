//! Pausable checkpoint for collaborator calls.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// A checkpoint a mock call passes through.
///
/// While held, calls park at the gate until [`Gate::release`]. Tests await
/// [`Gate::entered`] to know a call has parked there; calls passing an open
/// gate leave no trace.
#[derive(Debug, Default)]
pub struct Gate {
    held: AtomicBool,
    entered: Notify,
    opened: Notify,
}

impl Gate {
    /// Park subsequent calls until released
    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    /// Let parked and future calls through
    pub fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
        self.opened.notify_waiters();
        self.opened.notify_one();
    }

    /// Wait until a call parks at the held gate
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub(crate) async fn pass(&self) {
        if !self.held.load(Ordering::SeqCst) {
            return;
        }
        self.entered.notify_one();
        while self.held.load(Ordering::SeqCst) {
            self.opened.notified().await;
        }
    }
}
