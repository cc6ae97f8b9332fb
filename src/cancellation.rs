//! Cancellation token, adapted from the teacher's `contract::Cancellation`.
//!
//! The teacher's primitive is a bare `Arc<AtomicBool>` meant to be polled; this rendering adds a
//! `tokio::sync::Notify` so a stage's `tokio::select!` loop can wake on cancellation instead of
//! busy-polling the flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    flag: AtomicBool,
    notify: Notify,
}

/// Shared, cloneable cancellation signal propagated from a reader down into the stage task that
/// drives it, and from there into any inner tasks a flattening operator has spawned.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    inner: Arc<Inner>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.flag.load(Ordering::Acquire)
    }

    /// Marks the token cancelled. Returns `true` the first time this succeeds; idempotent on
    /// repeat calls (matches spec.md §5's "cancel path must be idempotent").
    pub fn cancel(&self) -> bool {
        let first = self
            .inner
            .flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if first {
            self.inner.notify.notify_waiters();
        }
        first
    }

    /// Derives a child token sharing the same underlying flag, used when a stage needs to pass
    /// cancellation down to an inner stream's task without giving it the ability to cancel its
    /// siblings independently.
    pub fn child(&self) -> Self {
        self.clone()
    }

    /// Resolves once `cancel()` has been called. Resolves immediately if already cancelled.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}
