use tokio::sync::Notify;

/// Fire-once-per-signal broadcast (spec.md §4.2).
///
/// Built directly on `tokio::sync::Notify`, whose `notify_waiters()` already has exactly the
/// semantics spec.md asks for: every task currently waiting on `notified()` resolves, and a
/// waiter registered after that call does not resolve until a further `notify_waiters()`.
#[derive(Clone, Debug, Default)]
pub struct Signal {
    notify: std::sync::Arc<Notify>,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves on the next call to [`Signal::signal`].
    pub async fn wait(&self) {
        self.notify.notified().await;
    }

    /// Wakes every task currently parked in [`Signal::wait`].
    pub fn signal(&self) {
        self.notify.notify_waiters();
    }
}
