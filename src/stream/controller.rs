use crate::cancellation::Cancellation;
use crate::error::StreamError;

/// The producer half of a [`super::RxStream`] stage — the distilled spec's `controller`
/// (`enqueue`/`close`/`error`) collapsed onto a `tokio::sync::mpsc::Sender`, since `send(..)`
/// already suspends on backpressure and dropping the sender already closes the stream.
pub struct StageSender<T> {
    tx: tokio::sync::mpsc::Sender<std::result::Result<T, StreamError>>,
    cancellation: Cancellation,
}

impl<T> StageSender<T> {
    pub(crate) fn new(
        tx: tokio::sync::mpsc::Sender<std::result::Result<T, StreamError>>,
        cancellation: Cancellation,
    ) -> Self {
        Self { tx, cancellation }
    }

    /// Enqueues a value, suspending while the buffer is at `high_water_mark`. Returns `false`
    /// once the reader side has gone away (cancelled or dropped) so the caller's driving loop can
    /// stop without treating that as an error.
    pub async fn send_value(&self, value: T) -> bool {
        self.tx.send(Ok(value)).await.is_ok()
    }

    /// Terminates the stream with an error. A best-effort send: if the reader is already gone
    /// there is nothing left to notify.
    pub async fn send_error(&self, error: StreamError) {
        let _ = self.tx.send(Err(error)).await;
    }

    /// The cancellation token shared with the [`super::RxStream`] this sender feeds; a stage's
    /// driving loop selects on this alongside its upstream read to react to `cancel()` promptly
    /// even mid-send.
    pub fn cancellation(&self) -> Cancellation {
        self.cancellation.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// True if `self` and `other` are clones of the same underlying channel — used by
    /// [`crate::subject::Subject`] to prune a dead subscriber after a failed send without
    /// accidentally dropping an unrelated one.
    pub fn same_channel(&self, other: &Self) -> bool {
        self.tx.same_channel(&other.tx)
    }
}

impl<T> Clone for StageSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            cancellation: self.cancellation.clone(),
        }
    }
}
