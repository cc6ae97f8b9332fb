use std::sync::Arc;
use tokio::sync::Semaphore;

/// Counting semaphore bounding flattening-operator concurrency (spec.md §4.2, used by
/// `merge_map`'s concurrency limit).
///
/// Built on `tokio::sync::Semaphore`, whose waiter queue is already FIFO, matching "increment()
/// releases one waiter (FIFO) if any, else increments count." Acquired permits are `forget()`-ten
/// so the count only ever grows back via an explicit [`Gate::increment`]/[`Gate::set_count`],
/// never by the permit guard's `Drop`.
#[derive(Clone, Debug)]
pub struct Gate {
    semaphore: Arc<Semaphore>,
}

impl Gate {
    pub fn new(count: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(count)),
        }
    }

    /// Unbounded gate, used when a flattening operator's `concurrency` is "infinite."
    pub fn unbounded() -> Self {
        Self::new(Semaphore::MAX_PERMITS)
    }

    /// Resolves immediately if a slot is free (decrementing the count), otherwise enqueues.
    pub async fn wait(&self) {
        let permit = self
            .semaphore
            .acquire()
            .await
            .expect("gate semaphore is never closed");
        permit.forget();
    }

    /// Releases one waiter (FIFO) if any is queued, else increases the available count by one.
    pub fn increment(&self) {
        self.semaphore.add_permits(1);
    }

    /// Wakes up to `n` waiters at once.
    pub fn set_count(&self, n: usize) {
        self.semaphore.add_permits(n);
    }
}
