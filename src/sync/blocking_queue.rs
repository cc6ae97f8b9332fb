use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Rendezvous channel: each `push` pairs with exactly one `pull`, FIFO, arrival order
/// determining pairing (spec.md §4.2). Used by `merge_map` to collect inner-stream values into
/// arrival order for the output stage.
///
/// There is no intermediate buffer: a `push` that arrives before any `pull` is waiting parks
/// until one shows up, and vice versa, matching "a later-arriving producer may rendezvous with an
/// already-queued consumer first."
pub struct BlockingQueue<T> {
    state: Arc<Mutex<State<T>>>,
}

struct State<T> {
    waiting_pulls: VecDeque<oneshot::Sender<T>>,
    waiting_pushes: VecDeque<(T, oneshot::Sender<()>)>,
}

impl<T> Default for State<T> {
    fn default() -> Self {
        Self {
            waiting_pulls: VecDeque::new(),
            waiting_pushes: VecDeque::new(),
        }
    }
}

impl<T> Clone for BlockingQueue<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Send + 'static> BlockingQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Pairs with the oldest waiting `pull`, or enqueues and waits for one to arrive.
    pub async fn push(&self, value: T) {
        let waiter = {
            let mut state = self.state.lock();
            state.waiting_pulls.pop_front()
        };
        match waiter {
            Some(pull_tx) => {
                // Deliver directly; if the puller already gave up, there is nothing to undo.
                let _ = pull_tx.send(value);
            }
            None => {
                let (push_tx, push_rx) = oneshot::channel();
                {
                    let mut state = self.state.lock();
                    state.waiting_pushes.push_back((value, push_tx));
                }
                let _ = push_rx.await;
            }
        }
    }

    /// Pairs with the oldest waiting `push`, or enqueues and waits for one to arrive.
    pub async fn pull(&self) -> T {
        let waiting = {
            let mut state = self.state.lock();
            state.waiting_pushes.pop_front()
        };
        match waiting {
            Some((value, push_done)) => {
                let _ = push_done.send(());
                value
            }
            None => {
                let (pull_tx, pull_rx) = oneshot::channel();
                {
                    let mut state = self.state.lock();
                    state.waiting_pulls.push_back(pull_tx);
                }
                pull_rx
                    .await
                    .expect("paired push dropped before delivering a value")
            }
        }
    }
}

impl<T: Send + 'static> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
