//! Multicast sources (spec.md §4.7): `Subject`, `ReplaySubject`.
//!
//! Unlike the pull-driven [`RxStream`](crate::stream::RxStream) pipeline, a subject is pushed
//! into directly by caller code (`next`/`error`/`complete`), and fans that push out to every
//! reader subscribed at the time — each with its own independent stage, mirroring the teacher's
//! broadcast-channel `contract` shape but realized per-subscriber instead of via a single shared
//! `tokio::sync::broadcast` so that each reader gets its own bounded buffer and backpressure.

use crate::clock::{Clock, SystemClock};
use crate::error::StreamError;
use crate::stream::RxStream;
use crate::strategy::Strategy;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::stream::StageSender;

struct Subscribers<T> {
    senders: Vec<StageSender<T>>,
    terminated: bool,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            senders: Vec::new(),
            terminated: false,
        }
    }
}

/// A plain multicast channel: every value pushed via [`Subject::next`] reaches every reader
/// subscribed at that moment. Readers that subscribe later see only values pushed after they
/// subscribed (spec.md §4.7 "Subject has no replay").
pub struct Subject<T> {
    subscribers: Arc<Mutex<Subscribers<T>>>,
    strategy: Strategy,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
            strategy: self.strategy,
        }
    }
}

impl<T: Clone + Send + 'static> Subject<T> {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Subscribers::default())),
            strategy,
        }
    }

    /// Registers a new reader. If the subject has already terminated (via `error` or
    /// `complete`), the returned stream closes/errors immediately without ever being registered.
    pub fn subscribe(&self) -> RxStream<T> {
        let (sender, stream) = RxStream::stage(self.strategy);
        let mut subscribers = self.subscribers.lock();
        if !subscribers.terminated {
            subscribers.senders.push(sender);
        }
        drop(subscribers);
        stream
    }

    /// Pushes `value` to every currently subscribed reader. Readers that have dropped or
    /// cancelled are pruned lazily on the next push.
    pub async fn next(&self, value: T) {
        let senders: Vec<StageSender<T>> = {
            let subscribers = self.subscribers.lock();
            if subscribers.terminated {
                return;
            }
            subscribers.senders.clone()
        };
        let mut alive = Vec::with_capacity(senders.len());
        for sender in senders {
            if sender.send_value(value.clone()).await {
                alive.push(sender);
            }
        }
        let mut subscribers = self.subscribers.lock();
        subscribers.senders.retain(|s| alive.iter().any(|a| a.same_channel(s)));
    }

    /// Terminates every current and future reader with `error`.
    pub async fn error(&self, error: StreamError) {
        let senders = {
            let mut subscribers = self.subscribers.lock();
            subscribers.terminated = true;
            std::mem::take(&mut subscribers.senders)
        };
        for sender in senders {
            sender.send_error(error_clone(&error)).await;
        }
    }

    /// Closes every current and future reader cleanly.
    pub fn complete(&self) {
        let senders = {
            let mut subscribers = self.subscribers.lock();
            subscribers.terminated = true;
            std::mem::take(&mut subscribers.senders)
        };
        drop(senders); // dropping every StageSender closes each reader's channel
    }
}

fn error_clone(error: &StreamError) -> StreamError {
    StreamError::new(error.kind(), error.message().to_string())
}

struct ReplayEntry<T> {
    value: T,
    recorded_at: tokio::time::Instant,
}

struct ReplayState<T> {
    buffer: VecDeque<ReplayEntry<T>>,
    buffer_size: usize,
    window: Option<Duration>,
}

impl<T> ReplayState<T> {
    fn push(&mut self, value: T, recorded_at: tokio::time::Instant) {
        self.buffer.push_back(ReplayEntry { value, recorded_at });
        while self.buffer.len() > self.buffer_size {
            self.buffer.pop_front();
        }
    }

    fn evict_expired(&mut self, now: tokio::time::Instant) {
        if let Some(window) = self.window {
            while let Some(front) = self.buffer.front() {
                if now.saturating_duration_since(front.recorded_at) > window {
                    self.buffer.pop_front();
                } else {
                    break;
                }
            }
        }
    }
}

/// A [`Subject`] that additionally replays up to `buffer_size` of its most recent values (within
/// `window`, if given) to every new subscriber before it starts seeing live values (spec.md §4.7
/// "ReplaySubject(bufferSize, windowTime)").
pub struct ReplaySubject<T> {
    subject: Subject<T>,
    replay: Arc<Mutex<ReplayState<T>>>,
    clock: Arc<dyn Clock>,
}

impl<T> Clone for ReplaySubject<T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
            replay: Arc::clone(&self.replay),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T: Clone + Send + 'static> ReplaySubject<T> {
    pub fn new(buffer_size: usize, window: Option<Duration>, strategy: Strategy) -> Self {
        Self::with_clock(buffer_size, window, Arc::new(SystemClock), strategy)
    }

    pub fn with_clock(
        buffer_size: usize,
        window: Option<Duration>,
        clock: Arc<dyn Clock>,
        strategy: Strategy,
    ) -> Self {
        Self {
            subject: Subject::new(strategy),
            replay: Arc::new(Mutex::new(ReplayState {
                buffer: VecDeque::new(),
                buffer_size: buffer_size.max(1),
                window,
            })),
            clock,
        }
    }

    /// Replays the buffered history, then hands off to the live subject. The handoff is
    /// best-effort ordered: values pushed between the replay snapshot and live registration are
    /// not lost, but may interleave after the replayed prefix rather than strictly before it,
    /// since there is a window between snapshotting history and registering as a live
    /// subscriber.
    pub fn subscribe(&self) -> RxStream<T> {
        let now = self.clock.now();
        let history: Vec<T> = {
            let mut replay = self.replay.lock();
            replay.evict_expired(now);
            replay.buffer.iter().map(|e| e.value.clone()).collect()
        };
        let stream = self.subject.subscribe();
        if history.is_empty() {
            return stream;
        }
        let backlog = crate::sources::of(history, self.strategy());
        crate::combine::concat(vec![backlog, stream], self.strategy())
    }

    fn strategy(&self) -> Strategy {
        self.subject.strategy
    }

    pub async fn next(&self, value: T) {
        let now = self.clock.now();
        {
            let mut replay = self.replay.lock();
            replay.push(value.clone(), now);
        }
        self.subject.next(value).await;
    }

    pub async fn error(&self, error: StreamError) {
        self.subject.error(error).await;
    }

    pub fn complete(&self) {
        self.subject.complete();
    }
}
