//! The stream primitive (spec.md §4.1) and the `pipe` composition it supports.
//!
//! The teacher models a connection as a `Channel` + `Controller` pair (see
//! `pipeline::channel`/`pipeline::controller`); this module collapses that into a single
//! [`RxStream`] type that is simultaneously the spec's "Stream" and its unique "Reader" (Design
//! Notes, SPEC_FULL.md §9: "reader exclusivity... encode as an ownership transfer"). There is no
//! way to acquire a second reader because there is no separate reader object to acquire — the
//! `RxStream` you hold *is* the read capability, and moving it (as every operator does) moves
//! that capability with it.

mod controller;

pub use controller::StageSender;

use crate::cancellation::Cancellation;
use crate::error::{Result, StreamError};
use crate::strategy::Strategy;
use std::fmt;

/// A single producer-to-consumer pipeline stage, bounded per [`Strategy`].
///
/// Backpressure is the channel itself: [`StageSender::send_value`] suspends the producing task
/// whenever the channel is full, which *is* "desiredSize <= 0" from the distilled spec — there is
/// no separate counter to maintain.
pub struct RxStream<T> {
    receiver: tokio::sync::mpsc::Receiver<std::result::Result<T, StreamError>>,
    cancellation: Cancellation,
}

impl<T> fmt::Debug for RxStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RxStream")
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish()
    }
}

impl<T: Send + 'static> RxStream<T> {
    pub(crate) fn new(
        receiver: tokio::sync::mpsc::Receiver<std::result::Result<T, StreamError>>,
        cancellation: Cancellation,
    ) -> Self {
        Self {
            receiver,
            cancellation,
        }
    }

    /// Builds a fresh stage: a bounded channel plus the [`StageSender`] half an operator/source
    /// task drives. This is the "start" half of the distilled spec's controller contract.
    pub fn stage(strategy: Strategy) -> (StageSender<T>, RxStream<T>) {
        let (tx, rx) = tokio::sync::mpsc::channel(strategy.channel_capacity());
        let cancellation = Cancellation::new();
        let sender = StageSender::new(tx, cancellation.clone());
        (sender, RxStream::new(rx, cancellation))
    }

    /// Reads the next value. `Ok(None)` is normal close; `Err` is the stream's terminal error.
    /// Once cancelled, always returns `Ok(None)` regardless of anything still buffered, matching
    /// spec.md §4.1's "cancel releases buffered data."
    pub async fn read(&mut self) -> Result<Option<T>> {
        if self.cancellation.is_cancelled() {
            return Ok(None);
        }
        match self.receiver.recv().await {
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(error)) => Err(error),
            None => Ok(None),
        }
    }

    /// Cancels the stream: the driving task (and anything it in turn cancels upstream) observes
    /// this via [`Cancellation::cancelled`] or a failed send, and any buffered-but-unread values
    /// are discarded rather than delivered.
    pub fn cancel(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::debug!(reason = %reason, "stream reader cancelled");
        self.cancellation.cancel();
        self.receiver.close();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub(crate) fn cancellation_token(&self) -> Cancellation {
        self.cancellation.clone()
    }

    /// Applies one operator, consuming `self` by move — this is exactly "acquire the reader" from
    /// the operator's perspective, since there is no other way to obtain one.
    pub fn pipe<U, F>(self, op: F) -> RxStream<U>
    where
        U: Send + 'static,
        F: FnOnce(RxStream<T>) -> RxStream<U>,
    {
        op(self)
    }

    /// Drains every remaining value into a `Vec`, the building block for `to_vec`/`to_string`
    /// and for tests comparing against expected sequences.
    pub async fn collect(mut self) -> Result<Vec<T>> {
        let mut out = Vec::new();
        while let Some(value) = self.read().await? {
            out.push(value);
        }
        Ok(out)
    }
}

/// Free-function form of [`RxStream::pipe`], matching the distilled spec's `pipe(source, op)`
/// call shape for a single operator. Chains of more than one operator read naturally as
/// `source.pipe(op1).pipe(op2)`, or via the [`crate::pipe`] macro for the literal
/// `pipe(source, op1, op2, ...)` shape.
pub fn pipe<T, U, F>(source: RxStream<T>, op: F) -> RxStream<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(RxStream<T>) -> RxStream<U>,
{
    source.pipe(op)
}

/// Variadic `pipe(source, op1, op2, ...)`, matching the distilled spec's composition call shape.
#[macro_export]
macro_rules! pipe {
    ($source:expr $(, $op:expr)* $(,)?) => {{
        let __s = $source;
        $( let __s = $crate::stream::RxStream::pipe(__s, $op); )*
        __s
    }};
}
