//! Source factories (spec.md §2 "Sources"): `of`, `from`, `range`, `interval`, `timer`, `empty`,
//! `throwError`. Each spawns the stage task eagerly, matching the distilled spec's "`start` runs
//! once eagerly on construction."

use crate::clock::{Clock, SystemClock};
use crate::error::StreamError;
use crate::stream::RxStream;
use crate::strategy::Strategy;
use std::sync::Arc;
use std::time::Duration;

/// Emits each value of `values` in order, then closes. Spec's `of`/`from` over a finite,
/// already-materialized sequence.
pub fn of<T>(values: Vec<T>, strategy: Strategy) -> RxStream<T>
where
    T: Send + 'static,
{
    from_iter(values, strategy)
}

/// Emits each item of any `IntoIterator`, then closes. Spec's "async generator sources" (Design
/// Notes, SPEC_FULL.md §9): closing/cancelling the stream simply drops the iterator.
pub fn from_iter<I>(iterable: I, strategy: Strategy) -> RxStream<<I::IntoIter as Iterator>::Item>
where
    I: IntoIterator + Send + 'static,
    I::IntoIter: Send,
    <I::IntoIter as Iterator>::Item: Send + 'static,
{
    let (sender, stream) = RxStream::stage(strategy);
    tokio::spawn(async move {
        for value in iterable {
            if sender.is_cancelled() {
                return;
            }
            if !sender.send_value(value).await {
                return;
            }
        }
    });
    stream
}

/// `range(start, end)`: emits `start, start+1, ..., end-1`.
pub fn range(start: i64, end: i64, strategy: Strategy) -> RxStream<i64> {
    from_iter(start..end, strategy)
}

/// Never emits a value; closes immediately without producing anything.
pub fn empty<T>(strategy: Strategy) -> RxStream<T>
where
    T: Send + 'static,
{
    let (_sender, stream) = RxStream::stage(strategy);
    stream
}

/// Immediately errors with `error`, emitting nothing.
pub fn throw_error<T>(error: StreamError, strategy: Strategy) -> RxStream<T>
where
    T: Send + 'static,
{
    let (sender, stream) = RxStream::stage(strategy);
    tokio::spawn(async move {
        sender.send_error(error).await;
    });
    stream
}

/// Emits an increasing counter every `period`, forever, until cancelled.
pub fn interval(period: Duration, strategy: Strategy) -> RxStream<u64> {
    interval_with_clock(period, Arc::new(SystemClock), strategy)
}

pub fn interval_with_clock(
    period: Duration,
    clock: Arc<dyn Clock>,
    strategy: Strategy,
) -> RxStream<u64> {
    let (sender, stream) = RxStream::stage(strategy);
    tokio::spawn(async move {
        let mut tick: u64 = 0;
        loop {
            clock.sleep(period).await;
            if sender.is_cancelled() {
                return;
            }
            if !sender.send_value(tick).await {
                return;
            }
            tick += 1;
        }
    });
    stream
}

/// Emits `()` once after `delay`, then closes.
pub fn timer(delay: Duration, strategy: Strategy) -> RxStream<()> {
    timer_with_clock(delay, Arc::new(SystemClock), strategy)
}

pub fn timer_with_clock(delay: Duration, clock: Arc<dyn Clock>, strategy: Strategy) -> RxStream<()> {
    let (sender, stream) = RxStream::stage(strategy);
    tokio::spawn(async move {
        clock.sleep(delay).await;
        if sender.is_cancelled() {
            return;
        }
        let _ = sender.send_value(()).await;
    });
    stream
}
