//! Time-based operators (spec.md §4.4, §4.8): `delay`, `debounce_time`, `timeout`. Each takes a
//! `Clock` so tests can drive them under a paused tokio clock instead of wall time.

use crate::clock::{Clock, SystemClock};
use crate::error::StreamError;
use crate::stream::RxStream;
use crate::strategy::Strategy;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// `delay(duration)`: shifts every value (and the close/error signal) later by `duration`,
/// preserving relative order (spec.md §4.4).
pub fn delay<T>(duration: Duration, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
{
    delay_with_clock(duration, Arc::new(SystemClock), strategy)
}

pub fn delay_with_clock<T>(
    duration: Duration,
    clock: Arc<dyn Clock>,
    strategy: Strategy,
) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        let clock = Arc::clone(&clock);
                        let sender = sender.clone();
                        tokio::spawn(async move {
                            clock.sleep(duration).await;
                            let _ = sender.send_value(value).await;
                        });
                    }
                    Ok(None) => {
                        clock.sleep(duration).await;
                        return;
                    }
                    Err(error) => {
                        clock.sleep(duration).await;
                        sender.send_error(error).await;
                        return;
                    }
                }
            }
        });
        output
    }
}

/// `debounce_time(duration)`: emits the most recent value only after `duration` has elapsed
/// without a new one arriving (spec.md §4.4). A zero duration is a construction-time error
/// rather than a pass-through, since it could never observe "no new value arrived" (spec.md §6
/// "zero-duration debounceTime").
pub fn debounce_time<T>(
    duration: Duration,
    strategy: Strategy,
) -> crate::error::Result<impl FnOnce(RxStream<T>) -> RxStream<T>>
where
    T: Send + 'static,
{
    debounce_time_with_clock(duration, Arc::new(SystemClock), strategy)
}

pub fn debounce_time_with_clock<T>(
    duration: Duration,
    clock: Arc<dyn Clock>,
    strategy: Strategy,
) -> crate::error::Result<impl FnOnce(RxStream<T>) -> RxStream<T>>
where
    T: Send + 'static,
{
    if duration.is_zero() {
        return Err(StreamError::construction(
            "debounce_time: duration must be non-zero",
        ));
    }
    Ok(move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            // `generation` invalidates any in-flight timer started for a value that has since
            // been superseded by a newer one.
            let mut generation: u64 = 0;
            let (timer_tx, mut timer_rx) = mpsc::channel::<u64>(1);
            let mut pending: Option<T> = None;
            loop {
                tokio::select! {
                    biased;
                    read = input.read() => {
                        match read {
                            Ok(Some(value)) => {
                                generation += 1;
                                pending = Some(value);
                                let clock = Arc::clone(&clock);
                                let timer_tx = timer_tx.clone();
                                let fire_at = generation;
                                tokio::spawn(async move {
                                    clock.sleep(duration).await;
                                    let _ = timer_tx.send(fire_at).await;
                                });
                            }
                            Ok(None) => {
                                if let Some(value) = pending.take() {
                                    let _ = sender.send_value(value).await;
                                }
                                return;
                            }
                            Err(error) => {
                                sender.send_error(error).await;
                                return;
                            }
                        }
                    }
                    Some(fired) = timer_rx.recv() => {
                        if fired == generation {
                            if let Some(value) = pending.take() {
                                if !sender.send_value(value).await {
                                    return;
                                }
                            }
                        }
                    }
                }
            }
        });
        output
    })
}

/// `timeout(duration)`: errors with `StreamError::timeout()` if no value arrives within
/// `duration` of the previous one (or of subscription, for the first) (spec.md §4.4).
pub fn timeout<T>(duration: Duration, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
{
    timeout_with_clock(duration, Arc::new(SystemClock), strategy)
}

pub fn timeout_with_clock<T>(
    duration: Duration,
    clock: Arc<dyn Clock>,
    strategy: Strategy,
) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            loop {
                let waited = tokio::select! {
                    read = input.read() => Ok(read),
                    _ = clock.sleep(duration) => Err(()),
                };
                match waited {
                    Ok(Ok(Some(value))) => {
                        if !sender.send_value(value).await {
                            return;
                        }
                    }
                    Ok(Ok(None)) => return,
                    Ok(Err(error)) => {
                        sender.send_error(error).await;
                        return;
                    }
                    Err(()) => {
                        sender.send_error(StreamError::timeout()).await;
                        return;
                    }
                }
            }
        });
        output
    }
}
