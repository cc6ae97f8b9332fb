//! Operators that cut a stream short or regroup it by count (spec.md §4.4): `take`, `skip`,
//! `take_until`, `skip_while`, `ignore_elements`, `buffer`.

use crate::stream::RxStream;
use crate::strategy::Strategy;

/// `take(n)`: emits at most the first `n` values, then cancels upstream and closes.
pub fn take<T>(n: usize, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            if n == 0 {
                input.cancel("take(0)");
                return;
            }
            let mut taken = 0usize;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        taken += 1;
                        if !sender.send_value(value).await {
                            return;
                        }
                        if taken >= n {
                            input.cancel("take limit reached");
                            return;
                        }
                    }
                    Ok(None) => return,
                    Err(error) => {
                        sender.send_error(error).await;
                        return;
                    }
                }
            }
        });
        output
    }
}

/// `skip(n)`: discards the first `n` values, then passes the rest through unchanged.
pub fn skip<T>(n: usize, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            let mut skipped = 0usize;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        if skipped < n {
                            skipped += 1;
                            continue;
                        }
                        if !sender.send_value(value).await {
                            return;
                        }
                    }
                    Ok(None) => return,
                    Err(error) => {
                        sender.send_error(error).await;
                        return;
                    }
                }
            }
        });
        output
    }
}

/// `take_until(notifier)`: passes values through until `notifier`'s first *value* arrives, at
/// which point upstream is cancelled and the output closes. A notifier that closes or errors
/// before ever emitting is not a signal to stop: it is simply no longer watched, and the source
/// keeps passing through unchanged (spec.md §4.4 "notifier errors are ignored").
pub fn take_until<T, N>(
    mut notifier: RxStream<N>,
    strategy: Strategy,
) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
    N: Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            let mut watching_notifier = true;
            loop {
                tokio::select! {
                    biased;
                    notified = notifier.read(), if watching_notifier => {
                        match notified {
                            Ok(Some(_)) => {
                                input.cancel("take_until notifier fired");
                                return;
                            }
                            Ok(None) | Err(_) => watching_notifier = false,
                        }
                    }
                    read = input.read() => {
                        match read {
                            Ok(Some(value)) => {
                                if !sender.send_value(value).await {
                                    return;
                                }
                            }
                            Ok(None) => return,
                            Err(error) => {
                                sender.send_error(error).await;
                                return;
                            }
                        }
                    }
                }
            }
        });
        output
    }
}

/// `skip_while(predicate)`: discards values while `predicate(value, index)` holds, then passes
/// everything through from the first value where it doesn't (inclusive).
pub fn skip_while<T, F>(predicate: F, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
    F: Fn(&T, usize) -> bool + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            let mut skipping = true;
            let mut index = 0usize;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        if skipping {
                            if predicate(&value, index) {
                                index += 1;
                                continue;
                            }
                            skipping = false;
                        }
                        index += 1;
                        if !sender.send_value(value).await {
                            return;
                        }
                    }
                    Ok(None) => return,
                    Err(error) => {
                        sender.send_error(error).await;
                        return;
                    }
                }
            }
        });
        output
    }
}

/// `ignore_elements()`: suppresses every value, forwarding only close/error.
pub fn ignore_elements<T>(strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            loop {
                match input.read().await {
                    Ok(Some(_)) => continue,
                    Ok(None) => return,
                    Err(error) => {
                        sender.send_error(error).await;
                        return;
                    }
                }
            }
        });
        output
    }
}

/// `buffer(count)`: regroups the source into non-overlapping `Vec`s of up to `count` values; a
/// short final buffer is flushed on close (spec.md §4.4).
pub fn buffer<T>(count: usize, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<Vec<T>>
where
    T: Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            let mut current: Vec<T> = Vec::with_capacity(count.max(1));
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        current.push(value);
                        if current.len() >= count {
                            let batch = std::mem::replace(&mut current, Vec::with_capacity(count.max(1)));
                            if !sender.send_value(batch).await {
                                return;
                            }
                        }
                    }
                    Ok(None) => {
                        if !current.is_empty() {
                            let _ = sender.send_value(current).await;
                        }
                        return;
                    }
                    Err(error) => {
                        sender.send_error(error).await;
                        return;
                    }
                }
            }
        });
        output
    }
}
