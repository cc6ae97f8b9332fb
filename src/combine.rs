//! Multi-source combinators (spec.md §4.6): `merge`, `concat`, `combine_latest`.

use crate::error::StreamError;
use crate::stream::RxStream;
use crate::strategy::Strategy;

enum Update<T> {
    Value(usize, T),
    Closed,
    Errored(StreamError),
}

/// Subscribes to every stream in `sources` at once and forwards whichever value arrives next,
/// closing once all sources have closed. The first error from any source terminates the merge.
pub fn merge<T>(sources: Vec<RxStream<T>>, strategy: Strategy) -> RxStream<T>
where
    T: Send + 'static,
{
    let (sender, output) = RxStream::stage(strategy);
    if sources.is_empty() {
        return output;
    }
    // Each task holds its own clone of `sender`; the underlying channel closes itself once the
    // last clone (the last source to finish) drops, so there is no separate completion count to
    // track here.
    for mut source in sources {
        let sender = sender.clone();
        tokio::spawn(async move {
            loop {
                match source.read().await {
                    Ok(Some(value)) => {
                        if !sender.send_value(value).await {
                            source.cancel("merge output closed");
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(error) => {
                        sender.send_error(error).await;
                        break;
                    }
                }
            }
        });
    }
    output
}

/// Drains `sources` one at a time, in order; a source's error terminates the concatenation
/// without starting the next one.
pub fn concat<T>(sources: Vec<RxStream<T>>, strategy: Strategy) -> RxStream<T>
where
    T: Send + 'static,
{
    let (sender, output) = RxStream::stage(strategy);
    tokio::spawn(async move {
        for mut source in sources {
            if sender.is_cancelled() {
                source.cancel("concat output closed");
                return;
            }
            loop {
                match source.read().await {
                    Ok(Some(value)) => {
                        if !sender.send_value(value).await {
                            source.cancel("concat output closed");
                            return;
                        }
                    }
                    Ok(None) => break,
                    Err(error) => {
                        sender.send_error(error).await;
                        return;
                    }
                }
            }
        }
    });
    output
}

/// Emits `Vec<Option<T>>` snapshots (index-aligned with `sources`) every time any source emits a
/// new value, starting once every source has emitted at least once (spec.md §4.6). Closes when
/// any source closes or errors.
pub fn combine_latest<T>(sources: Vec<RxStream<T>>, strategy: Strategy) -> RxStream<Vec<T>>
where
    T: Clone + Send + 'static,
{
    let count = sources.len();
    let (sender, output) = RxStream::stage(strategy);
    if count == 0 {
        tokio::spawn(async move {
            sender
                .send_error(StreamError::new(
                    crate::error::ErrorKind::Construction,
                    "combine_latest requires at least one source",
                ))
                .await;
        });
        return output;
    }
    tokio::spawn(async move {
        let (update_tx, mut update_rx) = tokio::sync::mpsc::channel::<Update<T>>(count.max(1));
        for (slot, mut source) in sources.into_iter().enumerate() {
            let update_tx = update_tx.clone();
            tokio::spawn(async move {
                loop {
                    match source.read().await {
                        Ok(Some(value)) => {
                            if update_tx.send(Update::Value(slot, value)).await.is_err() {
                                return;
                            }
                        }
                        Ok(None) => {
                            let _ = update_tx.send(Update::Closed).await;
                            return;
                        }
                        Err(error) => {
                            let _ = update_tx.send(Update::Errored(error)).await;
                            return;
                        }
                    }
                }
            });
        }
        drop(update_tx);
        let mut latest: Vec<Option<T>> = vec![None; count];
        let mut have_all = false;
        while let Some(update) = update_rx.recv().await {
            match update {
                Update::Value(slot, value) => {
                    latest[slot] = Some(value);
                    if !have_all {
                        have_all = latest.iter().all(|v| v.is_some());
                    }
                    if have_all {
                        let snapshot: Vec<T> = latest.iter().cloned().map(|v| v.unwrap()).collect();
                        if !sender.send_value(snapshot).await {
                            return;
                        }
                    }
                }
                Update::Closed => return,
                Update::Errored(error) => {
                    sender.send_error(error).await;
                    return;
                }
            }
        }
    });
    output
}
