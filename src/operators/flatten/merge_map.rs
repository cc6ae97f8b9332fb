use crate::error::StreamError;
use crate::stream::RxStream;
use crate::strategy::Strategy;
use crate::sync::Gate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// `merge_map(project, concurrency)`: projects each input to an inner stream and merges their
/// values as they arrive, running up to `concurrency` inner streams at once (`None` = unbounded)
/// (spec.md §4.5). `concurrency = Some(0)` is a construction-time error rather than a deadlocked
/// stream (spec.md §6 "zero-concurrency mergeMap").
///
/// Inner values reach the output through cloned [`StageSender`](crate::stream::StageSender)
/// handles, which is already a multi-producer `tokio::sync::mpsc::Sender` under the hood — no
/// extra merge-ordering structure is needed, since whichever inner task's `send_value` completes
/// first is, by definition, the arrival order.
pub fn merge_map<T, U, F>(
    project: F,
    concurrency: Option<usize>,
    strategy: Strategy,
) -> crate::error::Result<impl FnOnce(RxStream<T>) -> RxStream<U>>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T, usize) -> RxStream<U> + Send + 'static,
{
    if concurrency == Some(0) {
        return Err(StreamError::construction(
            "merge_map: concurrency must be at least 1",
        ));
    }
    Ok(move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        let gate = match concurrency {
            Some(n) => Gate::new(n),
            None => Gate::unbounded(),
        };
        tokio::spawn(async move {
            let active = Arc::new(AtomicUsize::new(0));
            let idle = Arc::new(Notify::new());
            let mut index = 0usize;
            loop {
                if sender.is_cancelled() {
                    input.cancel("merge_map downstream cancelled");
                    break;
                }
                match input.read().await {
                    Ok(Some(value)) => {
                        gate.wait().await;
                        active.fetch_add(1, Ordering::SeqCst);
                        let mut inner = project(value, index);
                        index += 1;
                        let sender = sender.clone();
                        let gate = gate.clone();
                        let active = Arc::clone(&active);
                        let idle = Arc::clone(&idle);
                        tokio::spawn(async move {
                            loop {
                                match inner.read().await {
                                    Ok(Some(v)) => {
                                        if !sender.send_value(v).await {
                                            inner.cancel("merge_map output closed");
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
                            gate.increment();
                            if active.fetch_sub(1, Ordering::SeqCst) == 1 {
                                idle.notify_waiters();
                            }
                        });
                    }
                    Ok(None) => break,
                    Err(error) => {
                        sender.send_error(error).await;
                        return;
                    }
                }
            }
            wait_idle(&active, &idle).await;
        });
        output
    })
}

async fn wait_idle(active: &Arc<AtomicUsize>, idle: &Arc<Notify>) {
    loop {
        if active.load(Ordering::SeqCst) == 0 {
            return;
        }
        let notified = idle.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if active.load(Ordering::SeqCst) == 0 {
            return;
        }
        notified.await;
    }
}

/// `concat_map(project)`: `merge_map` with concurrency fixed at 1, so each inner stream fully
/// drains before the next one starts (spec.md §4.5). Concurrency is a fixed non-zero constant
/// here, so unlike `merge_map` this never fails to construct.
pub fn concat_map<T, U, F>(project: F, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T, usize) -> RxStream<U> + Send + 'static,
{
    merge_map(project, Some(1), strategy).expect("concurrency = Some(1) is always valid")
}
