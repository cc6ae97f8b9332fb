use crate::error::{ErrorKind, StreamError};
use crate::fault::{self, FaultSink};
use crate::stream::RxStream;
use crate::strategy::Strategy;
use std::sync::Arc;

/// `map(f)`: applies `f(value, index)` to every input, index starting at 0 (spec.md §4.4).
pub fn map<T, U, F>(f: F, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T, usize) -> U + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        let sink = fault::default_sink();
        tokio::spawn(async move {
            let mut index = 0usize;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        match apply(&sink, &f, value, index) {
                            Some(mapped) => {
                                index += 1;
                                if !sender.send_value(mapped).await {
                                    return;
                                }
                            }
                            None => {
                                sender
                                    .send_error(StreamError::new(
                                        ErrorKind::Operator,
                                        "map function panicked",
                                    ))
                                    .await;
                                return;
                            }
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

fn apply<T, U, F: Fn(T, usize) -> U>(
    sink: &Arc<dyn FaultSink>,
    f: &F,
    value: T,
    index: usize,
) -> Option<U> {
    fault::guard(sink, "map", || f(value, index))
}

/// `filter(p)`: keeps values where `p(value, index)` is true; `index` counts inputs, not
/// outputs (spec.md §4.4).
pub fn filter<T, F>(p: F, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
    F: Fn(&T, usize) -> bool + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            let mut index = 0usize;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        let keep = p(&value, index);
                        index += 1;
                        if keep && !sender.send_value(value).await {
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
