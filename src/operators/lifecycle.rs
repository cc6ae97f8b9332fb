//! Lifecycle hooks and error recovery (spec.md §4.4, §7): `on`, `catch_error`.

use crate::error::StreamError;
use crate::fault;
use crate::stream::RxStream;
use crate::strategy::Strategy;

/// Lifecycle events observable via [`on`]. `Complete`, `Cancel`, and `Error` are mutually
/// exclusive terminal callbacks — exactly one of them fires, never more than one (spec.md §4.4).
pub enum Event<'a, T> {
    Start,
    Value(&'a T),
    Error(&'a StreamError),
    Complete,
    Cancel,
}

/// `on(handler)`: invokes `handler` before the first read (`Start`), for every value, and for
/// exactly one terminal event — `Complete` on a clean upstream close, `Error` on an upstream
/// error, or `Cancel` when the output is dropped/cancelled downstream before upstream ever closes
/// (spec.md §4.4, Open Questions: cancel is distinguished from complete). None of this alters
/// what flows downstream. A panicking handler is caught and routed to the fault sink (spec.md §7
/// "Handler errors").
pub fn on<T, F>(handler: F, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
    F: Fn(Event<'_, T>) + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        let sink = fault::default_sink();
        tokio::spawn(async move {
            fault::guard(&sink, "on", || handler(Event::Start));
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        fault::guard(&sink, "on", || handler(Event::Value(&value)));
                        if !sender.send_value(value).await {
                            fault::guard(&sink, "on", || handler(Event::Cancel));
                            return;
                        }
                    }
                    Ok(None) => {
                        fault::guard(&sink, "on", || handler(Event::Complete));
                        return;
                    }
                    Err(error) => {
                        fault::guard(&sink, "on", || handler(Event::Error(&error)));
                        sender.send_error(error).await;
                        return;
                    }
                }
            }
        });
        output
    }
}

/// `catch_error(recover)`: on the first error, replaces the failing tail with the stream produced
/// by `recover(&error)`, matching spec.md §4.4's "substitute a replacement stream for the
/// remainder." Values observed before the error are untouched.
pub fn catch_error<T, F>(recover: F, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
    F: FnOnce(&StreamError) -> RxStream<T> + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        if !sender.send_value(value).await {
                            return;
                        }
                    }
                    Ok(None) => return,
                    Err(error) => {
                        let mut replacement = recover(&error);
                        loop {
                            match replacement.read().await {
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
            }
        });
        output
    }
}
