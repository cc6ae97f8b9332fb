use crate::error::StreamError;
use crate::fault;
use crate::stream::RxStream;
use crate::strategy::Strategy;

/// `scan(f, seed)`: emits each running accumulation, one output per input (spec.md §4.4).
pub fn scan<T, A, F>(f: F, seed: A, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<A>
where
    T: Send + 'static,
    A: Clone + Send + 'static,
    F: Fn(A, T, usize) -> A + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        let sink = fault::default_sink();
        tokio::spawn(async move {
            let mut acc = seed;
            let mut index = 0usize;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        let next = acc.clone();
                        match fault::guard(&sink, "scan", || f(next, value, index)) {
                            Some(updated) => {
                                acc = updated.clone();
                                index += 1;
                                if !sender.send_value(updated).await {
                                    return;
                                }
                            }
                            None => {
                                sender
                                    .send_error(StreamError::new(
                                        crate::error::ErrorKind::Operator,
                                        "scan function panicked",
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

/// `scan_seedless(f)`: like [`scan`], but with no initial accumulator — the first input becomes
/// the accumulator and is emitted as-is, and `f` folds every input after it (spec.md §4.4, "if no
/// seed, first input is seed and emitted as-is").
pub fn scan_seedless<T, F>(f: F, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Clone + Send + 'static,
    F: Fn(T, T, usize) -> T + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        let sink = fault::default_sink();
        tokio::spawn(async move {
            let mut acc: Option<T> = None;
            let mut index = 0usize;
            loop {
                match input.read().await {
                    Ok(Some(value)) => match acc.take() {
                        None => {
                            acc = Some(value.clone());
                            index += 1;
                            if !sender.send_value(value).await {
                                return;
                            }
                        }
                        Some(current) => {
                            match fault::guard(&sink, "scan", || f(current, value, index)) {
                                Some(updated) => {
                                    acc = Some(updated.clone());
                                    index += 1;
                                    if !sender.send_value(updated).await {
                                        return;
                                    }
                                }
                                None => {
                                    sender
                                        .send_error(StreamError::new(
                                            crate::error::ErrorKind::Operator,
                                            "scan function panicked",
                                        ))
                                        .await;
                                    return;
                                }
                            }
                        }
                    },
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

/// `reduce(f, seed)`: like `scan`, but emits only the final accumulation when the source closes
/// (spec.md §4.4).
pub fn reduce<T, A, F>(f: F, seed: A, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<A>
where
    T: Send + 'static,
    A: Send + 'static,
    F: Fn(A, T, usize) -> A + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        let sink = fault::default_sink();
        tokio::spawn(async move {
            let mut acc = seed;
            let mut index = 0usize;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        match fault::guard(&sink, "reduce", move || f(acc, value, index)) {
                            Some(updated) => {
                                acc = updated;
                                index += 1;
                            }
                            None => {
                                sender
                                    .send_error(StreamError::new(
                                        crate::error::ErrorKind::Operator,
                                        "reduce function panicked",
                                    ))
                                    .await;
                                return;
                            }
                        }
                    }
                    Ok(None) => {
                        let _ = sender.send_value(acc).await;
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

/// `count(predicate)`: emits a single count of inputs matching `predicate` when the source
/// closes (spec.md §4.4). A `None` predicate counts every input.
pub fn count<T, F>(predicate: Option<F>, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<usize>
where
    T: Send + 'static,
    F: Fn(&T, usize) -> bool + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            let mut total = 0usize;
            let mut index = 0usize;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        let matches = predicate.as_ref().map(|p| p(&value, index)).unwrap_or(true);
                        if matches {
                            total += 1;
                        }
                        index += 1;
                    }
                    Ok(None) => {
                        let _ = sender.send_value(total).await;
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

/// `pairwise()`: emits `(previous, current)` for each input after the first (spec.md §4.4).
pub fn pairwise<T>(strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<(T, T)>
where
    T: Clone + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            let mut previous: Option<T> = None;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        if let Some(prev) = previous.take() {
                            if !sender.send_value((prev, value.clone())).await {
                                return;
                            }
                        }
                        previous = Some(value);
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

/// `distinct_until_changed()`: suppresses a value equal (via `PartialEq`) to its immediate
/// predecessor (spec.md §4.4).
pub fn distinct_until_changed<T>(strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: PartialEq + Clone + Send + 'static,
{
    distinct_until_changed_by(|a: &T, b: &T| a == b, strategy)
}

/// `distinct_until_changed(eq)`: like [`distinct_until_changed`], but with a caller-supplied
/// equality comparator in place of `PartialEq` (spec.md §4.4 `distinctUntilChanged(eq?)`).
pub fn distinct_until_changed_by<T, Cmp>(
    eq: Cmp,
    strategy: Strategy,
) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Clone + Send + 'static,
    Cmp: Fn(&T, &T) -> bool + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            let mut previous: Option<T> = None;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        let changed = previous.as_ref().map(|p| !eq(p, &value)).unwrap_or(true);
                        if changed {
                            previous = Some(value.clone());
                            if !sender.send_value(value).await {
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

/// `tap(f)`: runs `f(&value, index)` for its side effect, passing the value through unchanged.
/// A panic inside `f` is caught and routed to the fault sink rather than terminating the stream
/// (spec.md §4.4, "handler errors never propagate to the pipeline").
pub fn tap<T, F>(f: F, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<T>
where
    T: Send + 'static,
    F: Fn(&T, usize) + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        let sink = fault::default_sink();
        tokio::spawn(async move {
            let mut index = 0usize;
            loop {
                match input.read().await {
                    Ok(Some(value)) => {
                        fault::guard(&sink, "tap", || f(&value, index));
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
