//! Terminal consumers (spec.md §4.9, "Sinks (expanded)"): `to_vec`, `to_string`, `first`, `last`,
//! `drain`.

use crate::stream::RxStream;

/// Drains the stream into a `Vec`, in order. Identical to [`RxStream::collect`] — exposed as a
/// free function for symmetry with the other sinks, and because `pipe!`-style call sites read
/// more naturally as `sinks::to_vec(stream).await`.
pub async fn to_vec<T: Send + 'static>(stream: RxStream<T>) -> crate::error::Result<Vec<T>> {
    stream.collect().await
}

/// Drains a stream of `String`-like chunks and concatenates them.
pub async fn to_string<T>(stream: RxStream<T>) -> crate::error::Result<String>
where
    T: AsRef<str> + Send + 'static,
{
    let chunks = stream.collect().await?;
    let mut out = String::new();
    for chunk in chunks {
        out.push_str(chunk.as_ref());
    }
    Ok(out)
}

/// Resolves with the first value, cancelling the stream immediately after, or `None` if the
/// stream closed without ever emitting. Mirrors `take(1)` followed by `to_vec`, but without
/// buffering more than one value.
pub async fn first<T: Send + 'static>(mut stream: RxStream<T>) -> crate::error::Result<Option<T>> {
    match stream.read().await? {
        Some(value) => {
            stream.cancel("first() resolved");
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Drains the stream and resolves with its last value, or `None` if it closed without ever
/// emitting.
pub async fn last<T: Send + 'static>(stream: RxStream<T>) -> crate::error::Result<Option<T>> {
    let values = stream.collect().await?;
    Ok(values.into_iter().last())
}

/// Drains the stream for its side effects only, discarding every value.
pub async fn drain<T: Send + 'static>(mut stream: RxStream<T>) -> crate::error::Result<()> {
    while stream.read().await?.is_some() {}
    Ok(())
}
