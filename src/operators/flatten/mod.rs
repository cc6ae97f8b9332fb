//! Flattening operators (spec.md §4.5): `merge_map`/`merge_all`, `concat_map`/`concat_all`,
//! `switch_map`/`switch_all`, `exhaust_map`/`exhaust_all`. The `*_all` forms operate on a stream
//! of streams directly and are expressed as their `*_map` counterpart with an identity projector.

mod exhaust_map;
mod merge_map;
mod switch_map;

pub use exhaust_map::exhaust_map;
pub use merge_map::{concat_map, merge_map};
pub use switch_map::switch_map;

use crate::stream::RxStream;
use crate::strategy::Strategy;

/// Merges a stream of streams, running up to `concurrency` of them at once.
pub fn merge_all<U>(
    concurrency: Option<usize>,
    strategy: Strategy,
) -> crate::error::Result<impl FnOnce(RxStream<RxStream<U>>) -> RxStream<U>>
where
    U: Send + 'static,
{
    merge_map(|inner, _index| inner, concurrency, strategy)
}

/// Concatenates a stream of streams, draining each fully before starting the next.
pub fn concat_all<U>(strategy: Strategy) -> impl FnOnce(RxStream<RxStream<U>>) -> RxStream<U>
where
    U: Send + 'static,
{
    concat_map(|inner, _index| inner, strategy)
}

/// Switches to each new inner stream as it arrives, cancelling the previous one.
pub fn switch_all<U>(strategy: Strategy) -> impl FnOnce(RxStream<RxStream<U>>) -> RxStream<U>
where
    U: Send + 'static,
{
    switch_map(|inner, _index| inner, strategy)
}

/// Runs the first inner stream to arrive, ignoring later ones until it completes.
pub fn exhaust_all<U>(strategy: Strategy) -> impl FnOnce(RxStream<RxStream<U>>) -> RxStream<U>
where
    U: Send + 'static,
{
    exhaust_map(|inner, _index| inner, strategy)
}
