//! Operator framework and the transform/timing/slicing/lifecycle operator families (spec.md
//! §4.3, §4.4).
//!
//! Every operator here follows the same shape: take ownership of the upstream [`RxStream`],
//! allocate a fresh stage via [`RxStream::stage`], spawn one task that drains the upstream and
//! feeds the new stage's [`StageSender`](crate::stream::StageSender), and return the new
//! stream. Backpressure is free: `send_value` suspends the driving task exactly when the
//! downstream reader is behind, which is what propagates a slow consumer back through the whole
//! pipeline (spec.md §6 "Concurrency & Resource Model").

mod accumulate;
pub mod flatten;
mod lifecycle;
mod map_filter;
mod slicing;
mod timing;

pub use accumulate::{
    count, distinct_until_changed, distinct_until_changed_by, pairwise, reduce, scan,
    scan_seedless, tap,
};
pub use lifecycle::{catch_error, on, Event};
pub use map_filter::{filter, map};
pub use slicing::{buffer, ignore_elements, skip, skip_while, take, take_until};
pub use timing::{
    debounce_time, debounce_time_with_clock, delay, delay_with_clock, timeout, timeout_with_clock,
};
