//! Virtual-time scheduler and marble diagram DSL (spec.md §4.8, §5).
//!
//! There is no hand-rolled tick queue here: `tokio::time`'s paused clock already provides
//! "advance to the next pending timer, then drive everything newly runnable to quiescence,"
//! which is exactly what a marble-diagram scheduler needs. Tests enable it with
//! `#[tokio::test(start_paused = true)]`; production code is unaffected since [`SystemClock`]
//! behaves identically whether or not the surrounding runtime's clock is paused.

pub mod cold;
pub mod expect;
pub mod hot;
pub mod marble;

pub use cold::{cold, cold_with_clock};
pub use expect::{assert_marbles, record};
pub use hot::HotMarble;
pub use marble::{Marble, ParsedMarble, TimedMarble, FRAME};
