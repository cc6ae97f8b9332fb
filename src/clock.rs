//! Injectable time source, adapted from the teacher's `time::clock` module.
//!
//! Production code always uses [`SystemClock`], which delegates to `tokio::time`. Tests instead
//! run inside a `#[tokio::test(start_paused = true)]` runtime and pass `SystemClock` unchanged —
//! `tokio::time::sleep` transparently observes the paused/advancing clock, so no separate
//! `MockClock` is needed here (see SPEC_FULL.md §4.8's Design Notes for why this supersedes the
//! teacher's hand-rolled `MockClock`).

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub type Sleep = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Abstracts "what time is it" / "wait this long" so timing operators never call
/// `tokio::time::*` directly, keeping them swappable in principle (e.g. for a future hand-rolled
/// virtual clock) without touching operator bodies.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> tokio::time::Instant;

    fn sleep(&self, duration: Duration) -> Sleep;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> tokio::time::Instant {
        tokio::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> Sleep {
        Box::pin(tokio::time::sleep(duration))
    }
}
