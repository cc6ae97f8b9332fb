//! Expectation assertions for marble-driven tests (spec.md §5, §8 "Testable Properties").

use crate::clock::Clock;
use crate::scheduler::marble::{Marble, TimedMarble, FRAME};
use crate::stream::RxStream;
use std::sync::Arc;

/// Drains `stream`, stamping each event with the virtual frame (relative to `start`) it arrived
/// on. The final element is always `Complete` or `Error`.
pub async fn record<T>(mut stream: RxStream<T>, clock: Arc<dyn Clock>, start: tokio::time::Instant) -> Vec<TimedMarble<T>>
where
    T: Send + 'static,
{
    let mut out = Vec::new();
    loop {
        let frame = frame_since(&clock, start);
        match stream.read().await {
            Ok(Some(value)) => out.push(TimedMarble {
                frame,
                marble: Marble::Next(value),
            }),
            Ok(None) => {
                out.push(TimedMarble {
                    frame,
                    marble: Marble::Complete,
                });
                return out;
            }
            Err(error) => {
                out.push(TimedMarble {
                    frame,
                    marble: Marble::Error(error),
                });
                return out;
            }
        }
    }
}

fn frame_since(clock: &Arc<dyn Clock>, start: tokio::time::Instant) -> u64 {
    (clock.now().saturating_duration_since(start).as_nanos() / FRAME.as_nanos()) as u64
}

/// Asserts `actual` matches the diagram-parsed `expected` sequence frame-for-frame.
pub fn assert_marbles<T>(actual: &[TimedMarble<T>], expected: &[TimedMarble<T>])
where
    T: PartialEq + std::fmt::Debug,
{
    assert_eq!(
        actual.len(),
        expected.len(),
        "marble sequence length mismatch: actual {:?} vs expected {:?}",
        actual,
        expected
    );
    for (a, e) in actual.iter().zip(expected) {
        assert_eq!(a, e, "marble event mismatch");
    }
}
