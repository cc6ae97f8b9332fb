//! Edge-case behaviors spec.md §6/§8 calls out explicitly: `take(0)`, over-skipping, construction
//! errors, and debounce's close-mid-window flush.

use reactive_core::error::ErrorKind;
use reactive_core::{combine, operators, sinks, sources, Strategy};
use std::time::Duration;

fn strategy() -> Strategy {
    Strategy::default()
}

/// `take(0)` must close without ever reading from upstream — proven here by handing it a source
/// whose only value would fail the test if observed.
#[tokio::test]
async fn take_zero_closes_without_reading_upstream() {
    let source = sources::throw_error::<i32>(
        reactive_core::error::StreamError::construction("upstream should never be polled"),
        strategy(),
    );
    let taken = source.pipe(operators::take(0, strategy()));
    let values = sinks::to_vec(taken).await.unwrap();
    assert!(values.is_empty());
}

#[tokio::test]
async fn skip_past_end_emits_nothing() {
    let source = sources::of(vec![1, 2, 3], strategy());
    let skipped = source.pipe(operators::skip(10, strategy()));
    let values = sinks::to_vec(skipped).await.unwrap();
    assert!(values.is_empty());
}

#[tokio::test]
async fn take_more_than_available_emits_everything() {
    let source = sources::of(vec![1, 2, 3], strategy());
    let taken = source.pipe(operators::take(100, strategy()));
    let values = sinks::to_vec(taken).await.unwrap();
    assert_eq!(values, vec![1, 2, 3]);
}

#[tokio::test]
async fn merge_map_zero_concurrency_is_a_construction_error() {
    let result = operators::flatten::merge_map(
        |value: i32, _index| sources::of(vec![value], strategy()),
        Some(0),
        strategy(),
    );
    let error = result.err().expect("concurrency of 0 must be rejected at construction");
    assert_eq!(error.kind(), ErrorKind::Construction);
}

#[tokio::test]
async fn debounce_time_zero_duration_is_a_construction_error() {
    let result = operators::debounce_time::<i32>(Duration::ZERO, strategy());
    let error = result.err().expect("zero duration must be rejected at construction");
    assert_eq!(error.kind(), ErrorKind::Construction);
}

/// `combineLatest([])` is a construction-time error surfaced through the output stream, since
/// `combine_latest` itself is a plain function rather than an operator constructor returning
/// `Result` (see DESIGN.md's Open Question decision).
#[tokio::test]
async fn combine_latest_of_no_sources_errors() {
    let combined = combine::combine_latest::<i32>(Vec::new(), strategy());
    let result = sinks::to_vec(combined).await;
    let error = result.err().expect("combine_latest([]) must error, not hang or emit nothing");
    assert_eq!(error.kind(), ErrorKind::Construction);
}

/// A source that closes while a debounce window is still pending flushes the buffered value
/// immediately rather than discarding it (spec.md §8's boundary behaviors).
#[tokio::test(start_paused = true)]
async fn debounce_time_flushes_pending_value_on_close() {
    let source = reactive_core::scheduler::cold("a|", |c| c, strategy());
    let debounced = source.pipe(
        operators::debounce_time(Duration::from_secs(60), strategy())
            .expect("non-zero duration"),
    );
    let values = sinks::to_vec(debounced).await.unwrap();
    assert_eq!(values, vec!['a']);
}

#[tokio::test]
async fn skip_while_inclusive_of_first_failing_predicate() {
    let source = sources::of(vec![1, 2, 3, 4, 1], strategy());
    let skipped = source.pipe(operators::skip_while(|x: &i32, _| *x < 3, strategy()));
    let values = sinks::to_vec(skipped).await.unwrap();
    assert_eq!(values, vec![3, 4, 1]);
}

#[tokio::test]
async fn buffer_flushes_short_final_batch() {
    let source = sources::of(vec![1, 2, 3, 4, 5], strategy());
    let buffered = source.pipe(operators::buffer(2, strategy()));
    let values = sinks::to_vec(buffered).await.unwrap();
    assert_eq!(values, vec![vec![1, 2], vec![3, 4], vec![5]]);
}
