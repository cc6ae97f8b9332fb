//! Round-trip laws and quantified invariants from spec.md §8 ("Testable Properties").
//!
//! `proptest` has no native async support, so each property spins its own current-thread runtime
//! rather than relying on `#[tokio::test]`.

use proptest::prelude::*;
use reactive_core::{operators, sinks, sources, Strategy};

fn strategy() -> Strategy {
    Strategy::default()
}

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build a runtime for a property test")
        .block_on(fut)
}

proptest! {
    /// `toArray(from(xs)) == xs`: a source built from a `Vec` yields that `Vec` back unchanged.
    #[test]
    fn round_trip_of_then_to_vec(xs in prop::collection::vec(any::<i32>(), 0..64)) {
        let expected = xs.clone();
        let actual = block_on(async {
            let source = sources::of(xs, strategy());
            sinks::to_vec(source).await.unwrap()
        });
        prop_assert_eq!(actual, expected);
    }

    /// `pipe(S, map(f), map(g)) == pipe(S, map(|x| g(f(x))))`: mapping is compositional.
    #[test]
    fn map_composes(xs in prop::collection::vec(any::<i32>(), 0..32)) {
        let f = |x: i32, _: usize| x.wrapping_add(1);
        let g = |x: i32, _: usize| x.wrapping_mul(2);

        let (composed, fused) = block_on(async {
            let composed_source = sources::of(xs.clone(), strategy());
            let composed = composed_source
                .pipe(operators::map(f, strategy()))
                .pipe(operators::map(g, strategy()));
            let composed = sinks::to_vec(composed).await.unwrap();

            let fused_source = sources::of(xs, strategy());
            let fused = fused_source.pipe(operators::map(move |x, i| g(f(x, i), i), strategy()));
            let fused = sinks::to_vec(fused).await.unwrap();

            (composed, fused)
        });
        prop_assert_eq!(composed, fused);
    }

    /// `pipe(S, take(n), take(m))` emits exactly `min(n, m, |S|)` values.
    #[test]
    fn nested_take_emits_the_minimum(
        xs in prop::collection::vec(any::<i32>(), 0..32),
        n in 0usize..16,
        m in 0usize..16,
    ) {
        let expected_len = xs.len().min(n).min(m);
        let actual = block_on(async {
            let source = sources::of(xs, strategy());
            let piped = source
                .pipe(operators::take(n, strategy()))
                .pipe(operators::take(m, strategy()));
            sinks::to_vec(piped).await.unwrap()
        });
        prop_assert_eq!(actual.len(), expected_len);
    }

    /// `scan(+, 0)` followed by `last` agrees with `reduce(+, 0)`. Restricted to non-empty
    /// sources: `reduce` always emits its seed once even for an empty source, while `scan` (one
    /// output per input) emits nothing for one — the two only agree past the first element.
    #[test]
    fn scan_last_agrees_with_reduce(xs in prop::collection::vec(any::<i32>(), 1..32)) {
        let (scanned_last, reduced) = block_on(async {
            let scan_source = sources::of(xs.clone(), strategy());
            let scanned = scan_source.pipe(operators::scan(
                |acc: i64, x: i32, _| acc.wrapping_add(x as i64),
                0i64,
                strategy(),
            ));
            let scanned_last = sinks::last(scanned).await.unwrap();

            let reduce_source = sources::of(xs, strategy());
            let reduced = reduce_source.pipe(operators::reduce(
                |acc: i64, x: i32, _| acc.wrapping_add(x as i64),
                0i64,
                strategy(),
            ));
            let reduced = sinks::to_vec(reduced).await.unwrap().pop();

            (scanned_last, reduced)
        });
        prop_assert_eq!(scanned_last, reduced);
    }

    /// A pipeline terminates (closes) if and only if its source terminates — here witnessed by a
    /// finite source always producing a finite, fully-drained output.
    #[test]
    fn pure_pipeline_terminates_with_its_source(xs in prop::collection::vec(any::<i32>(), 0..64)) {
        let len = xs.len();
        let actual = block_on(async {
            let source = sources::of(xs, strategy());
            let piped = source.pipe(operators::map(|x, _| x, strategy()));
            sinks::to_vec(piped).await.unwrap()
        });
        prop_assert_eq!(actual.len(), len);
    }

    /// `concat_map`'s output is the source-order concatenation of each projected inner stream.
    #[test]
    fn concat_map_preserves_source_order(xs in prop::collection::vec(1i32..4, 0..16)) {
        let expected: Vec<i32> = xs.iter().flat_map(|&n| vec![n; n as usize]).collect();
        let actual = block_on(async {
            let source = sources::of(xs, strategy());
            let flattened = source.pipe(operators::flatten::concat_map(
                |n, _index| sources::of(vec![n; n as usize], strategy()),
                strategy(),
            ));
            sinks::to_vec(flattened).await.unwrap()
        });
        prop_assert_eq!(actual, expected);
    }
}

/// A bounded strategy's channel capacity never exceeds its configured `high_water_mark`; a slow
/// reader stalls the producer rather than letting the buffer grow past it. Not expressed as a
/// `proptest!` property since it asserts on channel *capacity*, a fixed construction-time
/// quantity, rather than on varying input data.
#[test]
fn backpressure_never_exceeds_high_water_mark() {
    let hwm = 4usize;
    block_on(async {
        let strategy = Strategy::new(hwm);
        let (sender, mut stream) = reactive_core::stream::RxStream::<i32>::stage(strategy);
        for i in 0..hwm as i32 {
            assert!(sender.send_value(i).await, "channel should accept up to its high water mark");
        }
        // The channel is now full; a further send must not silently exceed the configured bound.
        let send_blocks = tokio::time::timeout(std::time::Duration::from_millis(50), sender.send_value(hwm as i32)).await;
        assert!(send_blocks.is_err(), "producer should stall once the buffer is at its high water mark");
        for i in 0..hwm as i32 {
            assert_eq!(stream.read().await.unwrap(), Some(i));
        }
    });
}
