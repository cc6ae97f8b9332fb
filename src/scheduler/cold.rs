use crate::clock::{Clock, SystemClock};
use crate::scheduler::marble::{self, Marble, FRAME};
use crate::stream::RxStream;
use crate::strategy::Strategy;
use std::sync::Arc;

/// Builds a stream from a marble diagram: a fresh run of the schedule starts the moment this
/// function is called, same as any other source (spec.md §5 "cold observable").
pub fn cold<T, F>(diagram: &str, to_value: F, strategy: Strategy) -> RxStream<T>
where
    T: Send + 'static,
    F: FnMut(char) -> T,
{
    cold_with_clock(diagram, to_value, Arc::new(SystemClock), strategy)
}

pub fn cold_with_clock<T, F>(
    diagram: &str,
    to_value: F,
    clock: Arc<dyn Clock>,
    strategy: Strategy,
) -> RxStream<T>
where
    T: Send + 'static,
    F: FnMut(char) -> T,
{
    let parsed = marble::parse(diagram, to_value);
    let (sender, stream) = RxStream::stage(strategy);
    tokio::spawn(async move {
        let mut elapsed = 0u64;
        for event in parsed.events {
            if event.frame > elapsed {
                clock.sleep(FRAME * (event.frame - elapsed) as u32).await;
                elapsed = event.frame;
            }
            match event.marble {
                Marble::Next(value) => {
                    if !sender.send_value(value).await {
                        return;
                    }
                }
                Marble::Complete => return,
                Marble::Error(error) => {
                    sender.send_error(error).await;
                    return;
                }
            }
        }
    });
    stream
}
