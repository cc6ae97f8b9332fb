use crate::clock::{Clock, SystemClock};
use crate::scheduler::marble::{self, Marble, FRAME};
use crate::stream::RxStream;
use crate::strategy::Strategy;
use crate::subject::Subject;
use std::sync::Arc;

/// A marble diagram that starts running immediately regardless of subscribers, like a hot
/// observable (spec.md §5 "hot observable"): a reader that subscribes after frame N has already
/// missed any events at or before it, same as subscribing late to a [`Subject`].
pub struct HotMarble<T> {
    subject: Subject<T>,
}

impl<T: Clone + Send + 'static> HotMarble<T> {
    pub fn new<F>(diagram: &str, to_value: F, strategy: Strategy) -> Self
    where
        F: FnMut(char) -> T,
    {
        Self::with_clock(diagram, to_value, Arc::new(SystemClock), strategy)
    }

    pub fn with_clock<F>(diagram: &str, to_value: F, clock: Arc<dyn Clock>, strategy: Strategy) -> Self
    where
        F: FnMut(char) -> T,
    {
        let parsed = marble::parse(diagram, to_value);
        let subject = Subject::new(strategy);
        let driver = subject.clone();
        tokio::spawn(async move {
            let mut elapsed = 0u64;
            for event in parsed.events {
                if event.frame > elapsed {
                    clock.sleep(FRAME * (event.frame - elapsed) as u32).await;
                    elapsed = event.frame;
                }
                match event.marble {
                    Marble::Next(value) => driver.next(value).await,
                    Marble::Complete => {
                        driver.complete();
                        return;
                    }
                    Marble::Error(error) => {
                        driver.error(error).await;
                        return;
                    }
                }
            }
        });
        Self { subject }
    }

    /// Subscribes at the current virtual time; any events already emitted before this call are
    /// not replayed.
    pub fn subscribe(&self) -> RxStream<T> {
        self.subject.subscribe()
    }
}
