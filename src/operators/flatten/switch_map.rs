use crate::stream::RxStream;
use crate::strategy::Strategy;

/// `switch_map(project)`: projects each input to an inner stream; a new input cancels whatever
/// inner stream is currently running and replaces it (spec.md §4.5).
pub fn switch_map<T, U, F>(project: F, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T, usize) -> RxStream<U> + Send + 'static,
{
    move |mut input| {
        let (sender, output) = RxStream::stage(strategy);
        tokio::spawn(async move {
            let mut inner: Option<RxStream<U>> = None;
            let mut index = 0usize;
            let mut outer_done = false;
            loop {
                if outer_done && inner.is_none() {
                    return;
                }
                tokio::select! {
                    biased;
                    read = input.read(), if !outer_done => {
                        match read {
                            Ok(Some(value)) => {
                                if let Some(mut old) = inner.take() {
                                    old.cancel("switch_map superseded");
                                }
                                inner = Some(project(value, index));
                                index += 1;
                            }
                            Ok(None) => outer_done = true,
                            Err(error) => {
                                if let Some(mut old) = inner.take() {
                                    old.cancel("switch_map outer errored");
                                }
                                sender.send_error(error).await;
                                return;
                            }
                        }
                    }
                    read = async { inner.as_mut().unwrap().read().await }, if inner.is_some() => {
                        match read {
                            Ok(Some(value)) => {
                                if !sender.send_value(value).await {
                                    if let Some(mut old) = inner.take() {
                                        old.cancel("switch_map output closed");
                                    }
                                    input.cancel("switch_map output closed");
                                    return;
                                }
                            }
                            Ok(None) => inner = None,
                            Err(error) => {
                                inner = None;
                                sender.send_error(error).await;
                                return;
                            }
                        }
                    }
                }
            }
        });
        output
    }
}
