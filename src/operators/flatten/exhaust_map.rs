use crate::stream::RxStream;
use crate::strategy::Strategy;

/// `exhaust_map(project)`: projects an input to an inner stream only when no inner stream is
/// currently active; inputs that arrive while one is busy are dropped (spec.md §4.5).
pub fn exhaust_map<T, U, F>(project: F, strategy: Strategy) -> impl FnOnce(RxStream<T>) -> RxStream<U>
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
                                if inner.is_none() {
                                    inner = Some(project(value, index));
                                    index += 1;
                                }
                            }
                            Ok(None) => outer_done = true,
                            Err(error) => {
                                sender.send_error(error).await;
                                return;
                            }
                        }
                    }
                    read = async { inner.as_mut().unwrap().read().await }, if inner.is_some() => {
                        match read {
                            Ok(Some(value)) => {
                                if !sender.send_value(value).await {
                                    input.cancel("exhaust_map output closed");
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
