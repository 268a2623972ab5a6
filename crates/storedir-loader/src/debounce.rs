//! Channel adapter that applies [`Debouncer`] to an async input stream.

use std::time::Duration;

use storedir_core::Debouncer;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Debounce every value received on `input`.
///
/// Returns a receiver that yields a value only after `interval` passes with
/// no newer input, skipping repeats of the last yielded value. When `input`
/// closes, a still-pending value is flushed once its interval elapses and
/// the output channel then closes.
pub fn debounced<T>(mut input: mpsc::Receiver<T>, interval: Duration) -> mpsc::Receiver<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut debouncer = Debouncer::new(interval);
        let mut input_open = true;

        loop {
            let deadline = debouncer.deadline();
            if !input_open && deadline.is_none() {
                break;
            }

            tokio::select! {
                received = input.recv(), if input_open => match received {
                    Some(value) => debouncer.push(value, Instant::now().into_std()),
                    None => input_open = false,
                },
                () = sleep_until_due(deadline) => {
                    if let Some(value) = debouncer.poll(Instant::now().into_std()) {
                        if tx.send(value).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }

        tracing::trace!("debounced input closed");
    });

    rx
}

async fn sleep_until_due(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(due) => tokio::time::sleep_until(Instant::from_std(due)).await,
        None => std::future::pending().await,
    }
}
