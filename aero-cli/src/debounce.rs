use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Input side of a debounced channel
#[derive(Clone)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce task. Values pushed less than `delay` apart collapse
    /// into the last one, which is delivered on the returned receiver once
    /// input has been quiet for `delay`.
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>, JoinHandle<()>) {
        let (tx, input) = mpsc::unbounded_channel();
        let (output, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(delay, input, output));
        (Self { tx }, rx, handle)
    }

    /// Queue a value, superseding any value still waiting.
    /// Returns `false` once the task has stopped.
    pub fn push(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

async fn run<T>(delay: Duration, mut input: mpsc::UnboundedReceiver<T>, output: mpsc::UnboundedSender<T>) {
    while let Some(mut latest) = input.recv().await {
        loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(value) => latest = value,
                    None => {
                        // Input closed; the pending value still fires.
                        let _ = output.send(latest);
                        return;
                    }
                },
                _ = sleep(delay) => {
                    if output.send(latest).is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}
