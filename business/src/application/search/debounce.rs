use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Delivers the last pushed value once no new value has arrived for `delay`.
///
/// Every push cancels the pending timer. Dropping the debouncer cancels it too.
pub struct Debouncer<T> {
    delay: Duration,
    on_fire: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, on_fire: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            on_fire: Arc::new(on_fire),
            pending: None,
        }
    }

    pub fn push(&mut self, value: T) {
        self.cancel();
        let on_fire = Arc::clone(&self.on_fire);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire(value);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
