//! Debounced auto-save scheduler
//!
//! A single replaceable timer: every edit re-arms it, and only the last
//! arm survives the quiet period. Firing runs the flush action. The
//! scheduler knows nothing about review state, so it can be driven by any
//! flush closure under test.

use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// The action to run when the quiet period elapses
pub type FlushFn = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Debounce timer with a manual bypass
pub struct AutoSaveScheduler {
    delay: Duration,
    flush: FlushFn,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AutoSaveScheduler {
    pub fn new(delay: Duration, flush: FlushFn) -> Self {
        Self {
            delay,
            flush,
            pending: Mutex::new(None),
        }
    }

    /// (Re)arm the timer. A previously armed timer is cancelled and
    /// replaced; accumulated edits ride the new deadline.
    pub fn arm(&self) {
        let delay = self.delay;
        let flush = Arc::clone(&self.flush);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("Auto-save timer fired");
            flush().await;
        });

        let mut pending = self.pending.lock().expect("scheduler lock poisoned");
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    /// Cancel the pending timer, if any
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().expect("scheduler lock poisoned");
        if let Some(task) = pending.take() {
            task.abort();
        }
    }

    /// Bypass the debounce: cancel the timer and flush immediately
    pub async fn fire_now(&self) {
        self.cancel();
        (self.flush)().await;
    }

    /// True while a timer is armed and has not fired
    pub fn is_armed(&self) -> bool {
        self.pending
            .lock()
            .expect("scheduler lock poisoned")
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_flush(counter: Arc<AtomicUsize>) -> FlushFn {
        Arc::new(move || {
            let counter = Arc::clone(&counter);
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_the_quiet_period() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = AutoSaveScheduler::new(Duration::from_millis(2000), counting_flush(Arc::clone(&counter)));

        scheduler.arm();
        tokio::time::sleep(Duration::from_millis(2100)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_resets_the_deadline() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = AutoSaveScheduler::new(Duration::from_millis(2000), counting_flush(Arc::clone(&counter)));

        scheduler.arm();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        scheduler.arm(); // edit before the deadline
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // 3s elapsed but never 2s of quiet
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_the_flush() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = AutoSaveScheduler::new(Duration::from_millis(2000), counting_flush(Arc::clone(&counter)));

        scheduler.arm();
        scheduler.cancel();
        tokio::time::sleep(Duration::from_millis(3000)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn fire_now_bypasses_the_debounce() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = AutoSaveScheduler::new(Duration::from_millis(2000), counting_flush(Arc::clone(&counter)));

        scheduler.arm();
        scheduler.fire_now().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        // The armed timer was cancelled, no second flush
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
