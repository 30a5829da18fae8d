//! Single-slot delayed task with replace semantics.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs at most one pending job after a quiet period.
///
/// Scheduling a new job cancels the pending one. Once the delay has elapsed
/// the job is spawned as its own task, so a later [`cancel`](Self::cancel)
/// or drop only stops jobs that have not started yet.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending job with `job`, to run after the delay.
    pub fn schedule<F>(&mut self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(job);
        }));
    }

    /// Drop the pending job, if its delay has not elapsed yet.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while a job is waiting for its delay to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
