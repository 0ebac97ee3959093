// src/scheduler.rs
//
// Background polling. A `PollTask` owns a spawned tokio task and publishes every
// result on a watch channel; it stops when cancelled or dropped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::Backend;
use crate::directory::pending_count;

pub struct PollTask<T> {
    latest: watch::Receiver<T>,
    handle: JoinHandle<()>,
}

impl<T> PollTask<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Runs `job` right away and then once per `every`. The job receives the last
    /// published value, so it can keep it when a poll fails.
    pub fn spawn<F, Fut>(every: Duration, initial: T, mut job: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = watch::channel(initial);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let previous = tx.borrow().clone();
                let next = job(previous).await;
                if tx.send(next).is_err() {
                    debug!("Poll task has no subscribers left; stopping");
                    break;
                }
            }
        });
        PollTask { latest: rx, handle }
    }

    pub fn latest(&self) -> T {
        self.latest.borrow().clone()
    }

    /// A receiver that wakes on every published value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.latest.clone()
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Drop for PollTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Polls the request queue and publishes how many requests are still pending.
pub fn pending_request_badge<B>(backend: Arc<B>, every: Duration) -> PollTask<usize>
where
    B: Backend + ?Sized + 'static,
{
    PollTask::spawn(every, 0, move |previous| {
        let backend = Arc::clone(&backend);
        async move {
            match backend.requests().await {
                Ok(requests) => pending_count(&requests),
                Err(e) => {
                    warn!("Error polling pending requests: {}", e);
                    previous
                }
            }
        }
    })
}
