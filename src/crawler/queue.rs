use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::{Semaphore, watch};

use super::error::QueueError;

/// A URL waiting to be fetched, tagged with the depth it was queued at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub url: String,
    pub depth: usize,
}

impl WorkItem {
    pub fn new(url: impl Into<String>, depth: usize) -> Self {
        Self { url: url.into(), depth }
    }
}

/// FIFO shared between the coordinator and the worker pool.
///
/// Every pushed item counts as unfinished until a worker calls
/// [`WorkQueue::task_done`] for it; [`WorkQueue::join`] resolves once that
/// count is back to zero. `pop` parks on a semaphore holding one permit per
/// queued item, and closing the semaphore is the shutdown signal.
pub struct WorkQueue<T> {
    items: Mutex<VecDeque<T>>,
    available: Semaphore,
    unfinished: watch::Sender<usize>,
}

impl<T: Send> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Semaphore::new(0),
            unfinished: watch::Sender::new(0),
        }
    }

    fn lock_items(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, item: T) -> Result<(), QueueError> {
        if self.available.is_closed() {
            return Err(QueueError::Closed);
        }
        self.lock_items().push_back(item);
        // counted before the permit is released so join() can't observe zero
        // while the item is still in flight
        self.unfinished.send_modify(|n| *n += 1);
        self.available.add_permits(1);
        Ok(())
    }

    /// Waits for the next item. Returns `None` once the queue is closed.
    pub async fn pop(&self) -> Option<T> {
        let permit = self.available.acquire().await.ok()?;
        permit.forget();
        self.lock_items().pop_front()
    }

    /// Marks one previously popped item as fully processed.
    pub fn task_done(&self) -> Result<(), QueueError> {
        let mut underflow = false;
        self.unfinished.send_if_modified(|n| {
            if *n == 0 {
                underflow = true;
                false
            } else {
                *n -= 1;
                true
            }
        });
        if underflow {
            Err(QueueError::TaskDoneUnderflow)
        } else {
            Ok(())
        }
    }

    /// Resolves once every pushed item has been marked done.
    pub async fn join(&self) {
        let mut rx = self.unfinished.subscribe();
        // the sender lives in `self`, so this can't observe a closed channel
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    /// Wakes every parked `pop` with `None`. Further pushes are rejected.
    pub fn close(&self) {
        self.available.close();
    }

    pub fn is_closed(&self) -> bool {
        self.available.is_closed()
    }

    pub fn len(&self) -> usize {
        self.lock_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn unfinished(&self) -> usize {
        *self.unfinished.borrow()
    }
}

impl<T: Send> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
