//! Debounced task scheduling
//!
//! Each key holds at most one pending delayed task. Scheduling a new task
//! for a key aborts the pending one, so only the last task of a burst runs.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

struct Pending {
    ticket: u64,
    handle: JoinHandle<()>,
}

type PendingMap<K> = Arc<Mutex<HashMap<K, Pending>>>;

/// Per-key cancellable delayed tasks
pub struct Debouncer<K> {
    delay: Duration,
    pending: PendingMap<K>,
    next_ticket: AtomicU64,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_ticket: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` once `delay` has passed without another call for `key`
    ///
    /// Once the delay elapses the task leaves the pending table before it
    /// starts, so a task that has begun running is never aborted.
    pub fn schedule<F>(&self, key: K, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let delay = self.delay;
        let pending = self.pending.clone();
        let task_key = key.clone();

        // Hold the lock across spawn and insert so the timer task always
        // finds its own entry
        let mut map = lock(&self.pending);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut map = lock(&pending);
                match map.get(&task_key) {
                    Some(entry) if entry.ticket == ticket => {
                        map.remove(&task_key);
                    }
                    _ => return,
                }
            }
            task.await;
        });

        if let Some(previous) = map.insert(key, Pending { ticket, handle }) {
            previous.handle.abort();
        }
    }

    /// Drop the pending task for `key`, if any
    pub fn cancel(&self, key: &K) -> bool {
        match lock(&self.pending).remove(key) {
            Some(previous) => {
                previous.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Number of keys with a task still waiting for its delay
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, pending) in lock(&self.pending).drain() {
            pending.handle.abort();
        }
    }
}

fn lock<K>(pending: &Mutex<HashMap<K, Pending>>) -> MutexGuard<'_, HashMap<K, Pending>> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
