use std::{
    collections::HashMap,
    future::Future,
    hash::Hash,
    sync::{Arc, Mutex},
};

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};

/// Outcome future every joined caller awaits; settlement is broadcast by
/// cloning, so `T: Clone`.
pub type SharedOutcome<T> = Shared<BoxFuture<'static, T>>;

/// Keyed request deduplication: at most one in-progress future per key, with
/// late arrivals attaching as extra waiters on the same outcome.
///
/// The slot is claimed synchronously, before the underlying future is first
/// polled, so callers racing through `run` before any suspension point still
/// produce exactly one underlying operation. The slot is cleared inside the
/// wrapped future, before settlement becomes observable, which keeps
/// "running" and "has an outcome" consistent for every caller.
#[derive(Clone)]
pub struct SingleFlight<K, T> {
    slots: Arc<Mutex<HashMap<K, SharedOutcome<T>>>>,
}

impl<K, T> Default for SingleFlight<K, T> {
    fn default() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K, T> SingleFlight<K, T>
where
    K: Eq + Hash + Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the in-flight operation for `key`, or starts a new one built by
    /// `make`. Returns the shared outcome plus whether this call started it.
    ///
    /// `make` runs only when a new operation starts, while the slot lock is
    /// held; it must construct the future without polling it.
    pub fn run<F, Fut>(&self, key: K, make: F) -> (SharedOutcome<T>, bool)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let mut slots = self.slots.lock().unwrap();
        if let Some(existing) = slots.get(&key) {
            return (existing.clone(), false);
        }

        let future = make();
        let cleanup_slots = Arc::clone(&self.slots);
        let cleanup_key = key.clone();
        let shared = async move {
            let outcome = future.await;
            cleanup_slots.lock().unwrap().remove(&cleanup_key);
            outcome
        }
        .boxed()
        .shared();

        slots.insert(key, shared.clone());
        (shared, true)
    }

    pub fn is_running(&self, key: &K) -> bool {
        self.slots.lock().unwrap().contains_key(key)
    }
}
