use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Process-wide advisory counter so independent call sites can each mark
/// themselves busy without coordinating.
///
/// Not a lock: it never prevents concurrent work, it only reports that at
/// least one tracked operation is in flight. Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct BusySignal {
    pending: Arc<AtomicUsize>,
}

impl BusySignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.pending_count() > 0
    }

    pub fn start_loading(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }

    /// Saturating decrement: overlapping start/stop pairs from unrelated call
    /// sites must never drive the counter negative.
    pub fn stop_loading(&self) {
        let _ = self
            .pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                count.checked_sub(1)
            });
    }

    /// Wraps `task` in a start/stop pair. The decrement lives in a drop
    /// guard, so it fires on success, failure, panic, and when the returned
    /// future is dropped before completion.
    pub async fn with_scope<T>(&self, task: impl Future<Output = T>) -> T {
        let _guard = ScopeGuard::enter(self);
        task.await
    }
}

struct ScopeGuard {
    signal: BusySignal,
}

impl ScopeGuard {
    fn enter(signal: &BusySignal) -> Self {
        signal.start_loading();
        Self {
            signal: signal.clone(),
        }
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.signal.stop_loading();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn counter_saturates_at_zero() {
        let signal = BusySignal::new();
        signal.stop_loading();
        signal.stop_loading();
        assert_eq!(signal.pending_count(), 0);

        signal.start_loading();
        signal.stop_loading();
        signal.stop_loading();
        assert_eq!(signal.pending_count(), 0);
        assert!(!signal.is_busy());
    }

    #[test]
    fn overlapping_scopes_report_busy_until_all_finish() {
        let signal = BusySignal::new();
        signal.start_loading();
        signal.start_loading();
        assert_eq!(signal.pending_count(), 2);
        assert!(signal.is_busy());

        signal.stop_loading();
        assert!(signal.is_busy());
        signal.stop_loading();
        assert!(!signal.is_busy());
    }

    #[test]
    fn scope_releases_on_success() {
        let signal = BusySignal::new();
        let inner = signal.clone();
        let value = block_on(signal.with_scope(async move {
            assert!(inner.is_busy());
            7
        }));
        assert_eq!(value, 7);
        assert_eq!(signal.pending_count(), 0);
    }

    #[test]
    fn scope_releases_on_error() {
        let signal = BusySignal::new();
        let result: Result<(), &str> = block_on(signal.with_scope(async { Err("boom") }));
        assert!(result.is_err());
        assert_eq!(signal.pending_count(), 0);
    }

    #[test]
    fn scope_releases_when_future_is_dropped() {
        let signal = BusySignal::new();
        let scoped = signal.with_scope(futures::future::pending::<()>());
        {
            let mut pinned = Box::pin(scoped);
            let waker = futures::task::noop_waker();
            let mut context = std::task::Context::from_waker(&waker);
            assert!(pinned.as_mut().poll(&mut context).is_pending());
            assert_eq!(signal.pending_count(), 1);
        }
        assert_eq!(signal.pending_count(), 0);
    }
}
