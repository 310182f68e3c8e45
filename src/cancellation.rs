use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Advisory cancellation flag shared between the install coordinator and the
/// long-running host call it hands the token to.
///
/// Marking the token never stops anything by itself; the host implementation
/// is expected to poll [`CancellationToken::is_cancelled`] at safe points and
/// unwind on its own schedule.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());

        token.cancel();
        assert!(observer.is_cancelled());

        // marking again is a no-op
        token.cancel();
        assert!(observer.is_cancelled());
    }
}
