//! Cancellation tokens for store writes that outlive their view.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked by a continuation before it writes to the store.
///
/// Cancelling does not abort the remote call in flight; it only marks the
/// result as stale so the controller drops it.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let held_by_task = token.clone();
        assert!(!held_by_task.is_cancelled());

        token.cancel();
        assert!(held_by_task.is_cancelled());
    }
}
