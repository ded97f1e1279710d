//! Cooperative cancellation.
//!
//! The token is passed explicitly into the search loop and consulted at
//! trial boundaries only; no loop logic reads ambient global state. The
//! signal handler's sole job is to increment the token.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared interrupt counter. One request stops the search after the
/// current trial; the caller decides what a second request means.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    interrupts: Arc<AtomicUsize>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cancellation request and return how many had been
    /// recorded before this one.
    pub fn cancel(&self) -> usize {
        self.interrupts.fetch_add(1, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.interrupts.load(Ordering::SeqCst) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear() {
        assert!(!CancelToken::new().is_cancelled());
    }

    #[test]
    fn cancel_counts_prior_requests() {
        let token = CancelToken::new();
        assert_eq!(token.cancel(), 0);
        assert!(token.is_cancelled());
        assert_eq!(token.cancel(), 1);
    }

    #[test]
    fn clones_share_state() {
        let token = CancelToken::new();
        let seen_by_handler = token.clone();
        seen_by_handler.cancel();
        assert!(token.is_cancelled());
    }
}
