//! Cooperative cancellation.

use std::sync::Arc;

use portable_atomic::{AtomicBool, Ordering};

/// A shared flag that asks a running search to stop.
///
/// Clones observe the same flag. Searches poll it at fixed checkpoints (once
/// per move attempt in the analyzer, once per attempt in the generator), so an
/// in-flight step always finishes before cancellation takes effect.
///
/// # Examples
///
/// ```
/// use linkmatch_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
