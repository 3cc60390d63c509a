//! Cooperative cancellation.

use crate::error::MediatorError;
use std::sync::Arc;
use tokio::sync::watch;

/// A cancellation signal threaded through a single `send` or `publish` call.
///
/// The mediator never cancels on its own and never inspects the token; it
/// only passes it along. Handlers and behaviors decide whether to observe it.
///
/// Clones share the same state: cancelling one cancels all of them.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    state: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            state: Arc::new(tx),
        }
    }

    /// Signal cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Returns `Err(MediatorError::Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<(), MediatorError> {
        if self.is_cancelled() {
            Err(MediatorError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Completes when cancellation is requested.
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
