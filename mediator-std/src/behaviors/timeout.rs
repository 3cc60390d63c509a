//! Timeout behavior for time-limited execution.

use mediator_core::{CancellationToken, MediatorError, Next, PipelineBehavior, Request};
use std::{any::type_name, time::Duration};
use tokio::time::timeout;

/// A behavior that fails with [`MediatorError::Timeout`] when the rest of
/// the pipeline does not complete within its duration.
///
/// The inner future is dropped on expiry. Requires a tokio runtime with the
/// time driver enabled.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutBehavior {
    duration: Duration,
}

impl TimeoutBehavior {
    /// Create a new timeout behavior.
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Create a timeout behavior with a duration in seconds.
    pub const fn secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Create a timeout behavior with a duration in milliseconds.
    pub const fn millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// The configured duration.
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl<R: Request> PipelineBehavior<R> for TimeoutBehavior {
    async fn handle(
        &self,
        _request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, MediatorError> {
        match timeout(self.duration, next.run(cancel)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    request = type_name::<R>(),
                    duration = ?self.duration,
                    "request timed out"
                );
                Err(MediatorError::Timeout(self.duration))
            }
        }
    }
}
