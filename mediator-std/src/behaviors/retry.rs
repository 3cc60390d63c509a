//! Retry behavior.

use mediator_core::{CancellationToken, MediatorError, Next, PipelineBehavior, Request};
use std::any::type_name;

/// A behavior that re-runs the rest of the pipeline when it fails.
///
/// By default only [`MediatorError::Handler`] failures are retried; handler
/// lookups, cancellation and timeouts are returned at once. Retrying stops as
/// soon as the cancellation token is cancelled. There is no delay between
/// attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryBehavior {
    max_attempts: u32,
    retry_if: fn(&MediatorError) -> bool,
}

fn is_handler_failure(error: &MediatorError) -> bool {
    matches!(error, MediatorError::Handler(_))
}

impl RetryBehavior {
    /// Create a retry behavior making at most `max_attempts` attempts in total.
    ///
    /// A value of zero is treated as one attempt.
    pub const fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            retry_if: is_handler_failure,
        }
    }

    /// Replace the predicate deciding which failures are retried.
    pub const fn retry_if(mut self, predicate: fn(&MediatorError) -> bool) -> Self {
        self.retry_if = predicate;
        self
    }

    /// Maximum number of attempts.
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl<R: Request> PipelineBehavior<R> for RetryBehavior {
    async fn handle(
        &self,
        _request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, MediatorError> {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match next.run(cancel).await {
                Ok(response) => return Ok(response),
                Err(error)
                    if attempt < max_attempts
                        && !cancel.is_cancelled()
                        && (self.retry_if)(&error) =>
                {
                    tracing::debug!(
                        request = type_name::<R>(),
                        attempt,
                        max_attempts,
                        %error,
                        "retrying request"
                    );
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediator_core::{DynPipelineBehavior, Pipeline, RequestHandler};
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    struct Flaky;

    impl Request for Flaky {
        type Response = u32;
    }

    /// Fails until `succeed_on` attempts have been made.
    struct FlakyHandler {
        calls: AtomicU32,
        succeed_on: u32,
        error: fn() -> MediatorError,
    }

    impl FlakyHandler {
        fn new(succeed_on: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                succeed_on,
                error: || MediatorError::handler("transient"),
            }
        }
    }

    impl RequestHandler<Flaky> for FlakyHandler {
        async fn handle(
            &self,
            _request: &Flaky,
            _cancel: &CancellationToken,
        ) -> Result<u32, MediatorError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= self.succeed_on {
                Ok(call)
            } else {
                Err((self.error)())
            }
        }
    }

    fn retrying(max_attempts: u32) -> Vec<Arc<dyn DynPipelineBehavior<Flaky>>> {
        vec![Arc::new(RetryBehavior::new(max_attempts))]
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let handler = FlakyHandler::new(3);
        let behaviors = retrying(5);
        let pipeline = Pipeline::<Flaky>::build(&handler, &behaviors);

        let out = pipeline.run(&Flaky, &CancellationToken::new()).await.unwrap();
        assert_eq!(out, 3);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let handler = FlakyHandler::new(10);
        let behaviors = retrying(2);
        let pipeline = Pipeline::<Flaky>::build(&handler, &behaviors);

        let err = pipeline.run(&Flaky, &CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "transient");
        assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_does_not_retry_cancellation() {
        let handler = FlakyHandler {
            error: || MediatorError::Cancelled,
            ..FlakyHandler::new(10)
        };
        let behaviors = retrying(5);
        let pipeline = Pipeline::<Flaky>::build(&handler, &behaviors);

        let err = pipeline.run(&Flaky, &CancellationToken::new()).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stops_when_token_is_cancelled() {
        let handler = FlakyHandler::new(10);
        let behaviors = retrying(5);
        let pipeline = Pipeline::<Flaky>::build(&handler, &behaviors);
        let cancel = CancellationToken::new();
        cancel.cancel();

        pipeline.run(&Flaky, &cancel).await.unwrap_err();
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_custom_predicate_and_zero_attempts() {
        let handler = FlakyHandler::new(2);
        let behaviors: Vec<Arc<dyn DynPipelineBehavior<Flaky>>> =
            vec![Arc::new(RetryBehavior::new(0).retry_if(|_| true))];
        let pipeline = Pipeline::<Flaky>::build(&handler, &behaviors);

        pipeline.run(&Flaky, &CancellationToken::new()).await.unwrap_err();
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }
}
