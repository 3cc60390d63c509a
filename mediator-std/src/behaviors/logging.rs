//! Logging behavior for request observation.

use mediator_core::{CancellationToken, MediatorError, Next, PipelineBehavior, Request};
use std::{any::type_name, time::Instant};

/// A behavior that logs every request passing through the pipeline.
///
/// Emits a `debug` event on entry and on success, and a `warn` event when
/// the rest of the pipeline fails. The result is passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBehavior {
    name: Option<&'static str>,
}

impl LoggingBehavior {
    /// Create a new logging behavior.
    pub const fn new() -> Self {
        Self { name: None }
    }

    /// Create a logging behavior that tags its events with `name`.
    pub const fn named(name: &'static str) -> Self {
        Self { name: Some(name) }
    }
}

impl<R: Request> PipelineBehavior<R> for LoggingBehavior {
    async fn handle(
        &self,
        _request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, MediatorError> {
        let request = type_name::<R>();
        let name = self.name.unwrap_or("pipeline");
        tracing::debug!(behavior = name, request, "handling request");

        let started = Instant::now();
        let result = next.run(cancel).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => tracing::debug!(behavior = name, request, ?elapsed, "request handled"),
            Err(error) => {
                tracing::warn!(behavior = name, request, ?elapsed, %error, "request failed")
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediator_core::{Pipeline, RequestHandler};
    use std::sync::Arc;

    struct Ping;

    impl Request for Ping {
        type Response = u8;
    }

    struct Answer(Result<u8, &'static str>);

    impl RequestHandler<Ping> for Answer {
        async fn handle(&self, _request: &Ping, _cancel: &CancellationToken) -> Result<u8, MediatorError> {
            self.0.map_err(MediatorError::handler)
        }
    }

    #[tokio::test]
    async fn test_passes_success_through() {
        let handler = Answer(Ok(7));
        let behaviors: Vec<Arc<dyn mediator_core::DynPipelineBehavior<Ping>>> =
            vec![Arc::new(LoggingBehavior::named("audit"))];
        let pipeline = Pipeline::<Ping>::build(&handler, &behaviors);

        let out = pipeline.run(&Ping, &CancellationToken::new()).await.unwrap();
        assert_eq!(out, 7);
    }

    #[tokio::test]
    async fn test_passes_failure_through() {
        let handler = Answer(Err("down"));
        let behaviors: Vec<Arc<dyn mediator_core::DynPipelineBehavior<Ping>>> =
            vec![Arc::new(LoggingBehavior::new())];
        let pipeline = Pipeline::<Ping>::build(&handler, &behaviors);

        let err = pipeline.run(&Ping, &CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "down");
    }
}
