//! Span instrumentation for the rest of the pipeline.

use mediator_core::{CancellationToken, MediatorError, Next, PipelineBehavior, Request};
use std::any::type_name;
use tracing::Instrument;

/// A behavior that runs the inner pipeline inside an `info` span.
///
/// The span is named `mediator.send` and records the behavior name and the
/// request type, so events emitted by inner behaviors and the handler are
/// attached to it.
#[derive(Debug, Clone, Copy)]
pub struct TracingBehavior {
    name: &'static str,
}

impl TracingBehavior {
    /// Create a new `TracingBehavior` with the given span label.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl<R: Request> PipelineBehavior<R> for TracingBehavior {
    async fn handle(
        &self,
        _request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, MediatorError> {
        let span = tracing::info_span!(
            "mediator.send",
            behavior = %self.name,
            request = %type_name::<R>(),
        );

        next.run(cancel).instrument(span).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediator_core::{DynPipelineBehavior, Pipeline, RequestHandler};
    use std::sync::Arc;

    struct Ping;

    impl Request for Ping {
        type Response = &'static str;
    }

    struct Pong;

    impl RequestHandler<Ping> for Pong {
        async fn handle(
            &self,
            _request: &Ping,
            _cancel: &CancellationToken,
        ) -> Result<&'static str, MediatorError> {
            Ok("pong")
        }
    }

    #[tokio::test]
    async fn test_tracing_behavior_passthrough() {
        let behaviors: Vec<Arc<dyn DynPipelineBehavior<Ping>>> =
            vec![Arc::new(TracingBehavior::new("outer")), Arc::new(TracingBehavior::new("inner"))];
        let pipeline = Pipeline::<Ping>::build(&Pong, &behaviors);

        let result = pipeline.run(&Ping, &CancellationToken::new()).await;
        assert_eq!(result.unwrap(), "pong");
    }
}
