//! # Pipeline behaviors
//!
//! A behavior is middleware wrapped around request dispatch. It receives the
//! request, the cancellation token and a [`Next`] continuation standing for
//! the rest of the pipeline, and decides what to do with it:
//!
//! - call `next` once (observe or transform the result),
//! - call it several times (retries),
//! - never call it (short-circuit: its own return value becomes the response).
//!
//! Behaviors are bound per request type and run in registration order, the
//! first registered being the outermost layer.

use crate::{
    cancel::CancellationToken, error::MediatorError, message::Request, pipeline::Next,
};
use futures::future::BoxFuture;
use std::future::Future;

/// Middleware wrapped around the handler of request type `R`.
///
/// # Example
///
/// ```rust
/// use mediator_core::{CancellationToken, MediatorError, Next, PipelineBehavior, Request};
///
/// struct Ping;
///
/// impl Request for Ping {
///     type Response = String;
/// }
///
/// struct Shout;
///
/// impl PipelineBehavior<Ping> for Shout {
///     async fn handle(
///         &self,
///         _request: &Ping,
///         cancel: &CancellationToken,
///         next: Next<'_, Ping>,
///     ) -> Result<String, MediatorError> {
///         let response = next.run(cancel).await?;
///         Ok(response.to_uppercase())
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `PipelineBehavior` for `{R}`",
    label = "missing `PipelineBehavior<{R}>` implementation",
    note = "Behaviors must implement `handle` for the request type `{R}`."
)]
pub trait PipelineBehavior<R: Request>: Send + Sync + 'static {
    /// Runs this layer of the pipeline.
    fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> impl Future<Output = Result<R::Response, MediatorError>> + Send;
}

/// Object-safe version of [`PipelineBehavior`].
pub trait DynPipelineBehavior<R: Request>: Send + Sync + 'static {
    /// Runs this layer of the pipeline (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
        next: Next<'a, R>,
    ) -> BoxFuture<'a, Result<R::Response, MediatorError>>;
}

impl<R: Request, T: PipelineBehavior<R>> DynPipelineBehavior<R> for T {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
        next: Next<'a, R>,
    ) -> BoxFuture<'a, Result<R::Response, MediatorError>> {
        Box::pin(self.handle(request, cancel, next))
    }
}
