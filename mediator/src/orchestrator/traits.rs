use mediator_core::{CancellationToken, MediatorError, Notification, Request};
use std::future::Future;

/// Sends a request to its single handler through the request's pipeline.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot send requests",
    label = "missing `Sender` implementation",
    note = "Use `Mediator`, or implement `Sender` to route requests to their handlers."
)]
pub trait Sender: Send + Sync {
    /// Dispatch `request` and return its handler's response.
    fn send<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, MediatorError>> + Send;
}

/// Publishes a notification to every handler bound to its type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot publish notifications",
    label = "missing `Publisher` implementation",
    note = "Use `Mediator`, or implement `Publisher` to fan notifications out to their handlers."
)]
pub trait Publisher: Send + Sync {
    /// Deliver `notification` to all of its handlers.
    fn publish<N: Notification>(
        &self,
        notification: N,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), MediatorError>> + Send;
}
