//! # Handlers
//!
//! Handlers are the terminal point of dispatch: the place where business
//! logic runs.
//!
//! - [`RequestHandler`] answers one request type. Exactly one may be bound
//!   per request type.
//! - [`NotificationHandler`] reacts to one notification type. Any number may
//!   be bound.
//!
//! Both traits use native `async fn` for static dispatch. Registries store
//! the object-safe [`DynRequestHandler`] / [`DynNotificationHandler`]
//! counterparts, which every handler implements through a blanket impl.

use crate::{
    cancel::CancellationToken,
    error::MediatorError,
    message::{Notification, Request},
};
use futures::future::BoxFuture;
use std::future::Future;

/// Produces the response for a request type.
///
/// # Example
///
/// ```rust
/// use mediator_core::{CancellationToken, MediatorError, Request, RequestHandler};
///
/// struct Ping {
///     message: String,
/// }
///
/// impl Request for Ping {
///     type Response = String;
/// }
///
/// struct PingHandler;
///
/// impl RequestHandler<Ping> for PingHandler {
///     async fn handle(
///         &self,
///         request: &Ping,
///         _cancel: &CancellationToken,
///     ) -> Result<String, MediatorError> {
///         Ok(format!("Pong: {}", request.message))
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle requests of type `{R}`",
    label = "missing `RequestHandler<{R}>` implementation",
    note = "Request handlers must implement `handle` for the request type `{R}`."
)]
pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    /// Handles the request.
    fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, MediatorError>> + Send;
}

/// Reacts to a notification type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle notifications of type `{N}`",
    label = "missing `NotificationHandler<{N}>` implementation",
    note = "Notification handlers must implement `handle` for the notification type `{N}`."
)]
pub trait NotificationHandler<N: Notification>: Send + Sync + 'static {
    /// Handles the notification.
    fn handle(
        &self,
        notification: &N,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), MediatorError>> + Send;
}

/// Object-safe version of [`RequestHandler`].
pub trait DynRequestHandler<R: Request>: Send + Sync + 'static {
    /// Handles the request (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<R::Response, MediatorError>>;
}

impl<R: Request, T: RequestHandler<R>> DynRequestHandler<R> for T {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<R::Response, MediatorError>> {
        Box::pin(self.handle(request, cancel))
    }
}

/// Object-safe version of [`NotificationHandler`].
pub trait DynNotificationHandler<N: Notification>: Send + Sync + 'static {
    /// Handles the notification (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        notification: &'a N,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), MediatorError>>;
}

impl<N: Notification, T: NotificationHandler<N>> DynNotificationHandler<N> for T {
    fn handle_dyn<'a>(
        &'a self,
        notification: &'a N,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), MediatorError>> {
        Box::pin(self.handle(notification, cancel))
    }
}
