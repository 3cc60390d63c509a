//! Handler resolution contract.

use crate::{
    behavior::DynPipelineBehavior,
    handler::{DynNotificationHandler, DynRequestHandler},
    message::{Notification, Request},
};
use std::sync::Arc;

/// A source of handlers and behaviors.
///
/// The mediator resolves everything it needs for a call through this trait
/// and keeps the returned instances only for the duration of that call. How
/// instances are created, shared or cached is up to the implementor.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid HandlerProvider",
    label = "missing `HandlerProvider` implementation",
    note = "Implement `HandlerProvider` to resolve handlers and behaviors for the mediator."
)]
pub trait HandlerProvider: Send + Sync {
    /// The unique handler for request type `R`, if one is bound.
    fn request_handler<R: Request>(&self) -> Option<Arc<dyn DynRequestHandler<R>>>;

    /// The behaviors bound to request type `R`, in registration order.
    fn behaviors<R: Request>(&self) -> Vec<Arc<dyn DynPipelineBehavior<R>>>;

    /// The handlers bound to notification type `N`, in registration order.
    fn notification_handlers<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationHandler<N>>>;
}

impl<P: HandlerProvider> HandlerProvider for Arc<P> {
    fn request_handler<R: Request>(&self) -> Option<Arc<dyn DynRequestHandler<R>>> {
        (**self).request_handler::<R>()
    }

    fn behaviors<R: Request>(&self) -> Vec<Arc<dyn DynPipelineBehavior<R>>> {
        (**self).behaviors::<R>()
    }

    fn notification_handlers<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationHandler<N>>> {
        (**self).notification_handlers::<N>()
    }
}

impl<P: HandlerProvider> HandlerProvider for &P {
    fn request_handler<R: Request>(&self) -> Option<Arc<dyn DynRequestHandler<R>>> {
        (**self).request_handler::<R>()
    }

    fn behaviors<R: Request>(&self) -> Vec<Arc<dyn DynPipelineBehavior<R>>> {
        (**self).behaviors::<R>()
    }

    fn notification_handlers<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationHandler<N>>> {
        (**self).notification_handlers::<N>()
    }
}
