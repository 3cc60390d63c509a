//! The mediator: request dispatch and notification publishing.

use super::{
    publish::{FailFast, PublishStrategy},
    traits::{Publisher, Sender},
};
use mediator_core::{
    CancellationToken, HandlerProvider, MediatorError, Notification, Pipeline, Request,
};
use mediator_std::registry::{Registry, Scope};
use std::{any::type_name, future::Future, sync::Arc};

/// Routes requests to their handler and notifications to theirs.
///
/// The mediator holds no state of its own besides the provider it resolves
/// from and its publish strategy. It is cheap to clone and can be shared
/// across tasks.
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = Registry::builder();
/// builder.add_request_handler::<Ping, _>(PingHandler)?;
/// let mediator = Mediator::new(Arc::new(builder.build()));
///
/// let pong = mediator.send(Ping { message: "Hello".into() }, &CancellationToken::new()).await?;
/// assert_eq!(pong, "Pong: Hello");
/// ```
pub struct Mediator<P = Registry, S = FailFast> {
    provider: Arc<P>,
    strategy: S,
}

impl<P> Mediator<P> {
    /// Create a mediator resolving from `provider`, publishing with [`FailFast`].
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            strategy: FailFast,
        }
    }
}

impl<P, S> Mediator<P, S> {
    /// Replace the publish strategy.
    pub fn with_strategy<T>(self, strategy: T) -> Mediator<P, T> {
        Mediator {
            provider: self.provider,
            strategy,
        }
    }

    /// The provider handlers and behaviors are resolved from.
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// The publish strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}

impl<P, S> Mediator<P, S>
where
    P: HandlerProvider,
    S: PublishStrategy,
{
    /// Dispatch `request` through its pipeline to its single handler.
    ///
    /// Fails with [`MediatorError::HandlerNotFound`] before any behavior runs
    /// when no handler is bound to `R`. Failures raised by behaviors or the
    /// handler are returned unchanged. The token is passed through untouched.
    pub async fn send<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> Result<R::Response, MediatorError> {
        let Some(handler) = self.provider.request_handler::<R>() else {
            tracing::debug!(request = type_name::<R>(), "no handler registered for request");
            return Err(MediatorError::handler_not_found::<R>());
        };
        let behaviors = self.provider.behaviors::<R>();

        tracing::trace!(
            request = type_name::<R>(),
            behaviors = behaviors.len(),
            "dispatching request"
        );

        let pipeline = Pipeline::build(handler.as_ref(), &behaviors);
        pipeline.run(&request, cancel).await
    }

    /// Deliver `notification` to every handler bound to `N`, in registration
    /// order, according to the publish strategy.
    ///
    /// Having no handlers is not an error.
    pub async fn publish<N: Notification>(
        &self,
        notification: N,
        cancel: &CancellationToken,
    ) -> Result<(), MediatorError> {
        let handlers = self.provider.notification_handlers::<N>();

        tracing::trace!(
            notification = type_name::<N>(),
            handlers = handlers.len(),
            "publishing notification"
        );

        self.strategy.publish(&notification, &handlers, cancel).await
    }
}

impl<S: Clone> Mediator<Registry, S> {
    /// A mediator resolving from a new [`Scope`] of this registry.
    ///
    /// Scoped handlers and behaviors are shared by every call made through
    /// the returned mediator and its clones.
    pub fn create_scope(&self) -> Mediator<Scope, S> {
        Mediator {
            provider: Arc::new(self.provider.scope()),
            strategy: self.strategy.clone(),
        }
    }
}

impl<P, S: Clone> Clone for Mediator<P, S> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            strategy: self.strategy.clone(),
        }
    }
}

impl<P, S> Sender for Mediator<P, S>
where
    P: HandlerProvider,
    S: PublishStrategy,
{
    fn send<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, MediatorError>> + Send {
        Mediator::send(self, request, cancel)
    }
}

impl<P, S> Publisher for Mediator<P, S>
where
    P: HandlerProvider,
    S: PublishStrategy,
{
    fn publish<N: Notification>(
        &self,
        notification: N,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), MediatorError>> + Send {
        Mediator::publish(self, notification, cancel)
    }
}
