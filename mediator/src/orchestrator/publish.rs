//! Publish strategies.
//!
//! A strategy decides how a notification reaches its resolved handlers. The
//! handlers are always given in registration order.

use futures::future::try_join_all;
use mediator_core::{CancellationToken, DynNotificationHandler, MediatorError, Notification};
use std::{future::Future, sync::Arc};

/// Strategy for delivering a notification to a resolved set of handlers.
///
/// This abstraction allows different execution models (sequential,
/// concurrent, error-collecting) to be plugged into the [`Mediator`](super::Mediator).
pub trait PublishStrategy: Send + Sync {
    /// Deliver the notification to the handlers.
    fn publish<N: Notification>(
        &self,
        notification: &N,
        handlers: &[Arc<dyn DynNotificationHandler<N>>],
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), MediatorError>> + Send;
}

/// Sequential delivery that stops at the first failure.
///
/// Handlers after the failing one are not invoked. This is the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailFast;

impl PublishStrategy for FailFast {
    async fn publish<N: Notification>(
        &self,
        notification: &N,
        handlers: &[Arc<dyn DynNotificationHandler<N>>],
        cancel: &CancellationToken,
    ) -> Result<(), MediatorError> {
        for handler in handlers {
            handler.handle_dyn(notification, cancel).await?;
        }
        Ok(())
    }
}

/// Sequential delivery that runs every handler.
///
/// Fails with [`MediatorError::Aggregate`] holding every failure, in handler
/// order, if at least one handler failed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectErrors;

impl PublishStrategy for CollectErrors {
    async fn publish<N: Notification>(
        &self,
        notification: &N,
        handlers: &[Arc<dyn DynNotificationHandler<N>>],
        cancel: &CancellationToken,
    ) -> Result<(), MediatorError> {
        let mut errors = Vec::new();
        for handler in handlers {
            if let Err(error) = handler.handle_dyn(notification, cancel).await {
                errors.push(error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(failed = errors.len(), total = handlers.len(), "notification handlers failed");
            Err(MediatorError::Aggregate(errors))
        }
    }
}

/// Concurrent delivery: every handler is polled at the same time on the
/// calling task.
///
/// The first failure is returned and the remaining handler futures are
/// dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct Concurrent;

impl PublishStrategy for Concurrent {
    async fn publish<N: Notification>(
        &self,
        notification: &N,
        handlers: &[Arc<dyn DynNotificationHandler<N>>],
        cancel: &CancellationToken,
    ) -> Result<(), MediatorError> {
        try_join_all(
            handlers
                .iter()
                .map(|handler| handler.handle_dyn(notification, cancel)),
        )
        .await
        .map(|_| ())
    }
}
