//! Error types for the mediator.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`MediatorError`] - Errors surfaced by `send` and `publish`
//! - [`RegistrationError`] - Errors raised while populating a registry

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while dispatching a request or publishing a notification.
#[derive(Error, Debug)]
pub enum MediatorError {
    /// No handler is bound for the request type.
    #[error("handler not found for request `{request}` (response `{response}`)")]
    HandlerNotFound {
        /// Type name of the request.
        request: &'static str,
        /// Type name of the declared response.
        response: &'static str,
    },

    /// A handler or behavior failed. The inner error is carried unchanged.
    #[error(transparent)]
    Handler(BoxError),

    /// A handler or behavior observed cancellation and aborted.
    #[error("operation was cancelled")]
    Cancelled,

    /// The wrapped pipeline did not complete in time.
    #[error("pipeline timed out after {0:?}")]
    Timeout(Duration),

    /// Several notification handlers failed.
    #[error("{} notification handler(s) failed", .0.len())]
    Aggregate(Vec<MediatorError>),
}

impl MediatorError {
    /// Builds a [`MediatorError::HandlerNotFound`] for the request type `R`.
    pub fn handler_not_found<R: crate::Request>() -> Self {
        MediatorError::HandlerNotFound {
            request: std::any::type_name::<R>(),
            response: std::any::type_name::<R::Response>(),
        }
    }

    /// Wraps an arbitrary error raised by a handler or behavior.
    pub fn handler<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        MediatorError::Handler(err.into())
    }

    /// Returns `true` for [`MediatorError::HandlerNotFound`].
    pub fn is_handler_not_found(&self) -> bool {
        matches!(self, MediatorError::HandlerNotFound { .. })
    }

    /// Returns `true` for [`MediatorError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, MediatorError::Cancelled)
    }

    /// Downcasts the error carried by [`MediatorError::Handler`].
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            MediatorError::Handler(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl From<BoxError> for MediatorError {
    fn from(err: BoxError) -> Self {
        MediatorError::Handler(err)
    }
}

/// Errors raised at registration time. These never occur on the call path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The registration arguments cannot be interpreted.
    #[error("invalid registration arguments: {0}")]
    InvalidArguments(String),

    /// A request type already has a handler.
    #[error("a handler for request `{request}` is already registered")]
    DuplicateHandler {
        /// Type name of the request.
        request: &'static str,
    },
}
